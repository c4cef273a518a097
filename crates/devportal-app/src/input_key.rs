//! Keyboard input independent of the terminal library.
//!
//! The TUI converts crossterm key events into [`InputKey`] so the portal
//! engine never depends on crossterm.

/// Abstract key press delivered to the TEA loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character
    Char(char),
    /// Character with Ctrl held (Ctrl+C, Ctrl+L, ...)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,
}

impl InputKey {
    /// Digit value of a plain character key
    pub fn digit(&self) -> Option<char> {
        match self {
            InputKey::Char(c) if c.is_ascii_digit() => Some(*c),
            _ => None,
        }
    }
}
