//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Navigation bar (title, language, session)
    pub navbar: Rect,

    /// Main content for the current screen
    pub body: Rect,

    /// Snackbar row, empty when no snackbar is showing
    pub footer: Rect,
}

/// Split the screen into navbar, body and footer
pub fn create(area: Rect, with_snackbar: bool) -> ScreenAreas {
    let footer_height = if with_snackbar { 1 } else { 0 };

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(footer_height),
    ])
    .split(area);

    ScreenAreas {
        navbar: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}

/// Split the device body into the device card and the ticket form
pub fn device_columns(body: Rect, card_height: u16) -> (Rect, Rect) {
    let chunks = Layout::vertical([Constraint::Length(card_height), Constraint::Min(5)]).split(body);
    (chunks[0], chunks[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_without_snackbar() {
        let layout = create(Rect::new(0, 0, 80, 24), false);
        assert_eq!(layout.navbar.height, 3);
        assert_eq!(layout.body.height, 21);
        assert_eq!(layout.body.y, 3);
        assert_eq!(layout.footer.height, 0);
    }

    #[test]
    fn test_layout_with_snackbar() {
        let layout = create(Rect::new(0, 0, 80, 24), true);
        assert_eq!(layout.body.height, 20);
        assert_eq!(layout.footer.height, 1);
        assert_eq!(layout.footer.y, 23);
    }

    #[test]
    fn test_device_columns_split() {
        let (card, form) = device_columns(Rect::new(0, 3, 80, 30), 10);
        assert_eq!(card.height, 10);
        assert_eq!(form.y, 13);
        assert_eq!(form.height, 20);
    }
}
