//! Semantic style builders for the portal theme.

use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use devportal_app::snackbar::Severity;

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Status styles ---
pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - focused field or selected item
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Snackbar colors per severity
pub fn severity(severity: Severity) -> Style {
    let bg = match severity {
        Severity::Info => palette::STATUS_BLUE,
        Severity::Success => palette::STATUS_GREEN,
        Severity::Warning => palette::STATUS_YELLOW,
        Severity::Error => palette::STATUS_RED,
    };
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

/// Text alignment for the active reading direction
pub fn alignment(rtl: bool) -> Alignment {
    if rtl {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_follows_direction() {
        assert_eq!(alignment(true), Alignment::Right);
        assert_eq!(alignment(false), Alignment::Left);
    }

    #[test]
    fn test_error_severity_is_red() {
        assert_eq!(severity(Severity::Error).bg, Some(palette::STATUS_RED));
        assert_eq!(severity(Severity::Info).bg, Some(palette::STATUS_BLUE));
    }
}
