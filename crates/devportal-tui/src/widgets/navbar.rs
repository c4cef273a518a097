//! Navigation bar
//!
//! App title on one side, language and session on the other. Sides swap
//! for right-to-left languages.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use devportal_core::{Localizer, Session};

use crate::theme::{palette, styles};

pub struct Navbar<'a> {
    localizer: &'a Localizer,
    session: &'a Session,
}

impl<'a> Navbar<'a> {
    pub fn new(localizer: &'a Localizer, session: &'a Session) -> Self {
        Self { localizer, session }
    }

    fn title(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            self.localizer.translate("app_title"),
            styles::accent_bold(),
        )];
        if self.session.test_mode {
            spans.push(Span::styled(" [TEST]", styles::status_yellow()));
        }
        Line::from(spans)
    }

    fn controls(&self) -> Line<'static> {
        let t = |key| self.localizer.translate(key);
        let mut spans = Vec::new();
        if self.session.authenticated {
            spans.push(Span::styled(self.session.phone.clone(), styles::text_secondary()));
            spans.push(Span::raw("  "));
            spans.push(Span::styled("^O ", styles::keybinding()));
            spans.push(Span::styled(t("sign_out"), styles::text_muted()));
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled("^L ", styles::keybinding()));
        spans.push(Span::styled(
            format!("{}: {}", t("language"), t("current_language")),
            styles::text_muted(),
        ));
        spans.push(Span::raw("  "));
        spans.push(Span::styled("^Q ", styles::keybinding()));
        spans.push(Span::styled(t("quit"), styles::text_muted()));
        Line::from(spans)
    }
}

impl Widget for Navbar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let row = Rect { height: 1, ..inner };
        let controls = self.controls();
        let controls_width = controls.width() as u16;

        if self.localizer.is_rtl() {
            let [left, right] =
                Layout::horizontal([Constraint::Length(controls_width), Constraint::Min(0)])
                    .areas(row);
            Paragraph::new(controls).render(left, buf);
            Paragraph::new(self.title())
                .alignment(Alignment::Right)
                .render(right, buf);
        } else {
            let [left, right] =
                Layout::horizontal([Constraint::Min(0), Constraint::Length(controls_width)])
                    .areas(row);
            Paragraph::new(self.title()).render(left, buf);
            Paragraph::new(controls)
                .alignment(Alignment::Right)
                .render(right, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use devportal_core::Language;

    #[test]
    fn test_navbar_shows_title_and_language() {
        let mut term = TestTerminal::with_size(100, 3);
        let localizer = Localizer::default();
        let session = Session::default();

        term.render_widget(Navbar::new(&localizer, &session), term.area());

        assert!(term.buffer_contains("Device Service Portal"));
        assert!(term.buffer_contains("Language: EN"));
        assert!(!term.buffer_contains("Sign out"));
    }

    #[test]
    fn test_navbar_shows_session_controls() {
        let mut term = TestTerminal::with_size(120, 3);
        let localizer = Localizer::default();
        let mut session = Session::default();
        session.authenticate("0501234567");

        term.render_widget(Navbar::new(&localizer, &session), term.area());

        assert!(term.buffer_contains("0501234567"));
        assert!(term.buffer_contains("Sign out"));
    }

    #[test]
    fn test_navbar_marks_test_mode() {
        let mut term = TestTerminal::with_size(100, 3);
        let localizer = Localizer::default();
        let session = Session::for_device(Some("1234"));

        term.render_widget(Navbar::new(&localizer, &session), term.area());

        assert!(term.buffer_contains("[TEST]"));
    }

    #[test]
    fn test_navbar_title_right_aligned_in_hebrew() {
        let mut term = TestTerminal::with_size(100, 3);
        let localizer = Localizer::new(Language::Hebrew);
        let session = Session::default();

        term.render_widget(Navbar::new(&localizer, &session), term.area());

        let line = term.line_containing("פורטל").expect("title rendered");
        // Title ends just inside the right border
        let inside = line.trim_end().trim_end_matches('│').trim_end();
        assert!(inside.ends_with("מכשירים"), "line was: {line}");
    }
}
