//! One-row notification bar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Paragraph, Widget},
};

use devportal_app::snackbar::Snackbar;
use devportal_core::Localizer;

use crate::theme::styles;

pub struct SnackbarBar<'a> {
    snackbar: &'a Snackbar,
    localizer: &'a Localizer,
}

impl<'a> SnackbarBar<'a> {
    pub fn new(snackbar: &'a Snackbar, localizer: &'a Localizer) -> Self {
        Self {
            snackbar,
            localizer,
        }
    }
}

impl Widget for SnackbarBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(format!(" {} ", self.snackbar.text(self.localizer)))
            .style(styles::severity(self.snackbar.severity))
            .alignment(styles::alignment(self.localizer.is_rtl()))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use crate::theme::palette;
    use devportal_app::snackbar::Severity;
    use std::time::{Duration, Instant};

    #[test]
    fn test_renders_text_with_severity_color() {
        let mut term = TestTerminal::with_size(80, 1);
        let snackbar = Snackbar::new(
            "selected_images",
            Severity::Info,
            Instant::now(),
            Duration::from_secs(5),
        )
        .with_arg("count", 5)
        .with_arg("total", 7);
        let localizer = Localizer::default();

        term.render_widget(SnackbarBar::new(&snackbar, &localizer), term.area());

        assert!(term.buffer_contains("Selected only 5 images out of 7"));
        assert_eq!(term.buffer()[(0, 0)].bg, palette::STATUS_BLUE);
    }

    #[test]
    fn test_error_is_red() {
        let mut term = TestTerminal::with_size(40, 1);
        let snackbar = Snackbar::new(
            "sending_error",
            Severity::Error,
            Instant::now(),
            Duration::from_secs(5),
        );
        let localizer = Localizer::default();

        term.render_widget(SnackbarBar::new(&snackbar, &localizer), term.area());

        assert!(term.buffer_contains("Error sending the call"));
        assert_eq!(term.buffer()[(39, 0)].bg, palette::STATUS_RED);
    }
}
