//! Modal yes/no dialog rendered over the current view

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use devportal_app::confirm_dialog::ConfirmDialogState;
use devportal_core::Localizer;

use super::modal_overlay::{centered_rect, dim_background, render_shadow};
use crate::theme::styles;

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 7;

/// Option hotkeys in display order; the first option confirms
const HOTKEYS: [&str; 2] = ["y", "n"];

pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
    localizer: &'a Localizer,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDialogState, localizer: &'a Localizer) -> Self {
        Self { state, localizer }
    }

    fn options_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (label, _)) in self.state.options.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("    "));
            }
            let key = HOTKEYS.get(i).copied().unwrap_or("?");
            spans.push(Span::styled(format!("[{key}] "), styles::keybinding()));
            let style = if i == 0 {
                styles::status_red()
            } else {
                styles::text_primary()
            };
            spans.push(Span::styled(self.localizer.translate(label), style));
        }
        Line::from(spans)
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        dim_background(buf, area);

        let dialog = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
        Clear.render(dialog, buf);
        render_shadow(buf, dialog);

        let block = styles::modal_block(self.localizer.translate(self.state.title));
        let inner = block.inner(dialog);
        block.render(dialog, buf);

        let [message_area, _, options_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.localizer.translate(self.state.message))
            .style(styles::text_primary())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(message_area, buf);

        Paragraph::new(self.options_line())
            .alignment(Alignment::Center)
            .render(options_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use devportal_core::Language;

    #[test]
    fn test_delete_image_dialog_renders() {
        let mut term = TestTerminal::new();
        let state = ConfirmDialogState::delete_image(0);
        let localizer = Localizer::default();

        term.render_widget(ConfirmDialog::new(&state, &localizer), term.area());

        assert!(term.buffer_contains("Delete Image"));
        assert!(term.buffer_contains("Are you sure you want to delete this image?"));
        assert!(term.buffer_contains("[y] Delete"));
        assert!(term.buffer_contains("[n] Cancel"));
    }

    #[test]
    fn test_dialog_is_localized() {
        let mut term = TestTerminal::new();
        let state = ConfirmDialogState::delete_image(0);
        let localizer = Localizer::new(Language::Hebrew);

        term.render_widget(ConfirmDialog::new(&state, &localizer), term.area());

        assert!(term.buffer_contains("מחיקת תמונה"));
        assert!(term.buffer_contains("ביטול"));
    }
}
