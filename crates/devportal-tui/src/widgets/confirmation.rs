//! Ticket confirmation view

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use devportal_core::{Localizer, TicketConfirmation};

use super::modal_overlay::centered_rect;
use crate::theme::{palette, styles};

const WIDTH: u16 = 56;
const HEIGHT: u16 = 14;

/// Shows what was submitted; with no payload only a placeholder is drawn
pub struct ConfirmationView<'a> {
    confirmation: Option<&'a TicketConfirmation>,
    localizer: &'a Localizer,
}

impl<'a> ConfirmationView<'a> {
    pub fn new(confirmation: Option<&'a TicketConfirmation>, localizer: &'a Localizer) -> Self {
        Self {
            confirmation,
            localizer,
        }
    }

    fn row(&self, key: &str, value: &str) -> Line<'static> {
        let value = if value.trim().is_empty() {
            self.localizer.translate("not_available")
        } else {
            value
        };
        Line::from(vec![
            Span::styled(
                format!("{}: ", self.localizer.translate(key)),
                styles::text_secondary(),
            ),
            Span::styled(value.to_string(), styles::text_primary()),
        ])
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let t = |key| self.localizer.translate(key);
        let mut lines = vec![
            Line::from(Span::styled(t("ticket_opened"), styles::status_green())),
            Line::default(),
        ];

        match self.confirmation {
            Some(c) => {
                let ticket_id = c.ticket_id.as_deref().unwrap_or("");
                lines.push(self.row("ticket_number", ticket_id));
                lines.push(self.row("name", &c.name));
                lines.push(self.row(
                    "call_type",
                    c.call_type.map(|ct| ct.label(self.localizer)).unwrap_or(""),
                ));
                lines.push(self.row("device_serial_number", &c.serial_number));
                lines.push(self.row("subject", &c.title));
                lines.push(self.row(
                    "urgency",
                    c.urgency.map(|u| u.label(self.localizer)).unwrap_or(""),
                ));
                if c.offline {
                    lines.push(Line::default());
                    lines.push(Line::from(Span::styled(
                        t("offline_mode"),
                        styles::status_yellow(),
                    )));
                }
            }
            None => lines.push(Line::from(Span::styled(
                t("not_available"),
                styles::text_muted(),
            ))),
        }

        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Enter ", styles::keybinding()),
            Span::styled(t("back"), styles::text_secondary()),
        ]));
        lines
    }
}

impl Widget for ConfirmationView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let panel = centered_rect(WIDTH, HEIGHT, area);
        let block = styles::glass_block(true).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(panel);
        block.render(panel, buf);

        Paragraph::new(self.lines())
            .alignment(styles::alignment(self.localizer.is_rtl()))
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use devportal_client::test_utils::complete_draft;

    #[test]
    fn test_renders_submitted_fields() {
        let mut term = TestTerminal::new();
        let confirmation =
            TicketConfirmation::from_draft(&complete_draft(), Some("D-42".into()), false);
        let localizer = Localizer::default();

        term.render_widget(
            ConfirmationView::new(Some(&confirmation), &localizer),
            term.area(),
        );

        assert!(term.buffer_contains("Service call opened successfully"));
        assert!(term.buffer_contains("Ticket Number: D-42"));
        assert!(term.buffer_contains("Name: Dana Levi"));
        assert!(term.buffer_contains("Call Type: Malfunction"));
        assert!(term.buffer_contains("Serial Number: AU125668790"));
        assert!(term.buffer_contains("Urgency: Urgent"));
        assert!(!term.buffer_contains("Offline mode"));
    }

    #[test]
    fn test_missing_ticket_id_and_offline_note() {
        let mut term = TestTerminal::new();
        let confirmation = TicketConfirmation::from_draft(&complete_draft(), None, true);
        let localizer = Localizer::default();

        term.render_widget(
            ConfirmationView::new(Some(&confirmation), &localizer),
            term.area(),
        );

        assert!(term.buffer_contains("Ticket Number: N/A"));
        assert!(term.buffer_contains("Offline mode"));
    }

    #[test]
    fn test_placeholder_without_payload() {
        let mut term = TestTerminal::new();
        let localizer = Localizer::default();

        term.render_widget(ConfirmationView::new(None, &localizer), term.area());

        assert!(term.buffer_contains("Service call opened successfully"));
        assert!(term.buffer_contains("N/A"));
        assert!(!term.buffer_contains("Ticket Number"));
    }
}
