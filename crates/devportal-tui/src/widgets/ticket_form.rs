//! Service call form

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use devportal_app::ticket_form::{FormField, TicketForm};
use devportal_core::{Localizer, MAX_IMAGES};

use crate::theme::{palette, styles};

const CURSOR: &str = "█";

pub struct TicketFormView<'a> {
    form: &'a TicketForm,
    localizer: &'a Localizer,
}

impl<'a> TicketFormView<'a> {
    pub fn new(form: &'a TicketForm, localizer: &'a Localizer) -> Self {
        Self { form, localizer }
    }

    fn t(&self, key: &str) -> &'static str {
        self.localizer.translate(key)
    }

    fn label(&self, field: Option<FormField>, key: &str, required: bool) -> Vec<Span<'static>> {
        let focused = field.is_some_and(|f| f == self.form.focus);
        let marker = if focused { "▶ " } else { "  " };
        let star = if required { " *" } else { "" };
        let style = if focused {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };
        vec![
            Span::styled(marker, styles::accent()),
            Span::styled(format!("{}{}: ", self.t(key), star), style),
        ]
    }

    fn text_row(&self, field: FormField, key: &str, value: &str, required: bool) -> Line<'static> {
        let mut spans = self.label(Some(field), key, required);
        spans.push(Span::styled(value.to_string(), styles::text_primary()));
        if self.form.focus == field && !self.form.submitting {
            spans.push(Span::styled(CURSOR, styles::accent()));
        }
        Line::from(spans)
    }

    fn choice_row(&self, field: FormField, key: &str, choice: Option<&'static str>) -> Line<'static> {
        let mut spans = self.label(Some(field), key, true);
        let style = if self.form.focus == field {
            styles::focused_selected()
        } else {
            styles::text_primary()
        };
        let value = choice.unwrap_or_else(|| self.t("select"));
        spans.push(Span::styled(format!("< {value} >"), style));
        Line::from(spans)
    }

    fn description_rows(&self) -> Vec<Line<'static>> {
        let field = FormField::Description;
        let mut rows = vec![Line::from(self.label(Some(field), "description", true))];
        let text = &self.form.draft.description;
        let parts: Vec<&str> = text.split('\n').collect();
        let last = parts.len().saturating_sub(1);
        for (i, part) in parts.iter().enumerate() {
            let mut spans = vec![
                Span::raw("    "),
                Span::styled(part.to_string(), styles::text_primary()),
            ];
            if i == last && self.form.focus == field && !self.form.submitting {
                spans.push(Span::styled(CURSOR, styles::accent()));
            }
            rows.push(Line::from(spans));
        }
        rows
    }

    fn image_rows(&self) -> Vec<Line<'static>> {
        let images = &self.form.draft.images;
        let mut rows = Vec::new();

        let mut header = self.label(Some(FormField::Images), "images", false);
        header.push(Span::styled(
            format!("{}/{}", images.len(), MAX_IMAGES),
            styles::text_muted(),
        ));
        if self.form.loading_images {
            header.push(Span::raw("  "));
            header.push(Span::styled(self.t("loading"), styles::status_yellow()));
        }
        rows.push(Line::from(header));

        let list_focused = self.form.focus == FormField::Images;
        for (i, image) in images.iter().enumerate() {
            let selected = list_focused && i == self.form.selected_image;
            let style = if selected {
                styles::focused_selected()
            } else {
                styles::text_primary()
            };
            rows.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(format!("{}. {}", i + 1, image.file_name), style),
            ]));
        }
        if list_focused && !images.is_empty() {
            rows.push(Line::from(vec![
                Span::raw("    "),
                Span::styled("Del ", styles::keybinding()),
                Span::styled(self.t("delete"), styles::text_muted()),
            ]));
        }
        rows
    }

    fn submit_row(&self) -> Line<'static> {
        if self.form.submitting {
            return Line::from(vec![
                Span::raw("  "),
                Span::styled(self.t("sending"), styles::status_yellow()),
            ]);
        }
        let focused = self.form.focus == FormField::Submit;
        let style = if focused {
            styles::focused_selected()
        } else {
            styles::accent_bold()
        };
        Line::from(vec![
            Span::styled(if focused { "▶ " } else { "  " }, styles::accent()),
            Span::styled(format!("[ {} ]", self.t("submit")), style),
            Span::raw("  "),
            Span::styled("^S", styles::keybinding()),
        ])
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let draft = &self.form.draft;
        let mut lines = vec![
            self.text_row(FormField::Name, "name", &draft.name, true),
            {
                let mut spans = self.label(None, "phone", true);
                spans.push(Span::styled(draft.phone.clone(), styles::text_muted()));
                Line::from(spans)
            },
            self.text_row(FormField::Email, "email", &draft.email, false),
            self.text_row(FormField::Title, "subject", &draft.title, true),
            self.choice_row(
                FormField::CallType,
                "call_type",
                draft.call_type.map(|c| c.label(self.localizer)),
            ),
            self.choice_row(
                FormField::Urgency,
                "urgency",
                draft.urgency.map(|u| u.label(self.localizer)),
            ),
        ];
        lines.extend(self.description_rows());
        lines.push(self.text_row(
            FormField::ImagePath,
            "add_images",
            &self.form.image_path_input,
            false,
        ));
        lines.extend(self.image_rows());
        lines.push(Line::default());
        lines.push(self.submit_row());
        lines
    }

    /// Row of the focused field, for scrolling
    fn focus_row(&self, lines: &[Line<'_>]) -> usize {
        lines
            .iter()
            .position(|line| {
                line.spans
                    .first()
                    .is_some_and(|span| span.content.starts_with('▶'))
            })
            .unwrap_or(0)
    }
}

impl Widget for TicketFormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ", self.t("open_service_call"));
        let block = styles::glass_block(true)
            .title(Span::styled(title, styles::accent_bold()))
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let lines = self.lines();
        let focus = self.focus_row(&lines);
        let visible = inner.height as usize;
        let scroll = focus.saturating_sub(visible.saturating_sub(2)) as u16;

        Paragraph::new(lines)
            .alignment(styles::alignment(self.localizer.is_rtl()))
            .scroll((scroll, 0))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use devportal_client::test_utils::test_record;
    use devportal_core::{CallType, ImageAttachment};

    fn form() -> TicketForm {
        TicketForm::new(&test_record("SN-1"))
    }

    fn render(form: &TicketForm) -> TestTerminal {
        let mut term = TestTerminal::with_size(80, 30);
        let localizer = Localizer::default();
        term.render_widget(TicketFormView::new(form, &localizer), term.area());
        term
    }

    #[test]
    fn test_empty_form_shows_fields_and_phone() {
        let term = render(&form());

        assert!(term.buffer_contains("Open Service Call"));
        assert!(term.buffer_contains("▶ Name *:"));
        assert!(term.buffer_contains("Phone *: 0501234567"));
        assert!(term.buffer_contains("Call Type *: < Select >"));
        assert!(term.buffer_contains("[ Send ]"));
    }

    #[test]
    fn test_typed_values_and_choice_labels() {
        let mut form = form();
        form.draft.name = "Dana".into();
        form.draft.call_type = Some(CallType::Calibration);
        form.draft.description = "line one\nline two".into();
        form.focus = FormField::Description;

        let term = render(&form);

        assert!(term.buffer_contains("Name *: Dana"));
        assert!(term.buffer_contains("< Calibration >"));
        assert!(term.buffer_contains("line one"));
        assert!(term.buffer_contains("line two█"));
        assert!(term.buffer_contains("▶ Description *:"));
    }

    #[test]
    fn test_images_listed_with_count() {
        let mut form = form();
        form.draft.images = vec![
            ImageAttachment::new("a.jpg", vec![1]),
            ImageAttachment::new("b.png", vec![2]),
        ];
        form.focus = FormField::Images;
        form.selected_image = 1;

        let term = render(&form);

        assert!(term.buffer_contains("Images: 2/5"));
        assert!(term.buffer_contains("1. a.jpg"));
        assert!(term.buffer_contains("2. b.png"));
        assert!(term.buffer_contains("Del Delete"));
    }

    #[test]
    fn test_submitting_shows_sending() {
        let mut form = form();
        form.submitting = true;

        let term = render(&form);

        assert!(term.buffer_contains("Sending..."));
        assert!(!term.buffer_contains("[ Send ]"));
    }

    #[test]
    fn test_focus_scrolls_into_view() {
        let mut form = form();
        form.focus = FormField::Submit;
        let localizer = Localizer::default();
        let mut term = TestTerminal::with_size(60, 8);

        term.render_widget(TicketFormView::new(&form, &localizer), term.area());

        assert!(term.buffer_contains("[ Send ]"));
    }
}
