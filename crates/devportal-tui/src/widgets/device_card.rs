//! Warranty banner and collapsible device details

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use devportal_core::{device_details, status_banner, DetailField, DeviceRecord, FieldWidth, Localizer};

use crate::theme::{palette, styles};

pub struct DeviceCard<'a> {
    record: &'a DeviceRecord,
    localizer: &'a Localizer,
    expanded: bool,
    now: DateTime<Utc>,
}

impl<'a> DeviceCard<'a> {
    pub fn new(record: &'a DeviceRecord, localizer: &'a Localizer) -> Self {
        Self {
            record,
            localizer,
            expanded: true,
            now: Utc::now(),
        }
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Clock used for the warranty window
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Rows needed to draw the card without clipping
    pub fn height(&self) -> u16 {
        let body = if self.expanded {
            self.detail_lines().len() as u16
        } else {
            0
        };
        // banner + block borders
        1 + 2 + body
    }

    /// One line per full-width field; consecutive half fields share a line
    fn detail_lines(&self) -> Vec<Line<'static>> {
        let fields = device_details(self.record, self.localizer);
        let mut lines = Vec::new();
        let mut pending: Option<&DetailField> = None;

        for field in &fields {
            match (field.width, pending.take()) {
                (FieldWidth::Half, None) => pending = Some(field),
                (FieldWidth::Half, Some(first)) => {
                    let mut spans = field_spans(first);
                    spans.push(Span::raw("   "));
                    spans.extend(field_spans(field));
                    lines.push(Line::from(spans));
                }
                (FieldWidth::Full, held) => {
                    if let Some(first) = held {
                        lines.push(Line::from(field_spans(first)));
                    }
                    lines.push(Line::from(field_spans(field)));
                }
            }
        }
        if let Some(last) = pending {
            lines.push(Line::from(field_spans(last)));
        }
        lines
    }
}

fn field_spans(field: &DetailField) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("{}: ", field.label), styles::text_secondary()),
        Span::styled(field.value.clone(), styles::text_primary()),
    ]
}

impl Widget for DeviceCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let alignment = styles::alignment(self.localizer.is_rtl());
        let [banner_area, card_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

        let banner = status_banner(self.record, self.localizer, self.now);
        let banner_bg = if banner.is_error() {
            palette::STATUS_RED
        } else {
            palette::STATUS_GREEN
        };
        Paragraph::new(format!(" {} ", banner.text))
            .style(
                Style::default()
                    .fg(palette::CONTRAST_FG)
                    .bg(banner_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(alignment)
            .render(banner_area, buf);

        if card_area.height == 0 {
            return;
        }

        let marker = if self.expanded { "▾" } else { "▸" };
        let title = format!(" {} {} ", marker, self.localizer.translate("device_info"));
        let block = styles::glass_block(false)
            .title(Span::styled(title, styles::accent_bold()))
            .title_bottom(Line::from(vec![
                Span::styled(" ^E ", styles::keybinding()),
            ]))
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(card_area);
        block.render(card_area, buf);

        if self.expanded {
            Paragraph::new(self.detail_lines())
                .alignment(alignment)
                .render(inner, buf);
        }
    }
}
