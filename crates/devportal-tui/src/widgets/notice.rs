//! Centered single-message panels: loading, no device, error fallback

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use devportal_core::Localizer;

use super::modal_overlay::centered_rect;
use crate::theme::{palette, styles};

const WIDTH: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Loading,
    NoDevice,
    /// Error boundary fallback with a retry hint
    Fault,
}

pub struct Notice<'a> {
    kind: NoticeKind,
    localizer: &'a Localizer,
    detail: Option<&'a str>,
}

impl<'a> Notice<'a> {
    pub fn new(kind: NoticeKind, localizer: &'a Localizer) -> Self {
        Self {
            kind,
            localizer,
            detail: None,
        }
    }

    /// Secondary line under the main message
    pub fn detail(mut self, detail: &'a str) -> Self {
        self.detail = Some(detail);
        self
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let t = |key| self.localizer.translate(key);
        let (key, style) = match self.kind {
            NoticeKind::Loading => ("loading", styles::status_yellow()),
            NoticeKind::NoDevice => ("no_device", styles::text_primary()),
            NoticeKind::Fault => ("error_loading", styles::status_red()),
        };
        let mut lines = vec![Line::from(Span::styled(t(key), style))];

        if let Some(detail) = self.detail {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                detail.to_string(),
                styles::text_muted(),
            )));
        }
        if self.kind == NoticeKind::Fault {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("r ", styles::keybinding()),
                Span::styled(t("retry"), styles::text_secondary()),
            ]));
        }
        lines
    }
}

impl Widget for Notice<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let height = lines.len() as u16 + 4;
        let panel = centered_rect(WIDTH, height, area);
        let focused = self.kind == NoticeKind::Fault;
        let block = styles::glass_block(focused).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(panel);
        block.render(panel, buf);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner.inner(Margin::new(1, 1)), buf);
    }
}
