//! Centering and dimming helpers shared by panels and dialogs

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::theme::palette;

/// Center a fixed-size rect within `area`, clamped to its bounds.
///
/// ```
/// use ratatui::layout::Rect;
/// use devportal_tui::widgets::modal_overlay::centered_rect;
///
/// let modal = centered_rect(40, 10, Rect::new(0, 0, 80, 24));
/// assert_eq!(modal, Rect::new(20, 7, 40, 10));
/// ```
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

/// Restyle every cell in `area` with muted colors behind a modal
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(dim);
            }
        }
    }
}

/// One-cell shadow along the right and bottom edges of `modal`
pub fn render_shadow(buf: &mut Buffer, modal: Rect) {
    let shadow = Style::default().bg(palette::SHADOW);
    let bounds = buf.area;
    let right = modal.right();
    let bottom = modal.bottom();

    if right < bounds.right() {
        for y in modal.y.saturating_add(1)..bottom.min(bounds.bottom()) {
            if let Some(cell) = buf.cell_mut((right, y)) {
                cell.set_style(shadow);
            }
        }
    }
    if bottom < bounds.bottom() {
        for x in modal.x.saturating_add(1)..=right.min(bounds.right().saturating_sub(1)) {
            if let Some(cell) = buf.cell_mut((x, bottom)) {
                cell.set_style(shadow);
            }
        }
    }
}
