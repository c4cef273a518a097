//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use devportal_app::state::{AppState, Screen};

use crate::layout;
use crate::theme::palette;
use crate::widgets::{
    ConfirmDialog, ConfirmationView, DeviceCard, Navbar, Notice, NoticeKind, OtpPanel,
    SnackbarBar, TicketFormView,
};

/// Render the complete UI. Pure: reads state, never changes it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area, state.snackbar.is_some());
    let localizer = &state.localizer;

    frame.render_widget(Navbar::new(localizer, &state.session), areas.navbar);

    match state.screen() {
        Screen::Otp => frame.render_widget(
            OtpPanel::new(&state.otp, localizer)
                .test_mode(state.session.test_mode)
                .autofill(state.autofill_supported),
            areas.body,
        ),
        Screen::Loading => {
            frame.render_widget(Notice::new(NoticeKind::Loading, localizer), areas.body)
        }
        Screen::NoDevice => {
            frame.render_widget(Notice::new(NoticeKind::NoDevice, localizer), areas.body)
        }
        Screen::Device => render_device(frame, state, areas.body),
        Screen::Confirmation => frame.render_widget(
            ConfirmationView::new(state.confirmation.as_ref(), localizer),
            areas.body,
        ),
        Screen::ErrorFallback => {
            let mut notice = Notice::new(NoticeKind::Fault, localizer);
            if let Some(message) = state.page.boundary_error.as_deref() {
                notice = notice.detail(message);
            }
            frame.render_widget(notice, areas.body);
        }
    }

    if let Some(snackbar) = &state.snackbar {
        frame.render_widget(SnackbarBar::new(snackbar, localizer), areas.footer);
    }

    if let Some(dialog) = &state.confirm_dialog {
        frame.render_widget(ConfirmDialog::new(dialog, localizer), area);
    }
}

fn render_device(frame: &mut Frame, state: &AppState, body: ratatui::layout::Rect) {
    let Some(record) = state.record() else {
        return;
    };
    let card = DeviceCard::new(record, &state.localizer).expanded(state.page.details_expanded);

    match &state.ticket {
        Some(form) => {
            let (card_area, form_area) = layout::device_columns(body, card.height());
            frame.render_widget(card, card_area);
            frame.render_widget(TicketFormView::new(form, &state.localizer), form_area);
        }
        None => frame.render_widget(card, body),
    }
}
