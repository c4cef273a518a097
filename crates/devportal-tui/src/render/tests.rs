//! Full-screen rendering tests

use super::*;
use crate::test_utils::{device_state, TestTerminal};
use devportal_app::confirm_dialog::ConfirmDialogState;
use devportal_app::page::FetchState;
use devportal_app::snackbar::Severity;
use devportal_app::{Route, Settings};
use devportal_client::test_utils::complete_draft;
use devportal_core::{ImageAttachment, TicketConfirmation};

fn render(state: &AppState, width: u16, height: u16) -> TestTerminal {
    let mut term = TestTerminal::with_size(width, height);
    term.draw(|frame| view(frame, state));
    term
}

#[test]
fn test_unauthenticated_device_route_shows_otp() {
    let state = AppState::new(Route::Device("SN-1".into()), Settings::default());
    let term = render(&state, 80, 24);

    assert!(term.buffer_contains("Device Service Portal"));
    assert!(term.buffer_contains("Phone Number Verification"));
    assert!(!term.buffer_contains("Open Service Call"));
    assert!(!term.buffer_contains("Sign out"));
}

#[test]
fn test_device_screen_shows_card_and_form() {
    let state = device_state();
    let term = render(&state, 100, 40);

    assert!(term.buffer_contains("Device Status"));
    assert!(term.buffer_contains("Device Information"));
    assert!(term.buffer_contains("Open Service Call"));
    assert!(term.buffer_contains("Phone *: 0501234567"));
    assert!(term.buffer_contains("^O Sign out"));
}

#[test]
fn test_loading_screen() {
    let mut state = AppState::new(Route::Device("SN-1".into()), Settings::default());
    state.session.authenticate("0501234567");
    state.page.fetch = FetchState::Loading;

    let term = render(&state, 80, 24);

    assert!(term.buffer_contains("Loading..."));
}

#[test]
fn test_home_route_without_device() {
    let mut state = AppState::new(Route::Home, Settings::default());
    state.session.authenticate("0501234567");

    let term = render(&state, 80, 24);

    assert!(term.buffer_contains("No device selected."));
}

#[test]
fn test_snackbar_on_last_row() {
    let mut state = device_state();
    state.show_snackbar("fill_all_fields", Severity::Error);

    let term = render(&state, 100, 40);

    let content = term.content();
    let last = content.lines().last().unwrap_or_default();
    assert!(last.contains("Please fill all required fields"));
}

#[test]
fn test_confirm_dialog_overlays_device_screen() {
    let mut state = device_state();
    if let Some(form) = state.ticket.as_mut() {
        form.draft.images.push(ImageAttachment::new("a.jpg", vec![1]));
    }
    state.confirm_dialog = Some(ConfirmDialogState::delete_image(0));

    let term = render(&state, 100, 40);

    assert!(term.buffer_contains("Are you sure you want to delete this image?"));
    assert!(term.buffer_contains("[y] Delete"));
}

#[test]
fn test_error_boundary_replaces_body() {
    let mut state = device_state();
    state.page.capture_fault("unexpected payload");

    let term = render(&state, 80, 24);

    assert!(term.buffer_contains("Something went wrong while loading this page"));
    assert!(term.buffer_contains("unexpected payload"));
    assert!(!term.buffer_contains("Open Service Call"));
    // Navbar stays usable
    assert!(term.buffer_contains("Device Service Portal"));
}

#[test]
fn test_confirmation_route() {
    let mut state = device_state();
    state.confirmation = Some(TicketConfirmation::from_draft(
        &complete_draft(),
        Some("D-7".into()),
        false,
    ));
    state.navigate(Route::Successful);

    let term = render(&state, 80, 24);

    assert!(term.buffer_contains("Service call opened successfully"));
    assert!(term.buffer_contains("Ticket Number: D-7"));
}

#[test]
fn test_hebrew_device_screen() {
    let mut state = device_state();
    state.toggle_language();

    let term = render(&state, 100, 40);

    assert!(term.buffer_contains("פורטל שירות מכשירים"));
    assert!(term.buffer_contains("פתיחת קריאה"));
}

#[test]
fn test_test_mode_badge() {
    let state = AppState::new(Route::Device("1234".into()), Settings::default());
    let term = render(&state, 80, 24);
    assert!(term.buffer_contains("[TEST]"));
}
