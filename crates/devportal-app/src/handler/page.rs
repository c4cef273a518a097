//! Device page handlers: authentication, fetch results, boundary, sign-out

use std::sync::Arc;

use super::{otp::stop_autofill, UpdateAction, UpdateResult};
use crate::otp::OtpState;
use crate::page::{FetchState, PageState};
use crate::route::Route;
use crate::state::AppState;
use devportal_core::{sample_record, DeviceRecord, ErrorKind, RemoteFailure};
use tracing::{debug, info, warn};

/// OTP verified: open the session and load the page
pub fn handle_authenticated(state: &mut AppState) -> UpdateResult {
    let phone = state.otp.phone.clone();
    state.session.authenticate(phone);
    info!("Session authenticated");
    start_fetch(state)
}

/// Begin loading the device for the current route
fn start_fetch(state: &mut AppState) -> UpdateResult {
    let Route::Device(device_id) = &state.route else {
        return UpdateResult::none();
    };
    if state.session.test_mode {
        debug!("Test mode: using the sample record");
        let record = Arc::new(sample_record(state.localizer.current()));
        state.set_record(record);
        return UpdateResult::none();
    }
    let device_id = device_id.clone();
    state.page.fetch = FetchState::Loading;
    UpdateResult::action(UpdateAction::FetchDevice { device_id })
}

/// A fetch result still applies only to the device route it was made for
fn is_current(state: &AppState, device_id: &str) -> bool {
    state.session.authenticated && state.route.device_id() == Some(device_id)
}

pub fn handle_device_fetched(
    state: &mut AppState,
    device_id: &str,
    record: Arc<DeviceRecord>,
) -> UpdateResult {
    if !is_current(state, device_id) {
        debug!("Discarding stale device record for {}", device_id);
        return UpdateResult::none();
    }
    info!("Loaded device {}", device_id);
    state.set_record(record);
    UpdateResult::none()
}

/// Malformed payloads go to the error boundary; transport and server
/// failures send the user back through verification.
pub fn handle_device_fetch_failed(
    state: &mut AppState,
    device_id: &str,
    failure: RemoteFailure,
) -> UpdateResult {
    if !is_current(state, device_id) {
        debug!("Discarding stale fetch failure for {}", device_id);
        return UpdateResult::none();
    }

    if failure.kind == ErrorKind::Protocol {
        state.page.capture_fault(failure.message.clone());
        state.page.fetch = FetchState::Failed(failure);
        return UpdateResult::none();
    }

    warn!("Device fetch failed, signing out: {}", failure);
    state.session.sign_out();
    state.otp.reset();
    state.otp.set_error("fetch_failed");
    state.ticket = None;
    state.page.fetch = FetchState::Failed(failure);
    UpdateResult::none()
}

/// Retry from the fallback view
pub fn handle_boundary_retry(state: &mut AppState) -> UpdateResult {
    if state.page.boundary_error.is_none() {
        return UpdateResult::none();
    }
    info!("Error boundary reset");
    state.page.reset_boundary();
    state.ticket = None;
    if state.session.authenticated {
        start_fetch(state)
    } else {
        UpdateResult::none()
    }
}

pub fn handle_fault(state: &mut AppState, message: String) -> UpdateResult {
    state.page.capture_fault(message);
    UpdateResult::none()
}

pub fn handle_toggle_details(state: &mut AppState) -> UpdateResult {
    state.page.details_expanded = !state.page.details_expanded;
    UpdateResult::none()
}

/// Drop the session locally and tell the backend
pub fn handle_sign_out(state: &mut AppState) -> UpdateResult {
    if !state.session.authenticated {
        return UpdateResult::none();
    }
    info!("Signing out");
    let cancel = stop_autofill(state);
    state.session.sign_out();
    state.otp = OtpState::new();
    state.page = PageState::default();
    state.ticket = None;
    state.confirm_dialog = None;

    if state.session.test_mode {
        return cancel;
    }
    // The sign-out action also cancels autofill
    UpdateResult::action(UpdateAction::SignOut)
}
