//! OTP verification handlers

use std::time::Instant;

use super::{UpdateAction, UpdateResult};
use crate::otp::{is_valid_code, is_valid_phone, OtpStep, CODE_LEN};
use crate::state::AppState;
use devportal_core::{RemoteFailure, TEST_MODE_SENTINEL};
use tracing::{debug, info, warn};

pub fn handle_digit(state: &mut AppState, c: char) -> UpdateResult {
    if state.otp.push_char(c) {
        state.otp.clear_error();
    }
    UpdateResult::none()
}

pub fn handle_backspace(state: &mut AppState) -> UpdateResult {
    state.otp.backspace();
    UpdateResult::none()
}

/// Enter on the OTP panel
pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    if state.otp.loading {
        debug!("OTP submit ignored while a call is in flight");
        return UpdateResult::none();
    }
    match state.otp.step {
        OtpStep::PhoneEntry => submit_phone(state),
        OtpStep::CodeEntry => submit_code(state),
        OtpStep::Verified => UpdateResult::none(),
    }
}

fn submit_phone(state: &mut AppState) -> UpdateResult {
    if state.session.test_mode {
        if state.otp.phone != TEST_MODE_SENTINEL {
            state.otp.set_error("test_mode_phone");
            return UpdateResult::none();
        }
        let cooldown = state.settings.resend_cooldown();
        state.otp.enter_code_entry(Instant::now(), cooldown);
        return UpdateResult::none();
    }

    if !is_valid_phone(&state.otp.phone) {
        state.otp.set_error("invalid_phone");
        return UpdateResult::none();
    }
    state.otp.clear_error();
    state.otp.loading = true;
    UpdateResult::action(UpdateAction::SendOtp {
        phone: state.otp.phone.clone(),
    })
}

fn submit_code(state: &mut AppState) -> UpdateResult {
    if state.session.test_mode {
        if state.otp.code != TEST_MODE_SENTINEL {
            state.otp.set_error("test_mode_otp");
            return UpdateResult::none();
        }
        return verified(state);
    }

    if !is_valid_code(&state.otp.code) {
        state.otp.set_error("invalid_otp");
        return UpdateResult::none();
    }
    state.otp.clear_error();
    state.otp.loading = true;
    UpdateResult::action(UpdateAction::VerifyOtp {
        phone: state.otp.phone.clone(),
        code: state.otp.code.clone(),
    })
}

/// Ctrl+R in code entry, once the cool-down has elapsed
pub fn handle_resend(state: &mut AppState) -> UpdateResult {
    if state.session.test_mode || !state.otp.can_resend(Instant::now()) {
        return UpdateResult::none();
    }
    info!("Resending OTP");
    state.otp.clear_error();
    state.otp.loading = true;
    UpdateResult::action(UpdateAction::SendOtp {
        phone: state.otp.phone.clone(),
    })
}

/// Esc in code entry
pub fn handle_back(state: &mut AppState) -> UpdateResult {
    if state.otp.step != OtpStep::CodeEntry || state.otp.loading {
        return UpdateResult::none();
    }
    state.otp.back_to_phone();
    state.otp.clear_error();
    stop_autofill(state)
}

pub fn handle_send_completed(state: &mut AppState, sent: bool) -> UpdateResult {
    state.otp.loading = false;
    if !sent {
        state.otp.set_error("otp_send_failed");
        return UpdateResult::none();
    }

    let cooldown = state.settings.resend_cooldown();
    state.otp.enter_code_entry(Instant::now(), cooldown);
    if state.autofill_supported && !state.otp.autofill_active {
        state.otp.autofill_active = true;
        return UpdateResult::action(UpdateAction::StartAutofill);
    }
    UpdateResult::none()
}

pub fn handle_send_failed(state: &mut AppState, failure: RemoteFailure) -> UpdateResult {
    warn!("Sending OTP failed: {}", failure);
    state.otp.loading = false;
    state.otp.set_error("otp_send_error");
    UpdateResult::none()
}

pub fn handle_verify_completed(state: &mut AppState, verified_ok: bool) -> UpdateResult {
    state.otp.loading = false;
    if !verified_ok {
        state.otp.code.clear();
        state.otp.set_error("wrong_otp");
        return UpdateResult::none();
    }
    verified(state)
}

pub fn handle_verify_failed(state: &mut AppState, failure: RemoteFailure) -> UpdateResult {
    warn!("Verifying OTP failed: {}", failure);
    state.otp.loading = false;
    state.otp.set_error("otp_verify_error");
    UpdateResult::none()
}

/// A code from the autofill capability; submits once complete
pub fn handle_autofill_code(state: &mut AppState, code: &str) -> UpdateResult {
    if state.otp.step != OtpStep::CodeEntry || state.otp.loading {
        debug!("Autofill code ignored outside code entry");
        return UpdateResult::none();
    }
    state.otp.fill_code(code);
    state.otp.clear_error();
    if state.otp.code.len() == CODE_LEN {
        return handle_submit(state);
    }
    UpdateResult::none()
}

fn verified(state: &mut AppState) -> UpdateResult {
    state.otp.step = OtpStep::Verified;
    state.otp.clear_error();
    stop_autofill(state).with_message(crate::message::Message::Authenticated)
}

/// Cancel the listener if code entry started one
pub(super) fn stop_autofill(state: &mut AppState) -> UpdateResult {
    if state.otp.autofill_active {
        state.otp.autofill_active = false;
        UpdateResult::action(UpdateAction::CancelAutofill)
    } else {
        UpdateResult::none()
    }
}
