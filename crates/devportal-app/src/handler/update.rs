//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use crate::message::Message;
use crate::state::{AppPhase, AppState};

use super::{keys::handle_key, otp, page, ticket, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            let expired = state
                .snackbar
                .as_ref()
                .is_some_and(|bar| bar.is_expired(Instant::now()));
            if expired {
                state.snackbar = None;
            }
            UpdateResult::none()
        }

        Message::Quit => {
            state.phase = AppPhase::Quitting;
            otp::stop_autofill(state)
        }

        Message::ToggleLanguage => {
            state.toggle_language();
            UpdateResult::none()
        }

        Message::ToggleDetails => page::handle_toggle_details(state),
        Message::SignOut => page::handle_sign_out(state),
        Message::SignedOut => {
            tracing::debug!("Backend sign-out finished");
            UpdateResult::none()
        }
        Message::Fault { message } => page::handle_fault(state, message),
        Message::DismissSnackbar => {
            state.snackbar = None;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // OTP Messages
        // ─────────────────────────────────────────────────────────
        Message::OtpDigit(c) => otp::handle_digit(state, c),
        Message::OtpBackspace => otp::handle_backspace(state),
        Message::SubmitOtp => otp::handle_submit(state),
        Message::ResendOtp => otp::handle_resend(state),
        Message::OtpBack => otp::handle_back(state),
        Message::OtpSendCompleted { sent } => otp::handle_send_completed(state, sent),
        Message::OtpSendFailed(failure) => otp::handle_send_failed(state, failure),
        Message::OtpVerifyCompleted { verified } => otp::handle_verify_completed(state, verified),
        Message::OtpVerifyFailed(failure) => otp::handle_verify_failed(state, failure),
        Message::AutofillCode { code } => otp::handle_autofill_code(state, &code),
        Message::Authenticated => page::handle_authenticated(state),

        // ─────────────────────────────────────────────────────────
        // Device Page Messages
        // ─────────────────────────────────────────────────────────
        Message::DeviceFetched { device_id, record } => {
            page::handle_device_fetched(state, &device_id, record)
        }
        Message::DeviceFetchFailed { device_id, failure } => {
            page::handle_device_fetch_failed(state, &device_id, failure)
        }
        Message::BoundaryRetry => page::handle_boundary_retry(state),

        // ─────────────────────────────────────────────────────────
        // Ticket Form Messages
        // ─────────────────────────────────────────────────────────
        Message::FormFocusNext => ticket::handle_focus_next(state),
        Message::FormFocusPrev => ticket::handle_focus_prev(state),
        Message::FormInput(c) => ticket::handle_input(state, c),
        Message::FormBackspace => ticket::handle_backspace(state),
        Message::FormNewline => ticket::handle_newline(state),
        Message::FormCycle { forward } => ticket::handle_cycle(state, forward),
        Message::ImageSelect { down } => ticket::handle_image_select(state, down),
        Message::AddImagePaths => ticket::handle_add_image_paths(state),
        Message::ImagesLoaded {
            loaded,
            failed,
            submitted,
        } => ticket::handle_images_loaded(state, loaded, failed, submitted),
        Message::RequestImageDelete { index } => ticket::handle_request_image_delete(state, index),
        Message::ConfirmImageDelete { index } => ticket::handle_confirm_image_delete(state, index),
        Message::CancelImageDelete => ticket::handle_cancel_image_delete(state),
        Message::SubmitTicket => ticket::handle_submit(state),
        Message::TicketCreated { ticket_id } => ticket::handle_ticket_created(state, ticket_id),
        Message::TicketFailed(failure) => ticket::handle_ticket_failed(state, failure),
        Message::ConfirmationDone => ticket::handle_confirmation_done(state),
    }
}
