//! Key event handlers for the different screens

use super::ticket::enter_message;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::otp::OtpStep;
use crate::state::{AppState, Screen};
use crate::ticket_form::FormField;

/// Convert key events to messages based on the current screen
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if let Some(msg) = handle_key_global(state, key) {
        return Some(msg);
    }
    if state.confirm_dialog.is_some() {
        return handle_key_confirm_dialog(state, key);
    }
    match state.screen() {
        Screen::Otp => handle_key_otp(state, key),
        Screen::Device => handle_key_device(state, key),
        Screen::Confirmation => handle_key_confirmation(key),
        Screen::ErrorFallback => handle_key_error_fallback(key),
        Screen::Loading | Screen::NoDevice => None,
    }
}

/// Shortcuts available from any view
fn handle_key_global(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c' | 'q') => Some(Message::Quit),
        InputKey::CharCtrl('l') => Some(Message::ToggleLanguage),
        InputKey::CharCtrl('o') if state.session.authenticated => Some(Message::SignOut),
        _ => None,
    }
}

fn handle_key_confirm_dialog(state: &AppState, key: InputKey) -> Option<Message> {
    let dialog = state.confirm_dialog.as_ref()?;
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => dialog.confirm_message(),
        InputKey::Char('n' | 'N') | InputKey::Esc => dialog.cancel_message(),
        _ => None,
    }
}

fn handle_key_otp(state: &AppState, key: InputKey) -> Option<Message> {
    if let Some(d) = key.digit() {
        return Some(Message::OtpDigit(d));
    }
    match key {
        InputKey::Backspace => Some(Message::OtpBackspace),
        InputKey::Enter => Some(Message::SubmitOtp),
        InputKey::CharCtrl('r') if state.otp.step == OtpStep::CodeEntry => {
            Some(Message::ResendOtp)
        }
        InputKey::Esc if state.otp.step == OtpStep::CodeEntry => Some(Message::OtpBack),
        _ => None,
    }
}

fn handle_key_device(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('e') => return Some(Message::ToggleDetails),
        InputKey::CharCtrl('s') => return Some(Message::SubmitTicket),
        InputKey::Tab => return Some(Message::FormFocusNext),
        InputKey::BackTab => return Some(Message::FormFocusPrev),
        _ => {}
    }

    let form = state.ticket.as_ref()?;
    if form.focus.is_text() {
        return match key {
            InputKey::Char(c) => Some(Message::FormInput(c)),
            InputKey::Backspace => Some(Message::FormBackspace),
            InputKey::Enter => enter_message(form),
            InputKey::Down if form.focus != FormField::Description => {
                Some(Message::FormFocusNext)
            }
            InputKey::Up if form.focus != FormField::Description => Some(Message::FormFocusPrev),
            _ => None,
        };
    }

    match (form.focus, key) {
        (FormField::CallType | FormField::Urgency, InputKey::Left) => {
            Some(Message::FormCycle { forward: false })
        }
        (FormField::CallType | FormField::Urgency, InputKey::Right | InputKey::Char(' ')) => {
            Some(Message::FormCycle { forward: true })
        }
        (FormField::Images, InputKey::Up) => Some(Message::ImageSelect { down: false }),
        (FormField::Images, InputKey::Down) => Some(Message::ImageSelect { down: true }),
        (FormField::Images, InputKey::Delete | InputKey::Backspace) => {
            Some(Message::RequestImageDelete {
                index: form.selected_image,
            })
        }
        (_, InputKey::Enter) => enter_message(form),
        (_, InputKey::Down) => Some(Message::FormFocusNext),
        (_, InputKey::Up) => Some(Message::FormFocusPrev),
        _ => None,
    }
}

fn handle_key_confirmation(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Esc => Some(Message::ConfirmationDone),
        _ => None,
    }
}

fn handle_key_error_fallback(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('r' | 'R') => Some(Message::BoundaryRetry),
        _ => None,
    }
}
