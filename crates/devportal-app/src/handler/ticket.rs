//! Ticket form handlers: editing, images, submission

use super::{UpdateAction, UpdateResult};
use crate::confirm_dialog::ConfirmDialogState;
use crate::message::Message;
use crate::route::Route;
use crate::snackbar::{Severity, Snackbar};
use crate::state::AppState;
use crate::ticket_form::{ImageBatchOutcome, TicketForm};
use devportal_core::{ErrorKind, ImageAttachment, RemoteFailure, TicketConfirmation};
use tracing::{debug, info, warn};

/// Apply `f` to the form, if one is open
fn with_form(state: &mut AppState, f: impl FnOnce(&mut TicketForm)) -> UpdateResult {
    if let Some(form) = state.ticket.as_mut() {
        f(form);
    }
    UpdateResult::none()
}

pub fn handle_focus_next(state: &mut AppState) -> UpdateResult {
    with_form(state, TicketForm::focus_next)
}

pub fn handle_focus_prev(state: &mut AppState) -> UpdateResult {
    with_form(state, TicketForm::focus_prev)
}

pub fn handle_input(state: &mut AppState, c: char) -> UpdateResult {
    with_form(state, |form| form.insert_char(c))
}

pub fn handle_backspace(state: &mut AppState) -> UpdateResult {
    with_form(state, TicketForm::backspace)
}

pub fn handle_newline(state: &mut AppState) -> UpdateResult {
    with_form(state, TicketForm::newline)
}

pub fn handle_cycle(state: &mut AppState, forward: bool) -> UpdateResult {
    with_form(state, |form| form.cycle_choice(forward))
}

pub fn handle_image_select(state: &mut AppState, down: bool) -> UpdateResult {
    with_form(state, |form| form.select_image(down))
}

// ─────────────────────────────────────────────────────────
// Images
// ─────────────────────────────────────────────────────────

pub fn handle_add_image_paths(state: &mut AppState) -> UpdateResult {
    let Some(form) = state.ticket.as_mut() else {
        return UpdateResult::none();
    };
    if form.loading_images || form.submitting {
        return UpdateResult::none();
    }
    if form.is_full() {
        form.image_path_input.clear();
        state.show_snackbar("max_images", Severity::Warning);
        return UpdateResult::none();
    }
    let paths = form.take_image_paths();
    if paths.is_empty() {
        return UpdateResult::none();
    }
    form.loading_images = true;
    let limit = form.draft.remaining_image_slots();
    debug!("Loading {} image(s), room for {}", paths.len(), limit);
    UpdateResult::action(UpdateAction::LoadImages { paths, limit })
}

pub fn handle_images_loaded(
    state: &mut AppState,
    loaded: Vec<ImageAttachment>,
    failed: Vec<String>,
    submitted: usize,
) -> UpdateResult {
    let Some(form) = state.ticket.as_mut() else {
        return UpdateResult::none();
    };
    form.loading_images = false;
    let outcome = form.add_images(loaded, submitted);
    let now = std::time::Instant::now();
    let ttl = state.snackbar_ttl();

    match outcome {
        ImageBatchOutcome::Full => state.show_snackbar("max_images", Severity::Warning),
        ImageBatchOutcome::Added { accepted, submitted } => {
            if let Some(path) = failed.first() {
                state.push_snackbar(
                    Snackbar::new("image_unreadable", Severity::Error, now, ttl)
                        .with_arg("path", path),
                );
            } else if outcome.truncated() {
                state.push_snackbar(
                    Snackbar::new("selected_images", Severity::Info, now, ttl)
                        .with_arg("count", accepted)
                        .with_arg("total", submitted),
                );
            }
        }
    }
    UpdateResult::none()
}

pub fn handle_request_image_delete(state: &mut AppState, index: usize) -> UpdateResult {
    let exists = state
        .ticket
        .as_ref()
        .is_some_and(|form| index < form.draft.images.len() && !form.submitting);
    if exists {
        state.confirm_dialog = Some(ConfirmDialogState::delete_image(index));
    }
    UpdateResult::none()
}

pub fn handle_confirm_image_delete(state: &mut AppState, index: usize) -> UpdateResult {
    state.confirm_dialog = None;
    if let Some(form) = state.ticket.as_mut() {
        if let Some(image) = form.remove_image(index) {
            debug!("Removed image {}", image.file_name);
        }
    }
    UpdateResult::none()
}

pub fn handle_cancel_image_delete(state: &mut AppState) -> UpdateResult {
    state.confirm_dialog = None;
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────
// Submission
// ─────────────────────────────────────────────────────────

pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    let Some(form) = state.ticket.as_mut() else {
        return UpdateResult::none();
    };
    if form.submitting {
        debug!("Ticket submit ignored while one is in flight");
        return UpdateResult::none();
    }
    if form.loading_images {
        state.show_snackbar("images_loading", Severity::Info);
        return UpdateResult::none();
    }
    if !form.draft.is_complete() {
        state.show_snackbar("fill_all_fields", Severity::Error);
        return UpdateResult::none();
    }
    form.submitting = true;
    info!("Submitting ticket for {}", form.draft.device.serial_number);
    UpdateResult::action(UpdateAction::CreateTicket {
        draft: Box::new(form.draft.clone()),
    })
}

pub fn handle_ticket_created(state: &mut AppState, ticket_id: Option<String>) -> UpdateResult {
    let Some(form) = state.ticket.as_mut() else {
        return UpdateResult::none();
    };
    form.submitting = false;
    info!("Ticket created: {:?}", ticket_id);
    state.confirmation = Some(TicketConfirmation::from_draft(&form.draft, ticket_id, false));
    state.navigate(Route::Successful);
    UpdateResult::none()
}

pub fn handle_ticket_failed(state: &mut AppState, failure: RemoteFailure) -> UpdateResult {
    let offline_fallback = state.settings.tickets.offline_fallback;
    let Some(form) = state.ticket.as_mut() else {
        return UpdateResult::none();
    };
    form.submitting = false;
    warn!("Ticket submission failed: {}", failure);

    if failure.is_unreachable() && offline_fallback {
        let ticket_id = offline_ticket_id();
        info!("Backend unreachable, recorded ticket locally as {}", ticket_id);
        state.confirmation = Some(TicketConfirmation::from_draft(
            &form.draft,
            Some(ticket_id),
            true,
        ));
        state.navigate(Route::Successful);
        state.show_snackbar("offline_mode", Severity::Info);
        return UpdateResult::none();
    }

    let key = if failure.kind == ErrorKind::PayloadTooLarge {
        "file_too_large"
    } else {
        "sending_error"
    };
    state.show_snackbar(key, Severity::Error);
    UpdateResult::none()
}

fn offline_ticket_id() -> String {
    format!("TEST-{}", chrono::Utc::now().timestamp_millis())
}

/// Leave the confirmation view with a fresh form for the same device
pub fn handle_confirmation_done(state: &mut AppState) -> UpdateResult {
    if state.route != Route::Successful {
        return UpdateResult::none();
    }
    state.confirmation = None;
    match state.device_id.clone() {
        Some(id) => {
            if let Some(form) = state.ticket.as_mut() {
                form.reset();
            }
            state.navigate(Route::Device(id));
        }
        None => state.navigate(Route::Home),
    }
    UpdateResult::none()
}

/// Message sent when Enter lands on the focused field
pub fn enter_message(form: &TicketForm) -> Option<Message> {
    use crate::ticket_form::FormField;
    match form.focus {
        FormField::Description => Some(Message::FormNewline),
        FormField::ImagePath => Some(Message::AddImagePaths),
        FormField::Images => Some(Message::RequestImageDelete {
            index: form.selected_image,
        }),
        FormField::Submit => Some(Message::SubmitTicket),
        FormField::CallType | FormField::Urgency => Some(Message::FormCycle { forward: true }),
        FormField::Name | FormField::Email | FormField::Title => Some(Message::FormFocusNext),
    }
}
