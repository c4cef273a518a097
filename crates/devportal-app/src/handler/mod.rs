//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per screen
//! - `otp`: Phone/code verification handlers
//! - `page`: Device fetch, error boundary and sign-out handlers
//! - `ticket`: Ticket form, image and submission handlers

pub(crate) mod keys;
pub(crate) mod otp;
pub(crate) mod page;
pub(crate) mod ticket;
pub(crate) mod update;


use crate::message::Message;
use devportal_core::TicketDraft;

pub use keys::handle_key;
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Ask the backend to text a code to `phone`
    SendOtp { phone: String },

    VerifyOtp { phone: String, code: String },

    /// Fetch the device record (with retry on transient errors)
    FetchDevice { device_id: String },

    CreateTicket { draft: Box<TicketDraft> },

    /// Tell the backend to drop the session; also stops autofill
    SignOut,

    /// Read image files from disk, at most `limit` of them
    LoadImages { paths: Vec<String>, limit: usize },

    /// Start the OTP autofill listener
    StartAutofill,

    CancelAutofill,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn with_message(mut self, msg: Message) -> Self {
        self.message = Some(msg);
        self
    }
}
