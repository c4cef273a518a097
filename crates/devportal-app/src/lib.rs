//! devportal-app - Application state and orchestration for the device portal
//!
//! Implements the TEA (The Elm Architecture) pattern: [`AppState`] is the
//! model, [`handler::update`] the update function, and [`process`] wires
//! actions to background tasks that report back as [`Message`]s.
//! Configuration loading, OTP autofill and signal handling live here too.

pub mod actions;
pub mod autofill;
pub mod config;
pub mod confirm_dialog;
pub mod handler;
pub mod images;
pub mod input_key;
pub mod message;
pub mod otp;
pub mod page;
pub mod process;
pub mod route;
pub mod signals;
pub mod snackbar;
pub mod state;
pub mod ticket_form;

// Re-export primary types
pub use actions::{handle_action, ActionContext};
pub use autofill::{FileDropAutofill, NoopAutofill, OtpAutofill};
pub use config::Settings;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use process::process_message;
pub use route::Route;
pub use state::{AppPhase, AppState, Screen};
