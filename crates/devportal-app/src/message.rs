//! Message types for the application (TEA pattern)

use std::sync::Arc;

use crate::input_key::InputKey;
use devportal_core::{DeviceRecord, ImageAttachment, RemoteFailure};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (cool-downs, snackbar expiry)
    Tick,

    /// Quit immediately (Ctrl+C, signal handler)
    Quit,

    /// Switch between English and Hebrew
    ToggleLanguage,

    /// Collapse or expand the device details card
    ToggleDetails,

    SignOut,

    /// The backend acknowledged (or failed) the sign-out call
    SignedOut,

    /// A background task panicked; captured by the error boundary
    Fault { message: String },

    DismissSnackbar,

    // ─────────────────────────────────────────────────────────
    // OTP Messages
    // ─────────────────────────────────────────────────────────
    OtpDigit(char),
    OtpBackspace,

    /// Enter on the OTP panel: send the code or verify it, per step
    SubmitOtp,

    /// Request a fresh code (after the cool-down)
    ResendOtp,

    /// Leave code entry and edit the phone number again
    OtpBack,

    OtpSendCompleted { sent: bool },
    OtpSendFailed(RemoteFailure),
    OtpVerifyCompleted { verified: bool },
    OtpVerifyFailed(RemoteFailure),

    /// A code delivered by the autofill capability
    AutofillCode { code: String },

    /// OTP verification succeeded
    Authenticated,

    // ─────────────────────────────────────────────────────────
    // Device Page Messages
    // ─────────────────────────────────────────────────────────
    DeviceFetched {
        device_id: String,
        record: Arc<DeviceRecord>,
    },
    DeviceFetchFailed {
        device_id: String,
        failure: RemoteFailure,
    },

    /// Retry from the error fallback view
    BoundaryRetry,

    // ─────────────────────────────────────────────────────────
    // Ticket Form Messages
    // ─────────────────────────────────────────────────────────
    FormFocusNext,
    FormFocusPrev,
    FormInput(char),
    FormBackspace,
    FormNewline,
    FormCycle { forward: bool },
    ImageSelect { down: bool },

    /// Load the paths typed into the image field
    AddImagePaths,

    ImagesLoaded {
        loaded: Vec<ImageAttachment>,
        failed: Vec<String>,
        submitted: usize,
    },

    /// Ask before removing an attached image
    RequestImageDelete { index: usize },
    ConfirmImageDelete { index: usize },
    CancelImageDelete,

    SubmitTicket,
    /// Backend accepted the ticket; it may omit the document number
    TicketCreated { ticket_id: Option<String> },
    TicketFailed(RemoteFailure),

    /// Leave the confirmation view
    ConfirmationDone,
}
