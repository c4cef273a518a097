//! Backend operations used by the portal
//!
//! [`RemoteService`] is the seam between the TEA handlers and the network.
//! The HTTP implementation lives in [`crate::client`]; tests use
//! `MockRemote` from [`crate::test_utils`].

use devportal_core::prelude::*;
use devportal_core::{DeviceRecord, TicketDraft};

/// Result of asking the backend to text a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOtpOutcome {
    pub sent: bool,
}

/// Result of checking a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOtpOutcome {
    pub verified: bool,
    /// Session code returned alongside a successful check
    pub session_code: Option<String>,
}

impl VerifyOtpOutcome {
    pub fn verified(session_code: Option<String>) -> Self {
        Self {
            verified: true,
            session_code,
        }
    }

    pub fn rejected() -> Self {
        Self {
            verified: false,
            session_code: None,
        }
    }
}

/// Ticket accepted by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTicket {
    /// Backend document number (`DOCNO`)
    pub ticket_id: Option<String>,
}

/// Remote operations of the device service backend
///
/// Both the live HTTP client and the test double implement this trait.
#[trait_variant::make(RemoteService: Send)]
pub trait LocalRemoteService {
    /// Ask the backend to send a one-time code to `phone`
    async fn send_otp(&self, phone: &str) -> Result<SendOtpOutcome>;

    /// Check `code` for `phone`
    async fn verify_otp(&self, phone: &str, code: &str) -> Result<VerifyOtpOutcome>;

    /// Fetch the record of device `id`
    async fn fetch_device(&self, id: &str) -> Result<DeviceRecord>;

    /// Open a service ticket
    async fn create_ticket(&self, draft: &TicketDraft) -> Result<CreatedTicket>;

    /// End the backend session
    async fn sign_out(&self) -> Result<()>;
}
