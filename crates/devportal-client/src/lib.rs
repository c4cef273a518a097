//! # devportal-client - Remote Service Client
//!
//! Talks to the device service backend over HTTP.
//!
//! ## Public API
//!
//! - [`RemoteService`] - Async backend operations (`Send` futures)
//! - [`HttpRemote`], [`ClientConfig`] - reqwest implementation
//! - [`RetryPolicy`], [`fetch_device_with_retry`] - Backoff for device fetches
//! - `test_utils::MockRemote` - Scripted double (feature `test-helpers`)

pub mod client;
pub mod protocol;
pub mod retry;
pub mod service;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::{ClientConfig, HttpRemote, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use retry::{fetch_device_with_retry, RetryPolicy};
pub use service::{CreatedTicket, RemoteService, SendOtpOutcome, VerifyOtpOutcome};
