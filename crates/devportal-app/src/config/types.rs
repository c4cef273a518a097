//! Configuration types for the device portal
//!
//! Defines `Settings` (`config.toml`) and its sections.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use devportal_client::{ClientConfig, RetryPolicy, DEFAULT_BASE_URL};
use devportal_core::Language;

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub fetch: FetchSettings,

    #[serde(default)]
    pub otp: OtpSettings,

    #[serde(default)]
    pub tickets: TicketSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.backend.base_url.clone(),
            timeout: Duration::from_secs(self.backend.timeout_secs),
            include_credentials: self.backend.include_credentials,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.fetch.retry_attempts,
            base_delay: Duration::from_millis(self.fetch.retry_base_delay_ms),
            max_delay: Duration::from_millis(self.fetch.retry_max_delay_ms),
        }
    }

    pub fn resend_cooldown(&self) -> Duration {
        Duration::from_secs(self.otp.resend_cooldown_secs)
    }

    pub fn snackbar_ttl(&self) -> Duration {
        Duration::from_secs(self.ui.snackbar_secs)
    }
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Keep the backend session cookie
    #[serde(default = "default_true")]
    pub include_credentials: bool,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            include_credentials: true,
        }
    }
}

/// Device fetch retry settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FetchSettings {
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            retry_attempts: default_retry_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

/// OTP flow settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpSettings {
    #[serde(default = "default_resend_cooldown_secs")]
    pub resend_cooldown_secs: u64,

    /// File an SMS bridge writes incoming messages to; enables autofill
    #[serde(default)]
    pub autofill_file: Option<PathBuf>,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            resend_cooldown_secs: default_resend_cooldown_secs(),
            autofill_file: None,
        }
    }
}

/// Ticket submission settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TicketSettings {
    /// Accept tickets locally when the backend is unreachable
    #[serde(default = "default_true")]
    pub offline_fallback: bool,
}

impl Default for TicketSettings {
    fn default() -> Self {
        Self {
            offline_fallback: true,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default)]
    pub language: Language,

    #[serde(default = "default_snackbar_secs")]
    pub snackbar_secs: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            language: Language::English,
            snackbar_secs: default_snackbar_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    1000
}

fn default_retry_max_delay_ms() -> u64 {
    30_000
}

fn default_resend_cooldown_secs() -> u64 {
    5
}

fn default_snackbar_secs() -> u64 {
    5
}
