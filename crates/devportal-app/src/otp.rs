//! OTP verification flow state
//!
//! Two-step form: phone entry, then code entry. Errors are an overlay on
//! either step and never change the step itself.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;

/// Digits in a phone number
pub const PHONE_LEN: usize = 10;

/// Digits in a one-time code
pub const CODE_LEN: usize = 4;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("Invalid phone regex"));

static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("Invalid code regex"));

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

pub fn is_valid_code(code: &str) -> bool {
    CODE_PATTERN.is_match(code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OtpStep {
    #[default]
    PhoneEntry,
    CodeEntry,
    Verified,
}

#[derive(Debug, Clone, Default)]
pub struct OtpState {
    pub step: OtpStep,
    pub phone: String,
    pub code: String,
    /// Translation key of the current error, if any
    pub error: Option<&'static str>,
    /// A send or verify call is in flight
    pub loading: bool,
    /// Earliest moment a resend is allowed
    pub resend_at: Option<Instant>,
    /// The autofill listener has been started for this code entry
    pub autofill_active: bool,
}

impl OtpState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the field being edited in the current step
    pub fn active_input(&self) -> &str {
        match self.step {
            OtpStep::PhoneEntry => &self.phone,
            _ => &self.code,
        }
    }

    /// Append a character to the active field.
    ///
    /// Non-digits are dropped and the field is capped at its length.
    /// Ignored while loading.
    pub fn push_char(&mut self, c: char) -> bool {
        if self.loading || !c.is_ascii_digit() {
            return false;
        }
        let (field, cap) = match self.step {
            OtpStep::PhoneEntry => (&mut self.phone, PHONE_LEN),
            OtpStep::CodeEntry => (&mut self.code, CODE_LEN),
            OtpStep::Verified => return false,
        };
        if field.len() >= cap {
            return false;
        }
        field.push(c);
        true
    }

    pub fn backspace(&mut self) {
        if self.loading {
            return;
        }
        match self.step {
            OtpStep::PhoneEntry => {
                self.phone.pop();
            }
            OtpStep::CodeEntry => {
                self.code.pop();
            }
            OtpStep::Verified => {}
        }
    }

    /// Replace the code with the digits of `raw`, capped at [`CODE_LEN`]
    pub fn fill_code(&mut self, raw: &str) {
        self.code = raw
            .chars()
            .filter(char::is_ascii_digit)
            .take(CODE_LEN)
            .collect();
    }

    pub fn set_error(&mut self, key: &'static str) {
        self.error = Some(key);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Move to code entry and start the resend cool-down
    pub fn enter_code_entry(&mut self, now: Instant, cooldown: Duration) {
        self.step = OtpStep::CodeEntry;
        self.code.clear();
        self.error = None;
        self.resend_at = Some(now + cooldown);
    }

    /// Return to phone entry, keeping the phone number
    pub fn back_to_phone(&mut self) {
        self.step = OtpStep::PhoneEntry;
        self.code.clear();
        self.loading = false;
        self.resend_at = None;
    }

    pub fn can_resend(&self, now: Instant) -> bool {
        self.step == OtpStep::CodeEntry
            && !self.loading
            && self.resend_at.map_or(true, |at| now >= at)
    }

    /// Whole seconds until a resend is allowed
    pub fn resend_wait_secs(&self, now: Instant) -> Option<u64> {
        let at = self.resend_at?;
        let remaining = at.checked_duration_since(now)?;
        if remaining.is_zero() {
            None
        } else {
            Some(remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0))
        }
    }

    /// Fresh flow, keeping the typed phone number
    pub fn reset(&mut self) {
        let phone = std::mem::take(&mut self.phone);
        *self = Self {
            phone,
            ..Self::default()
        };
    }
}
