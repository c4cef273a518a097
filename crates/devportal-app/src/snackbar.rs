//! Transient notification shown at the bottom of the screen

use std::time::{Duration, Instant};

use devportal_core::Localizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A localized notice that hides itself after a while
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snackbar {
    pub key: &'static str,
    pub args: Vec<(&'static str, String)>,
    pub severity: Severity,
    pub shown_at: Instant,
    pub ttl: Duration,
}

impl Snackbar {
    pub fn new(key: &'static str, severity: Severity, now: Instant, ttl: Duration) -> Self {
        Self {
            key,
            args: Vec::new(),
            severity,
            shown_at: now,
            ttl,
        }
    }

    pub fn with_arg(mut self, name: &'static str, value: impl ToString) -> Self {
        self.args.push((name, value.to_string()));
        self
    }

    /// Text in the active language
    pub fn text(&self, localizer: &Localizer) -> String {
        let args: Vec<(&str, &str)> = self.args.iter().map(|(k, v)| (*k, v.as_str())).collect();
        localizer.translate_with(self.key, &args)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snackbar_expires_after_ttl() {
        let now = Instant::now();
        let bar = Snackbar::new("fill_all_fields", Severity::Error, now, Duration::from_secs(5));
        assert!(!bar.is_expired(now + Duration::from_secs(4)));
        assert!(bar.is_expired(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_snackbar_text_substitutes_args() {
        let bar = Snackbar::new("selected_images", Severity::Info, Instant::now(), Duration::ZERO)
            .with_arg("count", 5)
            .with_arg("total", 6);
        assert_eq!(
            bar.text(&Localizer::default()),
            "Selected only 5 images out of 6 due to 5 image limit"
        );
    }
}
