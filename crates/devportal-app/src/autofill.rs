//! One-time code autofill
//!
//! The OTP flow starts a listener when code entry begins and cancels it
//! whenever code entry is left. A received code arrives as
//! [`Message::AutofillCode`].
//!
//! Two capabilities ship: [`NoopAutofill`] (default) and
//! [`FileDropAutofill`], which watches a file that an SMS bridge writes
//! incoming messages to.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_full::{new_debouncer, DebounceEventResult};
use regex::Regex;
use tokio::sync::{mpsc, oneshot};

use crate::message::Message;
use devportal_core::prelude::*;

/// Debounce for file-drop events
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

static CODE_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})\b").expect("Invalid autofill code regex"));

/// First standalone 4-digit number in `text`
pub fn extract_code(text: &str) -> Option<String> {
    CODE_IN_TEXT
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Platform capability that delivers incoming one-time codes
pub trait OtpAutofill: Send {
    /// Whether codes can arrive at all
    fn is_supported(&self) -> bool;

    /// Start listening; codes are sent as [`Message::AutofillCode`]
    fn listen(&mut self, tx: mpsc::Sender<Message>) -> Result<()>;

    /// Stop listening. Safe to call when not listening.
    fn cancel(&mut self);

    fn is_listening(&self) -> bool;
}

/// Autofill for platforms without an SMS source
#[derive(Debug, Default)]
pub struct NoopAutofill;

impl OtpAutofill for NoopAutofill {
    fn is_supported(&self) -> bool {
        false
    }

    fn listen(&mut self, _tx: mpsc::Sender<Message>) -> Result<()> {
        Ok(())
    }

    fn cancel(&mut self) {}

    fn is_listening(&self) -> bool {
        false
    }
}

/// Watches a file for a freshly written one-time code
pub struct FileDropAutofill {
    path: PathBuf,
    debounce: Duration,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl FileDropAutofill {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            stop_tx: None,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    fn run_watcher(
        path: PathBuf,
        debounce: Duration,
        tx: mpsc::Sender<Message>,
        mut stop_rx: oneshot::Receiver<()>,
    ) {
        let Some(dir) = path.parent().map(Path::to_path_buf) else {
            warn!("Autofill path {} has no parent directory", path.display());
            return;
        };
        let target = path.clone();
        let file_name = path.file_name().map(|n| n.to_os_string());
        let tx_events = tx.clone();

        // Event paths may be canonicalized by the platform, so match on file name
        let debouncer = new_debouncer(debounce, None, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    let touched = events.iter().any(|event| {
                        event
                            .paths
                            .iter()
                            .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name)
                    });
                    if !touched {
                        return;
                    }
                    let Ok(contents) = std::fs::read_to_string(&target) else {
                        return;
                    };
                    if let Some(code) = extract_code(&contents) {
                        debug!("Autofill code received from {}", target.display());
                        if tx_events
                            .blocking_send(Message::AutofillCode { code })
                            .is_err()
                        {
                            debug!("Message channel closed, dropping autofill code");
                        }
                    }
                }
                Err(errors) => {
                    for error in errors {
                        warn!("Autofill watcher error: {:?}", error);
                    }
                }
            }
        });

        let mut debouncer = match debouncer {
            Ok(d) => d,
            Err(e) => {
                error!("Failed to create autofill watcher: {}", e);
                return;
            }
        };

        if let Err(e) = debouncer.watch(&dir, RecursiveMode::NonRecursive) {
            warn!("Failed to watch {}: {}", dir.display(), e);
            return;
        }
        info!("Autofill watching: {}", path.display());

        loop {
            match stop_rx.try_recv() {
                Ok(()) | Err(oneshot::error::TryRecvError::Closed) => {
                    info!("Autofill watcher stopping");
                    break;
                }
                Err(oneshot::error::TryRecvError::Empty) => {
                    std::thread::sleep(Duration::from_millis(100));
                }
            }
        }
    }
}

impl OtpAutofill for FileDropAutofill {
    fn is_supported(&self) -> bool {
        true
    }

    fn listen(&mut self, tx: mpsc::Sender<Message>) -> Result<()> {
        if self.is_listening() {
            return Ok(());
        }
        let path = self.path.clone();
        let debounce = self.debounce;
        let (stop_tx, stop_rx) = oneshot::channel();
        self.stop_tx = Some(stop_tx);

        tokio::task::spawn_blocking(move || {
            Self::run_watcher(path, debounce, tx, stop_rx);
        });
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }

    fn is_listening(&self) -> bool {
        self.stop_tx.is_some()
    }
}

impl Drop for FileDropAutofill {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Pick the capability for an optional configured drop file
pub fn from_settings(path: Option<&Path>) -> Box<dyn OtpAutofill> {
    match path {
        Some(path) => Box::new(FileDropAutofill::new(path.to_path_buf())),
        None => Box::new(NoopAutofill),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_code() {
        assert_eq!(
            extract_code("Your verification code is 4821"),
            Some("4821".into())
        );
        assert_eq!(extract_code("code: 12345"), None);
        assert_eq!(extract_code("no digits"), None);
        assert_eq!(extract_code("0042\n"), Some("0042".into()));
    }

    #[test]
    fn test_noop_is_unsupported() {
        let mut autofill = NoopAutofill;
        let (tx, _rx) = mpsc::channel(1);
        assert!(!autofill.is_supported());
        autofill.listen(tx).unwrap();
        assert!(!autofill.is_listening());
    }

    #[test]
    fn test_from_settings() {
        assert!(!from_settings(None).is_supported());
        assert!(from_settings(Some(Path::new("/tmp/otp.txt"))).is_supported());
    }

    #[tokio::test]
    async fn test_file_drop_listen_and_cancel() {
        let dir = tempfile::tempdir().unwrap();
        let mut autofill = FileDropAutofill::new(dir.path().join("otp.txt"));
        let (tx, _rx) = mpsc::channel(4);

        autofill.listen(tx).unwrap();
        assert!(autofill.is_listening());

        autofill.cancel();
        assert!(!autofill.is_listening());
        // Second cancel is a no-op
        autofill.cancel();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_file_drop_delivers_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otp.txt");
        let mut autofill =
            FileDropAutofill::new(path.clone()).with_debounce(Duration::from_millis(50));
        let (tx, mut rx) = mpsc::channel(4);

        autofill.listen(tx).unwrap();
        // Give the watcher time to register before writing
        tokio::time::sleep(Duration::from_millis(300)).await;
        std::fs::write(&path, "Your code is 7315").unwrap();

        let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("autofill code not delivered");
        assert!(matches!(msg, Some(Message::AutofillCode { ref code }) if code == "7315"));
        autofill.cancel();
    }
}
