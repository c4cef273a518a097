//! File logging through tracing
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file under
//! `<data_local_dir>/device-portal/logs/`. The filter comes from
//! `DEVPORTAL_LOG`:
//!
//! ```bash
//! DEVPORTAL_LOG=debug devportal /device/AU125668790
//! DEVPORTAL_LOG=devportal_client=trace,info devportal
//! ```

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "DEVPORTAL_LOG";

const LOG_FILE_PREFIX: &str = "devportal.log";

const DEFAULT_FILTER: &str =
    "device_portal=info,devportal_app=info,devportal_client=info,devportal_tui=info,warn";

/// Install the global subscriber writing to [`log_directory`]
pub fn init() -> Result<()> {
    init_in(&log_directory())
}

/// Install the global subscriber writing into `dir`
pub fn init_in(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(filter())
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        dir = %dir.display(),
        "Device portal logging started"
    );
    Ok(())
}

/// `DEVPORTAL_LOG` when set and valid, else the default filter
fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `<data_local_dir>/device-portal/logs`, relative to the working
/// directory when the platform has no data dir
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("device-portal")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_is_app_scoped() {
        assert!(log_directory().ends_with("device-portal/logs"));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
