//! # devportal-core - Core Domain Types
//!
//! Foundation crate for the device service portal. Contains domain types,
//! the warranty classification rules, localization tables and error
//! handling. No async runtime, no I/O beyond logging setup.
//!
//! ## Public API
//!
//! ### Domain
//! - [`DeviceRecord`], [`ServiceContract`] - Backend device record
//! - [`Session`] - Authentication state for one run
//! - [`TicketDraft`], [`TicketConfirmation`], [`ImageAttachment`] - Ticket types
//!
//! ### Derivations
//! - [`WarrantyClassifier`], [`WarrantyStatus`] - Ordered warranty rules
//! - [`device_details`], [`status_banner`] - Display fields for a record
//!
//! ### Localization
//! - [`Localizer`], [`Language`], [`Direction`]
//!
//! ### Error Handling
//! - [`Error`], [`Result`], [`ErrorKind`], [`RemoteFailure`], [`ResultExt`]

pub mod details;
pub mod device;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod session;
pub mod ticket;
pub mod warranty;

pub use details::{device_details, status_banner, DetailField, FieldWidth, StatusBanner};
pub use device::{format_date, parse_date, sample_record, DeviceRecord, ServiceContract};
pub use error::{Error, ErrorKind, RemoteFailure, Result, ResultExt};
pub use i18n::{Direction, Language, Localizer};
pub use session::{Session, TEST_MODE_DEVICE_ID, TEST_MODE_SENTINEL};
pub use ticket::{
    mime_for_path, CallType, ImageAttachment, TicketConfirmation, TicketDevice, TicketDraft,
    Urgency, MAX_IMAGES,
};
pub use warranty::{
    coverage_end, CoverageEnd, CoverageSource, WarrantyClassifier, WarrantyRule, WarrantyStatus,
};

/// Prelude for common imports used throughout the application
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}
