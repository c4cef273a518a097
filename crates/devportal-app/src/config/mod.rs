//! Configuration management
//!
//! - `types`: settings structs with serde defaults
//! - `settings`: locating, reading and validating `config.toml`

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_settings, parse_settings};
pub use types::{BackendSettings, FetchSettings, OtpSettings, Settings, TicketSettings, UiSettings};
