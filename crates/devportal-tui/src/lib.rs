//! devportal-tui - Terminal UI for the device service portal
//!
//! Renders [`devportal_app::AppState`] with ratatui and feeds crossterm
//! key events back into the TEA loop.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run;
