//! Terminal setup and restoration

use devportal_core::prelude::*;
use ratatui::DefaultTerminal;

/// Enter raw mode and the alternate screen.
///
/// The returned terminal restores itself on panic.
pub fn init() -> Result<DefaultTerminal> {
    let terminal = ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))?;
    debug!("Terminal initialized");
    Ok(terminal)
}

/// Leave the alternate screen; failures are logged only
pub fn restore() {
    if let Err(e) = ratatui::try_restore() {
        warn!("Failed to restore terminal: {}", e);
    }
}
