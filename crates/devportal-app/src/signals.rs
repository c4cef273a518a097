//! Signal handling for graceful shutdown

use tokio::sync::mpsc;

use crate::message::Message;
use devportal_core::prelude::*;

/// Spawn a task that sends [`Message::Quit`] on SIGINT/SIGTERM
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        if let Err(e) = wait_for_signal().await {
            error!("Signal handler error: {}", e);
            return;
        }
        info!("Shutdown signal received");
        if let Err(e) = tx
            .send(Message::Quit)
            .await
            .map_err(|e| Error::channel_send(e.to_string()))
        {
            warn!("{}", e);
        }
    });
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => debug!("Received SIGINT"),
        _ = sigterm.recv() => debug!("Received SIGTERM"),
    }
    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    debug!("Received Ctrl+C");
    Ok(())
}
