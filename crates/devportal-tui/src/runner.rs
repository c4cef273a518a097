//! Runner: wires the backend, the autofill capability and the terminal
//! into the TEA loop

use std::sync::Arc;

use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use devportal_app::signals::spawn_signal_handler;
use devportal_app::{autofill, process_message, ActionContext, AppState, Message, Route, Settings};
use devportal_client::{HttpRemote, RemoteService};
use devportal_core::{Result, ResultExt};
use tracing::info;

use crate::{event, render, terminal};

/// Buffered messages from background tasks
const CHANNEL_CAPACITY: usize = 256;

/// Run the portal until the user quits
pub async fn run(route: Route, settings: Settings) -> Result<()> {
    let remote = Arc::new(
        HttpRemote::new(&settings.client_config()).context("Invalid backend settings")?,
    );
    info!("Backend at {}", remote.base_url());

    let autofill = autofill::from_settings(settings.otp.autofill_file.as_deref());
    let (msg_tx, mut msg_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
    spawn_signal_handler(msg_tx.clone());

    let mut ctx = ActionContext::new(remote, autofill, settings.retry_policy(), msg_tx);
    let mut state = AppState::new(route, settings);
    state.autofill_supported = ctx.autofill.is_supported();

    let mut term = terminal::init()?;
    let result = run_loop(&mut term, &mut state, &mut msg_rx, &mut ctx);
    terminal::restore();
    ctx.autofill.cancel();

    info!("Portal exited");
    result
}

fn run_loop<R>(
    term: &mut DefaultTerminal,
    state: &mut AppState,
    msg_rx: &mut mpsc::Receiver<Message>,
    ctx: &mut ActionContext<R>,
) -> Result<()>
where
    R: RemoteService + Send + Sync + 'static,
{
    while !state.should_quit() {
        // Results from background tasks first
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, ctx);
        }
        if state.should_quit() {
            break;
        }

        term.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process_message(state, message, ctx);
        }
    }
    Ok(())
}
