//! Message processing
//!
//! Runs a message through the TEA update function, follows up chained
//! messages, and dispatches the resulting actions.

use crate::actions::{handle_action, ActionContext};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;
use devportal_client::RemoteService;

/// Process a message through the TEA update function
pub fn process_message<R>(state: &mut AppState, message: Message, ctx: &mut ActionContext<R>)
where
    R: RemoteService + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);
        if let Some(action) = result.action {
            handle_action(action, ctx);
        }
        msg = result.message;
    }
}
