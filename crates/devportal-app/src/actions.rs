//! Action handlers: UpdateAction dispatch and background task spawning

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::autofill::OtpAutofill;
use crate::handler::UpdateAction;
use crate::images::load_images;
use crate::message::Message;
use devportal_client::{fetch_device_with_retry, RemoteService, RetryPolicy};
use devportal_core::RemoteFailure;

/// Everything `handle_action` needs besides the action itself
pub struct ActionContext<R> {
    pub remote: Arc<R>,
    pub autofill: Box<dyn OtpAutofill>,
    pub retry: RetryPolicy,
    pub msg_tx: mpsc::Sender<Message>,
}

impl<R> ActionContext<R> {
    pub fn new(
        remote: Arc<R>,
        autofill: Box<dyn OtpAutofill>,
        retry: RetryPolicy,
        msg_tx: mpsc::Sender<Message>,
    ) -> Self {
        Self {
            remote,
            autofill,
            retry,
            msg_tx,
        }
    }
}

/// Execute an action, spawning a background task where it talks to the
/// network or the filesystem
pub fn handle_action<R>(action: UpdateAction, ctx: &mut ActionContext<R>)
where
    R: RemoteService + Send + Sync + 'static,
{
    match action {
        UpdateAction::SendOtp { phone } => {
            let remote = Arc::clone(&ctx.remote);
            spawn_task(ctx.msg_tx.clone(), "send otp", async move {
                Some(match remote.send_otp(&phone).await {
                    Ok(outcome) => Message::OtpSendCompleted { sent: outcome.sent },
                    Err(e) => Message::OtpSendFailed(RemoteFailure::from(e)),
                })
            });
        }

        UpdateAction::VerifyOtp { phone, code } => {
            let remote = Arc::clone(&ctx.remote);
            spawn_task(ctx.msg_tx.clone(), "verify otp", async move {
                Some(match remote.verify_otp(&phone, &code).await {
                    Ok(outcome) => Message::OtpVerifyCompleted {
                        verified: outcome.verified,
                    },
                    Err(e) => Message::OtpVerifyFailed(RemoteFailure::from(e)),
                })
            });
        }

        UpdateAction::FetchDevice { device_id } => {
            let remote = Arc::clone(&ctx.remote);
            let retry = ctx.retry;
            spawn_task(ctx.msg_tx.clone(), "fetch device", async move {
                Some(
                    match fetch_device_with_retry(remote.as_ref(), &device_id, &retry).await {
                        Ok(record) => Message::DeviceFetched {
                            device_id,
                            record: Arc::new(record),
                        },
                        Err(e) => Message::DeviceFetchFailed {
                            device_id,
                            failure: RemoteFailure::from(e),
                        },
                    },
                )
            });
        }

        UpdateAction::CreateTicket { draft } => {
            let remote = Arc::clone(&ctx.remote);
            spawn_task(ctx.msg_tx.clone(), "create ticket", async move {
                Some(match remote.create_ticket(&draft).await {
                    Ok(created) => Message::TicketCreated {
                        ticket_id: created.ticket_id,
                    },
                    Err(e) => Message::TicketFailed(RemoteFailure::from(e)),
                })
            });
        }

        UpdateAction::SignOut => {
            ctx.autofill.cancel();
            let remote = Arc::clone(&ctx.remote);
            spawn_task(ctx.msg_tx.clone(), "sign out", async move {
                if let Err(e) = remote.sign_out().await {
                    warn!("Backend sign-out failed: {}", e);
                }
                Some(Message::SignedOut)
            });
        }

        UpdateAction::LoadImages { paths, limit } => {
            spawn_task(ctx.msg_tx.clone(), "load images", async move {
                let result = load_images(paths, limit).await;
                Some(Message::ImagesLoaded {
                    loaded: result.loaded,
                    failed: result.failed,
                    submitted: result.submitted,
                })
            });
        }

        UpdateAction::StartAutofill => {
            if !ctx.autofill.is_supported() {
                return;
            }
            match ctx.autofill.listen(ctx.msg_tx.clone()) {
                Ok(()) => info!("OTP autofill listening"),
                Err(e) => warn!("Could not start OTP autofill: {}", e),
            }
        }

        UpdateAction::CancelAutofill => {
            if ctx.autofill.is_listening() {
                debug!("Cancelling OTP autofill");
            }
            ctx.autofill.cancel();
        }
    }
}

/// Run `fut` on the runtime and forward its message.
///
/// A panicking task is reported as [`Message::Fault`].
fn spawn_task<F>(msg_tx: mpsc::Sender<Message>, label: &'static str, fut: F)
where
    F: Future<Output = Option<Message>> + Send + 'static,
{
    tokio::spawn(async move {
        let msg = match tokio::spawn(fut).await {
            Ok(Some(msg)) => msg,
            Ok(None) => return,
            Err(e) => {
                error!("Task '{}' failed: {}", label, e);
                Message::Fault {
                    message: format!("{label} task failed: {e}"),
                }
            }
        };
        if msg_tx.send(msg).await.is_err() {
            debug!("Message channel closed, dropping '{}' result", label);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autofill::NoopAutofill;
    use devportal_client::test_utils::{complete_draft, test_record, MockRemote};
    use devportal_client::{CreatedTicket, SendOtpOutcome};
    use devportal_core::{Error, ErrorKind};
    use std::time::Duration;

    fn context(remote: MockRemote) -> (ActionContext<MockRemote>, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(16);
        let ctx = ActionContext::new(
            Arc::new(remote),
            Box::new(NoopAutofill),
            RetryPolicy::none(),
            tx,
        );
        (ctx, rx)
    }

    async fn next(rx: &mut mpsc::Receiver<Message>) -> Message {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("no message within timeout")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_send_otp_reports_outcome() {
        let remote = MockRemote::new();
        remote.push_send_otp(Ok(SendOtpOutcome { sent: false }));
        let (mut ctx, mut rx) = context(remote.clone());

        handle_action(
            UpdateAction::SendOtp {
                phone: "0501234567".into(),
            },
            &mut ctx,
        );

        assert!(matches!(
            next(&mut rx).await,
            Message::OtpSendCompleted { sent: false }
        ));
        assert_eq!(remote.calls().phones, vec!["0501234567".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_device_success_and_failure() {
        let remote = MockRemote::new();
        remote
            .push_device(Ok(test_record("SN-7")))
            .push_device(Err(Error::server(404, "not found")));
        let (mut ctx, mut rx) = context(remote);

        handle_action(
            UpdateAction::FetchDevice {
                device_id: "SN-7".into(),
            },
            &mut ctx,
        );
        match next(&mut rx).await {
            Message::DeviceFetched { device_id, record } => {
                assert_eq!(device_id, "SN-7");
                assert_eq!(record.serial_number.as_deref(), Some("SN-7"));
            }
            other => panic!("unexpected {other:?}"),
        }

        handle_action(
            UpdateAction::FetchDevice {
                device_id: "SN-8".into(),
            },
            &mut ctx,
        );
        match next(&mut rx).await {
            Message::DeviceFetchFailed { device_id, failure } => {
                assert_eq!(device_id, "SN-8");
                assert_eq!(failure.kind, ErrorKind::Server);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_ticket_forwards_id() {
        let remote = MockRemote::new();
        remote.push_create_ticket(Ok(CreatedTicket {
            ticket_id: Some("D-42".into()),
        }));
        let (mut ctx, mut rx) = context(remote.clone());

        handle_action(
            UpdateAction::CreateTicket {
                draft: Box::new(complete_draft()),
            },
            &mut ctx,
        );

        assert!(matches!(
            next(&mut rx).await,
            Message::TicketCreated { ticket_id: Some(ref id) } if id == "D-42"
        ));
        assert_eq!(remote.calls().drafts.len(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_always_reports_signed_out() {
        let (mut ctx, mut rx) = context(MockRemote::new());
        handle_action(UpdateAction::SignOut, &mut ctx);
        assert!(matches!(next(&mut rx).await, Message::SignedOut));
    }

    #[tokio::test]
    async fn test_load_images_reports_failures() {
        let (mut ctx, mut rx) = context(MockRemote::new());
        handle_action(
            UpdateAction::LoadImages {
                paths: vec!["/nonexistent/a.jpg".into()],
                limit: 5,
            },
            &mut ctx,
        );
        match next(&mut rx).await {
            Message::ImagesLoaded {
                loaded,
                failed,
                submitted,
            } => {
                assert!(loaded.is_empty());
                assert_eq!(failed, vec!["/nonexistent/a.jpg".to_string()]);
                assert_eq!(submitted, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_panicking_task_becomes_fault() {
        let (tx, mut rx) = mpsc::channel(1);
        spawn_task(tx, "boom", async {
            if true {
                panic!("kaboom");
            }
            None
        });
        assert!(matches!(next(&mut rx).await, Message::Fault { .. }));
    }
}
