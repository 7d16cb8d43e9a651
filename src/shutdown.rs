use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// `true` once the run must stop. Late subscribers still observe the flag.
pub type ShutdownSender = watch::Sender<bool>;
pub type ShutdownReceiver = watch::Receiver<bool>;

#[must_use]
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    watch::channel(false)
}

/// Flags shutdown. A no-op when every receiver is gone.
pub fn request_shutdown(shutdown_tx: &ShutdownSender) {
    shutdown_tx.send_if_modified(|stop| {
        let changed = !*stop;
        *stop = true;
        changed
    });
}

#[must_use]
pub fn is_shutdown(shutdown_rx: &ShutdownReceiver) -> bool {
    *shutdown_rx.borrow()
}

/// Resolves once shutdown is flagged; never resolves if the sender is dropped
/// without flagging.
pub async fn wait_for_shutdown(shutdown_rx: &mut ShutdownReceiver) {
    let flagged = shutdown_rx.wait_for(|stop| *stop).await.is_ok();
    if !flagged {
        std::future::pending::<()>().await;
    }
}

/// Flags shutdown on Ctrl+C or SIGTERM. Exits quietly once shutdown is
/// flagged by anyone else.
pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        let mut shutdown_rx = shutdown_tx.subscribe();

        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                () = wait_for_shutdown(&mut shutdown_rx) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, stopping outstanding requests");
                    request_shutdown(&shutdown_tx);
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {
                    info!("Terminated, stopping outstanding requests");
                    request_shutdown(&shutdown_tx);
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                () = wait_for_shutdown(&mut shutdown_rx) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, stopping outstanding requests");
                    request_shutdown(&shutdown_tx);
                }
            }
        }
    })
}

/// Flags shutdown once `limit` has elapsed.
pub fn setup_run_timeout_handler(
    shutdown_tx: &ShutdownSender,
    limit: Duration,
) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        let mut shutdown_rx = shutdown_tx.subscribe();
        tokio::select! {
            () = wait_for_shutdown(&mut shutdown_rx) => {}
            () = tokio::time::sleep(limit) => {
                warn!("Run timeout of {}ms reached, stopping", limit.as_millis());
                request_shutdown(&shutdown_tx);
            }
        }
    })
}
