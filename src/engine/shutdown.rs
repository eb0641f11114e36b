// src/engine/shutdown.rs

//! Ctrl-C handling.
//!
//! The signal is only observed by the dispatcher while it waits for the next
//! input line. A command that is already running is never interrupted by us.

use tokio::sync::watch;
use tracing::{info, warn};

/// Create a shutdown flag. Send `true` to request shutdown.
pub fn shutdown_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Forward the first Ctrl-C to `tx`.
pub fn spawn_ctrl_c_listener(tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            return;
        }
        info!("Ctrl+C received; stopping after the current event");
        let _ = tx.send(true);
    });
}

/// Resolves once shutdown has been requested.
///
/// If the sender is dropped without requesting shutdown, this never
/// resolves.
pub async fn requested(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
