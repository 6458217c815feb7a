use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::sync::Notify;
use tracing::{info, warn};

/// Ctrl-C handling for the command line. In-flight unfollow requests are
/// abandoned once shutdown is requested.
#[derive(Clone)]
pub struct ShutdownManager {
    shutdown_flag: Arc<AtomicBool>,
    shutdown_notify: Arc<Notify>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            shutdown_flag: Arc::new(AtomicBool::new(false)),
            shutdown_notify: Arc::new(Notify::new()),
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown_flag.load(Ordering::SeqCst)
    }

    pub async fn wait_for_shutdown(&self) {
        let notified = self.shutdown_notify.notified();
        if self.is_shutdown() {
            return;
        }
        notified.await;
    }

    pub fn shutdown(&self) {
        if !self.shutdown_flag.swap(true, Ordering::SeqCst) {
            info!("Shutdown requested, abandoning pending requests");
            self.shutdown_notify.notify_waiters();
        }
    }

    async fn wait_for_signal(&self) -> Result<(), std::io::Error> {
        ctrl_c().await?;
        info!("Received shutdown signal (Ctrl-C)");
        self.shutdown();
        Ok(())
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn setup_shutdown_handler() -> ShutdownManager {
    let shutdown_manager = ShutdownManager::new();

    let listener = shutdown_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = listener.wait_for_signal().await {
            warn!("Error setting up signal handler: {}", e);
        }
    });

    shutdown_manager
}
