//! Fail-soft notification source adapter.

use std::sync::Arc;
use std::time::Duration;

use tracing;

use bunny_core::traits::NotificationSource;
use bunny_core::types::{NotificationId, NotificationRecord};

/// Polls a [`NotificationSource`], treating every failure as "no new data".
#[derive(Debug, Clone)]
pub struct NotificationPoller {
    /// Underlying source
    source: Arc<dyn NotificationSource>,
    /// Time between polls
    interval: Duration,
}

impl NotificationPoller {
    /// Create a new poller
    pub fn new(source: Arc<dyn NotificationSource>, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Configured poll interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch the current records. Never fails; errors yield an empty batch.
    pub async fn poll(&self) -> Vec<NotificationRecord> {
        match self.source.fetch_notifications().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Notification poll failed, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Fire a read acknowledgement without waiting for it.
    ///
    /// The outcome is only logged; dedup does not depend on it.
    pub fn acknowledge(&self, id: NotificationId) {
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            match source.mark_read(id).await {
                Ok(()) => tracing::trace!("Notification {} marked read", id),
                Err(e) => tracing::warn!("Failed to mark notification {} read: {}", id, e),
            }
        });
    }

    /// Fire a mark-all-read request without waiting for it.
    pub fn acknowledge_all(&self) {
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            if let Err(e) = source.mark_all_read().await {
                tracing::warn!("Failed to mark all notifications read: {}", e);
            }
        });
    }
}
