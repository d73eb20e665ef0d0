//! Notification records delivered by the notification service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::NotificationId;

/// A notification as returned by `GET notifications/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Server-assigned identifier.
    pub id: NotificationId,
    /// Raw notification type (`task_complete`, `level_up`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Short headline.
    #[serde(default = "default_title")]
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub message: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether the server already considers this notification read.
    #[serde(default)]
    pub is_read: bool,
}

fn default_title() -> String {
    "New Notification".to_string()
}
