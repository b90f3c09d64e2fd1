use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user notification delivered by the backend and polled periodically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}
