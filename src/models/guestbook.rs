use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Number of entries returned by the listing, newest first.
pub const RECENT_ENTRIES_LIMIT: i64 = 20;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GuestbookEntry {
    pub id: Uuid,
    pub author_name: String,
    pub message: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

/// POST /api/guestbook
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub author_name: String,

    #[validate(length(min = 1, max = 500, message = "Message must be 1-500 characters"))]
    pub message: String,
}

impl CreateEntryRequest {
    pub fn trimmed(self) -> Self {
        Self {
            author_name: self.author_name.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GuestbookStats {
    pub total_entries: i64,
    pub total_likes: i64,
}
