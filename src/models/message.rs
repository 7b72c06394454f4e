use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "meeting_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Pending,
    Accepted,
    Declined,
}

impl MeetingStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

/// A meeting request: an intent record carrying the requester's proposed
/// availability, not a calendar allocation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MeetingRequest {
    pub id: Uuid,
    pub sender_id: Uuid,
    /// Ordered `[{day, slots: [..]}, ..]`, stored as JSONB.
    pub schedule: JsonValue,
    pub note: String,
    pub agency_name: String,
    pub agency_email: String,
    pub user_email: String,
    pub user_phone: String,
    pub status: MeetingStatus,
    pub response: Option<String>,
    pub is_sent: bool,
    pub created_at: DateTime<Utc>,
}
