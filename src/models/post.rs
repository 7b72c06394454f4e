use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

pub const POST_CATEGORIES: &[&str] = &[
    "marketing_insights",
    "campaign_showcase",
    "industry_news",
    "career",
    "event",
    "other",
];

pub const MAX_POST_PHOTOS: usize = 10;
pub const MAX_POST_VIDEOS: usize = 5;
pub const MAX_POLL_OPTIONS: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category: String,
    pub body: String,
    /// `[{url, key}, ..]`, capped at [`MAX_POST_PHOTOS`].
    pub photos: JsonValue,
    /// `[{url, key}, ..]`, capped at [`MAX_POST_VIDEOS`].
    pub videos: JsonValue,
    pub event: Option<JsonValue>,
    pub occasion: Option<JsonValue>,
    pub job_opening: Option<JsonValue>,
    pub document: Option<JsonValue>,
    pub poll_question: Option<String>,
    pub poll_options: Option<Vec<String>>,
    pub poll_end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn has_poll(&self) -> bool {
        self.poll_question.is_some() && self.poll_options.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PollVote {
    pub post_id: Uuid,
    pub voter_id: Uuid,
    pub option: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostComment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// True once a poll no longer accepts votes. The boundary is strict:
/// a vote landing exactly at `end_date` is still counted.
pub fn poll_closed(now: DateTime<Utc>, end_date: Option<DateTime<Utc>>) -> bool {
    match end_date {
        Some(end) => now > end,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn poll_close_boundary_is_strictly_greater() {
        let end = Utc::now();
        assert!(!poll_closed(end, Some(end)));
        assert!(!poll_closed(end - Duration::seconds(1), Some(end)));
        assert!(poll_closed(end + Duration::seconds(1), Some(end)));
    }

    #[test]
    fn poll_without_end_date_never_closes() {
        assert!(!poll_closed(Utc::now(), None));
    }
}
