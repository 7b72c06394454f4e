use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::models::post::{MAX_POLL_OPTIONS, MAX_POST_PHOTOS, MAX_POST_VIDEOS, POST_CATEGORIES};

/// A stored media asset: the public URL plus the object-storage key it was
/// uploaded under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollPayload {
    pub question: String,
    pub options: Vec<String>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostPayload {
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[serde(default)]
    pub photos: Vec<MediaItem>,
    #[serde(default)]
    pub videos: Vec<MediaItem>,
    pub event: Option<JsonValue>,
    pub occasion: Option<JsonValue>,
    pub job_opening: Option<JsonValue>,
    pub document: Option<JsonValue>,
    pub poll: Option<PollPayload>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VotePayload {
    #[validate(length(min = 1))]
    pub option: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentPayload {
    #[validate(length(min = 1))]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PostListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub category: Option<String>,
}

impl CreatePostPayload {
    /// Structural checks beyond field-level rules: category from the known
    /// set, media caps, poll shape.
    pub fn validate_structure(&self) -> Result<(), String> {
        if !POST_CATEGORIES.contains(&self.category.as_str()) {
            return Err(format!("Unknown post category \"{}\"", self.category));
        }
        if self.photos.len() > MAX_POST_PHOTOS {
            return Err(format!("A post can carry at most {} photos", MAX_POST_PHOTOS));
        }
        if self.videos.len() > MAX_POST_VIDEOS {
            return Err(format!("A post can carry at most {} videos", MAX_POST_VIDEOS));
        }
        if let Some(poll) = &self.poll {
            if poll.question.trim().is_empty() {
                return Err("Poll question must not be empty".into());
            }
            if poll.options.len() < 2 || poll.options.len() > MAX_POLL_OPTIONS {
                return Err(format!(
                    "A poll needs between 2 and {} options",
                    MAX_POLL_OPTIONS
                ));
            }
            let mut seen = std::collections::HashSet::new();
            for option in &poll.options {
                if option.trim().is_empty() {
                    return Err("Poll options must not be empty".into());
                }
                if !seen.insert(option.as_str()) {
                    return Err(format!("Duplicate poll option \"{}\"", option));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> CreatePostPayload {
        CreatePostPayload {
            category: "marketing_insights".into(),
            body: "Attribution models compared".into(),
            photos: vec![],
            videos: vec![],
            event: None,
            occasion: None,
            job_opening: None,
            document: None,
            poll: None,
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut p = base();
        p.category = "memes".into();
        assert!(p.validate_structure().is_err());
    }

    #[test]
    fn photo_cap_is_enforced() {
        let mut p = base();
        p.photos = (0..=MAX_POST_PHOTOS)
            .map(|i| MediaItem {
                url: format!("https://cdn.test/{i}.jpg"),
                key: format!("post_images/{i}.jpg"),
            })
            .collect();
        assert!(p.validate_structure().is_err());
    }

    #[test]
    fn poll_needs_two_to_four_distinct_options() {
        let mut p = base();
        p.poll = Some(PollPayload {
            question: "Best channel?".into(),
            options: vec!["seo".into()],
            end_date: None,
        });
        assert!(p.validate_structure().is_err());

        p.poll = Some(PollPayload {
            question: "Best channel?".into(),
            options: vec!["seo".into(), "seo".into()],
            end_date: None,
        });
        assert!(p.validate_structure().is_err());

        p.poll = Some(PollPayload {
            question: "Best channel?".into(),
            options: vec!["seo".into(), "ppc".into(), "email".into()],
            end_date: None,
        });
        assert!(p.validate_structure().is_ok());
    }
}
