use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::post::{poll_closed, Post, PostComment};

#[derive(Clone)]
pub struct PostService {
    pool: PgPool,
}

/// Snapshot of a poll: every declared option is present in `results`,
/// zero-counted when nobody picked it, so tallies always line up with the
/// vote rows.
#[derive(Debug, Clone, Serialize)]
pub struct PollState {
    pub question: String,
    pub options: Vec<String>,
    pub results: BTreeMap<String, i64>,
    pub voters: Vec<Uuid>,
    pub total_votes: i64,
    pub end_date: Option<DateTime<Utc>>,
    pub closed: bool,
}

pub struct NewPost<'a> {
    pub author_id: Uuid,
    pub category: &'a str,
    pub body: &'a str,
    pub photos: JsonValue,
    pub videos: JsonValue,
    pub event: Option<JsonValue>,
    pub occasion: Option<JsonValue>,
    pub job_opening: Option<JsonValue>,
    pub document: Option<JsonValue>,
    pub poll_question: Option<String>,
    pub poll_options: Option<Vec<String>>,
    pub poll_end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PostWithMeta {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub post: Post,
    pub comment_count: i64,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewPost<'_>) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (
                author_id, category, body, photos, videos,
                event, occasion, job_opening, document,
                poll_question, poll_options, poll_end_date
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12)
            RETURNING *
            "#,
        )
        .bind(new.author_id)
        .bind(new.category)
        .bind(new.body)
        .bind(&new.photos)
        .bind(&new.videos)
        .bind(&new.event)
        .bind(&new.occasion)
        .bind(&new.job_opening)
        .bind(&new.document)
        .bind(&new.poll_question)
        .bind(&new.poll_options)
        .bind(new.poll_end_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    pub async fn list(
        &self,
        page: i64,
        per_page: i64,
        category: Option<&str>,
    ) -> Result<(Vec<PostWithMeta>, i64)> {
        let offset = (page - 1) * per_page;
        let posts = sqlx::query_as::<_, PostWithMeta>(
            r#"
            SELECT p.*,
                   (SELECT COUNT(*) FROM post_comments c WHERE c.post_id = p.id) AS comment_count
            FROM posts p
            WHERE ($1::text IS NULL OR p.category = $1)
            ORDER BY p.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(category)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM posts WHERE ($1::text IS NULL OR category = $1)",
        )
        .bind(category)
        .fetch_one(&self.pool)
        .await?;

        Ok((posts, total))
    }

    /// Casts a vote, first vote wins. The insert is a single conditional
    /// statement keyed on (post_id, voter_id): racing votes from one user
    /// collapse to the earliest, and the tally is always COUNT of rows.
    ///
    /// A closed poll and a repeat vote are not errors: both return the
    /// current state untouched.
    pub async fn vote(&self, post_id: Uuid, voter_id: Uuid, option: &str) -> Result<PollState> {
        let post = self
            .get(post_id)
            .await?
            .ok_or_else(|| Error::NotFound("Post not found".into()))?;
        if !post.has_poll() {
            return Err(Error::NotFound("This post has no poll".into()));
        }

        if poll_closed(Utc::now(), post.poll_end_date) {
            return self.poll_state(&post).await;
        }

        let already_voted = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM poll_votes WHERE post_id = $1 AND voter_id = $2)",
        )
        .bind(post_id)
        .bind(voter_id)
        .fetch_one(&self.pool)
        .await?;
        if already_voted {
            return self.poll_state(&post).await;
        }

        let options = post.poll_options.clone().unwrap_or_default();
        if !options.iter().any(|o| o == option) {
            return Err(Error::BadRequest(format!(
                "\"{}\" is not an option of this poll",
                option
            )));
        }

        // ON CONFLICT absorbs the race where the same user voted between
        // the existence check and here; the earlier row stands.
        sqlx::query(
            r#"
            INSERT INTO poll_votes (post_id, voter_id, "option")
            VALUES ($1, $2, $3)
            ON CONFLICT (post_id, voter_id) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(voter_id)
        .bind(option)
        .execute(&self.pool)
        .await?;

        self.poll_state(&post).await
    }

    pub async fn poll_state(&self, post: &Post) -> Result<PollState> {
        let question = post
            .poll_question
            .clone()
            .ok_or_else(|| Error::NotFound("This post has no poll".into()))?;
        let options = post.poll_options.clone().unwrap_or_default();

        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"SELECT "option", COUNT(*) FROM poll_votes WHERE post_id = $1 GROUP BY "option""#,
        )
        .bind(post.id)
        .fetch_all(&self.pool)
        .await?;

        let voters = sqlx::query_scalar::<_, Uuid>(
            "SELECT voter_id FROM poll_votes WHERE post_id = $1 ORDER BY created_at",
        )
        .bind(post.id)
        .fetch_all(&self.pool)
        .await?;

        let mut results: BTreeMap<String, i64> = options.iter().map(|o| (o.clone(), 0)).collect();
        for (option, count) in rows {
            results.insert(option, count);
        }
        let total_votes = results.values().sum();

        Ok(PollState {
            question,
            options,
            results,
            total_votes,
            voters,
            end_date: post.poll_end_date,
            closed: poll_closed(Utc::now(), post.poll_end_date),
        })
    }

    pub async fn add_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        body: &str,
    ) -> Result<PostComment> {
        let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(Error::NotFound("Post not found".into()));
        }

        let comment = sqlx::query_as::<_, PostComment>(
            r#"
            INSERT INTO post_comments (post_id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(post_id)
        .bind(author_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    pub async fn list_comments(&self, post_id: Uuid) -> Result<Vec<PostComment>> {
        let comments = sqlx::query_as::<_, PostComment>(
            "SELECT * FROM post_comments WHERE post_id = $1 ORDER BY created_at ASC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }
}
