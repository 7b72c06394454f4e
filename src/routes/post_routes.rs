use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::post_dto::{CommentPayload, CreatePostPayload, MediaItem, PostListQuery, VotePayload},
    error::{Error, Result},
    middleware::auth::AuthUser,
    services::post_service::NewPost,
    services::storage_service::StorageFolder,
    AppState,
};

pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreatePostPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    payload.validate_structure().map_err(Error::BadRequest)?;

    let (poll_question, poll_options, poll_end_date) = match &payload.poll {
        Some(poll) => (
            Some(poll.question.trim().to_string()),
            Some(poll.options.clone()),
            poll.end_date,
        ),
        None => (None, None, None),
    };

    let post = state
        .post_service
        .create(NewPost {
            author_id: auth.id,
            category: &payload.category,
            body: &payload.body,
            photos: serde_json::to_value(&payload.photos)?,
            videos: serde_json::to_value(&payload.videos)?,
            event: payload.event.clone(),
            occasion: payload.occasion.clone(),
            job_opening: payload.job_opening.clone(),
            document: payload.document.clone(),
            poll_question,
            poll_options,
            poll_end_date,
        })
        .await?;

    tracing::info!("Post {} created by {}", post.id, auth.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "post": post })),
    ))
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
) -> Result<impl IntoResponse> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let (posts, total) = state
        .post_service
        .list(page, per_page, query.category.as_deref())
        .await?;
    Ok(Json(json!({
        "success": true,
        "posts": posts,
        "total": total,
        "page": page,
        "per_page": per_page,
    })))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let post = state
        .post_service
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound("Post not found".into()))?;
    let comments = state.post_service.list_comments(id).await?;
    let poll = if post.has_poll() {
        Some(state.post_service.poll_state(&post).await?)
    } else {
        None
    };
    Ok(Json(json!({
        "success": true,
        "post": post,
        "comments": comments,
        "poll": poll,
    })))
}

/// Casts the caller's vote. Closed polls and repeat votes are answered
/// with the current tallies rather than an error; an undeclared option is
/// a 400.
pub async fn vote_on_poll(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<VotePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let poll = state
        .post_service
        .vote(post_id, auth.id, payload.option.trim())
        .await?;
    Ok(Json(json!({ "success": true, "poll": poll })))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<CommentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let comment = state
        .post_service
        .add_comment(post_id, auth.id, payload.body.trim())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "comment": comment })),
    ))
}

/// Uploads post media ahead of the create call. Images land under
/// `post_images/`, videos under `post_videos/`; the response returns the
/// `{url, key}` pairs the create payload embeds.
pub async fn upload_media(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut photos: Vec<MediaItem> = Vec::new();
    let mut videos: Vec<MediaItem> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        let (kind, folder) = match field_name.as_str() {
            "photo" => (crate::routes::UploadKind::Image, StorageFolder::PostImages),
            "video" => (crate::routes::UploadKind::Video, StorageFolder::PostVideos),
            _ => continue,
        };

        let filename = field.file_name().unwrap_or("media.bin").to_string();
        let content_type = field.content_type().map(|s| s.to_string());
        let data = field.bytes().await?;
        if data.is_empty() {
            continue;
        }
        crate::routes::ensure_allowed_upload(kind, &filename, &data)?;
        let key = state
            .storage
            .upload(folder, &filename, data, content_type.as_deref())
            .await?;
        let url = state.storage.presign(&key).await?;
        match folder {
            StorageFolder::PostImages => photos.push(MediaItem { url, key }),
            _ => videos.push(MediaItem { url, key }),
        }
    }

    if photos.is_empty() && videos.is_empty() {
        return Err(Error::BadRequest("No media files provided".into()));
    }
    Ok(Json(json!({ "success": true, "photos": photos, "videos": videos })))
}
