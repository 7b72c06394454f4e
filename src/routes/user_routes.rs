use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::user_dto::{
        AgencyListQuery, AuthResponse, LoginPayload, RegisterPayload, UpdateProfilePayload,
        UserResponse,
    },
    error::{Error, Result},
    middleware::auth::{issue_token, AuthUser},
    services::storage_service::StorageFolder,
    AppState,
};

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.register(payload).await?;
    let token = issue_token(user.id, &user.role)?;
    tracing::info!("Registered {} account {}", user.role, user.id);
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token,
            user: UserResponse::from(user),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .authenticate(&payload.email, &payload.password)
        .await?;
    let token = issue_token(user.id, &user.role)?;
    Ok(Json(AuthResponse {
        success: true,
        token,
        user: UserResponse::from(user),
    }))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .get(auth.id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;
    Ok(Json(json!({ "success": true, "user": UserResponse::from(user) })))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.update_profile(auth.id, payload).await?;
    Ok(Json(json!({ "success": true, "user": UserResponse::from(user) })))
}

pub async fn upload_logo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut stored_key = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("logo") {
            let filename = field.file_name().unwrap_or("logo.bin").to_string();
            let content_type = field.content_type().map(|s| s.to_string());
            let data = field.bytes().await?;
            if data.is_empty() {
                continue;
            }
            crate::routes::ensure_allowed_upload(
                crate::routes::UploadKind::Image,
                &filename,
                &data,
            )?;
            let key = state
                .storage
                .upload(
                    StorageFolder::ProfileImages,
                    &filename,
                    data,
                    content_type.as_deref(),
                )
                .await?;
            stored_key = Some(key);
            break;
        }
    }

    let key = stored_key.ok_or_else(|| Error::BadRequest("No logo file provided".into()))?;
    let user = state.user_service.set_logo_key(auth.id, &key).await?;
    let logo_url = state.storage.presign(&key).await?;
    Ok(Json(json!({
        "success": true,
        "user": UserResponse::from(user),
        "logo_url": logo_url,
    })))
}

pub async fn list_agencies(
    State(state): State<AppState>,
    Query(query): Query<AgencyListQuery>,
) -> Result<impl IntoResponse> {
    let list = state.user_service.list_agencies(query).await?;
    let items: Vec<UserResponse> = list.items.into_iter().map(Into::into).collect();
    Ok(Json(json!({
        "success": true,
        "items": items,
        "total": list.total,
        "page": list.page,
        "per_page": list.per_page,
    })))
}

#[derive(Debug, Deserialize)]
pub struct AddComparePayload {
    pub agency_id: Uuid,
}

pub async fn add_to_compare(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<AddComparePayload>,
) -> Result<impl IntoResponse> {
    state
        .compare_service
        .add(auth.id, payload.agency_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn get_compare_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let agencies = state.compare_service.list(auth.id).await?;
    let items: Vec<UserResponse> = agencies.into_iter().map(Into::into).collect();
    Ok(Json(json!({ "success": true, "agencies": items })))
}

pub async fn remove_from_compare(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(agency_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.compare_service.remove(auth.id, agency_id).await?;
    Ok(Json(json!({ "success": true })))
}
