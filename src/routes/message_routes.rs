use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::message_dto::{SendMessagePayload, UpdateMessagePayload},
    error::{Error, Result},
    middleware::auth::AuthUser,
    models::message::MeetingStatus,
    services::message_service::NewMeetingRequest,
    AppState,
};

/// Records a meeting request. This is an intent record: the availability
/// grid is stored as sent and nobody's calendar is checked against it.
pub async fn send_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<SendMessagePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    payload
        .validate_schedule()
        .map_err(Error::BadRequest)?;

    let schedule = serde_json::to_value(&payload.schedule)?;
    let message = state
        .message_service
        .create(NewMeetingRequest {
            sender_id: auth.id,
            schedule,
            note: &payload.message,
            agency_name: &payload.agency_name,
            agency_email: &payload.agency_email,
            user_email: &payload.user_email,
            user_phone: &payload.user_phone,
        })
        .await?;

    tracing::info!("Meeting request {} sent by {}", message.id, auth.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": message })),
    ))
}

pub async fn my_messages(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let messages = state.message_service.list_by_sender(auth.id).await?;
    Ok(Json(json!({ "success": true, "messages": messages })))
}

pub async fn all_messages(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let messages = state.message_service.list_all().await?;
    Ok(Json(json!({ "success": true, "messages": messages })))
}

/// Updates the recipient-side fields of a meeting request. Only `status`
/// and `response` are writable here; everything else is immutable.
pub async fn update_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMessagePayload>,
) -> Result<impl IntoResponse> {
    let status = match payload.status.as_deref() {
        Some(raw) => Some(
            MeetingStatus::parse(raw)
                .ok_or_else(|| Error::BadRequest(format!("Unknown status \"{}\"", raw)))?,
        ),
        None => None,
    };
    if status.is_none() && payload.response.is_none() {
        return Err(Error::BadRequest(
            "Nothing to update: provide status and/or response".into(),
        ));
    }

    let message = state
        .message_service
        .update(id, status, payload.response.as_deref())
        .await?;
    Ok(Json(json!({ "success": true, "message": message })))
}
