use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::directory_dto::{CreateMarketerPayload, CreateVcPayload},
    error::Result,
    AppState,
};

pub async fn create_marketer(
    State(state): State<AppState>,
    Json(payload): Json<CreateMarketerPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let marketer = state.marketer_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "marketer": marketer })),
    ))
}

pub async fn list_marketers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let marketers = state.marketer_service.list().await?;
    Ok(Json(json!({ "success": true, "marketers": marketers })))
}

pub async fn create_vc(
    State(state): State<AppState>,
    Json(payload): Json<CreateVcPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state.vc_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "vc": profile })),
    ))
}

pub async fn list_vcs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let profiles = state.vc_service.list().await?;
    Ok(Json(json!({ "success": true, "vcs": profiles })))
}
