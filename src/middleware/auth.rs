use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

/// The authenticated caller, attached to the request by [`require_auth`].
/// Handlers take it via `Extension<AuthUser>` so the dependency on the
/// principal is visible in their signature.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: String,
}

pub fn issue_token(user_id: Uuid, role: &str) -> crate::error::Result<String> {
    let config = crate::config::get_config();
    let exp = chrono::Utc::now() + chrono::Duration::hours(config.jwt_ttl_hours);
    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.timestamp() as usize,
        role: Some(role.to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| crate::error::Error::Internal(format!("Failed to issue token: {}", e)))
}

/// Pulls the raw token from `Authorization: Bearer ..` or, failing that,
/// from a `token` cookie.
fn extract_token(req: &Request) -> Option<String> {
    if let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    let cookie_header = req.headers().get(axum::http::header::COOKIE)?;
    let cookies = cookie_header.to_str().ok()?;
    for pair in cookies.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if let (Some("token"), Some(value)) = (parts.next(), parts.next()) {
            return Some(value.to_string());
        }
    }
    None
}

fn decode_claims(token: &str) -> Option<Claims> {
    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .ok()
    .map(|data| data.claims)
}

fn unauthorized(code: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": code})),
    )
        .into_response()
}

pub async fn require_auth(mut req: Request, next: Next) -> Response {
    let Some(token) = extract_token(&req) else {
        return unauthorized("missing_authorization");
    };
    let Some(claims) = decode_claims(&token) else {
        return unauthorized("invalid_token");
    };
    let Ok(id) = Uuid::parse_str(&claims.sub) else {
        return unauthorized("invalid_token");
    };
    let user = AuthUser {
        id,
        role: claims.role.clone().unwrap_or_default(),
    };
    req.extensions_mut().insert(user);
    next.run(req).await
}

pub async fn require_admin(mut req: Request, next: Next) -> Response {
    let Some(token) = extract_token(&req) else {
        return unauthorized("missing_authorization");
    };
    let Some(claims) = decode_claims(&token) else {
        return unauthorized("invalid_token");
    };
    let Ok(id) = Uuid::parse_str(&claims.sub) else {
        return unauthorized("invalid_token");
    };
    let role = claims.role.clone().unwrap_or_default();
    if !role.eq_ignore_ascii_case(crate::models::user::ROLE_ADMIN) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"success": false, "message": "forbidden"})),
        )
            .into_response();
    }
    req.extensions_mut().insert(AuthUser { id, role });
    next.run(req).await
}
