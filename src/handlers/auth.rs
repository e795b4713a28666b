use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, password, Claims};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/login
///
/// Unknown email and wrong password return the identical 401 body so the
/// response does not reveal which check failed.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .db
        .user_by_email(&body.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid credentials"))?;

    let verified = password::verify_password(&body.password, &user.password_hash)
        .map_err(|_| ApiError::unauthorized("invalid credentials"))?;
    if !verified {
        return Err(ApiError::unauthorized("invalid credentials"));
    }

    let claims = Claims::new(
        user.id,
        user.email.clone(),
        user.role.clone(),
        user.name.clone(),
        state.config.jwt_expiry_hours,
    );
    let token = auth::generate_token(&claims, &state.config.jwt_secret)?;

    Ok(Json(json!({
        "token": token,
        "user": {
            "id": user.id,
            "email": user.email,
            "role": user.role,
            "name": user.name,
        },
    })))
}

/// GET /api/me - the decoded claims, exactly as embedded at login time
pub async fn me(Extension(claims): Extension<Claims>) -> Json<Claims> {
    Json(claims)
}
