use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};

use wordlune_types::api::{Claims, SettingsResponse, UpdateSettingsRequest, UpdateUsernameRequest};
use wordlune_types::models::UserSettings;

use crate::auth::{AppState, valid_username};
use crate::store_status;

pub async fn get_settings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let settings = state
        .db
        .get_settings(&claims.sub.to_string())
        .map_err(|e| store_status(&e))?;

    Ok(Json(SettingsResponse { settings }))
}

pub async fn put_settings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.source_language.trim().is_empty()
        || req.target_language.trim().is_empty()
        || req.ui_language.trim().is_empty()
    {
        return Err(StatusCode::BAD_REQUEST);
    }

    let settings = UserSettings {
        source_language: req.source_language,
        target_language: req.target_language,
        ui_language: req.ui_language,
    };
    state
        .db
        .put_settings(&claims.sub.to_string(), &settings)
        .map_err(|e| store_status(&e))?;

    Ok(Json(SettingsResponse { settings }))
}

/// Username change. The taken-by-another-account check is case-insensitive
/// and happens inside the store before any write; a clash maps to 409.
pub async fn update_username(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateUsernameRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if !valid_username(&req.username) {
        return Err(StatusCode::BAD_REQUEST);
    }

    state
        .db
        .update_username(&claims.sub.to_string(), &req.username)
        .map_err(|e| store_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}
