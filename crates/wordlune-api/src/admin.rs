use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use wordlune_db::models::StoryWrite;
use wordlune_types::api::{BanUserRequest, Claims, StoriesResponse, UpsertStoryRequest, UpsertStoryResponse};
use wordlune_types::models::ADMIN_AUTHOR_ID;

use crate::auth::AppState;
use crate::convert::story_from_row;
use crate::store_status;

/// Role check against the admins table. Admin routes call this first;
/// non-members get 403 regardless of what they asked for.
fn require_admin(state: &AppState, claims: &Claims) -> Result<(), StatusCode> {
    let is_admin = state
        .db
        .is_admin(&claims.sub.to_string())
        .map_err(|e| store_status(&e))?;
    if !is_admin {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(())
}

pub async fn upsert_story(
    State(state): State<AppState>,
    Path(language): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpsertStoryRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    require_admin(&state, &claims)?;

    let story_id = req.id.unwrap_or_else(Uuid::new_v4);
    let write = StoryWrite {
        id: story_id.to_string(),
        title: req.title,
        language,
        level: req.level.as_str().into(),
        category: req.category.as_str().into(),
        content: req.content,
        // The store forces the administrative defaults; these fields are
        // placeholders for the insert shape.
        is_published: true,
        author_id: ADMIN_AUTHOR_ID.into(),
        author_name: String::new(),
        author_photo_url: None,
    };

    state.db.upsert_story(&write).map_err(|e| store_status(&e))?;

    Ok(Json(UpsertStoryResponse { story_id }))
}

pub async fn delete_story(
    State(state): State<AppState>,
    Path((language, story_id)): Path<(String, Uuid)>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    require_admin(&state, &claims)?;

    state
        .db
        .delete_story(&language, &story_id.to_string())
        .map_err(|e| store_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Moderation queue: published user stories across every language.
pub async fn get_moderation_stories(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    require_admin(&state, &claims)?;

    let rows = state
        .db
        .get_all_published_user_stories()
        .map_err(|e| store_status(&e))?;

    Ok(Json(StoriesResponse {
        stories: rows.into_iter().map(story_from_row).collect(),
    }))
}

pub async fn ban_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<BanUserRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    require_admin(&state, &claims)?;

    state
        .db
        .ban_user(&user_id.to_string(), req.until)
        .map_err(|e| store_status(&e))?;

    info!(
        "User {} banned {} by {}",
        user_id,
        req.until.map_or("permanently".into(), |t| format!("until {t}")),
        claims.username
    );
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unban_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    require_admin(&state, &claims)?;

    state
        .db
        .unban_user(&user_id.to_string())
        .map_err(|e| store_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}
