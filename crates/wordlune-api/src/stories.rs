use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;
use uuid::Uuid;

use wordlune_db::models::StoryWrite;
use wordlune_types::api::{Claims, StoriesQuery, StoriesResponse, UpsertStoryRequest, UpsertStoryResponse};

use crate::auth::AppState;
use crate::convert::story_from_row;
use crate::store_status;

fn write_from_request(
    req: UpsertStoryRequest,
    language: &str,
    author_id: String,
    author_name: String,
    author_photo_url: Option<String>,
) -> (Uuid, StoryWrite) {
    let id = req.id.unwrap_or_else(Uuid::new_v4);
    let write = StoryWrite {
        id: id.to_string(),
        title: req.title,
        language: language.to_string(),
        level: req.level.as_str().into(),
        category: req.category.as_str().into(),
        content: req.content,
        is_published: req.is_published,
        author_id,
        author_name,
        author_photo_url,
    };
    (id, write)
}

pub async fn get_stories(
    State(state): State<AppState>,
    Path(language): Path<String>,
    Query(query): Query<StoriesQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Run blocking DB query off the async runtime
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.get_stories(&language, query.published_only))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| store_status(&e))?;

    Ok(Json(StoriesResponse {
        stories: rows.into_iter().map(story_from_row).collect(),
    }))
}

pub async fn get_story(
    State(state): State<AppState>,
    Path((language, story_id)): Path<(String, Uuid)>,
) -> Result<impl IntoResponse, StatusCode> {
    let row = state
        .db
        .get_story_by_id(&language, &story_id.to_string())
        .map_err(|e| store_status(&e))?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(story_from_row(row)))
}

/// Author path: title/content minimums are checked up front, then the
/// single canonical row is written. Updating someone else's story fails
/// with 403 before any write.
pub async fn upsert_user_story(
    State(state): State<AppState>,
    Path(language): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpsertStoryRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.title.trim().len() < 3 || req.content.trim().len() < 100 {
        return Err(StatusCode::BAD_REQUEST);
    }

    let caller_id = claims.sub.to_string();
    let (story_id, write) = write_from_request(
        req,
        &language,
        caller_id.clone(),
        claims.username.clone(),
        None,
    );

    state
        .db
        .upsert_user_story(&caller_id, &write)
        .map_err(|e| store_status(&e))?;

    Ok(Json(UpsertStoryResponse { story_id }))
}

pub async fn delete_user_story(
    State(state): State<AppState>,
    Path((language, story_id)): Path<(String, Uuid)>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    state
        .db
        .delete_user_story(&claims.sub.to_string(), &language, &story_id.to_string())
        .map_err(|e| store_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_my_stories(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = state
        .db
        .get_stories_by_author(&claims.sub.to_string())
        .map_err(|e| store_status(&e))?;

    Ok(Json(StoriesResponse {
        stories: rows.into_iter().map(story_from_row).collect(),
    }))
}
