use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use wordlune_types::api::{Claims, CreateListRequest, CreateListResponse, ListDetailsResponse};

use crate::auth::AppState;
use crate::convert::{list_from_row, word_from_row};
use crate::store_status;

pub async fn get_lists(
    State(state): State<AppState>,
    Path(language): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = state
        .db
        .get_lists(&claims.sub.to_string(), &language)
        .map_err(|e| store_status(&e))?;

    let lists: Vec<_> = rows.into_iter().map(list_from_row).collect();
    Ok(Json(lists))
}

pub async fn create_list(
    State(state): State<AppState>,
    Path(language): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateListRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let name = req.name.trim();
    if name.is_empty() || name.len() > 100 {
        return Err(StatusCode::BAD_REQUEST);
    }

    let list_id = Uuid::new_v4();
    state
        .db
        .create_list(&claims.sub.to_string(), &language, &list_id.to_string(), name)
        .map_err(|e| store_status(&e))?;

    Ok((StatusCode::CREATED, Json(CreateListResponse { list_id })))
}

pub async fn get_list_details(
    State(state): State<AppState>,
    Path((language, list_id)): Path<(String, Uuid)>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let user_id = claims.sub.to_string();
    let lid = list_id.to_string();

    let row = state
        .db
        .get_list_details(&user_id, &language, &lid)
        .map_err(|e| store_status(&e))?
        .ok_or(StatusCode::NOT_FOUND)?;

    let words = state
        .db
        .get_words_for_list(&user_id, &language, &lid)
        .map_err(|e| store_status(&e))?;

    Ok(Json(ListDetailsResponse {
        list: list_from_row(row),
        words: words.into_iter().map(word_from_row).collect(),
    }))
}

/// Deleting a list removes its words in the same transaction — explicit
/// cascade, no orphans.
pub async fn delete_list(
    State(state): State<AppState>,
    Path((language, list_id)): Path<(String, Uuid)>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    state
        .db
        .delete_list(&claims.sub.to_string(), &language, &list_id.to_string())
        .map_err(|e| store_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}
