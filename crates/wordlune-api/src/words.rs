use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, info};
use uuid::Uuid;

use wordlune_db::models::ListWordWrite;
use wordlune_types::api::{
    AddPersonalWordRequest, AddWordRequest, AddWordResponse, BulkAddWordsRequest,
    BulkAddWordsResponse, Claims, DeleteWordsRequest, PersonalWordsResponse,
    UpdatePersonalWordRequest, UpdateWordRequest,
};
use wordlune_types::models::WordCategory;

use crate::auth::AppState;
use crate::convert::{personal_from_row, word_from_row};
use crate::store_status;

// -- List words --

pub async fn add_word(
    State(state): State<AppState>,
    Path((language, list_id)): Path<(String, Uuid)>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AddWordRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.word.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let word_id = Uuid::new_v4();
    let write = ListWordWrite {
        id: word_id.to_string(),
        word: req.word,
        meaning: req.meaning,
        example: req.example,
        language: language.clone(),
        category: req.category.unwrap_or(WordCategory::Uncategorized).as_str().into(),
    };

    state
        .db
        .add_word_to_list(&claims.sub.to_string(), &language, &list_id.to_string(), &write)
        .map_err(|e| store_status(&e))?;

    Ok((StatusCode::CREATED, Json(AddWordResponse { word_id })))
}

/// Bulk add: the raw words go through one AI enrichment call, then
/// whatever subset the model produced is inserted atomically. The response
/// reports how many of the requested words actually landed.
pub async fn add_words_bulk(
    State(state): State<AppState>,
    Path((language, list_id)): Path<(String, Uuid)>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<BulkAddWordsRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.words.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let settings = state
        .db
        .get_settings(&claims.sub.to_string())
        .map_err(|e| store_status(&e))?;

    let details = state
        .ai
        .generate_word_details(&req.words, &settings.source_language, &settings.target_language)
        .await
        .map_err(|e| {
            error!("Bulk enrichment failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let writes: Vec<ListWordWrite> = details
        .processed_words
        .iter()
        .map(|p| ListWordWrite {
            id: Uuid::new_v4().to_string(),
            word: p.text.clone(),
            meaning: p.meaning.clone(),
            example: p.example_sentence.clone(),
            language: language.clone(),
            category: WordCategory::Uncategorized.as_str().into(),
        })
        .collect();

    let word_ids: Vec<Uuid> = writes
        .iter()
        .filter_map(|w| w.id.parse().ok())
        .collect();

    // Run blocking DB insert off the async runtime
    let db = state.clone();
    let user_id = claims.sub.to_string();
    let lid = list_id.to_string();
    tokio::task::spawn_blocking(move || db.db.add_words_to_list(&user_id, &language, &lid, &writes))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| store_status(&e))?;

    info!(
        "Bulk add: {} requested, {} enriched",
        req.words.len(),
        word_ids.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(BulkAddWordsResponse {
            requested: req.words.len(),
            added: word_ids.len(),
            word_ids,
        }),
    ))
}

pub async fn update_word(
    State(state): State<AppState>,
    Path((language, list_id, word_id)): Path<(String, Uuid, Uuid)>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateWordRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    state
        .db
        .update_word_in_list(
            &claims.sub.to_string(),
            &language,
            &list_id.to_string(),
            &word_id.to_string(),
            req.word.as_deref(),
            req.meaning.as_deref(),
            req.example.as_deref(),
            req.category.map(|c| c.as_str()),
        )
        .map_err(|e| store_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_word(
    State(state): State<AppState>,
    Path((language, list_id, word_id)): Path<(String, Uuid, Uuid)>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    state
        .db
        .delete_word_from_list(
            &claims.sub.to_string(),
            &language,
            &list_id.to_string(),
            &word_id.to_string(),
        )
        .map_err(|e| store_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_words_batch(
    State(state): State<AppState>,
    Path((language, list_id)): Path<(String, Uuid)>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<DeleteWordsRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let word_ids: Vec<String> = req.word_ids.iter().map(|id| id.to_string()).collect();

    let deleted = state
        .db
        .delete_words_from_list(
            &claims.sub.to_string(),
            &language,
            &list_id.to_string(),
            &word_ids,
        )
        .map_err(|e| store_status(&e))?;

    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

pub async fn get_all_words(
    State(state): State<AppState>,
    Path(language): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    // Run blocking DB query off the async runtime
    let db = state.clone();
    let user_id = claims.sub.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.get_all_words_from_all_lists(&user_id, &language))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| store_status(&e))?;

    let words: Vec<_> = rows.into_iter().map(word_from_row).collect();
    Ok(Json(words))
}

// -- Personal words (dashboard word bank) --

pub async fn get_personal_words(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = state
        .db
        .get_personal_words(&claims.sub.to_string())
        .map_err(|e| store_status(&e))?;

    Ok(Json(PersonalWordsResponse {
        words: rows.into_iter().map(personal_from_row).collect(),
    }))
}

pub async fn add_personal_word(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AddPersonalWordRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.text.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let word_id = Uuid::new_v4();
    state
        .db
        .add_personal_word(
            &claims.sub.to_string(),
            &word_id.to_string(),
            req.text.trim(),
            req.category.as_str(),
            req.pronunciation_text.as_deref(),
            &req.example_sentence,
            req.meaning.as_deref(),
        )
        .map_err(|e| store_status(&e))?;

    Ok((StatusCode::CREATED, Json(AddWordResponse { word_id })))
}

pub async fn update_personal_word(
    State(state): State<AppState>,
    Path(word_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdatePersonalWordRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    state
        .db
        .update_personal_word(
            &claims.sub.to_string(),
            &word_id.to_string(),
            req.text.as_deref(),
            req.category.map(|c| c.as_str()),
            req.pronunciation_text.as_deref(),
            req.example_sentence.as_deref(),
            req.meaning.as_deref(),
        )
        .map_err(|e| store_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_personal_word(
    State(state): State<AppState>,
    Path(word_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, StatusCode> {
    state
        .db
        .delete_personal_word(&claims.sub.to_string(), &word_id.to_string())
        .map_err(|e| store_status(&e))?;

    Ok(StatusCode::NO_CONTENT)
}
