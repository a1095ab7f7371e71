pub mod account;
pub mod admin;
pub mod auth;
pub mod convert;
pub mod enrich;
pub mod lists;
pub mod middleware;
pub mod stories;
pub mod words;

use axum::http::StatusCode;
use wordlune_db::StoreError;

/// Single mapping from store failures to HTTP statuses, used by every
/// handler.
pub fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Forbidden(_) => StatusCode::FORBIDDEN,
        StoreError::UsernameTaken | StoreError::LanguageMismatch => StatusCode::CONFLICT,
        StoreError::EmptyBatch => StatusCode::BAD_REQUEST,
        StoreError::LockPoisoned | StoreError::Sqlite(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
