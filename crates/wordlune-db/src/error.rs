use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("caller does not own this {0}")]
    Forbidden(&'static str),

    #[error("username is already taken")]
    UsernameTaken,

    #[error("story id already exists under a different language")]
    LanguageMismatch,

    #[error("empty batch is not allowed")]
    EmptyBatch,

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
