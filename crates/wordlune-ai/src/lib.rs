pub mod client;
pub mod enrich;
pub mod prompts;

pub use client::GeminiClient;
pub use enrich::{ProcessedWord, WordDetails};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    /// The model returned nothing usable: no candidate, unparseable JSON,
    /// a missing key, or empty fields. Deliberately one opaque error —
    /// callers show a generic failure notice and do not retry.
    #[error("generation failed")]
    GenerationFailed,

    /// Caller input reduced to nothing: an empty word batch, or a word
    /// that was only punctuation. Rejected before any model call.
    #[error("empty input")]
    EmptyInput,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
