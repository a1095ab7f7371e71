use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use crate::EnrichError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Thin client for the Gemini `generateContent` endpoint. One POST per
/// enrichment call; the model is asked for a JSON reply and the first
/// candidate's text is parsed into the expected output shape.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            model,
            api_key,
        }
    }

    /// Sends one prompt and parses the reply as `T`. Anything short of a
    /// well-formed JSON candidate maps to `GenerationFailed`.
    pub(crate) async fn generate<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, EnrichError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let reply: GenerateResponse = response.json().await?;
        let text = first_candidate_text(&reply).ok_or(EnrichError::GenerationFailed)?;
        debug!("Model reply: {} bytes", text.len());

        parse_candidate(text)
    }
}

fn first_candidate_text(reply: &GenerateResponse) -> Option<&str> {
    reply
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .first()?
        .text
        .as_deref()
}

/// The model is asked for bare JSON but occasionally wraps it in a
/// markdown fence anyway. Strip the fence, then parse strictly.
pub(crate) fn parse_candidate<T: DeserializeOwned>(text: &str) -> Result<T, EnrichError> {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|s| s.strip_suffix("```").unwrap_or(s))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(trimmed).map_err(|e| {
        warn!("Unparseable model output: {}", e);
        EnrichError::GenerationFailed
    })
}
