use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use wordlune_ai::EnrichError;

use crate::auth::AppState;

/// The `/ai` endpoint takes `{action, ...params}` and dispatches to one of
/// the enrichment functions. An unrecognized action fails JSON extraction
/// and surfaces as 400 before this handler runs.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum AiAction {
    #[serde(rename_all = "camelCase")]
    Translate {
        word: String,
        source_language: String,
        target_language: String,
    },
    #[serde(rename_all = "camelCase")]
    TranslateSingle {
        word: String,
        source_language: String,
        target_language: String,
    },
    #[serde(rename_all = "camelCase")]
    GenerateExample { word: String },
    #[serde(rename_all = "camelCase")]
    GeneratePronunciation { word: String },
    #[serde(rename_all = "camelCase")]
    GenerateWordDetails {
        words: Vec<String>,
        source_language: String,
        target_language: String,
    },
}

pub async fn dispatch(
    State(state): State<AppState>,
    Json(action): Json<AiAction>,
) -> impl IntoResponse {
    let result = run(&state, action).await;

    match result {
        Ok(data) => (StatusCode::OK, Json(json!({ "success": true, "data": data }))),
        Err(err) => {
            let status = match &err {
                EnrichError::EmptyInput => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error!("Enrichment failed: {}", err);
            (
                status,
                Json(json!({ "success": false, "error": err.to_string() })),
            )
        }
    }
}

async fn run(state: &AppState, action: AiAction) -> Result<serde_json::Value, EnrichError> {
    match action {
        AiAction::Translate {
            word,
            source_language,
            target_language,
        } => {
            let translations = state
                .ai
                .translate_word(&word, &source_language, &target_language)
                .await?;
            Ok(json!({ "translations": translations }))
        }
        AiAction::TranslateSingle {
            word,
            source_language,
            target_language,
        } => {
            let translation = state
                .ai
                .translate_word_single(&word, &source_language, &target_language)
                .await?;
            Ok(json!({ "translation": translation }))
        }
        AiAction::GenerateExample { word } => {
            let sentence = state.ai.generate_example_sentence(&word).await?;
            Ok(json!({ "exampleSentence": sentence }))
        }
        AiAction::GeneratePronunciation { word } => {
            let ipa = state.ai.generate_pronunciation(&word).await?;
            Ok(json!({ "phoneticPronunciation": ipa }))
        }
        AiAction::GenerateWordDetails {
            words,
            source_language,
            target_language,
        } => {
            let details = state
                .ai
                .generate_word_details(&words, &source_language, &target_language)
                .await?;
            Ok(json!({ "processedWords": details.processed_words }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_envelope_deserializes() {
        let raw = r#"{
            "action": "translateSingle",
            "word": "book.",
            "sourceLanguage": "English",
            "targetLanguage": "Turkish"
        }"#;
        let action: AiAction = serde_json::from_str(raw).unwrap();
        assert!(matches!(action, AiAction::TranslateSingle { .. }));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let raw = r#"{ "action": "summonDragon", "word": "x" }"#;
        assert!(serde_json::from_str::<AiAction>(raw).is_err());
    }

    #[test]
    fn bulk_action_carries_word_list() {
        let raw = r#"{
            "action": "generateWordDetails",
            "words": ["ephemeral", "ubiquitous"],
            "sourceLanguage": "English",
            "targetLanguage": "Turkish"
        }"#;
        let action: AiAction = serde_json::from_str(raw).unwrap();
        match action {
            AiAction::GenerateWordDetails { words, .. } => {
                assert_eq!(words, ["ephemeral", "ubiquitous"])
            }
            other => panic!("wrong action: {other:?}"),
        }
    }
}
