use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::GeminiClient;
use crate::{EnrichError, prompts};

// Output shapes the model is instructed to produce. Every field is
// re-validated after parsing — the model is untrusted input.

#[derive(Debug, Deserialize)]
struct TranslationsOut {
    translations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TranslationOut {
    translation: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExampleOut {
    example_sentence: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PronunciationOut {
    phonetic_pronunciation: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordDetailsOut {
    processed_words: Vec<ProcessedWord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedWord {
    pub text: String,
    pub example_sentence: String,
    pub meaning: String,
}

/// Validated result of a bulk generation call. May hold fewer entries than
/// were requested — a single model call trades partial-failure granularity
/// for cost, and callers must tolerate the shortfall.
#[derive(Debug, Clone, Serialize)]
pub struct WordDetails {
    pub processed_words: Vec<ProcessedWord>,
}

impl GeminiClient {
    /// Multi-candidate translation, most relevant first. The input word is
    /// submitted as-is (only the single-translation path normalizes it).
    pub async fn translate_word(
        &self,
        word: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, EnrichError> {
        let prompt = prompts::translate_multi(word, source_language, target_language);
        let out: TranslationsOut = self.generate(&prompt).await?;

        let translations: Vec<String> = out
            .translations
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if translations.is_empty() {
            return Err(EnrichError::GenerationFailed);
        }
        Ok(translations)
    }

    /// Single best translation. Trailing punctuation is stripped before the
    /// prompt is built, so "book." and "book" translate identically. A word
    /// that strips to nothing is rejected without a model call.
    pub async fn translate_word_single(
        &self,
        word: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, EnrichError> {
        let word = normalize_single_word(word)?;
        let prompt = prompts::translate_single(word, source_language, target_language);
        let out: TranslationOut = self.generate(&prompt).await?;
        require_nonempty(out.translation)
    }

    pub async fn generate_example_sentence(&self, word: &str) -> Result<String, EnrichError> {
        let prompt = prompts::example_sentence(word);
        let out: ExampleOut = self.generate(&prompt).await?;
        require_nonempty(out.example_sentence)
    }

    pub async fn generate_pronunciation(&self, word: &str) -> Result<String, EnrichError> {
        let prompt = prompts::pronunciation(word);
        let out: PronunciationOut = self.generate(&prompt).await?;
        require_nonempty(out.phonetic_pronunciation)
    }

    /// One model call for the whole batch. Entries the model invents or
    /// leaves half-empty are dropped; the survivors keep the input order.
    pub async fn generate_word_details(
        &self,
        words: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<WordDetails, EnrichError> {
        if words.is_empty() {
            return Err(EnrichError::EmptyInput);
        }
        let prompt = prompts::word_details(words, source_language, target_language);
        let out: WordDetailsOut = self.generate(&prompt).await?;

        let processed_words = validate_word_details(words, out.processed_words);
        if processed_words.is_empty() {
            return Err(EnrichError::GenerationFailed);
        }
        Ok(WordDetails { processed_words })
    }
}

/// Normalization applied only on the single-translation path: the word may
/// arrive straight from a click on story text, trailing its sentence
/// punctuation.
pub fn strip_trailing_punctuation(word: &str) -> &str {
    word.trim_end_matches(['.', ',', '!', '?', ';', ':', '"', '\'', ')', ']'])
}

fn normalize_single_word(word: &str) -> Result<&str, EnrichError> {
    let word = strip_trailing_punctuation(word.trim()).trim_end();
    if word.is_empty() {
        return Err(EnrichError::EmptyInput);
    }
    Ok(word)
}

/// Keeps entries whose `text` matches a requested word, in request order,
/// with non-empty sentence and meaning. One entry per requested word.
pub fn validate_word_details(
    requested: &[String],
    returned: Vec<ProcessedWord>,
) -> Vec<ProcessedWord> {
    let mut kept = Vec::with_capacity(returned.len());
    for word in requested {
        let Some(entry) = returned.iter().find(|p| &p.text == word) else {
            warn!("Model skipped word '{}'", word);
            continue;
        };
        if entry.example_sentence.trim().is_empty() || entry.meaning.trim().is_empty() {
            warn!("Model returned empty fields for '{}'", word);
            continue;
        }
        kept.push(entry.clone());
    }
    kept
}

fn require_nonempty(value: String) -> Result<String, EnrichError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(EnrichError::GenerationFailed);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, sentence: &str, meaning: &str) -> ProcessedWord {
        ProcessedWord {
            text: text.into(),
            example_sentence: sentence.into(),
            meaning: meaning.into(),
        }
    }

    #[test]
    fn strips_trailing_punctuation_only() {
        assert_eq!(strip_trailing_punctuation("book."), "book");
        assert_eq!(strip_trailing_punctuation("book?!"), "book");
        assert_eq!(strip_trailing_punctuation("don't"), "don't");
        assert_eq!(strip_trailing_punctuation("(aside)"), "(aside");
        assert_eq!(strip_trailing_punctuation("book"), "book");
    }

    #[test]
    fn all_punctuation_word_is_rejected_before_any_model_call() {
        assert!(matches!(
            normalize_single_word("..."),
            Err(EnrichError::EmptyInput)
        ));
        assert!(matches!(
            normalize_single_word("?!   "),
            Err(EnrichError::EmptyInput)
        ));
        assert_eq!(normalize_single_word("book.").unwrap(), "book");
    }

    #[test]
    fn multi_translate_prompt_keeps_punctuation() {
        // The asymmetry is intentional: only the single path normalizes.
        let p = crate::prompts::translate_multi("book.", "English", "Turkish");
        assert!(p.contains("\"book.\""));
        let p = crate::prompts::translate_single(
            strip_trailing_punctuation("book."),
            "English",
            "Turkish",
        );
        assert!(p.contains("\"book\""));
        assert!(!p.contains("\"book.\""));
    }

    #[test]
    fn word_details_keeps_requested_subset_in_order() {
        let requested: Vec<String> = vec!["ephemeral".into(), "ubiquitous".into()];
        let returned = vec![
            entry("ubiquitous", "Phones are ubiquitous.", "her yerde bulunan"),
            entry("invented", "Not asked for.", "uydurma"),
            entry("ephemeral", "Fame is ephemeral.", "geçici"),
        ];

        let kept = validate_word_details(&requested, returned);
        let texts: Vec<_> = kept.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, ["ephemeral", "ubiquitous"]);
        assert!(kept.iter().all(|p| !p.example_sentence.is_empty() && !p.meaning.is_empty()));
    }

    #[test]
    fn word_details_drops_empty_fields_and_tolerates_shortfall() {
        let requested: Vec<String> = vec!["one".into(), "two".into(), "three".into()];
        let returned = vec![
            entry("one", "Sentence one.", "bir"),
            entry("two", "  ", "iki"),
        ];

        let kept = validate_word_details(&requested, returned);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "one");
    }

    #[test]
    fn processed_word_uses_camel_case_keys() {
        let raw = r#"{"text": "book", "exampleSentence": "I read a book.", "meaning": "kitap"}"#;
        let p: ProcessedWord = serde_json::from_str(raw).unwrap();
        assert_eq!(p.example_sentence, "I read a book.");
    }
}
