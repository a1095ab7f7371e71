//! Fixed instruction templates. Every enrichment call interpolates its
//! input fields into one of these and requests a JSON-only reply.

pub fn translate_multi(word: &str, source_language: &str, target_language: &str) -> String {
    format!(
        "You are a dictionary for language learners. Translate the {source_language} word \
         \"{word}\" into {target_language}. Give one or more candidate translations, most \
         relevant first. Respond with JSON only, in the shape \
         {{\"translations\": [\"...\"]}}."
    )
}

pub fn translate_single(word: &str, source_language: &str, target_language: &str) -> String {
    format!(
        "You are a dictionary for language learners. Translate the {source_language} word \
         \"{word}\" into {target_language}. Give exactly the single best translation. \
         Respond with JSON only, in the shape {{\"translation\": \"...\"}}."
    )
}

pub fn example_sentence(word: &str) -> String {
    format!(
        "Write one natural example sentence that uses the word \"{word}\". Use the word \
         itself, never a placeholder such as [word] or ___. Respond with JSON only, in the \
         shape {{\"exampleSentence\": \"...\"}}."
    )
}

pub fn pronunciation(word: &str) -> String {
    format!(
        "Give the phonetic pronunciation of the word \"{word}\" in IPA notation. Respond \
         with JSON only, in the shape {{\"phoneticPronunciation\": \"...\"}}."
    )
}

pub fn word_details(words: &[String], source_language: &str, target_language: &str) -> String {
    format!(
        "You are a vocabulary assistant. For each of these {source_language} words, produce \
         one natural example sentence in {source_language} and its {target_language} meaning: \
         {words:?}. Use each word itself in its sentence, never a placeholder. Respond with \
         JSON only, in the shape {{\"processedWords\": [{{\"text\": \"...\", \
         \"exampleSentence\": \"...\", \"meaning\": \"...\"}}]}}, one entry per word."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_embed_their_inputs() {
        let p = translate_multi("book", "English", "Turkish");
        assert!(p.contains("\"book\""));
        assert!(p.contains("English"));
        assert!(p.contains("Turkish"));
        assert!(p.contains("translations"));

        let p = example_sentence("ubiquitous");
        assert!(p.contains("\"ubiquitous\""));
        assert!(p.contains("placeholder"));

        let p = word_details(&["a".into(), "b".into()], "English", "German");
        assert!(p.contains("\"a\""));
        assert!(p.contains("\"b\""));
        assert!(p.contains("processedWords"));
    }
}
