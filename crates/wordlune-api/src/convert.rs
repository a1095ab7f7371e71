//! Row-to-response conversion. SQLite rows carry strings; the API speaks
//! typed models. Corrupt values are logged and replaced with defaults
//! rather than failing the whole response, matching how message history is
//! rendered elsewhere in the stack.

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use wordlune_db::models::{ListRow, ListWordRow, PersonalWordRow, StoryRow};
use wordlune_types::models::{
    ListWord, PersonalCategory, PersonalWord, Story, StoryGenre, StoryLevel, WordCategory,
    WordList,
};

pub fn parse_uuid(raw: &str, what: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} id '{}': {}", what, raw, e);
        Uuid::default()
    })
}

pub fn parse_timestamp(raw: &str, what: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite defaults store "YYYY-MM-DD HH:MM:SS" without a
            // timezone. Parse as naive UTC and convert.
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}' on {}: {}", raw, what, e);
            DateTime::default()
        })
}

pub fn list_from_row(row: ListRow) -> WordList {
    WordList {
        id: parse_uuid(&row.id, "list"),
        name: row.name,
        word_count: row.word_count.max(0) as u32,
        created_at: parse_timestamp(&row.created_at, "list"),
    }
}

pub fn word_from_row(row: ListWordRow) -> ListWord {
    let category = WordCategory::parse(&row.category).unwrap_or_else(|| {
        warn!("Corrupt category '{}' on word '{}'", row.category, row.id);
        WordCategory::Uncategorized
    });
    ListWord {
        id: parse_uuid(&row.id, "word"),
        word: row.word,
        meaning: row.meaning,
        example: row.example,
        language: row.language,
        category,
        created_at: parse_timestamp(&row.created_at, "word"),
    }
}

pub fn personal_from_row(row: PersonalWordRow) -> PersonalWord {
    let category = PersonalCategory::parse(&row.category).unwrap_or_else(|| {
        warn!("Corrupt category '{}' on word '{}'", row.category, row.id);
        PersonalCategory::Bad
    });
    PersonalWord {
        id: parse_uuid(&row.id, "word"),
        text: row.text,
        category,
        pronunciation_text: row.pronunciation_text,
        example_sentence: row.example_sentence,
        meaning: row.meaning,
        created_at: parse_timestamp(&row.created_at, "word"),
    }
}

pub fn story_from_row(row: StoryRow) -> Story {
    let level = StoryLevel::parse(&row.level).unwrap_or_else(|| {
        warn!("Corrupt level '{}' on story '{}'", row.level, row.id);
        StoryLevel::A1
    });
    let category = StoryGenre::parse(&row.category).unwrap_or_else(|| {
        warn!("Corrupt genre '{}' on story '{}'", row.category, row.id);
        StoryGenre::DailyLife
    });
    Story {
        id: parse_uuid(&row.id, "story"),
        title: row.title,
        language: row.language,
        level,
        category,
        content: row.content,
        is_published: row.is_published,
        author_id: row.author_id,
        author_name: row.author_name,
        author_photo_url: row.author_photo_url,
        like_count: row.like_count.max(0) as u32,
        comment_count: row.comment_count.max(0) as u32,
        created_at: parse_timestamp(&row.created_at, "story"),
        updated_at: parse_timestamp(&row.updated_at, "story"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_default_timestamps_parse() {
        let ts = parse_timestamp("2026-03-01 12:30:00", "test");
        assert_eq!(ts.to_rfc3339(), "2026-03-01T12:30:00+00:00");

        let ts = parse_timestamp("2026-03-01T12:30:00.123Z", "test");
        assert_eq!(ts.timestamp(), 1772368200);
    }

    #[test]
    fn corrupt_category_degrades_to_default() {
        let row = ListWordRow {
            id: "not-a-uuid".into(),
            list_id: "l".into(),
            word: "w".into(),
            meaning: "m".into(),
            example: String::new(),
            language: "English".into(),
            category: "Excellent".into(),
            created_at: "bogus".into(),
        };
        let word = word_from_row(row);
        assert_eq!(word.category, wordlune_types::models::WordCategory::Uncategorized);
        assert_eq!(word.id, Uuid::default());
    }
}
