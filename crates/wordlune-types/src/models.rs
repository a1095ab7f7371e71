use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author id used for stories published directly by administrators.
/// Admin stories are not tracked in the per-author view.
pub const ADMIN_AUTHOR_ID: &str = "admin";

/// Review category for a word inside a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordCategory {
    Uncategorized,
    Bad,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
    Repeat,
}

impl WordCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordCategory::Uncategorized => "Uncategorized",
            WordCategory::Bad => "Bad",
            WordCategory::Good => "Good",
            WordCategory::VeryGood => "Very Good",
            WordCategory::Repeat => "Repeat",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Uncategorized" => Some(WordCategory::Uncategorized),
            "Bad" => Some(WordCategory::Bad),
            "Good" => Some(WordCategory::Good),
            "Very Good" => Some(WordCategory::VeryGood),
            "Repeat" => Some(WordCategory::Repeat),
            _ => None,
        }
    }
}

/// Review category for a personal (dashboard) word. Narrower than the
/// list-word categories: personal words are always rated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonalCategory {
    Bad,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
}

impl PersonalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalCategory::Bad => "Bad",
            PersonalCategory::Good => "Good",
            PersonalCategory::VeryGood => "Very Good",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Bad" => Some(PersonalCategory::Bad),
            "Good" => Some(PersonalCategory::Good),
            "Very Good" => Some(PersonalCategory::VeryGood),
            _ => None,
        }
    }
}

/// CEFR reading level of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl StoryLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryLevel::A1 => "A1",
            StoryLevel::A2 => "A2",
            StoryLevel::B1 => "B1",
            StoryLevel::B2 => "B2",
            StoryLevel::C1 => "C1",
            StoryLevel::C2 => "C2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A1" => Some(StoryLevel::A1),
            "A2" => Some(StoryLevel::A2),
            "B1" => Some(StoryLevel::B1),
            "B2" => Some(StoryLevel::B2),
            "C1" => Some(StoryLevel::C1),
            "C2" => Some(StoryLevel::C2),
            _ => None,
        }
    }
}

/// Story genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryGenre {
    Adventure,
    Romance,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Mystery,
    Fantasy,
    History,
    #[serde(rename = "Daily Life")]
    DailyLife,
    Humor,
}

impl StoryGenre {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryGenre::Adventure => "Adventure",
            StoryGenre::Romance => "Romance",
            StoryGenre::ScienceFiction => "Science Fiction",
            StoryGenre::Mystery => "Mystery",
            StoryGenre::Fantasy => "Fantasy",
            StoryGenre::History => "History",
            StoryGenre::DailyLife => "Daily Life",
            StoryGenre::Humor => "Humor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Adventure" => Some(StoryGenre::Adventure),
            "Romance" => Some(StoryGenre::Romance),
            "Science Fiction" => Some(StoryGenre::ScienceFiction),
            "Mystery" => Some(StoryGenre::Mystery),
            "Fantasy" => Some(StoryGenre::Fantasy),
            "History" => Some(StoryGenre::History),
            "Daily Life" => Some(StoryGenre::DailyLife),
            "Humor" => Some(StoryGenre::Humor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordList {
    pub id: Uuid,
    pub name: String,
    pub word_count: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListWord {
    pub id: Uuid,
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub language: String,
    pub category: WordCategory,
    pub created_at: DateTime<Utc>,
}

/// A list-independent vocabulary entry shown on the dashboard.
/// Deliberately a separate type from [`ListWord`]: the two shapes grew
/// apart (pronunciation, optional meaning) and are not interchangeable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalWord {
    pub id: Uuid,
    pub text: String,
    pub category: PersonalCategory,
    pub pronunciation_text: Option<String>,
    pub example_sentence: String,
    pub meaning: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ListWord {
    /// Canonical conversion into the dashboard shape. The list categories
    /// that have no personal equivalent map to `Bad` (needs review).
    pub fn into_personal(self, id: Uuid, now: DateTime<Utc>) -> PersonalWord {
        let category = match self.category {
            WordCategory::Bad => PersonalCategory::Bad,
            WordCategory::Good => PersonalCategory::Good,
            WordCategory::VeryGood => PersonalCategory::VeryGood,
            WordCategory::Uncategorized | WordCategory::Repeat => PersonalCategory::Bad,
        };
        PersonalWord {
            id,
            text: self.word,
            category,
            pronunciation_text: None,
            example_sentence: self.example,
            meaning: Some(self.meaning),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: Uuid,
    pub title: String,
    pub language: String,
    pub level: StoryLevel,
    pub category: StoryGenre,
    pub content: String,
    pub is_published: bool,
    pub author_id: String,
    pub author_name: String,
    pub author_photo_url: Option<String>,
    pub like_count: u32,
    pub comment_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-user language preferences. One row per user, written only through
/// the settings endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub source_language: String,
    pub target_language: String,
    pub ui_language: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            source_language: "English".into(),
            target_language: "Turkish".into(),
            ui_language: "en".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for c in [
            WordCategory::Uncategorized,
            WordCategory::Bad,
            WordCategory::Good,
            WordCategory::VeryGood,
            WordCategory::Repeat,
        ] {
            assert_eq!(WordCategory::parse(c.as_str()), Some(c));
        }
        assert_eq!(WordCategory::parse("very good"), None);
    }

    #[test]
    fn list_word_converts_to_personal() {
        let word = ListWord {
            id: Uuid::new_v4(),
            word: "ephemeral".into(),
            meaning: "geçici".into(),
            example: "Fame is ephemeral.".into(),
            language: "English".into(),
            category: WordCategory::Repeat,
            created_at: Utc::now(),
        };
        let id = Uuid::new_v4();
        let personal = word.into_personal(id, Utc::now());
        assert_eq!(personal.id, id);
        assert_eq!(personal.text, "ephemeral");
        assert_eq!(personal.category, PersonalCategory::Bad);
        assert_eq!(personal.meaning.as_deref(), Some("geçici"));
    }
}
