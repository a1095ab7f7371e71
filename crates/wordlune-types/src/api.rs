use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    ListWord, PersonalCategory, PersonalWord, Story, StoryGenre, StoryLevel, UserSettings,
    WordCategory, WordList,
};

// -- JWT Claims --

/// JWT claims shared between the REST middleware and the auth handlers.
/// Canonical definition lives here in wordlune-types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
}

// -- Lists & words --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateListRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateListResponse {
    pub list_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ListDetailsResponse {
    pub list: WordList,
    pub words: Vec<ListWord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddWordRequest {
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub example: String,
    pub category: Option<WordCategory>,
}

#[derive(Debug, Serialize)]
pub struct AddWordResponse {
    pub word_id: Uuid,
}

/// Bulk add: raw words only. Meanings and examples come from the AI
/// enrichment pipeline before anything is written.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BulkAddWordsRequest {
    pub words: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkAddWordsResponse {
    pub requested: usize,
    pub added: usize,
    pub word_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateWordRequest {
    pub word: Option<String>,
    pub meaning: Option<String>,
    pub example: Option<String>,
    pub category: Option<WordCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteWordsRequest {
    pub word_ids: Vec<Uuid>,
}

// -- Personal words --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddPersonalWordRequest {
    pub text: String,
    pub category: PersonalCategory,
    pub pronunciation_text: Option<String>,
    #[serde(default)]
    pub example_sentence: String,
    pub meaning: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePersonalWordRequest {
    pub text: Option<String>,
    pub category: Option<PersonalCategory>,
    pub pronunciation_text: Option<String>,
    pub example_sentence: Option<String>,
    pub meaning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PersonalWordsResponse {
    pub words: Vec<PersonalWord>,
}

// -- Stories --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpsertStoryRequest {
    /// Present on update; a fresh id is generated on create.
    pub id: Option<Uuid>,
    pub title: String,
    pub level: StoryLevel,
    pub category: StoryGenre,
    pub content: String,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Serialize)]
pub struct UpsertStoryResponse {
    pub story_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct StoriesResponse {
    pub stories: Vec<Story>,
}

#[derive(Debug, Deserialize)]
pub struct StoriesQuery {
    #[serde(default = "default_published_only")]
    pub published_only: bool,
}

fn default_published_only() -> bool {
    true
}

// -- Account --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUsernameRequest {
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSettingsRequest {
    pub source_language: String,
    pub target_language: String,
    pub ui_language: String,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub settings: UserSettings,
}

// -- Moderation --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BanUserRequest {
    /// Absent means a permanent ban.
    pub until: Option<DateTime<Utc>>,
}
