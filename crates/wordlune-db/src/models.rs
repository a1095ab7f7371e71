/// Database row types — these map directly to SQLite rows.
/// Distinct from the wordlune-types API models to keep the DB layer
/// independent; handlers convert rows into typed responses.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub photo_url: Option<String>,
    pub banned_until: Option<String>,
    pub banned_permanently: bool,
    pub created_at: String,
}

pub struct ListRow {
    pub id: String,
    pub name: String,
    pub word_count: i64,
    pub created_at: String,
}

pub struct ListWordRow {
    pub id: String,
    pub list_id: String,
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub language: String,
    pub category: String,
    pub created_at: String,
}

pub struct PersonalWordRow {
    pub id: String,
    pub text: String,
    pub category: String,
    pub pronunciation_text: Option<String>,
    pub example_sentence: String,
    pub meaning: Option<String>,
    pub created_at: String,
}

pub struct StoryRow {
    pub id: String,
    pub title: String,
    pub language: String,
    pub level: String,
    pub category: String,
    pub content: String,
    pub is_published: bool,
    pub author_id: String,
    pub author_name: String,
    pub author_photo_url: Option<String>,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields written when inserting or patching a story. The row's counters
/// and timestamps are managed by the store itself.
#[derive(Clone)]
pub struct StoryWrite {
    pub id: String,
    pub title: String,
    pub language: String,
    pub level: String,
    pub category: String,
    pub content: String,
    pub is_published: bool,
    pub author_id: String,
    pub author_name: String,
    pub author_photo_url: Option<String>,
}

/// Fields written when inserting a list word. Ids are pre-generated by the
/// caller so a bulk insert can report them back without a re-read.
pub struct ListWordWrite {
    pub id: String,
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub language: String,
    pub category: String,
}
