use crate::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id                  TEXT PRIMARY KEY,
                username            TEXT NOT NULL UNIQUE COLLATE NOCASE,
                password            TEXT NOT NULL,
                photo_url           TEXT,
                banned_until        TEXT,
                banned_permanently  INTEGER NOT NULL DEFAULT 0,
                created_at          TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE admins (
                user_id     TEXT PRIMARY KEY REFERENCES users(id)
            );

            CREATE TABLE login_history (
                user_id         TEXT NOT NULL REFERENCES users(id),
                logged_in_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
            );

            CREATE INDEX idx_login_history_user
                ON login_history(user_id, logged_in_at);

            CREATE TABLE user_settings (
                user_id             TEXT PRIMARY KEY REFERENCES users(id),
                source_language     TEXT NOT NULL,
                target_language     TEXT NOT NULL,
                ui_language         TEXT NOT NULL
            );

            CREATE TABLE lists (
                id          TEXT PRIMARY KEY,
                user_id     TEXT NOT NULL REFERENCES users(id),
                language    TEXT NOT NULL,
                name        TEXT NOT NULL,
                word_count  INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
            );

            CREATE INDEX idx_lists_owner
                ON lists(user_id, language, created_at);

            CREATE TABLE list_words (
                id          TEXT PRIMARY KEY,
                list_id     TEXT NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
                word        TEXT NOT NULL,
                meaning     TEXT NOT NULL,
                example     TEXT NOT NULL DEFAULT '',
                language    TEXT NOT NULL,
                category    TEXT NOT NULL DEFAULT 'Uncategorized',
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
            );

            CREATE INDEX idx_list_words_list
                ON list_words(list_id, created_at);

            CREATE TABLE personal_words (
                id                  TEXT PRIMARY KEY,
                user_id             TEXT NOT NULL REFERENCES users(id),
                text                TEXT NOT NULL,
                category            TEXT NOT NULL,
                pronunciation_text  TEXT,
                example_sentence    TEXT NOT NULL DEFAULT '',
                meaning             TEXT,
                created_at          TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
            );

            CREATE INDEX idx_personal_words_user
                ON personal_words(user_id, created_at);

            CREATE TABLE stories (
                id                  TEXT PRIMARY KEY,
                title               TEXT NOT NULL,
                language            TEXT NOT NULL,
                level               TEXT NOT NULL,
                category            TEXT NOT NULL,
                content             TEXT NOT NULL,
                is_published        INTEGER NOT NULL DEFAULT 0,
                author_id           TEXT NOT NULL,
                author_name         TEXT NOT NULL,
                author_photo_url    TEXT,
                like_count          INTEGER NOT NULL DEFAULT 0,
                comment_count       INTEGER NOT NULL DEFAULT 0,
                created_at          TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
                updated_at          TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
            );

            -- One canonical row per story; browse-by-language and
            -- list-by-author are both index lookups, no mirror copies.
            CREATE INDEX idx_stories_language
                ON stories(language, created_at);
            CREATE INDEX idx_stories_author
                ON stories(author_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
