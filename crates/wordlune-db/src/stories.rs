use crate::models::{StoryRow, StoryWrite};
use crate::{Database, Result, StoreError};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use wordlune_types::models::ADMIN_AUTHOR_ID;

impl Database {
    /// Admin path: on create the story is forced to the administrative
    /// defaults (author "admin", published, zeroed counters). On update the
    /// payload fields are replaced and `updated_at` refreshed.
    pub fn upsert_story(&self, story: &StoryWrite) -> Result<()> {
        let story = StoryWrite {
            author_id: ADMIN_AUTHOR_ID.into(),
            author_name: "WordLune".into(),
            author_photo_url: None,
            is_published: true,
            ..story.clone()
        };
        self.with_conn(|conn| {
            if let Some(existing) = query_story_by_id(conn, &story.id)? {
                if existing.language != story.language {
                    return Err(StoreError::LanguageMismatch);
                }
            }
            upsert(conn, &story)
        })
    }

    /// Author path: one canonical row serves both the by-language and the
    /// by-author read paths, so there is no mirror copy to keep in sync.
    /// Ownership is checked against the row under this id in *any*
    /// language — upserts conflict on the id alone, so a lookup scoped to
    /// the submitted language would let a colliding id from another
    /// language slip past the author check.
    pub fn upsert_user_story(&self, caller_id: &str, story: &StoryWrite) -> Result<()> {
        self.with_conn(|conn| {
            if let Some(existing) = query_story_by_id(conn, &story.id)? {
                if existing.author_id != caller_id {
                    return Err(StoreError::Forbidden("story"));
                }
                if existing.language != story.language {
                    return Err(StoreError::LanguageMismatch);
                }
            }
            upsert(conn, story)
        })
    }

    /// Admin delete — no ownership check.
    pub fn delete_story(&self, language: &str, story_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM stories WHERE id = ?1 AND language = ?2",
                (story_id, language),
            )?;
            if deleted == 0 {
                return Err(StoreError::NotFound("story"));
            }
            Ok(())
        })
    }

    /// Ownership is verified before any write; a non-author caller gets a
    /// Forbidden error and the row is untouched.
    pub fn delete_user_story(&self, caller_id: &str, language: &str, story_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            let story =
                query_story(conn, language, story_id)?.ok_or(StoreError::NotFound("story"))?;
            if story.author_id != caller_id {
                return Err(StoreError::Forbidden("story"));
            }
            conn.execute("DELETE FROM stories WHERE id = ?1", [story_id])?;
            Ok(())
        })
    }

    pub fn get_stories(&self, language: &str, published_only: bool) -> Result<Vec<StoryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {STORY_COLUMNS} FROM stories
                 WHERE language = ?1 {}
                 ORDER BY created_at DESC, rowid DESC",
                if published_only { "AND is_published = 1" } else { "" }
            ))?;
            let rows = stmt
                .query_map([language], story_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_story_by_id(&self, language: &str, story_id: &str) -> Result<Option<StoryRow>> {
        self.with_conn(|conn| query_story(conn, language, story_id))
    }

    /// Moderation view: published stories from every language, excluding
    /// admin-authored ones, grouped by author then newest first.
    pub fn get_all_published_user_stories(&self) -> Result<Vec<StoryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {STORY_COLUMNS} FROM stories
                 WHERE is_published = 1 AND author_id != ?1
                 ORDER BY author_id ASC, created_at DESC, rowid DESC"
            ))?;
            let rows = stmt
                .query_map([ADMIN_AUTHOR_ID], story_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_stories_by_author(&self, author_id: &str) -> Result<Vec<StoryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {STORY_COLUMNS} FROM stories
                 WHERE author_id = ?1
                 ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt
                .query_map([author_id], story_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

const STORY_COLUMNS: &str = "id, title, language, level, category, content, is_published, \
     author_id, author_name, author_photo_url, like_count, comment_count, created_at, updated_at";

fn upsert(conn: &Connection, story: &StoryWrite) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO stories
             (id, title, language, level, category, content, is_published,
              author_id, author_name, author_photo_url, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
         ON CONFLICT(id) DO UPDATE SET
             title = excluded.title,
             level = excluded.level,
             category = excluded.category,
             content = excluded.content,
             is_published = excluded.is_published,
             updated_at = excluded.updated_at",
        (
            story.id.as_str(),
            story.title.as_str(),
            story.language.as_str(),
            story.level.as_str(),
            story.category.as_str(),
            story.content.as_str(),
            story.is_published,
            story.author_id.as_str(),
            story.author_name.as_str(),
            story.author_photo_url.as_deref(),
            now.as_str(),
        ),
    )?;
    Ok(())
}

fn query_story(conn: &Connection, language: &str, story_id: &str) -> Result<Option<StoryRow>> {
    let row = conn
        .query_row(
            &format!("SELECT {STORY_COLUMNS} FROM stories WHERE id = ?1 AND language = ?2"),
            (story_id, language),
            story_from_row,
        )
        .optional()?;
    Ok(row)
}

fn query_story_by_id(conn: &Connection, story_id: &str) -> Result<Option<StoryRow>> {
    let row = conn
        .query_row(
            &format!("SELECT {STORY_COLUMNS} FROM stories WHERE id = ?1"),
            [story_id],
            story_from_row,
        )
        .optional()?;
    Ok(row)
}

fn story_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoryRow> {
    Ok(StoryRow {
        id: row.get(0)?,
        title: row.get(1)?,
        language: row.get(2)?,
        level: row.get(3)?,
        category: row.get(4)?,
        content: row.get(5)?,
        is_published: row.get(6)?,
        author_id: row.get(7)?,
        author_name: row.get(8)?,
        author_photo_url: row.get(9)?,
        like_count: row.get(10)?,
        comment_count: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn user_story(id: &str, author: &str, language: &str, published: bool) -> StoryWrite {
        StoryWrite {
            id: id.into(),
            title: format!("Story {id}"),
            language: language.into(),
            level: "B1".into(),
            category: "Adventure".into(),
            content: "Once upon a time...".into(),
            is_published: published,
            author_id: author.into(),
            author_name: format!("author-{author}"),
            author_photo_url: None,
        }
    }

    #[test]
    fn author_story_reads_identically_through_both_views() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_user_story("u1", &user_story("s1", "u1", "English", true)).unwrap();

        let by_language = db.get_story_by_id("English", "s1").unwrap().unwrap();
        let by_author = db.get_stories_by_author("u1").unwrap().remove(0);

        assert_eq!(by_language.id, by_author.id);
        assert_eq!(by_language.title, by_author.title);
        assert_eq!(by_language.content, by_author.content);
        assert_eq!(by_language.author_name, by_author.author_name);
        assert_eq!(by_language.created_at, by_author.created_at);
        assert_eq!(by_language.updated_at, by_author.updated_at);
    }

    #[test]
    fn admin_upsert_forces_administrative_defaults() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_story(&user_story("s1", "someone", "English", false)).unwrap();

        let row = db.get_story_by_id("English", "s1").unwrap().unwrap();
        assert_eq!(row.author_id, "admin");
        assert!(row.is_published);
        assert_eq!(row.like_count, 0);
        assert_eq!(row.comment_count, 0);
    }

    #[test]
    fn update_keeps_created_at_and_refreshes_updated_at() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_user_story("u1", &user_story("s1", "u1", "English", false)).unwrap();
        let before = db.get_story_by_id("English", "s1").unwrap().unwrap();

        let mut edit = user_story("s1", "u1", "English", true);
        edit.title = "Revised title".into();
        db.upsert_user_story("u1", &edit).unwrap();

        let after = db.get_story_by_id("English", "s1").unwrap().unwrap();
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.title, "Revised title");
        assert!(after.is_published);
    }

    #[test]
    fn non_author_cannot_update_or_delete() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_user_story("u1", &user_story("s1", "u1", "English", true)).unwrap();

        let err = db
            .upsert_user_story("intruder", &user_story("s1", "intruder", "English", true))
            .unwrap_err();
        assert!(matches!(err, StoreError::Forbidden("story")));

        let err = db.delete_user_story("intruder", "English", "s1").unwrap_err();
        assert!(matches!(err, StoreError::Forbidden("story")));

        // Nothing was written or removed
        let row = db.get_story_by_id("English", "s1").unwrap().unwrap();
        assert_eq!(row.author_id, "u1");
        assert_eq!(row.title, "Story s1");
    }

    #[test]
    fn cross_language_upsert_cannot_touch_another_authors_story() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_user_story("u1", &user_story("s1", "u1", "English", true)).unwrap();

        // Same id submitted under a different language must still hit the
        // ownership check, not slip past it as a "new" story.
        let mut attack = user_story("s1", "intruder", "German", true);
        attack.title = "Defaced".into();
        let err = db.upsert_user_story("intruder", &attack).unwrap_err();
        assert!(matches!(err, StoreError::Forbidden("story")));

        let row = db.get_story_by_id("English", "s1").unwrap().unwrap();
        assert_eq!(row.title, "Story s1");
        assert_eq!(row.author_id, "u1");
        assert_eq!(row.language, "English");
    }

    #[test]
    fn owner_cannot_rehome_story_to_another_language() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_user_story("u1", &user_story("s1", "u1", "English", true)).unwrap();

        let err = db
            .upsert_user_story("u1", &user_story("s1", "u1", "German", true))
            .unwrap_err();
        assert!(matches!(err, StoreError::LanguageMismatch));

        let row = db.get_story_by_id("English", "s1").unwrap().unwrap();
        assert_eq!(row.language, "English");
        assert!(db.get_story_by_id("German", "s1").unwrap().is_none());
    }

    #[test]
    fn admin_upsert_refuses_language_mismatch_on_existing_id() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_user_story("u1", &user_story("s1", "u1", "English", true)).unwrap();

        let err = db
            .upsert_story(&user_story("s1", "ignored", "German", true))
            .unwrap_err();
        assert!(matches!(err, StoreError::LanguageMismatch));

        let row = db.get_story_by_id("English", "s1").unwrap().unwrap();
        assert_eq!(row.author_id, "u1");
        assert_eq!(row.title, "Story s1");
    }

    #[test]
    fn absent_story_is_none_not_error() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_story_by_id("English", "missing").unwrap().is_none());
    }

    #[test]
    fn moderation_view_excludes_admin_and_unpublished() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_user_story("u2", &user_story("s1", "u2", "English", true)).unwrap();
        db.upsert_user_story("u1", &user_story("s2", "u1", "German", true)).unwrap();
        db.upsert_user_story("u1", &user_story("s3", "u1", "English", false)).unwrap();
        db.upsert_story(&user_story("s4", "ignored", "English", true)).unwrap();

        let rows = db.get_all_published_user_stories().unwrap();
        let ids: Vec<_> = rows.iter().map(|s| s.id.as_str()).collect();
        // Ordered by author id first, then newest first within an author
        assert_eq!(ids, ["s2", "s1"]);
    }

    #[test]
    fn published_filter_is_explicit() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_user_story("u1", &user_story("s1", "u1", "English", true)).unwrap();
        db.upsert_user_story("u1", &user_story("s2", "u1", "English", false)).unwrap();

        assert_eq!(db.get_stories("English", true).unwrap().len(), 1);
        assert_eq!(db.get_stories("English", false).unwrap().len(), 2);
    }
}
