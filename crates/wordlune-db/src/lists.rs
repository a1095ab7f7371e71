use crate::models::ListRow;
use crate::{Database, Result, StoreError};
use rusqlite::{Connection, OptionalExtension};

impl Database {
    pub fn create_list(&self, user_id: &str, language: &str, id: &str, name: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO lists (id, user_id, language, name, word_count) VALUES (?1, ?2, ?3, ?4, 0)",
                (id, user_id, language, name),
            )?;
            Ok(())
        })
    }

    /// Deletes the list and all words under it in one transaction. The
    /// cascade is explicit policy: no orphaned words survive a list delete.
    pub fn delete_list(&self, user_id: &str, language: &str, list_id: &str) -> Result<()> {
        self.with_tx(|tx| {
            require_list(tx, user_id, language, list_id)?;
            tx.execute("DELETE FROM list_words WHERE list_id = ?1", [list_id])?;
            tx.execute("DELETE FROM lists WHERE id = ?1", [list_id])?;
            Ok(())
        })
    }

    pub fn get_lists(&self, user_id: &str, language: &str) -> Result<Vec<ListRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, word_count, created_at FROM lists
                 WHERE user_id = ?1 AND language = ?2
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt
                .query_map((user_id, language), |row| {
                    Ok(ListRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        word_count: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_list_details(
        &self,
        user_id: &str,
        language: &str,
        list_id: &str,
    ) -> Result<Option<ListRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, name, word_count, created_at FROM lists
                     WHERE id = ?1 AND user_id = ?2 AND language = ?3",
                    (list_id, user_id, language),
                    |row| {
                        Ok(ListRow {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            word_count: row.get(2)?,
                            created_at: row.get(3)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }
}

/// Checks that the list exists under this owner and language. Every word
/// mutation calls this inside its transaction so a stale list id fails
/// before any write.
pub(crate) fn require_list(
    conn: &Connection,
    user_id: &str,
    language: &str,
    list_id: &str,
) -> Result<()> {
    let found: Option<String> = conn
        .query_row(
            "SELECT id FROM lists WHERE id = ?1 AND user_id = ?2 AND language = ?3",
            (list_id, user_id, language),
            |row| row.get(0),
        )
        .optional()?;
    if found.is_none() {
        return Err(StoreError::NotFound("list"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use crate::StoreError;

    fn db_with_user() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "alice", "hash").unwrap();
        db
    }

    #[test]
    fn create_and_fetch_lists() {
        let db = db_with_user();
        db.create_list("u1", "English", "l1", "Travel").unwrap();
        db.create_list("u1", "English", "l2", "Work").unwrap();
        db.create_list("u1", "German", "l3", "Basics").unwrap();

        let lists = db.get_lists("u1", "English").unwrap();
        assert_eq!(lists.len(), 2);
        // Most recent first
        assert_eq!(lists[0].id, "l2");
        assert_eq!(lists[1].id, "l1");
        assert!(lists.iter().all(|l| l.word_count == 0));
    }

    #[test]
    fn list_details_absent_is_none() {
        let db = db_with_user();
        assert!(db.get_list_details("u1", "English", "nope").unwrap().is_none());
    }

    #[test]
    fn lists_are_scoped_by_owner_and_language() {
        let db = db_with_user();
        db.create_list("u1", "English", "l1", "Travel").unwrap();
        assert!(db.get_list_details("u1", "German", "l1").unwrap().is_none());
        assert!(db.get_list_details("other", "English", "l1").unwrap().is_none());
    }

    #[test]
    fn delete_list_cascades_to_words() {
        let db = db_with_user();
        db.create_list("u1", "English", "l1", "Travel").unwrap();
        db.add_word_to_list("u1", "English", "l1", &crate::models::ListWordWrite {
            id: "w1".into(),
            word: "journey".into(),
            meaning: "yolculuk".into(),
            example: String::new(),
            language: "English".into(),
            category: "Uncategorized".into(),
        })
        .unwrap();

        db.delete_list("u1", "English", "l1").unwrap();
        assert!(db.get_list_details("u1", "English", "l1").unwrap().is_none());

        let orphans: i64 = db
            .with_conn(|conn| {
                Ok(conn.query_row(
                    "SELECT COUNT(*) FROM list_words WHERE list_id = 'l1'",
                    [],
                    |r| r.get(0),
                )?)
            })
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn delete_unknown_list_is_not_found() {
        let db = db_with_user();
        let err = db.delete_list("u1", "English", "nope").unwrap_err();
        assert!(matches!(err, StoreError::NotFound("list")));
    }
}
