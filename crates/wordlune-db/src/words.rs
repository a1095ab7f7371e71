use crate::lists::require_list;
use crate::models::{ListWordRow, ListWordWrite, PersonalWordRow};
use crate::{Database, Result, StoreError};
use rusqlite::Connection;

impl Database {
    // -- List words --
    //
    // Invariant: `lists.word_count` equals the number of list_words rows
    // under the list. Every membership change updates the count in the
    // same transaction as the word write, so no reader can observe drift.

    pub fn add_word_to_list(
        &self,
        user_id: &str,
        language: &str,
        list_id: &str,
        word: &ListWordWrite,
    ) -> Result<()> {
        self.with_tx(|tx| {
            require_list(tx, user_id, language, list_id)?;
            insert_word(tx, list_id, word)?;
            bump_word_count(tx, list_id, 1)?;
            Ok(())
        })
    }

    /// All-or-nothing batch insert. An empty batch is rejected rather than
    /// treated as a successful no-op.
    pub fn add_words_to_list(
        &self,
        user_id: &str,
        language: &str,
        list_id: &str,
        words: &[ListWordWrite],
    ) -> Result<()> {
        if words.is_empty() {
            return Err(StoreError::EmptyBatch);
        }
        self.with_tx(|tx| {
            require_list(tx, user_id, language, list_id)?;
            for word in words {
                insert_word(tx, list_id, word)?;
            }
            bump_word_count(tx, list_id, words.len() as i64)?;
            Ok(())
        })
    }

    /// Field edit only — membership is unchanged, so the count is not
    /// touched and no transaction is needed.
    pub fn update_word_in_list(
        &self,
        user_id: &str,
        language: &str,
        list_id: &str,
        word_id: &str,
        word: Option<&str>,
        meaning: Option<&str>,
        example: Option<&str>,
        category: Option<&str>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            require_list(conn, user_id, language, list_id)?;
            let changed = conn.execute(
                "UPDATE list_words SET
                     word = COALESCE(?1, word),
                     meaning = COALESCE(?2, meaning),
                     example = COALESCE(?3, example),
                     category = COALESCE(?4, category)
                 WHERE id = ?5 AND list_id = ?6",
                (word, meaning, example, category, word_id, list_id),
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound("word"));
            }
            Ok(())
        })
    }

    pub fn delete_word_from_list(
        &self,
        user_id: &str,
        language: &str,
        list_id: &str,
        word_id: &str,
    ) -> Result<()> {
        self.with_tx(|tx| {
            require_list(tx, user_id, language, list_id)?;
            let deleted = tx.execute(
                "DELETE FROM list_words WHERE id = ?1 AND list_id = ?2",
                (word_id, list_id),
            )?;
            if deleted == 0 {
                return Err(StoreError::NotFound("word"));
            }
            bump_word_count(tx, list_id, -1)?;
            Ok(())
        })
    }

    /// Deletes every listed word and decrements the count by the number of
    /// rows actually removed, in one transaction.
    pub fn delete_words_from_list(
        &self,
        user_id: &str,
        language: &str,
        list_id: &str,
        word_ids: &[String],
    ) -> Result<usize> {
        if word_ids.is_empty() {
            return Err(StoreError::EmptyBatch);
        }
        self.with_tx(|tx| {
            require_list(tx, user_id, language, list_id)?;
            let mut deleted = 0usize;
            for word_id in word_ids {
                deleted += tx.execute(
                    "DELETE FROM list_words WHERE id = ?1 AND list_id = ?2",
                    (word_id.as_str(), list_id),
                )?;
            }
            if deleted > 0 {
                bump_word_count(tx, list_id, -(deleted as i64))?;
            }
            Ok(deleted)
        })
    }

    pub fn get_words_for_list(
        &self,
        user_id: &str,
        language: &str,
        list_id: &str,
    ) -> Result<Vec<ListWordRow>> {
        self.with_conn(|conn| {
            require_list(conn, user_id, language, list_id)?;
            let mut stmt = conn.prepare(
                "SELECT id, list_id, word, meaning, example, language, category, created_at
                 FROM list_words
                 WHERE list_id = ?1
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt
                .query_map([list_id], word_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Every word the user has saved in this language, across all lists,
    /// newest first.
    pub fn get_all_words_from_all_lists(
        &self,
        user_id: &str,
        language: &str,
    ) -> Result<Vec<ListWordRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT w.id, w.list_id, w.word, w.meaning, w.example, w.language, w.category, w.created_at
                 FROM list_words w
                 JOIN lists l ON w.list_id = l.id
                 WHERE l.user_id = ?1 AND l.language = ?2
                 ORDER BY w.created_at DESC, w.rowid DESC",
            )?;
            let rows = stmt
                .query_map((user_id, language), word_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Personal words (dashboard word bank) --

    pub fn add_personal_word(
        &self,
        user_id: &str,
        id: &str,
        text: &str,
        category: &str,
        pronunciation_text: Option<&str>,
        example_sentence: &str,
        meaning: Option<&str>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO personal_words
                     (id, user_id, text, category, pronunciation_text, example_sentence, meaning)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                (id, user_id, text, category, pronunciation_text, example_sentence, meaning),
            )?;
            Ok(())
        })
    }

    pub fn update_personal_word(
        &self,
        user_id: &str,
        id: &str,
        text: Option<&str>,
        category: Option<&str>,
        pronunciation_text: Option<&str>,
        example_sentence: Option<&str>,
        meaning: Option<&str>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE personal_words SET
                     text = COALESCE(?1, text),
                     category = COALESCE(?2, category),
                     pronunciation_text = COALESCE(?3, pronunciation_text),
                     example_sentence = COALESCE(?4, example_sentence),
                     meaning = COALESCE(?5, meaning)
                 WHERE id = ?6 AND user_id = ?7",
                (text, category, pronunciation_text, example_sentence, meaning, id, user_id),
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound("word"));
            }
            Ok(())
        })
    }

    pub fn delete_personal_word(&self, user_id: &str, id: &str) -> Result<()> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM personal_words WHERE id = ?1 AND user_id = ?2",
                (id, user_id),
            )?;
            if deleted == 0 {
                return Err(StoreError::NotFound("word"));
            }
            Ok(())
        })
    }

    pub fn get_personal_words(&self, user_id: &str) -> Result<Vec<PersonalWordRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, text, category, pronunciation_text, example_sentence, meaning, created_at
                 FROM personal_words
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(PersonalWordRow {
                        id: row.get(0)?,
                        text: row.get(1)?,
                        category: row.get(2)?,
                        pronunciation_text: row.get(3)?,
                        example_sentence: row.get(4)?,
                        meaning: row.get(5)?,
                        created_at: row.get(6)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn insert_word(conn: &Connection, list_id: &str, word: &ListWordWrite) -> Result<()> {
    conn.execute(
        "INSERT INTO list_words (id, list_id, word, meaning, example, language, category)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        (
            word.id.as_str(),
            list_id,
            word.word.as_str(),
            word.meaning.as_str(),
            word.example.as_str(),
            word.language.as_str(),
            word.category.as_str(),
        ),
    )?;
    Ok(())
}

fn bump_word_count(conn: &Connection, list_id: &str, delta: i64) -> Result<()> {
    conn.execute(
        "UPDATE lists SET word_count = word_count + ?1 WHERE id = ?2",
        (delta, list_id),
    )?;
    Ok(())
}

fn word_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ListWordRow> {
    Ok(ListWordRow {
        id: row.get(0)?,
        list_id: row.get(1)?,
        word: row.get(2)?,
        meaning: row.get(3)?,
        example: row.get(4)?,
        language: row.get(5)?,
        category: row.get(6)?,
        created_at: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::models::ListWordWrite;
    use crate::{Database, StoreError};

    fn write(id: &str, word: &str) -> ListWordWrite {
        ListWordWrite {
            id: id.into(),
            word: word.into(),
            meaning: format!("{word}-meaning"),
            example: format!("An example with {word}."),
            language: "English".into(),
            category: "Uncategorized".into(),
        }
    }

    fn db_with_list() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "alice", "hash").unwrap();
        db.create_list("u1", "English", "l1", "Travel").unwrap();
        db
    }

    fn stored_count(db: &Database, list_id: &str) -> i64 {
        db.get_list_details("u1", "English", list_id)
            .unwrap()
            .unwrap()
            .word_count
    }

    fn actual_count(db: &Database, list_id: &str) -> i64 {
        db.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT COUNT(*) FROM list_words WHERE list_id = ?1",
                [list_id],
                |r| r.get(0),
            )?)
        })
        .unwrap()
    }

    #[test]
    fn word_count_tracks_membership_through_mixed_operations() {
        let db = db_with_list();

        db.add_word_to_list("u1", "English", "l1", &write("w1", "journey")).unwrap();
        assert_eq!(stored_count(&db, "l1"), 1);
        assert_eq!(stored_count(&db, "l1"), actual_count(&db, "l1"));

        let batch: Vec<_> = (2..=5).map(|i| write(&format!("w{i}"), "word")).collect();
        db.add_words_to_list("u1", "English", "l1", &batch).unwrap();
        assert_eq!(stored_count(&db, "l1"), 5);
        assert_eq!(stored_count(&db, "l1"), actual_count(&db, "l1"));

        db.delete_word_from_list("u1", "English", "l1", "w3").unwrap();
        assert_eq!(stored_count(&db, "l1"), 4);

        let deleted = db
            .delete_words_from_list("u1", "English", "l1", &["w1".into(), "w5".into()])
            .unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(stored_count(&db, "l1"), 2);
        assert_eq!(stored_count(&db, "l1"), actual_count(&db, "l1"));
    }

    #[test]
    fn empty_batches_are_rejected() {
        let db = db_with_list();
        assert!(matches!(
            db.add_words_to_list("u1", "English", "l1", &[]).unwrap_err(),
            StoreError::EmptyBatch
        ));
        assert!(matches!(
            db.delete_words_from_list("u1", "English", "l1", &[]).unwrap_err(),
            StoreError::EmptyBatch
        ));
        assert_eq!(stored_count(&db, "l1"), 0);
    }

    #[test]
    fn batch_delete_skips_unknown_ids_but_counts_honestly() {
        let db = db_with_list();
        db.add_word_to_list("u1", "English", "l1", &write("w1", "journey")).unwrap();

        let deleted = db
            .delete_words_from_list("u1", "English", "l1", &["w1".into(), "ghost".into()])
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(stored_count(&db, "l1"), 0);
        assert_eq!(actual_count(&db, "l1"), 0);
    }

    #[test]
    fn failed_batch_insert_rolls_back_entirely() {
        let db = db_with_list();
        db.add_word_to_list("u1", "English", "l1", &write("dup", "journey")).unwrap();

        // Second entry collides with the existing id, so nothing from the
        // batch may land.
        let batch = vec![write("w2", "fresh"), write("dup", "collides")];
        assert!(db.add_words_to_list("u1", "English", "l1", &batch).is_err());

        assert_eq!(stored_count(&db, "l1"), 1);
        assert_eq!(actual_count(&db, "l1"), 1);
    }

    #[test]
    fn update_does_not_touch_count() {
        let db = db_with_list();
        db.add_word_to_list("u1", "English", "l1", &write("w1", "journey")).unwrap();
        db.update_word_in_list("u1", "English", "l1", "w1", None, Some("trip"), None, Some("Good"))
            .unwrap();
        assert_eq!(stored_count(&db, "l1"), 1);

        let words = db.get_words_for_list("u1", "English", "l1").unwrap();
        assert_eq!(words[0].meaning, "trip");
        assert_eq!(words[0].category, "Good");
        assert_eq!(words[0].word, "journey");
    }

    #[test]
    fn update_unknown_word_is_not_found() {
        let db = db_with_list();
        let err = db
            .update_word_in_list("u1", "English", "l1", "nope", Some("x"), None, None, None)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound("word")));
    }

    #[test]
    fn words_come_back_newest_first() {
        let db = db_with_list();
        for i in 1..=3 {
            db.add_word_to_list("u1", "English", "l1", &write(&format!("w{i}"), "word"))
                .unwrap();
        }
        let words = db.get_words_for_list("u1", "English", "l1").unwrap();
        let ids: Vec<_> = words.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["w3", "w2", "w1"]);
    }

    #[test]
    fn all_words_spans_lists_but_not_languages() {
        let db = db_with_list();
        db.create_list("u1", "English", "l2", "Work").unwrap();
        db.create_list("u1", "German", "l3", "Basics").unwrap();

        db.add_word_to_list("u1", "English", "l1", &write("w1", "journey")).unwrap();
        db.add_word_to_list("u1", "English", "l2", &write("w2", "deadline")).unwrap();
        db.add_word_to_list("u1", "German", "l3", &write("w3", "reise")).unwrap();

        let words = db.get_all_words_from_all_lists("u1", "English").unwrap();
        let ids: Vec<_> = words.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["w2", "w1"]);
    }

    #[test]
    fn personal_words_are_independent_of_lists() {
        let db = db_with_list();
        db.add_personal_word("u1", "p1", "ubiquitous", "Bad", None, "It is ubiquitous.", None)
            .unwrap();
        db.add_personal_word(
            "u1",
            "p2",
            "ephemeral",
            "Good",
            Some("/ɪˈfɛm(ə)rəl/"),
            "Fame is ephemeral.",
            Some("geçici"),
        )
        .unwrap();

        let words = db.get_personal_words("u1").unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "ephemeral");

        db.update_personal_word("u1", "p1", None, Some("Very Good"), None, None, None).unwrap();
        db.delete_personal_word("u1", "p2").unwrap();

        let words = db.get_personal_words("u1").unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].category, "Very Good");

        // List count never involved
        assert_eq!(stored_count(&db, "l1"), 0);
    }
}
