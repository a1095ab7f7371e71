use crate::models::UserRow;
use crate::{Database, Result, StoreError};
use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension;
use wordlune_types::models::UserSettings;

/// Newest login entries kept per user; older ones are pruned on each login.
const LOGIN_HISTORY_KEEP: usize = 25;

impl Database {
    // -- Users --

    pub fn create_user(&self, id: &str, username: &str, password_hash: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, password) VALUES (?1, ?2, ?3)",
                (id, username, password_hash),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
                    [username],
                    user_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                    [id],
                    user_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Rejects a username held by a *different* account, case-insensitively,
    /// before writing anything. Re-claiming your own name (e.g. a case
    /// change) is allowed.
    pub fn update_username(&self, user_id: &str, username: &str) -> Result<()> {
        self.with_conn(|conn| {
            let holder: Option<String> = conn
                .query_row(
                    "SELECT id FROM users WHERE username = ?1",
                    [username],
                    |row| row.get(0),
                )
                .optional()?;
            if let Some(holder_id) = holder {
                if holder_id != user_id {
                    return Err(StoreError::UsernameTaken);
                }
            }
            let changed = conn.execute(
                "UPDATE users SET username = ?1 WHERE id = ?2",
                (username, user_id),
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound("user"));
            }
            Ok(())
        })
    }

    // -- Moderation --

    /// `until = None` is a permanent ban.
    pub fn ban_user(&self, user_id: &str, until: Option<DateTime<Utc>>) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE users SET banned_until = ?1, banned_permanently = ?2 WHERE id = ?3",
                (until.map(|t| t.to_rfc3339()), until.is_none(), user_id),
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound("user"));
            }
            Ok(())
        })
    }

    pub fn unban_user(&self, user_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE users SET banned_until = NULL, banned_permanently = 0 WHERE id = ?1",
                [user_id],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound("user"));
            }
            Ok(())
        })
    }

    pub fn is_admin(&self, user_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<String> = conn
                .query_row(
                    "SELECT user_id FROM admins WHERE user_id = ?1",
                    [user_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    pub fn grant_admin(&self, user_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO admins (user_id) VALUES (?1)",
                [user_id],
            )?;
            Ok(())
        })
    }

    // -- Login history --

    /// Appends a login entry and prunes the user's history down to the
    /// newest entries, in one transaction.
    pub fn record_login(&self, user_id: &str) -> Result<()> {
        self.with_tx(|tx| {
            tx.execute(
                "INSERT INTO login_history (user_id) VALUES (?1)",
                [user_id],
            )?;
            tx.execute(
                "DELETE FROM login_history WHERE user_id = ?1 AND rowid NOT IN (
                     SELECT rowid FROM login_history WHERE user_id = ?1
                     ORDER BY logged_in_at DESC, rowid DESC LIMIT ?2
                 )",
                (user_id, LOGIN_HISTORY_KEEP),
            )?;
            Ok(())
        })
    }

    pub fn login_history_len(&self, user_id: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row(
                "SELECT COUNT(*) FROM login_history WHERE user_id = ?1",
                [user_id],
                |r| r.get(0),
            )?;
            Ok(n as usize)
        })
    }

    // -- Settings --

    pub fn get_settings(&self, user_id: &str) -> Result<UserSettings> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT source_language, target_language, ui_language
                     FROM user_settings WHERE user_id = ?1",
                    [user_id],
                    |row| {
                        Ok(UserSettings {
                            source_language: row.get(0)?,
                            target_language: row.get(1)?,
                            ui_language: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok(row.unwrap_or_default())
        })
    }

    pub fn put_settings(&self, user_id: &str, settings: &UserSettings) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO user_settings (user_id, source_language, target_language, ui_language)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(user_id) DO UPDATE SET
                     source_language = excluded.source_language,
                     target_language = excluded.target_language,
                     ui_language = excluded.ui_language",
                (
                    user_id,
                    settings.source_language.as_str(),
                    settings.target_language.as_str(),
                    settings.ui_language.as_str(),
                ),
            )?;
            Ok(())
        })
    }
}

const USER_COLUMNS: &str =
    "id, username, password, photo_url, banned_until, banned_permanently, created_at";

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        photo_url: row.get(3)?,
        banned_until: row.get(4)?,
        banned_permanently: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// Current ban state of a user row. The `banned_until` timestamp is
/// compared lazily at login, nothing unsets it.
pub fn is_banned(user: &UserRow, now: DateTime<Utc>) -> bool {
    if user.banned_permanently {
        return true;
    }
    match &user.banned_until {
        Some(until) => match until.parse::<DateTime<Utc>>() {
            Ok(t) => t > now,
            Err(_) => false,
        },
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use chrono::Duration;

    #[test]
    fn username_lookup_is_case_insensitive() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "alice", "hash").unwrap();

        assert!(db.get_user_by_username("ALICE").unwrap().is_some());
        assert!(db.get_user_by_username("bob").unwrap().is_none());
    }

    #[test]
    fn username_taken_by_other_account_is_rejected_case_insensitively() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "alice", "hash").unwrap();
        db.create_user("u2", "bob", "hash").unwrap();

        let err = db.update_username("u2", "Alice").unwrap_err();
        assert!(matches!(err, StoreError::UsernameTaken));

        // Nothing written
        let bob = db.get_user_by_id("u2").unwrap().unwrap();
        assert_eq!(bob.username, "bob");
    }

    #[test]
    fn user_may_reclaim_their_own_username() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "alice", "hash").unwrap();
        db.update_username("u1", "alice_2").unwrap();
        db.update_username("u1", "Alice_2").unwrap();
        assert_eq!(db.get_user_by_id("u1").unwrap().unwrap().username, "Alice_2");
    }

    #[test]
    fn ban_states() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "alice", "hash").unwrap();
        let now = Utc::now();

        db.ban_user("u1", Some(now + Duration::days(7))).unwrap();
        let user = db.get_user_by_id("u1").unwrap().unwrap();
        assert!(is_banned(&user, now));
        assert!(!is_banned(&user, now + Duration::days(8)));

        db.ban_user("u1", None).unwrap();
        let user = db.get_user_by_id("u1").unwrap().unwrap();
        assert!(is_banned(&user, now + Duration::days(3650)));

        db.unban_user("u1").unwrap();
        let user = db.get_user_by_id("u1").unwrap().unwrap();
        assert!(!is_banned(&user, now));
    }

    #[test]
    fn login_history_is_capped_at_newest_25() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "alice", "hash").unwrap();

        for _ in 0..30 {
            db.record_login("u1").unwrap();
        }
        assert_eq!(db.login_history_len("u1").unwrap(), 25);
    }

    #[test]
    fn admin_role_membership() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "alice", "hash").unwrap();
        assert!(!db.is_admin("u1").unwrap());
        db.grant_admin("u1").unwrap();
        assert!(db.is_admin("u1").unwrap());
    }

    #[test]
    fn settings_default_then_upsert() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "alice", "hash").unwrap();

        let settings = db.get_settings("u1").unwrap();
        assert_eq!(settings.source_language, "English");

        db.put_settings(
            "u1",
            &UserSettings {
                source_language: "German".into(),
                target_language: "English".into(),
                ui_language: "de".into(),
            },
        )
        .unwrap();
        assert_eq!(db.get_settings("u1").unwrap().source_language, "German");
    }
}
