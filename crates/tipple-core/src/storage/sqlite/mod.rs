//! SQLite storage backend.
//!
//! A single connection is opened per process and owned by the store; callers
//! pass the store explicitly to every operation that needs it.

mod row;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::error::{Result, TippleError};
use crate::storage::traits::DrinkStore;
use crate::storage::types::{
    DrinkEntry, DrinkStatus, NewDrink, NewProfile, TimeWindow, UserProfile,
};

pub use row::{format_timestamp, parse_timestamp, storage_precision};
use row::{DrinkRow, ProfileRow, DRINK_COLUMNS};

/// Current on-disk format version.
pub const FORMAT_VERSION: &str = "1";

/// The single profile row always uses this key.
pub const PROFILE_ID: i64 = 1;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- Single-row table: the tracked individual
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        name TEXT NOT NULL,
        gender TEXT NOT NULL,
        weight_kg REAL NOT NULL CHECK (weight_kg > 0),
        created_at TEXT NOT NULL
    );

    -- AUTOINCREMENT keeps identity keys from being reused after deletes
    CREATE TABLE IF NOT EXISTS drinks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        drink TEXT NOT NULL,
        category TEXT NOT NULL,
        quantity INTEGER NOT NULL CHECK (quantity > 0),
        volume_oz REAL NOT NULL CHECK (volume_oz >= 0),
        date_added TEXT NOT NULL,
        date_consumed TEXT,
        status INTEGER NOT NULL DEFAULT 1
    );

    CREATE INDEX IF NOT EXISTS drinks_user_added
    ON drinks (user_id, date_added);

    CREATE INDEX IF NOT EXISTS drinks_user_consumed
    ON drinks (user_id, status, date_consumed);
"#;

/// SQLite-backed drink store.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`, creating parent directories
    /// and the schema as needed.
    pub fn open(path: &Path) -> Result<Self> {
        crate::fs::ensure_parent_dir(path)?;
        let conn = Connection::open(path)?;
        let store = Self {
            path: Some(path.to_path_buf()),
            conn,
        };
        store.init_schema()?;
        debug!(path = %path.display(), "opened drink store");
        Ok(store)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { path: None, conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Location of the database file (`None` for in-memory stores).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the recorded format version.
    pub fn format_version(&self) -> Result<String> {
        let version: String = self.conn.query_row(
            "SELECT value FROM meta WHERE key = 'format_version'",
            [],
            |row| row.get(0),
        )?;
        Ok(version)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;

        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        match existing {
            None => {
                let created_at = format_timestamp(&Utc::now());
                self.conn.execute(
                    "INSERT INTO meta (key, value) VALUES (?, ?)",
                    ["format_version", FORMAT_VERSION],
                )?;
                self.conn.execute(
                    "INSERT INTO meta (key, value) VALUES (?, ?)",
                    ["created_at", &created_at],
                )?;
            }
            Some(version) if version != FORMAT_VERSION => {
                return Err(TippleError::Storage(format!(
                    "Unsupported database format version {} (expected {})",
                    version, FORMAT_VERSION
                )));
            }
            Some(_) => {}
        }
        Ok(())
    }
}

impl DrinkStore for SqliteStore {
    fn add(&mut self, entry: &NewDrink, user_id: i64) -> Result<i64> {
        entry.validate()?;

        let added_at = storage_precision(entry.added_at.unwrap_or_else(Utc::now));
        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO drinks (
                user_id,
                drink,
                category,
                quantity,
                volume_oz,
                date_added,
                date_consumed,
                status
            )
            VALUES (?, ?, ?, ?, ?, ?, NULL, ?)
            "#,
            (
                user_id,
                entry.drink.trim(),
                entry.category.trim(),
                i64::from(entry.quantity),
                entry.volume_oz,
                format_timestamp(&added_at),
                DrinkStatus::Pending.code(),
            ),
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        debug!(id, user_id, drink = %entry.drink, "added drink");
        Ok(id)
    }

    fn get(&self, id: i64) -> Result<Option<DrinkEntry>> {
        let query = format!("SELECT {} FROM drinks WHERE id = ?", DRINK_COLUMNS);
        let row = self
            .conn
            .query_row(&query, [id], DrinkRow::from_row)
            .optional()?;
        row.map(DrinkEntry::try_from).transpose()
    }

    fn list(&self, user_id: i64) -> Result<Vec<DrinkEntry>> {
        let query = format!(
            "SELECT {} FROM drinks WHERE user_id = ? ORDER BY date_added DESC, id DESC",
            DRINK_COLUMNS
        );
        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map([user_id], DrinkRow::from_row)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.try_into()?);
        }
        Ok(entries)
    }

    fn update(&mut self, id: i64, drink: Option<&str>, category: Option<&str>) -> Result<bool> {
        let mut assignments: Vec<&str> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(value) = drink.map(str::trim).filter(|v| !v.is_empty()) {
            assignments.push("drink = ?");
            params.push(Box::new(value.to_string()));
        }
        if let Some(value) = category.map(str::trim).filter(|v| !v.is_empty()) {
            assignments.push("category = ?");
            params.push(Box::new(value.to_string()));
        }
        if assignments.is_empty() {
            debug!(id, "update with no fields; nothing to do");
            return Ok(false);
        }

        let query = format!("UPDATE drinks SET {} WHERE id = ?", assignments.join(", "));
        params.push(Box::new(id));

        let tx = self.conn.transaction()?;
        let changed = tx.execute(&query, rusqlite::params_from_iter(params.iter()))?;
        tx.commit()?;

        if changed == 0 {
            debug!(id, "update on unknown drink; ignoring");
        }
        Ok(changed > 0)
    }

    fn delete(&mut self, id: i64) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute("DELETE FROM drinks WHERE id = ?", [id])?;
        tx.commit()?;

        if changed == 0 {
            debug!(id, "delete on unknown drink; ignoring");
        }
        Ok(changed > 0)
    }

    fn mark_consumed_at(&mut self, id: i64, when: DateTime<Utc>) -> Result<bool> {
        let tx = self.conn.transaction()?;

        let date_added: Option<String> = tx
            .query_row("SELECT date_added FROM drinks WHERE id = ?", [id], |row| {
                row.get(0)
            })
            .optional()?;
        let date_added = match date_added {
            Some(value) => parse_timestamp(&value)?,
            None => {
                debug!(id, "consume on unknown drink; ignoring");
                return Ok(false);
            }
        };
        if when < date_added {
            return Err(TippleError::Validation(format!(
                "Consumption time {} is before the entry was added ({})",
                format_timestamp(&when),
                format_timestamp(&date_added)
            )));
        }

        tx.execute(
            "UPDATE drinks SET status = ?, date_consumed = ? WHERE id = ?",
            (DrinkStatus::Consumed.code(), format_timestamp(&when), id),
        )?;
        tx.commit()?;

        debug!(id, "marked drink consumed");
        Ok(true)
    }

    fn sum_volume_at(&self, user_id: i64, window: TimeWindow, now: DateTime<Utc>) -> Result<f64> {
        let (start, end) = window.bounds(now);

        let mut query = String::from(
            "SELECT COALESCE(SUM(volume_oz * quantity), 0.0) FROM drinks \
             WHERE user_id = ? AND status = ? AND date_consumed IS NOT NULL \
             AND date_consumed >= ?",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(user_id),
            Box::new(DrinkStatus::Consumed.code()),
            Box::new(format_timestamp(&start)),
        ];
        if let Some(end) = end {
            query.push_str(" AND date_consumed < ?");
            params.push(Box::new(format_timestamp(&end)));
        }

        let total: f64 = self
            .conn
            .query_row(&query, rusqlite::params_from_iter(params.iter()), |row| {
                row.get(0)
            })?;
        debug!(user_id, ?window, total, "summed consumption");
        Ok(total)
    }

    fn profile(&self) -> Result<Option<UserProfile>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, gender, weight_kg, created_at FROM users WHERE id = ?",
                [PROFILE_ID],
                |row| {
                    Ok(ProfileRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        gender: row.get(2)?,
                        weight_kg: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        row.map(UserProfile::try_from).transpose()
    }

    fn create_profile(&mut self, profile: &NewProfile) -> Result<UserProfile> {
        profile.validate()?;

        let tx = self.conn.transaction()?;
        let exists: Option<i64> = tx
            .query_row("SELECT id FROM users WHERE id = ?", [PROFILE_ID], |row| {
                row.get(0)
            })
            .optional()?;
        if exists.is_some() {
            return Err(TippleError::Validation(
                "A user profile already exists".to_string(),
            ));
        }

        let created_at = storage_precision(Utc::now());
        tx.execute(
            "INSERT INTO users (id, name, gender, weight_kg, created_at) VALUES (?, ?, ?, ?, ?)",
            (
                PROFILE_ID,
                profile.name.trim(),
                profile.gender.as_str(),
                profile.weight_kg,
                format_timestamp(&created_at),
            ),
        )?;
        tx.commit()?;

        debug!(name = %profile.name, "created user profile");
        Ok(UserProfile {
            id: PROFILE_ID,
            name: profile.name.trim().to_string(),
            gender: profile.gender,
            weight_kg: profile.weight_kg,
            created_at,
        })
    }

    fn update_profile(&mut self, profile: &NewProfile) -> Result<Option<UserProfile>> {
        profile.validate()?;

        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE users SET name = ?, gender = ?, weight_kg = ? WHERE id = ?",
            (
                profile.name.trim(),
                profile.gender.as_str(),
                profile.weight_kg,
                PROFILE_ID,
            ),
        )?;
        tx.commit()?;

        if changed == 0 {
            return Ok(None);
        }
        debug!(name = %profile.name, "updated user profile");
        self.profile()
    }

    fn check_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if result != "ok" {
            return Err(TippleError::Storage(format!(
                "SQLite integrity check failed: {}",
                result
            )));
        }

        let bad_status: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM drinks WHERE status NOT IN (?, ?)",
            (DrinkStatus::Pending.code(), DrinkStatus::Consumed.code()),
            |row| row.get(0),
        )?;
        if bad_status > 0 {
            return Err(TippleError::Storage(format!(
                "{} drink(s) have an unknown status",
                bad_status
            )));
        }

        let mismatched: i64 = self.conn.query_row(
            r#"
            SELECT COUNT(*) FROM drinks
            WHERE (status = ? AND date_consumed IS NULL)
               OR (status = ? AND date_consumed IS NOT NULL)
            "#,
            (DrinkStatus::Consumed.code(), DrinkStatus::Pending.code()),
            |row| row.get(0),
        )?;
        if mismatched > 0 {
            return Err(TippleError::Storage(format!(
                "{} drink(s) have a status that disagrees with their consumption time",
                mismatched
            )));
        }

        let out_of_order: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM drinks WHERE date_consumed IS NOT NULL AND date_consumed < date_added",
            [],
            |row| row.get(0),
        )?;
        if out_of_order > 0 {
            return Err(TippleError::Storage(format!(
                "{} drink(s) were consumed before they were added",
                out_of_order
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::types::{Gender, BINGE_WINDOW_HOURS};
    use chrono::{Duration, TimeZone};

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().expect("in-memory store")
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn add_consumed(
        store: &mut SqliteStore,
        drink: NewDrink,
        added: DateTime<Utc>,
        consumed: DateTime<Utc>,
    ) -> i64 {
        let id = store.add(&drink.with_added_at(added), 1).unwrap();
        assert!(store.mark_consumed_at(id, consumed).unwrap());
        id
    }

    #[test]
    fn test_add_then_list_is_pending() {
        let mut store = store();
        let id = store
            .add(&NewDrink::new("IPA", "Beer", 12.0).with_quantity(2), 1)
            .unwrap();

        let entries = store.list(1).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);
        assert_eq!(entries[0].status, DrinkStatus::Pending);
        assert!(entries[0].date_consumed.is_none());
        assert_eq!(entries[0].quantity, 2);
    }

    #[test]
    fn test_list_is_newest_first_and_user_scoped() {
        let mut store = store();
        let first = store
            .add(
                &NewDrink::new("Lager", "Beer", 12.0).with_added_at(noon() - Duration::hours(2)),
                1,
            )
            .unwrap();
        let second = store
            .add(&NewDrink::new("Merlot", "Wine", 5.0).with_added_at(noon()), 1)
            .unwrap();
        store
            .add(&NewDrink::new("Stout", "Beer", 12.0).with_added_at(noon()), 2)
            .unwrap();

        let ids: Vec<i64> = store.list(1).unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_add_rejects_invalid_entry() {
        let mut store = store();
        let result = store.add(&NewDrink::new("IPA", "Beer", 12.0).with_quantity(0), 1);
        assert!(matches!(result, Err(TippleError::Validation(_))));
        assert!(store.list(1).unwrap().is_empty());
    }

    #[test]
    fn test_consume_sets_status_and_timestamp() {
        let mut store = store();
        let id = store.add(&NewDrink::new("IPA", "Beer", 12.0), 1).unwrap();

        assert!(store.mark_consumed(id).unwrap());

        let entry = store.get(id).unwrap().expect("entry exists");
        assert_eq!(entry.status, DrinkStatus::Consumed);
        let consumed = entry.date_consumed.expect("consumed timestamp");
        assert!(consumed >= entry.date_added);
    }

    #[test]
    fn test_consume_before_added_is_rejected() {
        let mut store = store();
        let id = store
            .add(&NewDrink::new("IPA", "Beer", 12.0).with_added_at(noon()), 1)
            .unwrap();

        let result = store.mark_consumed_at(id, noon() - Duration::minutes(1));
        assert!(matches!(result, Err(TippleError::Validation(_))));
        assert_eq!(store.get(id).unwrap().unwrap().status, DrinkStatus::Pending);
    }

    #[test]
    fn test_unknown_id_is_silent_noop() {
        let mut store = store();
        let id = store.add(&NewDrink::new("IPA", "Beer", 12.0), 1).unwrap();
        let before = store.list(1).unwrap();

        assert!(!store.update(id + 100, Some("Renamed"), None).unwrap());
        assert!(!store.delete(id + 100).unwrap());
        assert!(!store.mark_consumed(id + 100).unwrap());

        let after = store.list(1).unwrap();
        assert_eq!(before.len(), after.len());
        assert_eq!(after[0].drink, "IPA");
        assert_eq!(after[0].status, DrinkStatus::Pending);
    }

    #[test]
    fn test_update_is_partial() {
        let mut store = store();
        let id = store.add(&NewDrink::new("IPA", "Beer", 12.0), 1).unwrap();

        assert!(store.update(id, None, Some("Craft")).unwrap());
        let entry = store.get(id).unwrap().unwrap();
        assert_eq!(entry.drink, "IPA");
        assert_eq!(entry.category, "Craft");

        assert!(store.update(id, Some("Hazy IPA"), Some("  ")).unwrap());
        let entry = store.get(id).unwrap().unwrap();
        assert_eq!(entry.drink, "Hazy IPA");
        assert_eq!(entry.category, "Craft");

        assert!(!store.update(id, None, None).unwrap());
    }

    #[test]
    fn test_delete_keeps_other_ids_stable() {
        let mut store = store();
        let a = store.add(&NewDrink::new("A", "Beer", 12.0), 1).unwrap();
        let b = store.add(&NewDrink::new("B", "Beer", 12.0), 1).unwrap();
        let c = store.add(&NewDrink::new("C", "Beer", 12.0), 1).unwrap();

        assert!(store.delete(b).unwrap());

        let mut ids: Vec<i64> = store.list(1).unwrap().iter().map(|e| e.id).collect();
        ids.sort();
        assert_eq!(ids, vec![a, c]);

        let d = store.add(&NewDrink::new("D", "Beer", 12.0), 1).unwrap();
        assert!(d > c, "identity keys are never reused");
    }

    #[test]
    fn test_pending_entries_never_count() {
        let mut store = store();
        store
            .add(&NewDrink::new("IPA", "Beer", 12.0).with_added_at(noon()), 1)
            .unwrap();

        for window in [
            TimeWindow::Week,
            TimeWindow::Today,
            TimeWindow::LastHours(BINGE_WINDOW_HOURS),
        ] {
            assert_eq!(store.sum_volume_at(1, window, noon()).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_windows_respect_consumption_time() {
        let mut store = store();
        let now = noon();
        // 2 hours ago: in every window
        add_consumed(
            &mut store,
            NewDrink::new("IPA", "Beer", 12.0).with_quantity(2),
            now - Duration::hours(3),
            now - Duration::hours(2),
        );
        // Earlier today but outside the 4-hour window
        add_consumed(
            &mut store,
            NewDrink::new("Merlot", "Wine", 5.0),
            now - Duration::hours(7),
            now - Duration::hours(6),
        );
        // Three days ago: weekly only
        add_consumed(
            &mut store,
            NewDrink::new("Rye", "Whiskey", 1.5),
            now - Duration::days(3),
            now - Duration::days(3),
        );
        // Ten days ago: nowhere
        add_consumed(
            &mut store,
            NewDrink::new("Old", "Beer", 12.0),
            now - Duration::days(10),
            now - Duration::days(10),
        );

        let summary = store.summary_at(1, now).unwrap();
        assert_eq!(summary.weekly_oz, 24.0 + 5.0 + 1.5);
        assert_eq!(summary.daily_oz, 24.0 + 5.0);
        assert_eq!(summary.last_hours_oz, 24.0);
    }

    #[test]
    fn test_today_is_calendar_day_not_rolling() {
        let mut store = store();
        let just_after_midnight = Utc.with_ymd_and_hms(2024, 6, 15, 0, 30, 0).unwrap();
        add_consumed(
            &mut store,
            NewDrink::new("Lager", "Beer", 12.0),
            just_after_midnight - Duration::hours(2),
            just_after_midnight - Duration::hours(1),
        );

        let daily = store
            .sum_volume_at(1, TimeWindow::Today, just_after_midnight)
            .unwrap();
        let last_hours = store
            .sum_volume_at(1, TimeWindow::LastHours(4), just_after_midnight)
            .unwrap();
        assert_eq!(daily, 0.0);
        assert_eq!(last_hours, 12.0);
    }

    #[test]
    fn test_sums_are_user_scoped() {
        let mut store = store();
        let id = store
            .add(&NewDrink::new("IPA", "Beer", 12.0).with_added_at(noon()), 2)
            .unwrap();
        store.mark_consumed_at(id, noon()).unwrap();

        assert_eq!(store.sum_volume_at(1, TimeWindow::Week, noon()).unwrap(), 0.0);
        assert_eq!(store.sum_volume_at(2, TimeWindow::Week, noon()).unwrap(), 12.0);
    }

    #[test]
    fn test_profile_lifecycle() {
        let mut store = store();
        assert!(store.profile().unwrap().is_none());
        assert!(store
            .update_profile(&NewProfile::new("Sam", Gender::Male, 75.0))
            .unwrap()
            .is_none());

        let created = store
            .create_profile(&NewProfile::new("Sam", Gender::Male, 75.0))
            .unwrap();
        assert_eq!(created.id, PROFILE_ID);

        let duplicate = store.create_profile(&NewProfile::new("Alex", Gender::Female, 60.0));
        assert!(duplicate.is_err());

        let updated = store
            .save_profile(&NewProfile::new("Sam", Gender::Male, 70.0))
            .unwrap();
        assert_eq!(updated.weight_kg, 70.0);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn test_returned_timestamps_match_stored() {
        let mut store = store();
        let created = store
            .create_profile(&NewProfile::new("Sam", Gender::Male, 75.0))
            .unwrap();
        let loaded = store.profile().unwrap().unwrap();
        assert_eq!(created.created_at, loaded.created_at);

        let added = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
            + Duration::nanoseconds(123_456_789);
        let id = store
            .add(&NewDrink::new("IPA", "Beer", 12.0).with_added_at(added), 1)
            .unwrap();
        let entry = store.get(id).unwrap().unwrap();
        assert_eq!(entry.date_added, storage_precision(added));
        assert_eq!(
            format_timestamp(&entry.date_added),
            "2024-06-15T12:00:00.123456Z"
        );
    }

    #[test]
    fn test_integrity_check_detects_status_mismatch() {
        let mut store = store();
        let id = store.add(&NewDrink::new("IPA", "Beer", 12.0), 1).unwrap();
        assert!(store.check_integrity().is_ok());

        store
            .conn
            .execute("UPDATE drinks SET status = 2 WHERE id = ?", [id])
            .unwrap();
        assert!(store.check_integrity().is_err());
    }

    #[test]
    fn test_format_version_recorded() {
        let store = store();
        assert_eq!(store.format_version().unwrap(), FORMAT_VERSION);
    }
}
