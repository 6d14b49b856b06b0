//! Row types for database queries.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::{Result, TippleError};
use crate::storage::types::{DrinkEntry, DrinkStatus, UserProfile};

/// Column list matching the field order of [`DrinkRow::from_row`].
pub const DRINK_COLUMNS: &str =
    "id, user_id, drink, category, quantity, volume_oz, date_added, date_consumed, status";

/// Truncate to the microsecond precision timestamps are stored at.
pub fn storage_precision(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(6)
}

/// Format a timestamp for storage.
///
/// Fixed-width UTC so stored values order the same as strings and as instants.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| TippleError::Storage(format!("Invalid timestamp {:?}: {}", value, e)))
}

/// Raw row data from the drinks table, before parsing into domain types.
#[derive(Debug)]
pub struct DrinkRow {
    pub id: i64,
    pub user_id: i64,
    pub drink: String,
    pub category: String,
    pub quantity: i64,
    pub volume_oz: f64,
    pub date_added: String,
    pub date_consumed: Option<String>,
    pub status: i64,
}

impl DrinkRow {
    /// Read a row selected with [`DRINK_COLUMNS`].
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            drink: row.get(2)?,
            category: row.get(3)?,
            quantity: row.get(4)?,
            volume_oz: row.get(5)?,
            date_added: row.get(6)?,
            date_consumed: row.get(7)?,
            status: row.get(8)?,
        })
    }
}

impl TryFrom<DrinkRow> for DrinkEntry {
    type Error = TippleError;

    fn try_from(row: DrinkRow) -> Result<Self> {
        let quantity = u32::try_from(row.quantity)
            .map_err(|_| TippleError::Storage(format!("Invalid quantity: {}", row.quantity)))?;
        let date_added = parse_timestamp(&row.date_added)?;
        let date_consumed = row
            .date_consumed
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;
        let status = DrinkStatus::from_code(row.status)?;

        Ok(DrinkEntry {
            id: row.id,
            user_id: row.user_id,
            drink: row.drink,
            category: row.category,
            quantity,
            volume_oz: row.volume_oz,
            date_added,
            date_consumed,
            status,
        })
    }
}

/// Raw row data from the users table.
#[derive(Debug)]
pub struct ProfileRow {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub weight_kg: f64,
    pub created_at: String,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = TippleError;

    fn try_from(row: ProfileRow) -> Result<Self> {
        let gender = row.gender.parse().map_err(|_| {
            TippleError::Storage(format!(
                "Stored profile has unrecognized gender \"{}\"",
                row.gender
            ))
        })?;
        let created_at = parse_timestamp(&row.created_at)?;

        Ok(UserProfile {
            id: row.id,
            name: row.name,
            gender,
            weight_kg: row.weight_kg,
            created_at,
        })
    }
}
