//! Core data types for the storage layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TippleError};

/// Consumption state of a drink entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrinkStatus {
    Pending,
    Consumed,
}

impl DrinkStatus {
    /// Integer code used in the `drinks.status` column.
    pub fn code(&self) -> i64 {
        match self {
            Self::Pending => 1,
            Self::Consumed => 2,
        }
    }

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(Self::Pending),
            2 => Ok(Self::Consumed),
            other => Err(TippleError::Storage(format!(
                "Invalid drink status code: {}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Consumed => "consumed",
        }
    }
}

impl fmt::Display for DrinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded drink (possibly several servings of the same kind).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkEntry {
    /// Identity key assigned by the store
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Display name (e.g., "IPA")
    pub drink: String,

    /// Category, free text or a standard drink category
    pub category: String,

    /// Number of servings
    pub quantity: u32,

    /// Volume of one serving in fluid ounces
    pub volume_oz: f64,

    /// When the entry was recorded
    pub date_added: DateTime<Utc>,

    /// When the entry was consumed (set iff status is consumed)
    pub date_consumed: Option<DateTime<Utc>>,

    pub status: DrinkStatus,
}

impl DrinkEntry {
    /// Total volume across all servings.
    pub fn total_oz(&self) -> f64 {
        self.volume_oz * f64::from(self.quantity)
    }

    pub fn is_consumed(&self) -> bool {
        self.status == DrinkStatus::Consumed
    }
}

/// Builder for creating new drink entries.
#[derive(Debug, Clone)]
pub struct NewDrink {
    pub drink: String,
    pub category: String,
    pub quantity: u32,

    /// Per-serving volume in ounces
    pub volume_oz: f64,

    /// Optional: override the added timestamp (defaults to now)
    pub added_at: Option<DateTime<Utc>>,
}

impl NewDrink {
    pub fn new(drink: impl Into<String>, category: impl Into<String>, volume_oz: f64) -> Self {
        Self {
            drink: drink.into(),
            category: category.into(),
            quantity: 1,
            volume_oz,
            added_at: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_added_at(mut self, added_at: DateTime<Utc>) -> Self {
        self.added_at = Some(added_at);
        self
    }

    /// Check field constraints before insert.
    pub fn validate(&self) -> Result<()> {
        if self.drink.trim().is_empty() {
            return Err(TippleError::Validation("Drink name is required".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(TippleError::Validation("Category is required".to_string()));
        }
        if self.quantity == 0 {
            return Err(TippleError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }
        if !self.volume_oz.is_finite() || self.volume_oz < 0.0 {
            return Err(TippleError::Validation(format!(
                "Volume must be a non-negative number of ounces: {}",
                self.volume_oz
            )));
        }
        Ok(())
    }
}

/// Recognized genders; they select threshold constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = TippleError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(TippleError::InvalidInput(format!(
                "Unrecognized gender \"{}\" (expected male or female)",
                other
            ))),
        }
    }
}

/// The tracked individual. At most one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub gender: Gender,
    pub weight_kg: f64,
    pub created_at: DateTime<Utc>,
}

/// Values for creating or replacing the profile.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub name: String,
    pub gender: Gender,
    pub weight_kg: f64,
}

impl NewProfile {
    pub fn new(name: impl Into<String>, gender: Gender, weight_kg: f64) -> Self {
        Self {
            name: name.into(),
            gender,
            weight_kg,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TippleError::Validation("Name is required".to_string()));
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(TippleError::Validation(format!(
                "Weight must be a positive number of kilograms: {}",
                self.weight_kg
            )));
        }
        Ok(())
    }
}

/// Aggregation window for consumption sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// Trailing 7 days
    Week,
    /// Current UTC calendar day
    Today,
    /// Trailing number of hours
    LastHours(u32),
}

impl TimeWindow {
    /// Resolve the window to a half-open `[start, end)` range relative to `now`.
    ///
    /// Rolling windows have no upper bound.
    pub fn bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, Option<DateTime<Utc>>) {
        match self {
            Self::Week => (now - Duration::days(7), None),
            Self::LastHours(hours) => (now - Duration::hours(i64::from(*hours)), None),
            Self::Today => {
                let midnight = now.date_naive().and_time(NaiveTime::MIN);
                let start = Utc.from_utc_datetime(&midnight);
                (start, Some(start + Duration::days(1)))
            }
        }
    }
}

/// Hours covered by the binge window.
pub const BINGE_WINDOW_HOURS: u32 = 4;

/// The three aggregates the limit evaluator consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionSummary {
    pub weekly_oz: f64,
    pub daily_oz: f64,
    pub last_hours_oz: f64,
}

impl ConsumptionSummary {
    pub fn new(weekly_oz: f64, daily_oz: f64, last_hours_oz: f64) -> Self {
        Self {
            weekly_oz,
            daily_oz,
            last_hours_oz,
        }
    }
}
