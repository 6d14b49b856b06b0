//! Entry store trait definition.
//!
//! The `DrinkStore` trait defines the interface the CLI and the limit
//! evaluator rely on. Storage backends implement it; the SQLite backend
//! is the only one shipped.

use chrono::{DateTime, Utc};

use super::types::{
    ConsumptionSummary, DrinkEntry, NewDrink, NewProfile, TimeWindow, UserProfile,
    BINGE_WINDOW_HOURS,
};
use crate::error::Result;

/// Storage interface for drink entries and the user profile.
///
/// All implementations must ensure:
/// - Each mutating call commits exactly once
/// - Identity keys are stable and never reused
/// - Operations on an unknown id are silent no-ops, not errors
pub trait DrinkStore {
    // --- Entry operations ---

    /// Insert a new entry with status pending.
    ///
    /// # Returns
    ///
    /// Returns the identity key of the created entry.
    ///
    /// # Errors
    ///
    /// Returns `TippleError::Validation` if the entry fails its field checks.
    fn add(&mut self, entry: &NewDrink, user_id: i64) -> Result<i64>;

    /// Get an entry by ID.
    ///
    /// Returns `Ok(None)` if not found.
    fn get(&self, id: i64) -> Result<Option<DrinkEntry>>;

    /// List a user's entries, newest first.
    fn list(&self, user_id: i64) -> Result<Vec<DrinkEntry>>;

    /// Replace the name and/or category of an entry.
    ///
    /// `None` fields are left unchanged. Returns `false` if nothing matched.
    fn update(&mut self, id: i64, drink: Option<&str>, category: Option<&str>) -> Result<bool>;

    /// Remove an entry. Returns `false` if nothing matched.
    fn delete(&mut self, id: i64) -> Result<bool>;

    /// Mark an entry consumed at the given instant.
    ///
    /// Returns `false` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `TippleError::Validation` if `when` precedes the entry's
    /// added timestamp.
    fn mark_consumed_at(&mut self, id: i64, when: DateTime<Utc>) -> Result<bool>;

    /// Mark an entry consumed now.
    fn mark_consumed(&mut self, id: i64) -> Result<bool> {
        self.mark_consumed_at(id, Utc::now())
    }

    /// Sum of `volume_oz * quantity` over consumed entries inside `window`,
    /// with the window anchored at `now`.
    fn sum_volume_at(&self, user_id: i64, window: TimeWindow, now: DateTime<Utc>) -> Result<f64>;

    /// Sum consumed volume inside `window`, anchored at the current time.
    fn sum_volume(&self, user_id: i64, window: TimeWindow) -> Result<f64> {
        self.sum_volume_at(user_id, window, Utc::now())
    }

    /// Query the weekly, daily and binge-window aggregates at `now`.
    fn summary_at(&self, user_id: i64, now: DateTime<Utc>) -> Result<ConsumptionSummary> {
        Ok(ConsumptionSummary {
            weekly_oz: self.sum_volume_at(user_id, TimeWindow::Week, now)?,
            daily_oz: self.sum_volume_at(user_id, TimeWindow::Today, now)?,
            last_hours_oz: self.sum_volume_at(
                user_id,
                TimeWindow::LastHours(BINGE_WINDOW_HOURS),
                now,
            )?,
        })
    }

    /// Query the three aggregates at the current time.
    fn summary(&self, user_id: i64) -> Result<ConsumptionSummary> {
        self.summary_at(user_id, Utc::now())
    }

    // --- Profile operations ---

    /// Get the profile, if one has been created.
    fn profile(&self) -> Result<Option<UserProfile>>;

    /// Create the profile.
    ///
    /// # Errors
    ///
    /// Returns `TippleError::Validation` if a profile already exists or the
    /// values are invalid.
    fn create_profile(&mut self, profile: &NewProfile) -> Result<UserProfile>;

    /// Update the existing profile in place. Returns `None` if there is none.
    fn update_profile(&mut self, profile: &NewProfile) -> Result<Option<UserProfile>>;

    /// Create the profile, or update it if it already exists.
    fn save_profile(&mut self, profile: &NewProfile) -> Result<UserProfile> {
        match self.update_profile(profile)? {
            Some(updated) => Ok(updated),
            None => self.create_profile(profile),
        }
    }

    // --- Maintenance operations ---

    /// Check store integrity.
    ///
    /// Verifies:
    /// - SQLite page-level integrity
    /// - Every consumed entry has a consumption timestamp, and no pending one does
    /// - No consumption timestamp precedes its added timestamp
    fn check_integrity(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn_store(_store: &dyn DrinkStore) {}
    }
}
