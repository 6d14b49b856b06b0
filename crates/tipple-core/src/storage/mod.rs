//! Storage layer for drink entries and the user profile.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteStore;
pub use traits::DrinkStore;
pub use types::{
    ConsumptionSummary, DrinkEntry, DrinkStatus, Gender, NewDrink, NewProfile, TimeWindow,
    UserProfile, BINGE_WINDOW_HOURS,
};
