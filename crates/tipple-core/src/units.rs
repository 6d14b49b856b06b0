//! Volume conversion and standard drink sizes.
//!
//! All volumes are stored in US fluid ounces. Amounts entered in millilitres
//! or litres are converted on the way in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TippleError};

/// Fluid ounces per millilitre.
pub const OZ_PER_ML: f64 = 0.033814;

/// Fluid ounces per litre.
pub const OZ_PER_L: f64 = 33.814;

/// A volume unit accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Oz,
    Ml,
    L,
}

impl Unit {
    /// Multiplier that converts an amount in this unit to ounces.
    pub fn oz_factor(&self) -> f64 {
        match self {
            Self::Oz => 1.0,
            Self::Ml => OZ_PER_ML,
            Self::L => OZ_PER_L,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oz => "oz",
            Self::Ml => "ml",
            Self::L => "l",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = TippleError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "oz" => Ok(Self::Oz),
            "ml" => Ok(Self::Ml),
            "l" => Ok(Self::L),
            other => Err(TippleError::InvalidInput(format!("Unknown unit: {}", other))),
        }
    }
}

/// Convert an amount in the named unit to fluid ounces.
///
/// The unit name is case-insensitive. Unknown units are an error.
pub fn convert_to_oz(amount: f64, unit: &str) -> Result<f64> {
    let unit: Unit = unit.parse()?;
    Ok(amount * unit.oz_factor())
}

/// Standard drink sizes in ounces, keyed by category.
pub const STANDARD_DRINKS: &[(&str, f64)] = &[
    ("Beer", 12.0),
    ("Wine", 5.0),
    ("Whiskey", 1.5),
    ("Vodka", 1.5),
];

/// Look up the standard serving size for a category (case-insensitive).
pub fn standard_ounces(category: &str) -> Option<f64> {
    let category = category.trim();
    STANDARD_DRINKS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category))
        .map(|(_, oz)| *oz)
}

/// Canonical spelling of a standard category, if the input names one.
pub fn canonical_category(category: &str) -> Option<&'static str> {
    let category = category.trim();
    STANDARD_DRINKS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category))
        .map(|(name, _)| *name)
}

/// Resolve the per-serving volume in ounces for a new drink.
///
/// A standard category wins over any amount/unit given. Otherwise the
/// amount is converted from `unit`; a missing amount is an error.
pub fn serving_volume(category: &str, amount: Option<f64>, unit: &str) -> Result<f64> {
    if let Some(oz) = standard_ounces(category) {
        return Ok(oz);
    }

    let amount = amount.ok_or_else(|| {
        TippleError::InvalidInput(format!(
            "Category \"{}\" has no standard size; an amount is required",
            category
        ))
    })?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(TippleError::InvalidInput(format!(
            "Amount must be a non-negative number: {}",
            amount
        )));
    }
    convert_to_oz(amount, unit)
}
