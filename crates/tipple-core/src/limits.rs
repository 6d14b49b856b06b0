//! Consumption limits and BAC estimation.
//!
//! Evaluation is a pure function of the profile and the three consumption
//! aggregates; [`evaluate_store`] re-queries the aggregates first.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::storage::{ConsumptionSummary, DrinkStore, Gender, UserProfile};

/// Canonical message when no rule fires.
pub const SAFE_MESSAGE: &str = "Within safe consumption limits";

/// Fraction of the weekly limit at which the approaching warning starts.
pub const APPROACHING_RATIO: f64 = 0.8;

/// BAC above which the legal warning fires (percent).
pub const LEGAL_BAC: f64 = 0.08;

/// BAC above which the caution warning fires (percent).
pub const CAUTION_BAC: f64 = 0.05;

/// Ounces-to-BAC conversion constant used with the Widmark formula.
const ALCOHOL_FACTOR: f64 = 0.075;

/// BAC eliminated per hour.
const METABOLISM_PER_HOUR: f64 = 0.015;

/// Elapsed drinking time assumed for every estimate.
pub const BAC_ELAPSED_HOURS: f64 = 1.0;

/// Gender-dependent consumption limits in ounces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub weekly_oz: f64,
    pub daily_oz: f64,
    pub binge_oz: f64,
}

impl Thresholds {
    pub fn for_gender(gender: Gender) -> Self {
        match gender {
            Gender::Male => Self {
                weekly_oz: 14.0,
                daily_oz: 4.0,
                binge_oz: 3.0,
            },
            Gender::Female => Self {
                weekly_oz: 7.0,
                daily_oz: 3.0,
                binge_oz: 2.0,
            },
        }
    }
}

/// Widmark body-water distribution ratio.
pub fn widmark_ratio(gender: Gender) -> f64 {
    match gender {
        Gender::Male => 0.68,
        Gender::Female => 0.55,
    }
}

/// Estimate blood alcohol concentration (percent), clamped at zero.
pub fn estimate_bac(gender: Gender, weight_kg: f64, total_oz: f64, hours: f64) -> f64 {
    let r = widmark_ratio(gender);
    let bac = (total_oz * ALCOHOL_FACTOR) / (weight_kg * r) - METABOLISM_PER_HOUR * hours;
    bac.max(0.0)
}

/// How serious a warning is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Caution,
    Danger,
}

/// A single fired rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    WeeklyExceeded { consumed_oz: f64, limit_oz: f64 },
    WeeklyApproaching { consumed_oz: f64, limit_oz: f64 },
    DailyExceeded { consumed_oz: f64, limit_oz: f64 },
    Binge { consumed_oz: f64, hours: u32 },
    LegalBac { bac: f64 },
    CautionBac { bac: f64 },
}

impl Warning {
    pub fn severity(&self) -> Severity {
        match self {
            Self::WeeklyApproaching { .. } | Self::CautionBac { .. } => Severity::Caution,
            _ => Severity::Danger,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeeklyExceeded {
                consumed_oz,
                limit_oz,
            } => write!(
                f,
                "WEEKLY LIMIT EXCEEDED: {:.1}/{}oz",
                consumed_oz, limit_oz
            ),
            Self::WeeklyApproaching {
                consumed_oz,
                limit_oz,
            } => write!(
                f,
                "Approaching weekly limit: {:.1}/{}oz",
                consumed_oz, limit_oz
            ),
            Self::DailyExceeded {
                consumed_oz,
                limit_oz,
            } => write!(f, "DAILY LIMIT EXCEEDED: {:.1}/{}oz", consumed_oz, limit_oz),
            Self::Binge { consumed_oz, hours } => write!(
                f,
                "BINGE WARNING: {:.1}oz in last {} hours",
                consumed_oz, hours
            ),
            Self::LegalBac { bac } => write!(
                f,
                "LEGAL WARNING: Estimated BAC {:.3}% (above {}%)",
                bac, LEGAL_BAC
            ),
            Self::CautionBac { bac } => write!(
                f,
                "CAUTION: Estimated BAC {:.3}% (impaired driving possible)",
                bac
            ),
        }
    }
}

/// Apply the limit rules in their fixed order.
pub fn evaluate(profile: &UserProfile, summary: &ConsumptionSummary) -> Vec<Warning> {
    let limits = Thresholds::for_gender(profile.gender);
    let mut warnings = Vec::new();

    if summary.weekly_oz > limits.weekly_oz {
        warnings.push(Warning::WeeklyExceeded {
            consumed_oz: summary.weekly_oz,
            limit_oz: limits.weekly_oz,
        });
    } else if summary.weekly_oz > limits.weekly_oz * APPROACHING_RATIO {
        warnings.push(Warning::WeeklyApproaching {
            consumed_oz: summary.weekly_oz,
            limit_oz: limits.weekly_oz,
        });
    }

    if summary.daily_oz > limits.daily_oz {
        warnings.push(Warning::DailyExceeded {
            consumed_oz: summary.daily_oz,
            limit_oz: limits.daily_oz,
        });
    }

    if summary.last_hours_oz > limits.binge_oz {
        warnings.push(Warning::Binge {
            consumed_oz: summary.last_hours_oz,
            hours: crate::storage::BINGE_WINDOW_HOURS,
        });
    }

    if summary.daily_oz > 0.0 {
        let bac = estimate_bac(
            profile.gender,
            profile.weight_kg,
            summary.daily_oz,
            BAC_ELAPSED_HOURS,
        );
        if bac > LEGAL_BAC {
            warnings.push(Warning::LegalBac { bac });
        } else if bac > CAUTION_BAC {
            warnings.push(Warning::CautionBac { bac });
        }
    }

    warnings
}

/// Re-query the user's aggregates and evaluate them.
pub fn evaluate_store<S: DrinkStore + ?Sized>(
    store: &S,
    profile: &UserProfile,
) -> Result<(ConsumptionSummary, Vec<Warning>)> {
    let summary = store.summary(profile.id)?;
    let warnings = evaluate(profile, &summary);
    Ok((summary, warnings))
}

/// Render warnings as lines, or the canonical safe message when empty.
pub fn warning_lines(warnings: &[Warning]) -> Vec<String> {
    if warnings.is_empty() {
        vec![SAFE_MESSAGE.to_string()]
    } else {
        warnings.iter().map(Warning::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(gender: Gender, weight_kg: f64) -> UserProfile {
        UserProfile {
            id: 1,
            name: "Test".to_string(),
            gender,
            weight_kg,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_weekly_exceeded_message() {
        let warnings = evaluate(
            &profile(Gender::Male, 75.0),
            &ConsumptionSummary::new(15.0, 0.0, 0.0),
        );
        let lines = warning_lines(&warnings);
        assert_eq!(lines, vec!["WEEKLY LIMIT EXCEEDED: 15.0/14oz"]);
    }

    #[test]
    fn test_approaching_is_exclusive_with_exceeded() {
        let male = profile(Gender::Male, 75.0);

        let approaching = evaluate(&male, &ConsumptionSummary::new(12.0, 0.0, 0.0));
        assert_eq!(
            approaching,
            vec![Warning::WeeklyApproaching {
                consumed_oz: 12.0,
                limit_oz: 14.0
            }]
        );
        assert_eq!(
            approaching[0].to_string(),
            "Approaching weekly limit: 12.0/14oz"
        );

        // Exactly at 80% does not fire
        let at_threshold = evaluate(&male, &ConsumptionSummary::new(11.2, 0.0, 0.0));
        assert!(at_threshold.is_empty());
    }

    #[test]
    fn test_female_daily_without_bac_warning() {
        let warnings = evaluate(
            &profile(Gender::Female, 60.0),
            &ConsumptionSummary::new(3.5, 3.5, 0.0),
        );
        assert_eq!(
            warning_lines(&warnings),
            vec!["DAILY LIMIT EXCEEDED: 3.5/3oz"]
        );
        assert!(!warnings
            .iter()
            .any(|w| matches!(w, Warning::LegalBac { .. } | Warning::CautionBac { .. })));
    }

    #[test]
    fn test_rules_fire_in_fixed_order() {
        // 60 oz today for a 60kg woman: every rule fires
        let warnings = evaluate(
            &profile(Gender::Female, 60.0),
            &ConsumptionSummary::new(60.0, 60.0, 60.0),
        );
        let kinds: Vec<&str> = warnings
            .iter()
            .map(|w| match w {
                Warning::WeeklyExceeded { .. } => "weekly",
                Warning::WeeklyApproaching { .. } => "approaching",
                Warning::DailyExceeded { .. } => "daily",
                Warning::Binge { .. } => "binge",
                Warning::LegalBac { .. } => "legal",
                Warning::CautionBac { .. } => "caution",
            })
            .collect();
        assert_eq!(kinds, vec!["weekly", "daily", "binge", "legal"]);
        assert_eq!(warnings[2].to_string(), "BINGE WARNING: 60.0oz in last 4 hours");
    }

    #[test]
    fn test_bac_uses_fixed_elapsed_hour() {
        let bac = estimate_bac(Gender::Male, 75.0, 24.0, BAC_ELAPSED_HOURS);
        let expected = (24.0 * 0.075) / (75.0 * 0.68) - 0.015;
        assert!((bac - expected).abs() < 1e-12);
    }

    #[test]
    fn test_bac_is_clamped_at_zero() {
        assert_eq!(estimate_bac(Gender::Female, 60.0, 3.5, 1.0), 0.0);
    }

    #[test]
    fn test_caution_and_legal_bac_messages() {
        // 40 oz / (80kg * 0.68) * 0.075 - 0.015 ≈ 0.0401: no BAC warning
        let mild = evaluate(
            &profile(Gender::Male, 80.0),
            &ConsumptionSummary::new(0.0, 40.0, 0.0),
        );
        assert!(!mild.iter().any(|w| matches!(w, Warning::CautionBac { .. })));

        // 50 oz → ≈ 0.0539: caution
        let caution = evaluate(
            &profile(Gender::Male, 80.0),
            &ConsumptionSummary::new(0.0, 50.0, 0.0),
        );
        let line = caution
            .iter()
            .find(|w| matches!(w, Warning::CautionBac { .. }))
            .expect("caution warning")
            .to_string();
        assert_eq!(
            line,
            "CAUTION: Estimated BAC 0.054% (impaired driving possible)"
        );

        // 80 oz → ≈ 0.0953: legal
        let legal = evaluate(
            &profile(Gender::Male, 80.0),
            &ConsumptionSummary::new(0.0, 80.0, 0.0),
        );
        let line = legal
            .iter()
            .find(|w| matches!(w, Warning::LegalBac { .. }))
            .expect("legal warning")
            .to_string();
        assert_eq!(line, "LEGAL WARNING: Estimated BAC 0.095% (above 0.08%)");
    }

    #[test]
    fn test_nothing_consumed_is_safe() {
        let warnings = evaluate(&profile(Gender::Male, 75.0), &ConsumptionSummary::default());
        assert!(warnings.is_empty());
        assert_eq!(warning_lines(&warnings), vec![SAFE_MESSAGE]);
    }

    #[test]
    fn test_severity() {
        assert_eq!(Warning::LegalBac { bac: 0.1 }.severity(), Severity::Danger);
        assert_eq!(
            Warning::WeeklyApproaching {
                consumed_oz: 12.0,
                limit_oz: 14.0
            }
            .severity(),
            Severity::Caution
        );
    }
}
