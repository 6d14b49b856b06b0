//! JSON output formatting.

use tipple_core::limits::{Thresholds, Warning, SAFE_MESSAGE};
use tipple_core::storage::{ConsumptionSummary, DrinkEntry, UserProfile};

/// Convert an entry to JSON; `position` is its 1-based place in `show` order.
pub fn entry_json(entry: &DrinkEntry, position: usize) -> serde_json::Value {
    serde_json::json!({
        "position": position,
        "id": entry.id,
        "drink": entry.drink,
        "category": entry.category,
        "quantity": entry.quantity,
        "volume_oz": entry.volume_oz,
        "total_oz": entry.total_oz(),
        "status": entry.status,
        "date_added": entry.date_added,
        "date_consumed": entry.date_consumed,
    })
}

/// Convert entries in display order to a JSON array.
pub fn entries_json(entries: &[DrinkEntry]) -> Vec<serde_json::Value> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| entry_json(entry, index + 1))
        .collect()
}

pub fn profile_json(profile: &UserProfile) -> serde_json::Value {
    serde_json::json!({
        "name": profile.name,
        "gender": profile.gender,
        "weight_kg": profile.weight_kg,
        "created_at": profile.created_at,
    })
}

/// Aggregates, limits and warnings as one object.
pub fn summary_json(
    summary: &ConsumptionSummary,
    limits: &Thresholds,
    warnings: &[Warning],
) -> serde_json::Value {
    let messages: Vec<String> = warnings.iter().map(Warning::to_string).collect();
    let message = warnings.is_empty().then_some(SAFE_MESSAGE);
    serde_json::json!({
        "weekly_oz": summary.weekly_oz,
        "daily_oz": summary.daily_oz,
        "last_hours_oz": summary.last_hours_oz,
        "limits": limits,
        "safe": warnings.is_empty(),
        "message": message,
        "warnings": warnings,
        "messages": messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tipple_core::storage::{DrinkStatus, Gender};

    #[test]
    fn test_entry_json_fields() {
        let entry = DrinkEntry {
            id: 9,
            user_id: 1,
            drink: "IPA".to_string(),
            category: "Beer".to_string(),
            quantity: 2,
            volume_oz: 12.0,
            date_added: Utc::now(),
            date_consumed: None,
            status: DrinkStatus::Pending,
        };
        let value = entry_json(&entry, 1);
        assert_eq!(value["id"], 9);
        assert_eq!(value["total_oz"], 24.0);
        assert_eq!(value["status"], "pending");
        assert!(value["date_consumed"].is_null());
    }

    #[test]
    fn test_summary_json_safe_message() {
        let limits = Thresholds::for_gender(Gender::Male);
        let value = summary_json(&ConsumptionSummary::default(), &limits, &[]);
        assert_eq!(value["safe"], true);
        assert_eq!(value["message"], SAFE_MESSAGE);
        assert_eq!(value["limits"]["weekly_oz"], 14.0);
    }

    #[test]
    fn test_summary_json_lists_warnings() {
        let limits = Thresholds::for_gender(Gender::Male);
        let warnings = vec![Warning::WeeklyExceeded {
            consumed_oz: 15.0,
            limit_oz: 14.0,
        }];
        let value = summary_json(&ConsumptionSummary::new(15.0, 0.0, 0.0), &limits, &warnings);
        assert_eq!(value["safe"], false);
        assert!(value["message"].is_null());
        assert_eq!(value["warnings"][0]["kind"], "weekly_exceeded");
        assert_eq!(value["messages"][0], "WEEKLY LIMIT EXCEEDED: 15.0/14oz");
    }
}
