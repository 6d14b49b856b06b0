//! Interactive prompts (dialoguer).

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use tipple_core::storage::{DrinkEntry, Gender, NewProfile};
use tipple_core::units::STANDARD_DRINKS;

const OTHER_CATEGORY: &str = "Other";

/// Prompt for a drink name.
pub fn prompt_drink() -> anyhow::Result<String> {
    let name = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Drink")
        .validate_with(|v: &String| -> Result<(), &str> {
            if v.trim().is_empty() {
                Err("Drink name is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(name.trim().to_string())
}

/// Prompt for a category: a standard one or free text.
pub fn prompt_category() -> anyhow::Result<String> {
    let mut items: Vec<&str> = STANDARD_DRINKS.iter().map(|(name, _)| *name).collect();
    items.push(OTHER_CATEGORY);

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Category")
        .items(&items)
        .default(0)
        .interact()?;

    if items[choice] != OTHER_CATEGORY {
        return Ok(items[choice].to_string());
    }

    let custom = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Category name")
        .default(OTHER_CATEGORY.to_string())
        .interact_text()?;
    Ok(custom.trim().to_string())
}

/// Prompt for the number of servings.
pub fn prompt_quantity() -> anyhow::Result<u32> {
    let quantity = Input::<u32>::with_theme(&ColorfulTheme::default())
        .with_prompt("Quantity")
        .default(1)
        .validate_with(|v: &u32| -> Result<(), &str> {
            if *v == 0 {
                Err("Quantity must be at least 1")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(quantity)
}

/// Prompt for a serving size in `unit`.
pub fn prompt_amount(unit: &str) -> anyhow::Result<f64> {
    let amount = Input::<f64>::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Serving size ({})", unit))
        .validate_with(|v: &f64| -> Result<(), &str> {
            if v.is_finite() && *v >= 0.0 {
                Ok(())
            } else {
                Err("Amount must be a non-negative number")
            }
        })
        .interact_text()?;
    Ok(amount)
}

/// Let the user pick one of `entries`. Returns its identity key.
pub fn select_entry(prompt: &str, entries: &[DrinkEntry]) -> anyhow::Result<Option<i64>> {
    if entries.is_empty() {
        return Ok(None);
    }

    let labels: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                "{}. {} ({}, x{}, {})",
                index + 1,
                entry.drink,
                entry.category,
                entry.quantity,
                entry.status
            )
        })
        .collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|index| entries[index].id))
}

/// Profile values gathered from flags, with gaps to fill.
#[derive(Debug, Default, Clone)]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub weight_kg: Option<f64>,
}

impl ProfileDraft {
    /// Complete profile if every field is present.
    pub fn complete(&self) -> Option<NewProfile> {
        match (&self.name, self.gender, self.weight_kg) {
            (Some(name), Some(gender), Some(weight)) => {
                Some(NewProfile::new(name.clone(), gender, weight))
            }
            _ => None,
        }
    }
}

/// Prompt for any profile fields missing from `draft`.
pub fn prompt_profile(draft: &ProfileDraft) -> anyhow::Result<NewProfile> {
    let theme = ColorfulTheme::default();

    let name = match &draft.name {
        Some(name) => name.clone(),
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Name")
            .interact_text()?
            .trim()
            .to_string(),
    };

    let gender = match draft.gender {
        Some(gender) => gender,
        None => {
            let options = [Gender::Male, Gender::Female];
            let labels: Vec<&str> = options.iter().map(Gender::as_str).collect();
            let choice = Select::with_theme(&theme)
                .with_prompt("Gender")
                .items(&labels)
                .default(0)
                .interact()?;
            options[choice]
        }
    };

    let weight_kg = match draft.weight_kg {
        Some(weight) => weight,
        None => Input::<f64>::with_theme(&theme)
            .with_prompt("Weight (kg)")
            .validate_with(|v: &f64| -> Result<(), &str> {
                if v.is_finite() && *v > 0.0 {
                    Ok(())
                } else {
                    Err("Weight must be a positive number")
                }
            })
            .interact_text()?,
    };

    Ok(NewProfile::new(name, gender, weight_kg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_complete_requires_all_fields() {
        let mut draft = ProfileDraft {
            name: Some("Sam".to_string()),
            gender: Some(Gender::Female),
            weight_kg: None,
        };
        assert!(draft.complete().is_none());

        draft.weight_kg = Some(60.0);
        let profile = draft.complete().expect("complete");
        assert_eq!(profile.name, "Sam");
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.weight_kg, 60.0);
    }
}
