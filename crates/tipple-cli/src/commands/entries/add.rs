use tipple_core::storage::{DrinkStore, NewDrink};
use tipple_core::units::{canonical_category, serving_volume, standard_ounces, Unit};
use tracing::info;

use crate::app::{require_profile, AppContext};
use crate::cli::AddArgs;
use crate::errors::CliError;
use crate::helpers::{prompt_amount, prompt_category, prompt_drink, prompt_quantity};
use crate::ui::{blank_line, format_oz, hint, print, receipt};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let interactive = !args.no_input && ui.is_interactive();

    let unit: Unit = args.unit.parse()?;

    let mut store = ctx.open_store()?;
    let profile = require_profile(&mut store, &ui, args.no_input)?;

    let drink = match args.drink.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ if interactive => prompt_drink()?,
        _ => {
            return Err(CliError::invalid_input(
                "Drink name is required.\nHint: Pass it as an argument, e.g. `tipple add IPA --category Beer`.",
            )
            .into())
        }
    };

    let category = match args.category.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ if interactive => prompt_category()?,
        _ => {
            return Err(CliError::invalid_input(
                "Category is required.\nHint: Use --category Beer|Wine|Whiskey|Vodka or any other name.",
            )
            .into())
        }
    };
    let category = canonical_category(&category)
        .map(str::to_string)
        .unwrap_or(category);

    let quantity = match args.quantity {
        Some(quantity) => quantity,
        None if interactive => prompt_quantity()?,
        None => 1,
    };

    let amount = if standard_ounces(&category).is_some() {
        None
    } else {
        match args.amount {
            Some(amount) => Some(amount),
            None if interactive => Some(prompt_amount(unit.as_str())?),
            None => None,
        }
    };
    let volume_oz = serving_volume(&category, amount, unit.as_str())?;

    let new_drink = NewDrink::new(drink, category, volume_oz).with_quantity(quantity);
    let id = store.add(&new_drink, profile.id)?;
    info!(id, drink = %new_drink.drink, "added drink");

    if ctx.quiet() {
        println!("{}", id);
        return Ok(());
    }

    let id_text = id.to_string();
    let quantity_text = new_drink.quantity.to_string();
    let total_text = format_oz(new_drink.volume_oz * f64::from(new_drink.quantity));
    blank_line(&ui);
    print(
        &ui,
        &receipt(
            &ui,
            "Drink added",
            &[
                ("Entry ID", id_text.as_str()),
                ("Drink", new_drink.drink.as_str()),
                ("Category", new_drink.category.as_str()),
                ("Quantity", quantity_text.as_str()),
                ("Total oz", total_text.as_str()),
            ],
        ),
    );
    if ui.mode.is_pretty() {
        print(&ui, &hint(&ui, &format!("tipple consume {}", id)));
    }

    Ok(())
}
