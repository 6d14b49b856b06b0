use tipple_core::storage::{DrinkStore, Gender, NewProfile};
use tracing::info;

use crate::app::{missing_profile_error, AppContext};
use crate::cli::ProfileArgs;
use crate::errors::CliError;
use crate::helpers::{prompt_profile, ProfileDraft};
use crate::output::{print_profile, profile_json};
use crate::ui::{blank_line, header, print, receipt};

pub fn handle_profile(ctx: &AppContext, args: &ProfileArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let interactive = !args.no_input && ui.is_interactive();

    let gender = args
        .gender
        .as_deref()
        .map(str::parse::<Gender>)
        .transpose()?;
    let draft = ProfileDraft {
        name: args
            .name
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        gender,
        weight_kg: args.weight,
    };

    let mut store = ctx.open_store()?;
    let existing = store.profile()?;
    let editing = draft.name.is_some() || draft.gender.is_some() || draft.weight_kg.is_some();

    if !editing {
        match &existing {
            Some(profile) if ui.mode.is_json() => {
                println!("{}", serde_json::to_string_pretty(&profile_json(profile))?);
                return Ok(());
            }
            Some(profile) => {
                if !ctx.quiet() {
                    print(&ui, &header(&ui, "profile", None));
                    blank_line(&ui);
                }
                print_profile(&ui, profile);
                return Ok(());
            }
            None if !interactive => return Err(missing_profile_error().into()),
            None => {}
        }
    }

    // Unset fields keep their current value when editing
    let merged = match &existing {
        Some(current) => ProfileDraft {
            name: draft.name.clone().or_else(|| Some(current.name.clone())),
            gender: draft.gender.or(Some(current.gender)),
            weight_kg: draft.weight_kg.or(Some(current.weight_kg)),
        },
        None => draft,
    };

    let new_profile: NewProfile = match merged.complete() {
        Some(profile) => profile,
        None if interactive => prompt_profile(&merged)?,
        None => {
            return Err(CliError::invalid_input(
                "Name, gender and weight are all required for a new profile.\nHint: tipple profile --name <NAME> --gender <male|female> --weight <KG>",
            )
            .into())
        }
    };

    let saved = store.save_profile(&new_profile)?;
    info!(name = %saved.name, "saved profile");

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&profile_json(&saved))?);
        return Ok(());
    }

    if !ctx.quiet() {
        let title = if existing.is_some() {
            "Profile updated"
        } else {
            "Profile created"
        };
        print(&ui, &receipt(&ui, title, &[]));
        print_profile(&ui, &saved);
    }
    Ok(())
}
