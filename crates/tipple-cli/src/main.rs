//! Tipple CLI - a local, CLI-first alcohol consumption tracker
//!
//! This is the command-line interface for Tipple. It provides a user-friendly
//! interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::Parser;
use tipple_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{check, entries, init, maintenance, misc, profile};
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        tracing::debug!(error = ?e, "command failed");
        let ui_ctx = ctx.ui_context(false, None);

        let error_msg = format!("{}", e);
        let hint = extract_error_hint(&error_msg);
        let message = match error_msg.find('\n') {
            Some(idx) if hint.is_some() => error_msg[..idx].to_string(),
            _ => error_msg.clone(),
        };

        print_error(&ui_ctx, &message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Extract a hint from an error message if it contains "Hint:",
/// or provide contextual hints for common error types.
fn extract_error_hint(error: &str) -> Option<String> {
    if let Some(idx) = error.find("\nHint:") {
        return Some(error[idx + 1..].to_string());
    }
    if let Some(idx) = error.find("\nhint:") {
        return Some(error[idx + 1..].to_string());
    }

    let error_lower = error.to_lowercase();

    if error_lower.contains("unknown unit") {
        return Some("Hint: Supported units are oz, ml and l.".to_string());
    }

    if error_lower.contains("unrecognized gender") {
        return Some("Hint: Use --gender male or --gender female.".to_string());
    }

    if error_lower.contains("no standard size") {
        return Some(
            "Hint: Pass --amount with --unit, or use Beer, Wine, Whiskey or Vodka.".to_string(),
        );
    }

    if error_lower.contains("before the entry was added") {
        return Some("Hint: Check the --at time against the entry's added time.".to_string());
    }

    if error_lower.contains("failed to open database") {
        return Some(
            "Hint: Check --db / TIPPLE_DB or the [database] path in the config file.".to_string(),
        );
    }

    if error_lower.contains("failed to parse config") {
        return Some("Hint: Fix the TOML syntax or re-run `tipple init --force`.".to_string());
    }

    None
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Add(args)) => {
            entries::handle_add(ctx, args)?;
        }
        Some(Commands::Delete(args)) => {
            entries::handle_delete(ctx, args)?;
        }
        Some(Commands::Update(args)) => {
            entries::handle_update(ctx, args)?;
        }
        Some(Commands::Consume(args)) => {
            entries::handle_consume(ctx, args)?;
        }
        Some(Commands::Show(args)) => {
            entries::handle_show(ctx, args)?;
        }
        Some(Commands::Check(args)) => {
            check::handle_check(ctx, args)?;
        }
        Some(Commands::Profile(args)) => {
            profile::handle_profile(ctx, args)?;
        }
        Some(Commands::Doctor) => {
            maintenance::handle_doctor(ctx)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Tipple v{}", VERSION);
            println!("\nQuickstart:");
            println!("  tipple init");
            println!("  tipple profile --name Sam --gender male --weight 75");
            println!("  tipple add IPA --category Beer --quantity 2");
            println!("  tipple consume --position 1");
            println!("  tipple show");
            println!("\nRun `tipple --help` for full usage.");
        }
    }

    Ok(())
}
