use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use tipple_core::VERSION;

/// Tipple - a local, CLI-first alcohol consumption tracker
#[derive(Parser)]
#[command(name = "tipple")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the database file
    #[arg(long, global = true, env = "TIPPLE_DB", value_name = "PATH")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols and table borders
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Drink name (e.g., "IPA")
    #[arg(value_name = "DRINK")]
    pub drink: Option<String>,

    /// Category (Beer, Wine, Whiskey, Vodka, or anything else)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Number of servings
    #[arg(short = 'n', long)]
    pub quantity: Option<u32>,

    /// Serving size, ignored for standard categories
    #[arg(long)]
    pub amount: Option<f64>,

    /// Unit for --amount (oz, ml, l)
    #[arg(long, default_value = "oz")]
    pub unit: String,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Selects an entry by identity key or by position in `show` order.
#[derive(Args)]
pub struct TargetArgs {
    /// Entry ID
    #[arg(value_name = "ID", conflicts_with = "position")]
    pub id: Option<i64>,

    /// 1-based position as listed by `tipple show`
    #[arg(short, long)]
    pub position: Option<usize>,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Arguments for the `update` command
#[derive(Args)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// New drink name
    #[arg(long)]
    pub drink: Option<String>,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Arguments for the `consume` command
#[derive(Args)]
pub struct ConsumeArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Consumption time (ISO-8601 or YYYY-MM-DD), defaults to now
    #[arg(long, value_name = "DATETIME")]
    pub at: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `check` command
#[derive(Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `profile` command
#[derive(Args)]
pub struct ProfileArgs {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Gender (male or female)
    #[arg(long)]
    pub gender: Option<String>,

    /// Body weight in kilograms
    #[arg(long)]
    pub weight: Option<f64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the config file and create the database
    Init(InitArgs),

    /// Record a new drink
    Add(AddArgs),

    /// Remove a drink
    Delete(DeleteArgs),

    /// Rename or recategorize a drink
    Update(UpdateArgs),

    /// Mark a drink as consumed
    Consume(ConsumeArgs),

    /// List drinks, weekly progress and warnings
    #[command(alias = "list")]
    Show(ShowArgs),

    /// Print current consumption and warnings
    Check(CheckArgs),

    /// View or edit the user profile
    Profile(ProfileArgs),

    /// Diagnose config and database problems
    Doctor,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_is_alias_for_show() {
        let cli = Cli::try_parse_from(["tipple", "list", "--json"]).expect("parse");
        assert!(matches!(cli.command, Some(Commands::Show(ShowArgs { json: true, .. }))));
    }

    #[test]
    fn test_id_conflicts_with_position() {
        let result = Cli::try_parse_from(["tipple", "delete", "3", "--position", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["tipple", "-vv", "check"]).expect("parse");
        assert_eq!(cli.verbose, 2);
    }
}
