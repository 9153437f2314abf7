mod commands;
mod config;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;

use commands::diagnose::DiagnoseArgs;
use commands::flip::FlipArgs;
use commands::kominka::{KominkaArgs, ScenarioArgs};
use commands::legacy::LegacyArgs;
use commands::show::ShowArgs;
use commands::subsidy::SubsidyArgs;
use config::AppConfig;

/// Property investment diagnosis calculators
#[derive(Parser)]
#[command(
    name = "diag",
    version,
    about = "Property investment diagnosis calculators",
    long_about = "A CLI for the flip MAO calculator, national subsidy matching, \
                  vacant-house rental yield and the inherited home choice diagnosis. \
                  Amounts are in 万円 and computed with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Directory for the stored diagnosis record (overrides DIAG_STORE_DIR)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Maximum allowable offer for a fix-and-flip purchase
    Flip(FlipArgs),
    /// Match national renovation subsidies
    Subsidy(SubsidyArgs),
    /// Rental yield of a renovated vacant house
    Kominka(KominkaArgs),
    /// Compare rental yield across named scenarios
    KominkaScenarios(ScenarioArgs),
    /// Sell / rent / keep diagnosis for an inherited home
    Legacy(LegacyArgs),
    /// List the choice diagnosis questions and their answers
    Questions,
    /// Run any engine by brand and emit a brand-tagged record
    Diagnose(DiagnoseArgs),
    /// Render the last stored diagnosis
    Show(ShowArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let config = AppConfig::load();
    if let Err(e) = telemetry::init(&config.telemetry) {
        fail(&e);
    }
    let store_dir = cli.store.or(config.store_dir);
    tracing::debug!(store = ?store_dir, "configuration loaded");
    let store = store_dir.as_deref();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Flip(args) => commands::flip::run_flip(args, store),
        Commands::Subsidy(args) => commands::subsidy::run_subsidy(args, store),
        Commands::Kominka(args) => commands::kominka::run_kominka(args, store),
        Commands::KominkaScenarios(args) => commands::kominka::run_scenarios(args),
        Commands::Legacy(args) => commands::legacy::run_legacy(args, store),
        Commands::Questions => commands::legacy::run_questions(),
        Commands::Diagnose(args) => commands::diagnose::run_diagnose(args, store),
        Commands::Show(args) => match commands::show::run_show(args, store) {
            Ok(text) => {
                println!("{}", text);
                process::exit(0);
            }
            Err(e) => fail(e.as_ref()),
        },
        Commands::Version => {
            println!("diag {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => fail(e.as_ref()),
    }
}

fn fail(e: &dyn std::error::Error) -> ! {
    eprintln!("{}: {}", "error".red().bold(), e);
    process::exit(1);
}
