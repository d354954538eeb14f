mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::deal::AnalyzeArgs;
use commands::schedule::ScheduleArgs;

/// Morby Method deal analysis: DSCR loan + seller finance + transactional funding
#[derive(Parser)]
#[command(
    name = "morby",
    version,
    about = "Morby Method real-estate financing analysis",
    long_about = "Size a three-source acquisition stack with decimal precision: \
                  the maximum DSCR loan under rent-coverage and LTV constraints, \
                  the seller-carried note filling the gap, amortized payments and \
                  cash flow, and the transactional funding needed to close."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a deal: loan sizing, payments, cash flow, transactional funding
    Analyze(AnalyzeArgs),
    /// Month-by-month amortization schedule for a single loan
    Schedule(ScheduleArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::deal::run_analyze(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Version => {
            println!("morby {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
