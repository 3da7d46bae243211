mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::AmortizeArgs;
use commands::scenarios::CompareArgs;
use commands::schedule::{MilestonesArgs, ScheduleArgs, SummaryArgs};

/// Fixed-rate mortgage amortization calculations
#[derive(Parser)]
#[command(
    name = "mcalc",
    version,
    about = "Fixed-rate mortgage amortization calculations",
    long_about = "A CLI for fixed-rate (French/annuity) mortgage amortization with \
                  decimal precision. Computes level monthly payments and full \
                  schedules, aggregates them by quarter or year, reports \
                  principal-repayment milestones, and compares financing scenarios."
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
    /// Compute the monthly payment and full repayment schedule
    Amortize(AmortizeArgs),
    /// Aggregate the schedule into monthly, quarterly, or yearly buckets
    Schedule(ScheduleArgs),
    /// Whole-schedule summary statistics
    Summary(SummaryArgs),
    /// Months at which 25/50/75/100% of the principal is repaid
    Milestones(MilestonesArgs),
    /// Compare labelled financing scenarios
    Compare(CompareArgs),
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
        Commands::Amortize(args) => commands::amortization::run_amortize(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Summary(args) => commands::schedule::run_summary(args),
        Commands::Milestones(args) => commands::schedule::run_milestones(args),
        Commands::Compare(args) => commands::scenarios::run_compare(args),
        Commands::Version => {
            println!("mcalc {}", env!("CARGO_PKG_VERSION"));
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
