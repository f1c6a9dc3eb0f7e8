mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::format::FormatArgs;
use commands::schedule::{AnnuityArgs, ScheduleArgs};

/// Annuity mortgage schedules with prepayments
#[derive(Parser)]
#[command(
    name = "mcalc",
    version,
    about = "Annuity mortgage schedules with prepayments",
    long_about = "Builds month-by-month repayment schedules for annuity mortgages in decimal \
                  precision. Prepayments either lower the monthly payment or shorten the term."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter for diagnostics on stderr (trace, debug, info, warn, error)
    #[arg(long, env = "MCALC_LOG", default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a repayment schedule for a mortgage
    Schedule(ScheduleArgs),
    /// Calculate the level annuity payment for a balance
    Annuity(AnnuityArgs),
    /// Format an amount with space-grouped thousands
    FormatCurrency(FormatArgs),
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

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Annuity(args) => commands::schedule::run_annuity(args),
        Commands::FormatCurrency(args) => commands::format::run_format(args),
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
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
