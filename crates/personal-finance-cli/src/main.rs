mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::emi::EmiArgs;
use commands::retirement::RetirementArgs;
use commands::sip::SipArgs;
use commands::tax::TaxArgs;

/// Personal finance calculators
#[derive(Parser)]
#[command(
    name = "pfc",
    version,
    about = "Personal finance calculators with decimal precision",
    long_about = "Loan EMI and amortization schedules, SIP/lumpsum growth projections \
                  with expense drag and LTCG tax, retirement corpus projections, and \
                  income-tax slab computation for the new and old regimes. All \
                  arithmetic runs at full decimal precision; rounding happens only \
                  when results are printed."
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
    /// Loan EMI, total interest/cost, and amortization schedule
    Emi(EmiArgs),
    /// SIP / lumpsum growth projection with expense drag and LTCG tax
    Sip(SipArgs),
    /// Retirement corpus and sustainable-income projection
    Retirement(RetirementArgs),
    /// Income tax under the new or old regime
    Tax(TaxArgs),
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
        Commands::Emi(args) => commands::emi::run_emi(args),
        Commands::Sip(args) => commands::sip::run_sip(args),
        Commands::Retirement(args) => commands::retirement::run_retirement(args),
        Commands::Tax(args) => commands::tax::run_tax(args),
        Commands::Version => {
            println!("pfc {}", env!("CARGO_PKG_VERSION"));
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
