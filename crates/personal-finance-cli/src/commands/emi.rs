use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::amortization::{self, LoanInput};

use crate::input;

/// Arguments for EMI / amortization calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EmiArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Total loan amount
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Up-front down payment
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual interest rate as a decimal (0.085 = 8.5%)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Number of leading schedule years to report (defaults to the full term)
    #[arg(long)]
    pub schedule_years: Option<u32>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: LoanInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanInput {
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            down_payment: args.down_payment,
            annual_rate: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
            schedule_years: args.schedule_years,
        }
    };

    let result = amortization::amortize(&loan)?;
    Ok(serde_json::to_value(result)?)
}
