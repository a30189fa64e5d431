use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::retirement::{self, ProjectionMode, RetirementInput};

use crate::input;

/// Arguments for retirement corpus projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RetirementArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Projection mode
    #[arg(long, value_parser = parse_mode, default_value = "standard")]
    pub mode: ProjectionMode,

    /// Current age in years
    #[arg(long)]
    pub current_age: Option<u32>,

    /// Target retirement age in years
    #[arg(long)]
    pub target_age: Option<u32>,

    /// Savings already accumulated
    #[arg(long, default_value = "0")]
    pub current_savings: Decimal,

    /// Monthly SIP contribution until the target age
    #[arg(long, default_value = "0")]
    pub monthly: Decimal,

    /// Expected annual return as a decimal (0.12 = 12%)
    #[arg(long)]
    pub annual_return: Option<Decimal>,
}

fn parse_mode(s: &str) -> Result<ProjectionMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "standard" => Ok(ProjectionMode::Standard),
        "fire" => Ok(ProjectionMode::Fire),
        other => Err(format!("unknown mode '{other}' (expected standard|fire)")),
    }
}

pub fn run_retirement(args: RetirementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let retirement_input: RetirementInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RetirementInput {
            mode: args.mode,
            current_age: args
                .current_age
                .ok_or("--current-age is required (or provide --input)")?,
            target_age: args
                .target_age
                .ok_or("--target-age is required (or provide --input)")?,
            current_savings: args.current_savings,
            monthly_contribution: args.monthly,
            annual_return: args
                .annual_return
                .ok_or("--annual-return is required (or provide --input)")?,
        }
    };

    let result = retirement::project_retirement(&retirement_input)?;
    Ok(serde_json::to_value(result)?)
}
