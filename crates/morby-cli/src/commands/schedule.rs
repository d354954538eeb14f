use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use morby_core::schedule::{amortization_schedule, ScheduleInput};

use crate::input;

/// Arguments for the amortization schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Opening principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a decimal (e.g. 0.05)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Amortization term in years
    #[arg(long)]
    pub term_years: Option<u32>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScheduleInput {
            principal: args.principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_years: args.term_years
                .ok_or("--term-years is required (or provide --input)")?,
        }
    };

    let result = amortization_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}
