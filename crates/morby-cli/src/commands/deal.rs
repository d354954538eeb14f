use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use morby_core::deal::{analyze_deal, DealInputs};

use crate::input;

/// Arguments for the deal analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyzeArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Monthly market rent
    #[arg(long)]
    pub market_rent: Option<Decimal>,

    /// Estimated closing costs
    #[arg(long)]
    pub closing_costs: Option<Decimal>,

    /// Maximum DSCR-lender LTV in percentage points (e.g. 75)
    #[arg(long, alias = "ltv")]
    pub max_ltv_pct: Option<Decimal>,

    /// Required debt-service coverage ratio (e.g. 1.15)
    #[arg(long, alias = "dscr")]
    pub dscr_ratio: Option<Decimal>,

    /// DSCR loan annual rate as a decimal (e.g. 0.0825)
    #[arg(long)]
    pub dscr_annual_rate: Option<Decimal>,

    /// DSCR loan term in years
    #[arg(long)]
    pub dscr_term_years: Option<u32>,

    /// Transactional lender fee as a decimal fraction (e.g. 0.02)
    #[arg(long)]
    pub transactional_fee_pct: Option<Decimal>,

    /// Seller note annual rate as a decimal
    #[arg(long)]
    pub seller_annual_rate: Option<Decimal>,

    /// Seller note amortization in years
    #[arg(long)]
    pub seller_term_years: Option<u32>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal_input: DealInputs = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DealInputs {
            purchase_price: args.purchase_price
                .ok_or("--purchase-price is required (or provide --input)")?,
            market_rent: args.market_rent
                .ok_or("--market-rent is required (or provide --input)")?,
            closing_costs: args.closing_costs
                .ok_or("--closing-costs is required (or provide --input)")?,
            max_ltv_pct: args.max_ltv_pct
                .ok_or("--max-ltv-pct is required (or provide --input)")?,
            dscr_ratio: args.dscr_ratio
                .ok_or("--dscr-ratio is required (or provide --input)")?,
            dscr_annual_rate: args.dscr_annual_rate
                .ok_or("--dscr-annual-rate is required (or provide --input)")?,
            dscr_term_years: args.dscr_term_years
                .ok_or("--dscr-term-years is required (or provide --input)")?,
            transactional_fee_pct: args.transactional_fee_pct
                .ok_or("--transactional-fee-pct is required (or provide --input)")?,
            seller_annual_rate: args.seller_annual_rate
                .ok_or("--seller-annual-rate is required (or provide --input)")?,
            seller_term_years: args.seller_term_years
                .ok_or("--seller-term-years is required (or provide --input)")?,
        }
    };

    let result = analyze_deal(&deal_input)?;
    Ok(serde_json::to_value(result)?)
}
