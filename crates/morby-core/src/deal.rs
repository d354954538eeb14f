use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity::{amortized_payment, principal_for_payment};
use crate::error::MorbyError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::MorbyResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: u32 = 12;

/// Input parameters for a Morby Method acquisition analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealInputs {
    /// Agreed purchase price
    pub purchase_price: Money,
    /// Monthly market rent the property commands
    pub market_rent: Money,
    /// Estimated closing costs
    pub closing_costs: Money,
    /// Maximum LTV the DSCR lender allows, in percentage points (75 = 75%)
    pub max_ltv_pct: Percent,
    /// Required debt-service coverage (rent / payment), e.g. 1.15
    pub dscr_ratio: Decimal,
    /// DSCR loan annual interest rate as a decimal (0.0825 = 8.25%)
    pub dscr_annual_rate: Rate,
    /// DSCR loan term in years
    pub dscr_term_years: u32,
    /// Transactional lender flat fee as a decimal fraction (0.02 = 2%)
    pub transactional_fee_pct: Rate,
    /// Seller note annual interest rate as a decimal
    pub seller_annual_rate: Rate,
    /// Seller note amortization in years
    pub seller_term_years: u32,
}

/// Complete financing structure for one deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealOutputs {
    /// DSCR loan capacity supported by rent coverage alone
    pub rent_based_dscr_loan: Money,
    /// DSCR loan capacity allowed by the LTV cap
    pub ltv_based_dscr_loan: Money,
    /// Funded DSCR loan: the lesser of the rent and LTV capacities
    pub dscr_loan_amount: Money,
    /// Gap the seller carries: purchase price minus DSCR loan.
    /// Negative when rent capacity alone exceeds the price.
    pub seller_finance_amount: Money,
    /// Amortized monthly payment on the DSCR loan
    pub dscr_monthly_payment: Money,
    /// Amortized monthly payment on the seller note
    pub seller_monthly_payment: Money,
    /// Combined monthly debt service
    pub total_monthly_debt: Money,
    /// Rent minus total debt service; negative deals are reported, not rejected
    pub monthly_cash_flow: Money,
    /// Short-term cash to close: seller note + closing costs
    pub transactional_base: Money,
    /// Flat fee owed to the transactional lender
    pub transactional_fee: Money,
    /// Total repayment to the transactional lender
    pub transactional_repay: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Size the full three-source financing stack for one acquisition.
///
/// Stateless and deterministic: the DSCR loan is bounded by the tighter of
/// the rent-coverage and LTV constraints, the seller note carries the
/// residual, and transactional funding bridges the seller note plus closing
/// costs. Economically unusual outcomes (negative cash flow, negative
/// seller note) are valid results surfaced through `warnings`.
pub fn analyze_deal(input: &DealInputs) -> MorbyResult<ComputationOutput<DealOutputs>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    let dscr_monthly_rate = input.dscr_annual_rate / dec!(12);
    let dscr_periods = input.dscr_term_years * MONTHS_PER_YEAR;
    let seller_monthly_rate = input.seller_annual_rate / dec!(12);
    let seller_periods = input.seller_term_years * MONTHS_PER_YEAR;

    // --- DSCR loan sizing: rent coverage vs LTV cap ---
    let supportable_payment = input.market_rent / input.dscr_ratio;
    let rent_based_dscr_loan =
        principal_for_payment(supportable_payment, dscr_monthly_rate, dscr_periods)?;
    let ltv_based_dscr_loan = input.purchase_price * (input.max_ltv_pct / dec!(100));

    // The binding (smaller) constraint wins
    let dscr_loan_amount = rent_based_dscr_loan.min(ltv_based_dscr_loan);

    // --- Seller finance gap ---
    let seller_finance_amount = input.purchase_price - dscr_loan_amount;
    if seller_finance_amount < Decimal::ZERO {
        warnings.push(format!(
            "Seller finance amount {seller_finance_amount} is negative — DSCR capacity alone exceeds the purchase price"
        ));
    }

    // --- Amortized payments, each loan on its own terms ---
    let dscr_monthly_payment =
        amortized_payment(dscr_loan_amount, dscr_monthly_rate, dscr_periods)?;
    let seller_monthly_payment =
        amortized_payment(seller_finance_amount, seller_monthly_rate, seller_periods)?;

    // --- Cash flow ---
    let total_monthly_debt = dscr_monthly_payment + seller_monthly_payment;
    let monthly_cash_flow = input.market_rent - total_monthly_debt;
    if monthly_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Monthly cash flow {monthly_cash_flow} is negative — the deal does not cash-flow at market rent"
        ));
    }

    // --- Transactional funding ---
    let transactional_base = seller_finance_amount + input.closing_costs;
    let transactional_fee = transactional_base * input.transactional_fee_pct;
    let transactional_repay = transactional_base + transactional_fee;
    if transactional_base < Decimal::ZERO {
        warnings.push(
            "Transactional base is negative — no short-term funding is required to close".into(),
        );
    }

    let output = DealOutputs {
        rent_based_dscr_loan,
        ltv_based_dscr_loan,
        dscr_loan_amount,
        seller_finance_amount,
        dscr_monthly_payment,
        seller_monthly_payment,
        total_monthly_debt,
        monthly_cash_flow,
        transactional_base,
        transactional_fee,
        transactional_repay,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Morby Method Financing Structure (DSCR + Seller Finance + Transactional)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Structural checks only. Sign of currency inputs is deliberately not
/// validated: nonsensical negatives propagate through the arithmetic
/// unchanged, and the caller decides what to do with the result.
fn validate_input(input: &DealInputs, warnings: &mut Vec<String>) -> MorbyResult<()> {
    if input.dscr_term_years == 0 {
        return Err(MorbyError::InvalidTerm {
            field: "dscr_term_years".into(),
        });
    }

    if input.seller_term_years == 0 {
        return Err(MorbyError::InvalidTerm {
            field: "seller_term_years".into(),
        });
    }

    if input.dscr_ratio.is_zero() {
        return Err(MorbyError::InvalidInput {
            field: "dscr_ratio".into(),
            reason: "DSCR requirement of zero makes the supportable payment undefined".into(),
        });
    }

    // --- Warnings for unusual parameters ---
    if input.max_ltv_pct < dec!(50) || input.max_ltv_pct > dec!(90) {
        warnings.push(format!(
            "Max LTV of {}% is outside the conventional 50–90% band for DSCR lenders",
            input.max_ltv_pct
        ));
    }

    if input.dscr_ratio > Decimal::ZERO && input.dscr_ratio < Decimal::ONE {
        warnings.push(format!(
            "DSCR requirement {} is below 1.00x — rent would not cover the sized payment",
            input.dscr_ratio
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
