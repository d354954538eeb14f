use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity::amortized_payment;
use crate::error::MorbyError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::MorbyResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Loan to amortize month by month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    /// Opening principal
    pub principal: Money,
    /// Annual interest rate as a decimal (0.05 = 5%)
    pub annual_rate: Rate,
    /// Amortization term in years
    pub term_years: u32,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based payment number
    pub month: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub balance: Money,
}

/// Full amortization schedule with totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub monthly_payment: Money,
    pub entries: Vec<ScheduleEntry>,
    pub total_paid: Money,
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Amortize a fixed-rate loan month by month.
///
/// The final payment absorbs any Decimal rounding residue so the closing
/// balance is exactly zero.
pub fn amortization_schedule(
    input: &ScheduleInput,
) -> MorbyResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.term_years == 0 {
        return Err(MorbyError::InvalidTerm {
            field: "term_years".into(),
        });
    }

    if input.principal < Decimal::ZERO {
        warnings.push(format!(
            "Principal {} is negative — schedule reflects a receivable, not a debt",
            input.principal
        ));
    }

    let monthly_rate = input.annual_rate / dec!(12);
    let periods = input.term_years * 12;
    let monthly_payment = amortized_payment(input.principal, monthly_rate, periods)?;

    let mut entries = Vec::with_capacity(periods as usize);
    let mut balance = input.principal;
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=periods {
        let interest = balance * monthly_rate;
        let mut payment = monthly_payment;
        let mut principal_portion = payment - interest;

        // Last payment clears whatever remains
        if month == periods || (balance > Decimal::ZERO && principal_portion >= balance) {
            principal_portion = balance;
            payment = interest + principal_portion;
        }

        balance -= principal_portion;
        total_paid += payment;
        total_interest += interest;

        entries.push(ScheduleEntry {
            month,
            payment,
            interest,
            principal: principal_portion,
            balance,
        });

        if balance.is_zero() && month < periods {
            break;
        }
    }

    let output = ScheduleOutput {
        monthly_payment,
        entries,
        total_paid,
        total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed-Rate Amortization Schedule",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn seller_note() -> ScheduleInput {
        ScheduleInput {
            principal: dec!(75000),
            annual_rate: dec!(0.05),
            term_years: 30,
        }
    }

    #[test]
    fn test_schedule_length_and_zero_close() {
        let result = amortization_schedule(&seller_note()).unwrap();
        let out = &result.result;

        assert_eq!(out.entries.len(), 360);
        assert_eq!(out.entries.last().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_balance_declines_monotonically() {
        let out = amortization_schedule(&seller_note()).unwrap().result;

        let mut prev = dec!(75000);
        for entry in &out.entries {
            assert!(entry.balance < prev, "balance rose at month {}", entry.month);
            prev = entry.balance;
        }
    }

    #[test]
    fn test_payment_splits_into_interest_and_principal() {
        let out = amortization_schedule(&seller_note()).unwrap().result;

        for entry in &out.entries {
            assert_eq!(entry.payment, entry.interest + entry.principal);
        }
    }

    #[test]
    fn test_totals_reconcile() {
        let out = amortization_schedule(&seller_note()).unwrap().result;

        let paid: Decimal = out.entries.iter().map(|e| e.payment).sum();
        let interest: Decimal = out.entries.iter().map(|e| e.interest).sum();
        assert_eq!(out.total_paid, paid);
        assert_eq!(out.total_interest, interest);

        // Total paid = principal + total interest
        assert_eq!(out.total_paid, dec!(75000) + out.total_interest);
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let input = ScheduleInput {
            principal: dec!(12000),
            annual_rate: Decimal::ZERO,
            term_years: 1,
        };
        let out = amortization_schedule(&input).unwrap().result;

        assert_eq!(out.monthly_payment, dec!(1000));
        assert_eq!(out.entries.len(), 12);
        assert_eq!(out.total_interest, Decimal::ZERO);
        assert_eq!(out.total_paid, dec!(12000));
        assert_eq!(out.entries[5].balance, dec!(6000));
    }

    #[test]
    fn test_zero_term_error() {
        let input = ScheduleInput {
            principal: dec!(75000),
            annual_rate: dec!(0.05),
            term_years: 0,
        };
        assert!(matches!(
            amortization_schedule(&input),
            Err(MorbyError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn test_negative_principal_warns() {
        let input = ScheduleInput {
            principal: dec!(-50000),
            annual_rate: dec!(0.05),
            term_years: 30,
        };
        let result = amortization_schedule(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("negative")));
    }
}
