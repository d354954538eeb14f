use rust_decimal::Decimal;

use crate::error::MorbyError;
use crate::types::{Money, Rate};
use crate::MorbyResult;

/// (1 + rate)^periods by iterative multiplication.
///
/// Exact Decimal arithmetic; avoids the precision drift of a
/// transcendental pow for integer exponents.
pub fn compound_factor(rate: Rate, periods: u32) -> Decimal {
    let mut factor = Decimal::ONE;
    let one_plus_r = Decimal::ONE + rate;
    for _ in 0..periods {
        factor *= one_plus_r;
    }
    factor
}

/// Present value of an ordinary annuity: the largest principal whose
/// amortized payment equals `payment`.
///
/// payment * (1 - (1+r)^-n) / r, or payment * n when r = 0.
pub fn principal_for_payment(payment: Money, monthly_rate: Rate, periods: u32) -> MorbyResult<Money> {
    if periods == 0 {
        return Err(MorbyError::InvalidTerm {
            field: "periods".into(),
        });
    }

    if monthly_rate.is_zero() {
        return Ok(payment * Decimal::from(periods));
    }

    let factor = compound_factor(monthly_rate, periods);
    if factor.is_zero() {
        return Err(MorbyError::DivisionByZero {
            context: "annuity compound factor".into(),
        });
    }

    Ok(payment * (Decimal::ONE - Decimal::ONE / factor) / monthly_rate)
}

/// Standard fixed-rate amortized payment: P * r(1+r)^n / ((1+r)^n - 1).
///
/// Straight-line (P / n) when the rate is zero. Inverse of
/// [`principal_for_payment`].
pub fn amortized_payment(principal: Money, monthly_rate: Rate, periods: u32) -> MorbyResult<Money> {
    if periods == 0 {
        return Err(MorbyError::InvalidTerm {
            field: "periods".into(),
        });
    }

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let factor = compound_factor(monthly_rate, periods);
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(MorbyError::DivisionByZero {
            context: "amortized payment denominator".into(),
        });
    }

    Ok(principal * monthly_rate * factor / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amortized_payment_30yr_mortgage() {
        // $225k at 8.25% over 30 years, expected ~$1,690/mo
        let payment = amortized_payment(dec!(225000), dec!(0.0825) / dec!(12), 360).unwrap();
        assert!(
            payment > dec!(1685) && payment < dec!(1695),
            "payment {} outside expected range",
            payment
        );
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = amortized_payment(dec!(360000), Decimal::ZERO, 360).unwrap();
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_zero_rate_principal_is_linear() {
        let principal = principal_for_payment(dec!(1000), Decimal::ZERO, 360).unwrap();
        assert_eq!(principal, dec!(360000));
    }

    #[test]
    fn test_round_trip_payment_to_principal_to_payment() {
        let rates = [dec!(0.0825), dec!(0.05), dec!(0.12), dec!(0.001)];
        let terms = [60u32, 180, 360];
        let payment = dec!(2173.91);

        for rate in rates {
            for n in terms {
                let r = rate / dec!(12);
                let principal = principal_for_payment(payment, r, n).unwrap();
                let recovered = amortized_payment(principal, r, n).unwrap();
                let diff = (recovered - payment).abs();
                assert!(
                    diff < dec!(0.0000001),
                    "round trip at rate {rate}, n {n}: {recovered} vs {payment}"
                );
            }
        }
    }

    #[test]
    fn test_zero_periods_rejected() {
        assert!(matches!(
            amortized_payment(dec!(100000), dec!(0.005), 0),
            Err(MorbyError::InvalidTerm { .. })
        ));
        assert!(matches!(
            principal_for_payment(dec!(1000), Decimal::ZERO, 0),
            Err(MorbyError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn test_compound_factor_matches_manual() {
        // (1.01)^3 = 1.030301
        assert_eq!(compound_factor(dec!(0.01), 3), dec!(1.030301));
        assert_eq!(compound_factor(dec!(0.05), 0), Decimal::ONE);
    }
}
