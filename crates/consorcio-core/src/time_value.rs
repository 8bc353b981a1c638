use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::ConsorcioError;
use crate::types::{Money, Rate};
use crate::ConsorcioResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Payment (PMT), spreadsheet sign convention: a positive present value
/// (money received) yields a negative payment.
pub fn pmt(
    rate: Rate,
    nper: u32,
    present_value: Money,
    future_value: Money,
) -> ConsorcioResult<Money> {
    if nper == 0 {
        return Err(ConsorcioError::DivisionByZero {
            context: "PMT with zero periods".into(),
        });
    }

    let out_of_range = |quantity: &str| ConsorcioError::InvalidInput {
        field: "present_value".into(),
        reason: format!("{quantity} exceeds the decimal range"),
    };

    if rate.is_zero() {
        let principal = present_value
            .checked_add(future_value)
            .ok_or_else(|| out_of_range("present value plus future value"))?;
        return Ok(-principal / Decimal::from(nper));
    }

    let one_plus_r = Decimal::ONE + rate;
    let factor = one_plus_r
        .checked_powu(u64::from(nper))
        .ok_or_else(|| ConsorcioError::InvalidInput {
            field: "rate".into(),
            reason: format!("(1 + {rate})^{nper} overflows"),
        })?;
    let annuity_factor = (factor - Decimal::ONE)
        .checked_div(rate)
        .ok_or_else(|| ConsorcioError::InvalidInput {
            field: "rate".into(),
            reason: format!("annuity factor for {rate} over {nper} periods overflows"),
        })?;

    if annuity_factor.is_zero() {
        return Err(ConsorcioError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let accumulated = present_value
        .checked_mul(factor)
        .and_then(|grown| grown.checked_add(future_value))
        .ok_or_else(|| out_of_range("compounded present value"))?;
    let payment = accumulated
        .checked_div(annuity_factor)
        .ok_or_else(|| out_of_range("payment"))?;
    Ok(-payment)
}

/// Effective monthly rate equivalent to an effective annual rate:
/// (1 + annual)^(1/12) - 1.
pub fn monthly_rate_from_annual(annual: Rate) -> ConsorcioResult<Rate> {
    if annual.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if annual <= dec!(-1) {
        return Err(ConsorcioError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate must be greater than -100%".into(),
        });
    }

    let growth = (Decimal::ONE + annual)
        .checked_powd(Decimal::ONE / MONTHS_PER_YEAR)
        .ok_or_else(|| ConsorcioError::InvalidInput {
            field: "annual_rate".into(),
            reason: format!("Cannot take the 12th root of 1 + {annual}"),
        })?;
    Ok(growth - Decimal::ONE)
}
