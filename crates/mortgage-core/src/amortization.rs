//! Fixed-rate (French/annuity) mortgage amortization.
//!
//! Turns a purchase price, down payment, annual rate and term into the level
//! monthly payment, cost totals and the full month-by-month schedule. All
//! math in `rust_decimal::Decimal`; reported money values are rounded to two
//! decimals and the running balance is carried forward rounded, so small
//! cumulative drift over long schedules is expected and deliberate.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Months per year, as Decimal.
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Annual rate above which results get a warning.
const HIGH_RATE_THRESHOLD: Rate = dec!(25);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Loan parameters as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    /// Total asset price.
    pub price: Money,
    /// Up-front payment. May exceed `price`; the resulting negative loan
    /// amount is computed through with a warning.
    pub down_payment: Money,
    /// Annual nominal rate as a percentage (e.g., 3.5 = 3.5%).
    pub interest_rate: Rate,
    /// Loan duration in years.
    pub term_years: u32,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month of the repayment schedule. Money fields are rounded to two
/// decimals; `principal + interest` matches the monthly payment only up to
/// per-field rounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month index.
    pub month: u32,
    /// Part of this month's payment reducing the balance.
    pub principal: Money,
    /// Part of this month's payment paid as interest.
    pub interest: Money,
    /// Outstanding principal after this month's payment.
    pub remaining_balance: Money,
}

/// Full amortization result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    /// `price - down_payment`.
    pub loan_amount: Money,
    /// `term_years * 12`.
    pub total_months: u32,
    /// Level monthly payment.
    pub monthly_payment: Money,
    /// `monthly_payment * total_months`, from the unrounded payment.
    pub total_paid: Money,
    /// `total_paid - loan_amount`.
    pub total_interest: Money,
    /// Chronological schedule, one entry per month.
    pub schedule: Vec<ScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the level-payment amortization for a fixed-rate loan.
pub fn compute_amortization(
    input: &AmortizationInput,
) -> MortgageResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();

    let (output, warnings) = amortize(input)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "French Amortization (Level Monthly Payment)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub(crate) fn amortize(
    input: &AmortizationInput,
) -> MortgageResult<(AmortizationOutput, Vec<String>)> {
    let mut warnings: Vec<String> = Vec::new();
    validate(input)?;

    if input.interest_rate > HIGH_RATE_THRESHOLD {
        warnings.push(format!(
            "Annual rate of {}% is unusually high; results may be unrealistic",
            input.interest_rate
        ));
    }

    let loan_amount = input.price - input.down_payment;
    if loan_amount < Decimal::ZERO {
        warnings.push("Down payment exceeds price; loan amount is negative".into());
    }

    let total_months = input.term_years.checked_mul(12).ok_or_else(|| {
        MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Term in months exceeds the supported range".into(),
        }
    })?;

    let monthly_rate = input.interest_rate / dec!(100) / MONTHS_PER_YEAR;

    // Level payment: the value X such that X paid every month, discounted at
    // the monthly rate, exactly extinguishes the loan amount.
    let payment_raw = if monthly_rate.is_zero() {
        loan_amount / Decimal::from(total_months)
    } else {
        let discount =
            Decimal::ONE - iterative_pow_recip(Decimal::ONE + monthly_rate, total_months);
        if discount.is_zero() {
            return Err(MortgageError::DivisionByZero {
                context: "annuity discount factor".into(),
            });
        }
        loan_amount * monthly_rate / discount
    };

    let mut schedule = Vec::with_capacity(total_months as usize);
    let mut balance = loan_amount;

    for month in 1..=total_months {
        let interest = balance * monthly_rate;
        let principal = payment_raw - interest;
        // Carried forward rounded: next month's interest accrues on the
        // reported balance, not the full-precision one.
        balance = round_money(balance - principal);

        schedule.push(ScheduleEntry {
            month,
            principal: round_money(principal),
            interest: round_money(interest),
            remaining_balance: balance,
        });
    }

    let total_paid_raw = payment_raw * Decimal::from(total_months);
    let total_interest_raw = total_paid_raw - loan_amount;

    Ok((
        AmortizationOutput {
            loan_amount,
            total_months,
            monthly_payment: round_money(payment_raw),
            total_paid: round_money(total_paid_raw),
            total_interest: round_money(total_interest_raw),
            schedule,
        },
        warnings,
    ))
}

fn validate(input: &AmortizationInput) -> MortgageResult<()> {
    if input.price < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "price".into(),
            reason: "Price must be non-negative".into(),
        });
    }
    if input.down_payment < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment must be non-negative".into(),
        });
    }
    if input.interest_rate < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if input.term_years == 0 {
        return Err(MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least one year".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Decimal helpers (no f64, no powd)
// ---------------------------------------------------------------------------

/// Round a money value to two decimal places, half away from zero.
pub(crate) fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute 1 / base^n by repeated division. Underflows to zero for very
/// large `base * n`, which is the correct limit for the annuity factor.
fn iterative_pow_recip(base: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result /= base;
        if result.is_zero() {
            break;
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
