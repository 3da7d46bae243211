use mortgage_core::amortization::{compute_amortization, AmortizationInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference loans against standard amortization tables
// ===========================================================================

#[test]
fn test_reference_240k_4pct_30y() {
    // 300,000 price, 60,000 down, 4.0% over 30 years.
    // Standard tables: 1,145.80/month on the 240,000 loan.
    let result = compute_amortization(&AmortizationInput {
        price: dec!(300_000),
        down_payment: dec!(60_000),
        interest_rate: dec!(4.0),
        term_years: 30,
    })
    .unwrap();

    let out = &result.result;
    assert!(
        (out.monthly_payment - dec!(1145.80)).abs() < dec!(0.01),
        "expected ~1,145.80, got {}",
        out.monthly_payment
    );
    assert_eq!(out.schedule.len(), 360);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_reference_144k_2_75pct_25y() {
    // 180,000 price, 20% down, 2.75% over 25 years: ~664.29/month.
    let result = compute_amortization(&AmortizationInput {
        price: dec!(180_000),
        down_payment: dec!(36_000),
        interest_rate: dec!(2.75),
        term_years: 25,
    })
    .unwrap();

    let out = &result.result;
    assert_eq!(out.loan_amount, dec!(144_000));
    assert!(
        (out.monthly_payment - dec!(664.29)).abs() < dec!(0.01),
        "expected ~664.29, got {}",
        out.monthly_payment
    );

    // First month: interest on the full balance at 2.75%/12.
    let first = &out.schedule[0];
    assert!((first.interest - dec!(330.00)).abs() < dec!(0.01));
    assert!((first.principal - dec!(334.29)).abs() < dec!(0.02));
}

#[test]
fn test_interest_front_loading() {
    let result = compute_amortization(&AmortizationInput {
        price: dec!(200_000),
        down_payment: dec!(40_000),
        interest_rate: dec!(3.5),
        term_years: 30,
    })
    .unwrap();

    let schedule = &result.result.schedule;
    let first = &schedule[0];
    let last = &schedule[schedule.len() - 1];

    // Annuity loans pay mostly interest first, mostly principal last.
    assert!(first.interest > first.principal);
    assert!(last.principal > last.interest);
    assert!(first.interest > last.interest);
    assert!(last.principal > first.principal);
}

#[test]
fn test_longer_term_more_interest() {
    let base = AmortizationInput {
        price: dec!(200_000),
        down_payment: dec!(40_000),
        interest_rate: dec!(3.5),
        term_years: 15,
    };
    let short = compute_amortization(&base).unwrap().result;

    let long = compute_amortization(&AmortizationInput {
        term_years: 30,
        ..base
    })
    .unwrap()
    .result;

    assert!(long.monthly_payment < short.monthly_payment);
    assert!(long.total_interest > short.total_interest);
}

#[test]
fn test_bigger_down_payment_smaller_payment() {
    let small_down = compute_amortization(&AmortizationInput {
        price: dec!(250_000),
        down_payment: dec!(25_000),
        interest_rate: dec!(3.0),
        term_years: 20,
    })
    .unwrap()
    .result;

    let big_down = compute_amortization(&AmortizationInput {
        price: dec!(250_000),
        down_payment: dec!(100_000),
        interest_rate: dec!(3.0),
        term_years: 20,
    })
    .unwrap()
    .result;

    assert!(big_down.monthly_payment < small_down.monthly_payment);
    assert!(big_down.total_interest < small_down.total_interest);
    // Payment scales linearly with the loan amount.
    let ratio = big_down.monthly_payment / small_down.monthly_payment;
    let expected = dec!(150_000) / dec!(225_000);
    assert!((ratio - expected).abs() < dec!(0.0001));
}

#[test]
fn test_schedule_serializes_with_string_decimals() {
    // serde-with-str: downstream JSON consumers get exact decimal strings.
    let result = compute_amortization(&AmortizationInput {
        price: dec!(100_000),
        down_payment: dec!(20_000),
        interest_rate: dec!(0),
        term_years: 10,
    })
    .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json["result"]["monthly_payment"],
        serde_json::Value::String("666.67".to_string())
    );
    let entries = json["result"]["schedule"].as_array().unwrap();
    assert_eq!(entries.len(), 120);
}

#[test]
fn test_sum_of_parts_accounts_for_every_euro() {
    let result = compute_amortization(&AmortizationInput {
        price: dec!(180_000),
        down_payment: dec!(36_000),
        interest_rate: dec!(2.75),
        term_years: 25,
    })
    .unwrap()
    .result;

    let principal_sum: Decimal = result.schedule.iter().map(|e| e.principal).sum();
    let interest_sum: Decimal = result.schedule.iter().map(|e| e.interest).sum();

    // Cumulative per-month rounding stays within a few cents over 300 months.
    assert!((principal_sum - result.loan_amount).abs() < dec!(2.00));
    assert!((interest_sum - result.total_interest).abs() < dec!(2.00));
}
