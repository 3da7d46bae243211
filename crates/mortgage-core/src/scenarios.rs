//! Side-by-side comparison of financing scenarios.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{amortize, AmortizationInput};
use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::MortgageResult;

/// One labelled financing option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub label: String,
    pub loan: AmortizationInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub scenarios: Vec<ScenarioSpec>,
}

/// Headline numbers for one scenario. The full schedule is intentionally
/// omitted; run the engine directly when it is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub label: String,
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    /// Echoed annual rate, as a percentage.
    pub interest_rate: Rate,
    /// Echoed term in years.
    pub term_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub scenarios: Vec<ScenarioOutcome>,
    /// Index of the scenario with the lowest total paid.
    pub recommended: usize,
}

/// Run the engine for every scenario and rank the outcomes.
pub fn compare_scenarios(
    input: &ComparisonInput,
) -> MortgageResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();

    if input.scenarios.is_empty() {
        return Err(MortgageError::InvalidInput {
            field: "scenarios".into(),
            reason: "At least one scenario is required".into(),
        });
    }

    let mut warnings: Vec<String> = Vec::new();
    let mut outcomes = Vec::with_capacity(input.scenarios.len());

    for spec in &input.scenarios {
        let (out, scenario_warnings) = amortize(&spec.loan)?;
        warnings.extend(
            scenario_warnings
                .into_iter()
                .map(|w| format!("{}: {}", spec.label, w)),
        );
        outcomes.push(ScenarioOutcome {
            label: spec.label.clone(),
            monthly_payment: out.monthly_payment,
            total_paid: out.total_paid,
            total_interest: out.total_interest,
            interest_rate: spec.loan.interest_rate,
            term_years: spec.loan.term_years,
        });
    }

    let recommended = cheapest(&outcomes);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Financing Scenario Comparison",
        input,
        warnings,
        elapsed,
        ComparisonOutput {
            scenarios: outcomes,
            recommended,
        },
    ))
}

/// Index of the outcome with the lowest total paid; first wins on ties.
fn cheapest(outcomes: &[ScenarioOutcome]) -> usize {
    let mut best = 0;
    let mut best_total = Decimal::MAX;
    for (idx, outcome) in outcomes.iter().enumerate() {
        if outcome.total_paid < best_total {
            best_total = outcome.total_paid;
            best = idx;
        }
    }
    best
}
