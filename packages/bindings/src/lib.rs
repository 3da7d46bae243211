use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization engine
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_amortization(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::amortization::AmortizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::amortization::compute_amortization(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedule reductions
// ---------------------------------------------------------------------------

#[napi]
pub fn aggregate_schedule(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::schedule::AggregationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::schedule::aggregate_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn summarize_schedule(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::schedule::SummaryInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::schedule::summarize_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn principal_milestones(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::schedule::MilestoneInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::schedule::principal_milestones(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenario comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_scenarios(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::scenarios::ComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::scenarios::compare_scenarios(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
