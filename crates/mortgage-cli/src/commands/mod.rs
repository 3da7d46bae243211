pub mod amortization;
pub mod scenarios;
pub mod schedule;

use clap::Args;
use rust_decimal::Decimal;

use mortgage_core::amortization::AmortizationInput;

use crate::input;

/// Loan parameters shared by every schedule-producing command.
#[derive(Args)]
pub struct LoanArgs {
    /// Total asset price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Up-front payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual rate as a percentage (e.g. 3.5 for 3.5%)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Loan duration in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Resolve loan parameters: input file, then piped stdin, then flags.
pub fn resolve_loan(args: &LoanArgs) -> Result<AmortizationInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::read_json(path);
    }
    if let Some(data) = input::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(AmortizationInput {
        price: args.price.ok_or("--price is required (or provide --input)")?,
        down_payment: args
            .down_payment
            .ok_or("--down-payment is required (or provide --input)")?,
        interest_rate: args
            .interest_rate
            .ok_or("--interest-rate is required (or provide --input)")?,
        term_years: args
            .term_years
            .ok_or("--term-years is required (or provide --input)")?,
    })
}
