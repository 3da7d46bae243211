use clap::Args;
use serde_json::Value;

use mortgage_core::amortization;

use super::{resolve_loan, LoanArgs};

#[derive(Args)]
pub struct AmortizeArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = resolve_loan(&args.loan)?;
    let result = amortization::compute_amortization(&input)?;
    Ok(serde_json::to_value(result)?)
}
