use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use serde_json::Value;

use mortgage_core::amortization;
use mortgage_core::schedule::{
    self, AggregationInput, AggregationPeriod, MilestoneInput, SummaryInput,
};

use super::{resolve_loan, LoanArgs};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    Monthly,
    Quarterly,
    Yearly,
}

impl From<PeriodArg> for AggregationPeriod {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::Monthly => AggregationPeriod::Monthly,
            PeriodArg::Quarterly => AggregationPeriod::Quarterly,
            PeriodArg::Yearly => AggregationPeriod::Yearly,
        }
    }
}

#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Bucket size for the aggregation
    #[arg(long, default_value = "yearly")]
    pub period: PeriodArg,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

#[derive(Args)]
pub struct MilestonesArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// First payment date (YYYY-MM-DD); adds calendar dates to milestones
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args.loan)?;
    let engine = amortization::compute_amortization(&loan)?;
    let result = schedule::aggregate_schedule(&AggregationInput {
        schedule: engine.result.schedule,
        period: args.period.into(),
    })?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args.loan)?;
    let engine = amortization::compute_amortization(&loan)?;
    let result = schedule::summarize_schedule(&SummaryInput {
        schedule: engine.result.schedule,
    })?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_milestones(args: MilestonesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args.loan)?;
    let engine = amortization::compute_amortization(&loan)?;
    let result = schedule::principal_milestones(&MilestoneInput {
        schedule: engine.result.schedule,
        start_date: args.start_date,
    })?;
    Ok(serde_json::to_value(result)?)
}
