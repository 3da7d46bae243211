//! Reductions over an amortization schedule: period aggregation, summary
//! statistics, and principal-repayment milestones. These feed downstream
//! visualization and reporting, which rely on the sums being taken over the
//! already-rounded schedule values.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{round_money, ScheduleEntry};
use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::MortgageResult;

/// Principal-paid fractions reported as milestones.
const MILESTONE_TARGETS: [Decimal; 4] = [dec!(0.25), dec!(0.50), dec!(0.75), dec!(1.00)];

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Bucket size for schedule aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationPeriod {
    Monthly,
    Quarterly,
    Yearly,
}

/// Aggregation request. The schedule must be in chronological order, as
/// produced by the amortization engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationInput {
    pub schedule: Vec<ScheduleEntry>,
    pub period: AggregationPeriod,
}

/// Summary-statistics request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryInput {
    pub schedule: Vec<ScheduleEntry>,
}

/// Milestone request. When `start_date` is given each milestone carries the
/// approximate calendar date it lands on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneInput {
    pub schedule: Vec<ScheduleEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Totals for one aggregation bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Display key: `Month 7`, `2-Q3`, `Year 12`.
    pub label: String,
    /// 1-based loan year the bucket falls in.
    pub year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Summed principal portions.
    pub principal: Money,
    /// Summed interest portions.
    pub interest: Money,
    /// Remaining balance after the bucket's last month.
    pub remaining_balance: Money,
    /// `principal / (principal + interest)`, zero for an all-zero bucket.
    pub principal_share: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationOutput {
    pub period: AggregationPeriod,
    pub periods: Vec<PeriodTotals>,
}

/// Whole-schedule statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub months: u32,
    /// `ceil(months / 12)`.
    pub years: u32,
    pub total_principal: Money,
    pub total_interest: Money,
    /// `total_principal + total_interest`.
    pub total_paid: Money,
    pub average_monthly_payment: Money,
    /// Interest as a fraction of everything paid.
    pub interest_share: Rate,
}

/// One principal-repayment milestone. `month` is `None` when the target is
/// never reached (zero or negative total principal).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Target as a percentage of total principal (25, 50, 75, 100).
    pub percent: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Loan year of the milestone month.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneOutput {
    pub total_principal: Money,
    pub milestones: Vec<Milestone>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Aggregate a schedule into monthly, quarterly, or yearly buckets.
pub fn aggregate_schedule(
    input: &AggregationInput,
) -> MortgageResult<ComputationOutput<AggregationOutput>> {
    let start = Instant::now();
    validate_schedule(&input.schedule)?;

    let periods = aggregate(&input.schedule, input.period);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Schedule Aggregation (Period Reduction)",
        input,
        Vec::new(),
        elapsed,
        AggregationOutput {
            period: input.period,
            periods,
        },
    ))
}

/// Summary statistics over a full schedule.
pub fn summarize_schedule(
    input: &SummaryInput,
) -> MortgageResult<ComputationOutput<ScheduleSummary>> {
    let start = Instant::now();
    validate_schedule(&input.schedule)?;

    let months = input.schedule.len() as u32;
    let total_principal: Decimal = input.schedule.iter().map(|e| e.principal).sum();
    let total_interest: Decimal = input.schedule.iter().map(|e| e.interest).sum();
    let total_paid = total_principal + total_interest;

    let average_monthly_payment = round_money(total_paid / Decimal::from(months));
    let interest_share = if total_paid.is_zero() {
        Decimal::ZERO
    } else {
        total_interest / total_paid
    };

    let summary = ScheduleSummary {
        months,
        years: months.div_ceil(12),
        total_principal,
        total_interest,
        total_paid,
        average_monthly_payment,
        interest_share,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Schedule Summary Statistics",
        input,
        Vec::new(),
        elapsed,
        summary,
    ))
}

/// Months at which 25/50/75/100% of the scheduled principal is repaid.
pub fn principal_milestones(
    input: &MilestoneInput,
) -> MortgageResult<ComputationOutput<MilestoneOutput>> {
    let start = Instant::now();
    validate_schedule(&input.schedule)?;

    let total_principal: Decimal = input.schedule.iter().map(|e| e.principal).sum();

    let milestones = MILESTONE_TARGETS
        .iter()
        .map(|&fraction| {
            let month = if total_principal > Decimal::ZERO {
                first_month_reaching(&input.schedule, total_principal * fraction)
            } else {
                None
            };
            Milestone {
                percent: fraction * dec!(100),
                month,
                year: month.map(year_of_month),
                date: month.and_then(|m| {
                    input
                        .start_date
                        .and_then(|d| d.checked_add_months(Months::new(m - 1)))
                }),
            }
        })
        .collect();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Principal Repayment Milestones",
        input,
        Vec::new(),
        elapsed,
        MilestoneOutput {
            total_principal,
            milestones,
        },
    ))
}

// ---------------------------------------------------------------------------
// Reduction internals
// ---------------------------------------------------------------------------

fn validate_schedule(schedule: &[ScheduleEntry]) -> MortgageResult<()> {
    if schedule.is_empty() {
        return Err(MortgageError::InvalidInput {
            field: "schedule".into(),
            reason: "Schedule must contain at least one entry".into(),
        });
    }
    Ok(())
}

/// Loan year a 1-based month belongs to.
fn year_of_month(month: u32) -> u32 {
    month.div_ceil(12)
}

/// Quarter-of-year for a 1-based month.
fn quarter_of_month(month: u32) -> u32 {
    ((month - 1) % 12) / 3 + 1
}

/// Bucket identity for a month under the given period.
fn bucket_key(period: AggregationPeriod, month: u32) -> (u32, u32) {
    match period {
        AggregationPeriod::Monthly => (month, 0),
        AggregationPeriod::Quarterly => (year_of_month(month), quarter_of_month(month)),
        AggregationPeriod::Yearly => (year_of_month(month), 0),
    }
}

/// Fold chronological entries into period buckets. The bucket's remaining
/// balance is the last entry's.
fn aggregate(schedule: &[ScheduleEntry], period: AggregationPeriod) -> Vec<PeriodTotals> {
    let mut periods: Vec<PeriodTotals> = Vec::new();
    let mut current_key: Option<(u32, u32)> = None;

    for entry in schedule {
        let key = bucket_key(period, entry.month);
        if current_key != Some(key) {
            current_key = Some(key);
            let year = year_of_month(entry.month);
            let (label, quarter, month) = match period {
                AggregationPeriod::Monthly => {
                    (format!("Month {}", entry.month), None, Some(entry.month))
                }
                AggregationPeriod::Quarterly => {
                    let q = quarter_of_month(entry.month);
                    (format!("{year}-Q{q}"), Some(q), None)
                }
                AggregationPeriod::Yearly => (format!("Year {year}"), None, None),
            };
            periods.push(PeriodTotals {
                label,
                year,
                quarter,
                month,
                principal: Decimal::ZERO,
                interest: Decimal::ZERO,
                remaining_balance: entry.remaining_balance,
                principal_share: Decimal::ZERO,
            });
        }
        if let Some(bucket) = periods.last_mut() {
            bucket.principal += entry.principal;
            bucket.interest += entry.interest;
            bucket.remaining_balance = entry.remaining_balance;
        }
    }

    for bucket in &mut periods {
        let paid = bucket.principal + bucket.interest;
        if !paid.is_zero() {
            bucket.principal_share = bucket.principal / paid;
        }
    }

    periods
}

/// First 1-based month whose cumulative principal reaches `target`.
fn first_month_reaching(schedule: &[ScheduleEntry], target: Decimal) -> Option<u32> {
    let mut cumulative = Decimal::ZERO;
    for entry in schedule {
        cumulative += entry.principal;
        if cumulative >= target {
            return Some(entry.month);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{compute_amortization, AmortizationInput};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn ten_year_schedule() -> Vec<ScheduleEntry> {
        compute_amortization(&AmortizationInput {
            price: dec!(200_000),
            down_payment: dec!(40_000),
            interest_rate: dec!(3.5),
            term_years: 10,
        })
        .unwrap()
        .result
        .schedule
    }

    #[test]
    fn test_yearly_bucket_count_and_labels() {
        let out = aggregate_schedule(&AggregationInput {
            schedule: ten_year_schedule(),
            period: AggregationPeriod::Yearly,
        })
        .unwrap()
        .result;

        assert_eq!(out.periods.len(), 10);
        assert_eq!(out.periods[0].label, "Year 1");
        assert_eq!(out.periods[9].label, "Year 10");
        assert_eq!(out.periods[0].year, 1);
        assert_eq!(out.periods[0].quarter, None);
    }

    #[test]
    fn test_quarterly_bucket_count_and_labels() {
        let out = aggregate_schedule(&AggregationInput {
            schedule: ten_year_schedule(),
            period: AggregationPeriod::Quarterly,
        })
        .unwrap()
        .result;

        assert_eq!(out.periods.len(), 40);
        assert_eq!(out.periods[0].label, "1-Q1");
        assert_eq!(out.periods[4].label, "2-Q1");
        assert_eq!(out.periods[39].label, "10-Q4");
        assert_eq!(out.periods[0].quarter, Some(1));
    }

    #[test]
    fn test_monthly_passthrough() {
        let schedule = ten_year_schedule();
        let out = aggregate_schedule(&AggregationInput {
            schedule: schedule.clone(),
            period: AggregationPeriod::Monthly,
        })
        .unwrap()
        .result;

        assert_eq!(out.periods.len(), schedule.len());
        assert_eq!(out.periods[0].label, "Month 1");
        assert_eq!(out.periods[0].month, Some(1));
        assert_eq!(out.periods[0].principal, schedule[0].principal);
        assert_eq!(
            out.periods[0].remaining_balance,
            schedule[0].remaining_balance
        );
    }

    #[test]
    fn test_bucket_sums_match_schedule() {
        let schedule = ten_year_schedule();
        let schedule_principal: Decimal = schedule.iter().map(|e| e.principal).sum();
        let schedule_interest: Decimal = schedule.iter().map(|e| e.interest).sum();

        let out = aggregate_schedule(&AggregationInput {
            schedule: schedule.clone(),
            period: AggregationPeriod::Yearly,
        })
        .unwrap()
        .result;

        let bucket_principal: Decimal = out.periods.iter().map(|p| p.principal).sum();
        let bucket_interest: Decimal = out.periods.iter().map(|p| p.interest).sum();
        assert_eq!(bucket_principal, schedule_principal);
        assert_eq!(bucket_interest, schedule_interest);

        // Each bucket carries the balance after its last month.
        assert_eq!(
            out.periods[0].remaining_balance,
            schedule[11].remaining_balance
        );
        assert_eq!(
            out.periods[9].remaining_balance,
            schedule[119].remaining_balance
        );
    }

    #[test]
    fn test_principal_share_rises_over_time() {
        let out = aggregate_schedule(&AggregationInput {
            schedule: ten_year_schedule(),
            period: AggregationPeriod::Yearly,
        })
        .unwrap()
        .result;

        // Annuity loans shift from interest-heavy to principal-heavy.
        assert!(out.periods[9].principal_share > out.periods[0].principal_share);
        for p in &out.periods {
            assert!(p.principal_share > Decimal::ZERO && p.principal_share <= Decimal::ONE);
        }
    }

    #[test]
    fn test_summary_statistics() {
        let schedule = ten_year_schedule();
        let out = summarize_schedule(&SummaryInput {
            schedule: schedule.clone(),
        })
        .unwrap()
        .result;

        assert_eq!(out.months, 120);
        assert_eq!(out.years, 10);
        assert_eq!(out.total_paid, out.total_principal + out.total_interest);
        // 160,000 at 3.5% over 10 years: payment ~1,582.18.
        assert!((out.average_monthly_payment - dec!(1582.18)).abs() < dec!(0.25));
        assert!(out.interest_share > Decimal::ZERO && out.interest_share < dec!(0.25));
    }

    #[test]
    fn test_milestones_ordered_and_complete() {
        let out = principal_milestones(&MilestoneInput {
            schedule: ten_year_schedule(),
            start_date: None,
        })
        .unwrap()
        .result;

        assert_eq!(out.milestones.len(), 4);
        let months: Vec<u32> = out.milestones.iter().map(|m| m.month.unwrap()).collect();
        assert!(months[0] <= months[1] && months[1] <= months[2] && months[2] <= months[3]);
        // 100% lands on the final month by construction.
        assert_eq!(months[3], 120);
        // Interest-heavy early months push the 25% mark past a quarter of
        // the term.
        assert!(months[0] > 30);
        assert_eq!(out.milestones[3].year, Some(10));
    }

    #[test]
    fn test_milestone_dates_offset_from_start() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let out = principal_milestones(&MilestoneInput {
            schedule: ten_year_schedule(),
            start_date: Some(start),
        })
        .unwrap()
        .result;

        for m in &out.milestones {
            let month = m.month.unwrap();
            let expected = start.checked_add_months(Months::new(month - 1)).unwrap();
            assert_eq!(m.date, Some(expected));
        }
    }

    #[test]
    fn test_milestones_unreached_for_zero_loan() {
        let schedule = compute_amortization(&AmortizationInput {
            price: dec!(100_000),
            down_payment: dec!(100_000),
            interest_rate: dec!(2),
            term_years: 5,
        })
        .unwrap()
        .result
        .schedule;

        let out = principal_milestones(&MilestoneInput {
            schedule,
            start_date: None,
        })
        .unwrap()
        .result;

        assert_eq!(out.total_principal, Decimal::ZERO);
        for m in &out.milestones {
            assert_eq!(m.month, None);
            assert_eq!(m.date, None);
        }
    }

    #[test]
    fn test_empty_schedule_rejected() {
        let empty: Vec<ScheduleEntry> = Vec::new();
        assert!(aggregate_schedule(&AggregationInput {
            schedule: empty.clone(),
            period: AggregationPeriod::Yearly,
        })
        .is_err());
        assert!(summarize_schedule(&SummaryInput {
            schedule: empty.clone(),
        })
        .is_err());
        assert!(principal_milestones(&MilestoneInput {
            schedule: empty,
            start_date: None,
        })
        .is_err());
    }
}
