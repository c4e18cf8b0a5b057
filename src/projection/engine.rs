//! Core projection engine for monthly systematic withdrawal projections

use chrono::Datelike;
use thiserror::Error;

use crate::plan::SwpPlan;

use super::rates;
use super::records::{PeriodRecord, Projection, SummaryStatistics, YearSummary};
use super::state::ProjectionState;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Hard cap on the number of months to project
    pub max_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_months: super::DEFAULT_MAX_MONTHS,
        }
    }
}

/// Rejected projection input.
///
/// Raised before any record is emitted; a failed call produces no partial
/// output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    /// A scalar input was NaN or infinite
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    /// A monetary input was below zero
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    /// The annual return rate has no finite monthly equivalent
    #[error("annual return rate must be above -100% (got {rate})")]
    ReturnRateOutOfDomain { rate: f64 },
}

/// Main projection engine
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run the projection for a single plan.
    ///
    /// Walks month by month from the plan's start date until the corpus is
    /// exhausted or the configured horizon is reached, then rolls the
    /// monthly records up into year groups and run-level statistics.
    pub fn project(&self, plan: &SwpPlan) -> Result<Projection, InvalidInput> {
        validate(plan)?;

        let monthly_rate = rates::monthly_rate(plan.annual_return_rate);
        if !monthly_rate.is_finite() {
            return Err(InvalidInput::ReturnRateOutOfDomain {
                rate: plan.annual_return_rate,
            });
        }

        let mut periods: Vec<PeriodRecord> = Vec::new();
        let mut state = ProjectionState::from_plan(plan);

        while state.corpus > 0.0 && state.period_index < self.config.max_months {
            state.advance_month(plan.annual_inflation_rate);

            let row = self.calculate_month(&mut state, monthly_rate);
            let ending_value = row.ending_value;
            periods.push(row);

            // Stop once the corpus is exhausted; the record that crossed
            // zero has already been emitted.
            if ending_value <= 0.0 {
                break;
            }
        }

        let years = YearSummary::from_periods(&periods, plan.start_date.year());
        let summary = SummaryStatistics::from_periods(&periods, plan.initial_corpus);

        Ok(Projection {
            periods,
            years,
            summary,
        })
    }

    /// Calculate one month: cap the withdrawal at the remaining corpus,
    /// credit growth on the post-withdrawal balance, roll the state forward.
    fn calculate_month(&self, state: &mut ProjectionState, monthly_rate: f64) -> PeriodRecord {
        let beginning_value = state.corpus;

        // Withdrawal comes out before growth accrues for the month; the
        // period return is still measured on the full beginning corpus.
        let withdrawal = state.scheduled_withdrawal.min(beginning_value);
        let period_return = beginning_value * monthly_rate;
        let ending_value = (beginning_value - withdrawal) * (1.0 + monthly_rate);

        let row = PeriodRecord {
            period_index: state.period_index,
            date: state.date,
            beginning_value,
            period_return,
            withdrawal,
            ending_value,
        };

        state.corpus = ending_value;
        row
    }
}

/// Validate plan scalars before any computation
fn validate(plan: &SwpPlan) -> Result<(), InvalidInput> {
    let fields = [
        ("annual_return_rate", plan.annual_return_rate),
        ("annual_inflation_rate", plan.annual_inflation_rate),
        ("initial_corpus", plan.initial_corpus),
        ("monthly_withdrawal", plan.monthly_withdrawal),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(InvalidInput::NonFinite { field });
        }
    }

    if plan.initial_corpus < 0.0 {
        return Err(InvalidInput::Negative {
            field: "initial_corpus",
            value: plan.initial_corpus,
        });
    }
    if plan.monthly_withdrawal < 0.0 {
        return Err(InvalidInput::Negative {
            field: "monthly_withdrawal",
            value: plan.monthly_withdrawal,
        });
    }
    if plan.annual_return_rate <= -1.0 {
        return Err(InvalidInput::ReturnRateOutOfDomain {
            rate: plan.annual_return_rate,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_plan() -> SwpPlan {
        SwpPlan {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            annual_return_rate: 0.08,
            annual_inflation_rate: 0.05,
            initial_corpus: 1_000_000.0,
            monthly_withdrawal: 10_000.0,
        }
    }

    fn engine() -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig::default())
    }

    #[test]
    fn test_reference_scenario_first_record() {
        let projection = engine().project(&test_plan()).unwrap();
        let first = &projection.periods[0];

        assert_eq!(first.period_index, 1);
        assert_eq!(first.beginning_value, 1_000_000.0);
        assert_eq!(first.withdrawal, 10_000.0);
        // monthly rate (1.08)^(1/12) - 1 = 0.006434...
        assert!((first.period_return - 6_434.03).abs() < 0.01);
        assert!((first.ending_value - 996_369.69).abs() < 0.01);
    }

    #[test]
    fn test_records_chain_exactly() {
        let projection = engine().project(&test_plan()).unwrap();

        for pair in projection.periods.windows(2) {
            assert_eq!(pair[0].ending_value, pair[1].beginning_value);
        }
        for (i, row) in projection.periods.iter().enumerate() {
            assert_eq!(row.period_index, i as u32 + 1);
        }
    }

    #[test]
    fn test_inflation_steps_at_period_13_not_12() {
        let projection = engine().project(&test_plan()).unwrap();

        assert_eq!(projection.periods[11].withdrawal, 10_000.0);
        assert!((projection.periods[12].withdrawal - 10_500.0).abs() < 1e-9);
        assert!((projection.periods[24].withdrawal - 11_025.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_corpus_emits_no_records() {
        let mut plan = test_plan();
        plan.initial_corpus = 0.0;

        let projection = engine().project(&plan).unwrap();

        assert!(projection.periods.is_empty());
        assert!(projection.years.is_empty());
        assert_eq!(projection.summary.final_corpus_value, 0.0);
        assert_eq!(projection.summary.duration_years, 0.0);
    }

    #[test]
    fn test_final_withdrawal_capped_at_remaining_corpus() {
        let plan = SwpPlan {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            annual_return_rate: 0.0,
            annual_inflation_rate: 0.0,
            initial_corpus: 25_000.0,
            monthly_withdrawal: 10_000.0,
        };

        let projection = engine().project(&plan).unwrap();

        assert_eq!(projection.periods.len(), 3);
        let last = &projection.periods[2];
        assert_eq!(last.withdrawal, last.beginning_value);
        assert_eq!(last.withdrawal, 5_000.0);
        assert_eq!(last.ending_value, 0.0);
    }

    #[test]
    fn test_zero_withdrawal_never_exhausts() {
        let plan = SwpPlan {
            monthly_withdrawal: 0.0,
            ..test_plan()
        };
        let engine = ProjectionEngine::new(ProjectionConfig { max_months: 24 });

        let projection = engine.project(&plan).unwrap();

        assert_eq!(projection.periods.len(), 24);
        assert_eq!(projection.summary.total_withdrawals, 0.0);
        for pair in projection.periods.windows(2) {
            assert!(pair[1].beginning_value >= pair[0].beginning_value);
        }
    }

    #[test]
    fn test_horizon_cap_enforced_when_returns_outrun_withdrawals() {
        let plan = SwpPlan {
            annual_return_rate: 0.10,
            monthly_withdrawal: 100.0,
            ..test_plan()
        };

        let projection = engine().project(&plan).unwrap();

        assert_eq!(projection.periods.len(), 600);
        assert_eq!(projection.summary.duration_years, 50.0);
    }

    #[test]
    fn test_yearly_totals_reconcile_with_summary() {
        let projection = engine().project(&test_plan()).unwrap();

        let yearly: f64 = projection.years.iter().map(|y| y.total_withdrawal).sum();
        assert!((yearly - projection.summary.total_withdrawals).abs() < 1e-6);
    }

    #[test]
    fn test_negative_corpus_rejected() {
        let mut plan = test_plan();
        plan.initial_corpus = -1.0;

        assert_eq!(
            engine().project(&plan).unwrap_err(),
            InvalidInput::Negative {
                field: "initial_corpus",
                value: -1.0
            }
        );
    }

    #[test]
    fn test_negative_withdrawal_rejected() {
        let mut plan = test_plan();
        plan.monthly_withdrawal = -500.0;

        assert!(matches!(
            engine().project(&plan).unwrap_err(),
            InvalidInput::Negative {
                field: "monthly_withdrawal",
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        for field_setter in [
            |p: &mut SwpPlan| p.initial_corpus = f64::NAN,
            |p: &mut SwpPlan| p.monthly_withdrawal = f64::INFINITY,
            |p: &mut SwpPlan| p.annual_return_rate = f64::NAN,
            |p: &mut SwpPlan| p.annual_inflation_rate = f64::NEG_INFINITY,
        ] {
            let mut plan = test_plan();
            field_setter(&mut plan);
            assert!(matches!(
                engine().project(&plan).unwrap_err(),
                InvalidInput::NonFinite { .. }
            ));
        }
    }

    #[test]
    fn test_return_rate_at_or_below_minus_one_rejected() {
        for rate in [-1.0, -1.5] {
            let mut plan = test_plan();
            plan.annual_return_rate = rate;
            assert!(matches!(
                engine().project(&plan).unwrap_err(),
                InvalidInput::ReturnRateOutOfDomain { .. }
            ));
        }
    }

    #[test]
    fn test_negative_return_rate_above_minus_one_accepted() {
        let mut plan = test_plan();
        plan.annual_return_rate = -0.10;

        let projection = engine().project(&plan).unwrap();
        assert!(!projection.periods.is_empty());
        assert!(projection.periods.iter().all(|r| r.ending_value.is_finite()));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let plan = test_plan();
        let a = engine().project(&plan).unwrap();
        let b = engine().project(&plan).unwrap();

        assert_eq!(a.periods.len(), b.periods.len());
        assert_eq!(
            a.summary.final_corpus_value,
            b.summary.final_corpus_value
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

        proptest! {
            #![proptest_config(proptest::test_runner::Config::with_cases(64))]

            #[test]
            fn prop_invariants_hold_for_valid_inputs(
                corpus_k in 0u32..5_000,
                withdrawal in 0u32..50_000,
                return_bp in -2_000i32..3_000,
                inflation_bp in 0i32..1_500,
            ) {
                let plan = SwpPlan {
                    start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
                    annual_return_rate: f64::from(return_bp) / 10_000.0,
                    annual_inflation_rate: f64::from(inflation_bp) / 10_000.0,
                    initial_corpus: f64::from(corpus_k) * 1_000.0,
                    monthly_withdrawal: f64::from(withdrawal),
                };
                let engine = ProjectionEngine::new(ProjectionConfig { max_months: 120 });
                let projection = engine.project(&plan).unwrap();

                prop_assert!(projection.periods.len() <= 120);

                for (i, row) in projection.periods.iter().enumerate() {
                    prop_assert_eq!(row.period_index, i as u32 + 1);
                    prop_assert!(row.withdrawal <= row.beginning_value);
                    prop_assert!(row.withdrawal >= 0.0);
                    prop_assert!(row.ending_value.is_finite());
                }
                for pair in projection.periods.windows(2) {
                    prop_assert_eq!(pair[0].ending_value, pair[1].beginning_value);
                }

                let yearly: f64 = projection.years.iter().map(|y| y.total_withdrawal).sum();
                prop_assert!((yearly - projection.summary.total_withdrawals).abs() < 1e-6);
            }
        }
    }
}
