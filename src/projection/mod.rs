//! Projection engine for systematic withdrawal plans

mod engine;
mod rates;
mod records;
mod state;

pub use engine::{InvalidInput, ProjectionConfig, ProjectionEngine};
pub use rates::{monthly_rate, nominal_rate};
pub use records::{PeriodRecord, Projection, SummaryStatistics, YearSummary};
pub use state::ProjectionState;

use crate::plan::SwpPlan;

// ============================================================================
// Projection horizon
// ============================================================================
// The loop stops unconditionally after this many months, even when the
// return assumption outruns the withdrawal schedule indefinitely. The cap is
// a named, overridable constant rather than a buried literal.

/// Default hard cap on projection length: 600 months (50 years)
pub const DEFAULT_MAX_MONTHS: u32 = 600;

/// Project a plan with the default horizon
pub fn project(plan: &SwpPlan) -> Result<Projection, InvalidInput> {
    ProjectionEngine::new(ProjectionConfig::default()).project(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_convenience_entry_uses_default_horizon() {
        let plan = SwpPlan {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            annual_return_rate: 0.12,
            annual_inflation_rate: 0.0,
            initial_corpus: 1_000_000.0,
            monthly_withdrawal: 1_000.0,
        };

        let projection = project(&plan).unwrap();
        assert_eq!(projection.periods.len() as u32, DEFAULT_MAX_MONTHS);
    }
}
