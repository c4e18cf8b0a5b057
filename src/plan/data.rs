//! Plan input data for systematic withdrawal projections

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inputs for a single systematic withdrawal projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpPlan {
    /// First withdrawal month
    pub start_date: NaiveDate,

    /// Effective annual return rate as a decimal (0.08 = 8%)
    pub annual_return_rate: f64,

    /// Annual inflation rate as a decimal, applied to the withdrawal
    /// once at the start of each new year after the first
    pub annual_inflation_rate: f64,

    /// Invested corpus at the start of the projection
    pub initial_corpus: f64,

    /// Scheduled withdrawal amount per month, before inflation step-ups
    pub monthly_withdrawal: f64,
}

impl SwpPlan {
    /// Create a plan from its five scalars
    pub fn new(
        start_date: NaiveDate,
        annual_return_rate: f64,
        annual_inflation_rate: f64,
        initial_corpus: f64,
        monthly_withdrawal: f64,
    ) -> Self {
        Self {
            start_date,
            annual_return_rate,
            annual_inflation_rate,
            initial_corpus,
            monthly_withdrawal,
        }
    }
}
