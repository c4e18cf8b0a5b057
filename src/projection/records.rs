//! Output structures for projections

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single row of projection output for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// 1-based period number, contiguous from 1
    pub period_index: u32,

    /// Calendar month of the withdrawal
    pub date: NaiveDate,

    /// Corpus value entering the period
    pub beginning_value: f64,

    /// Growth earned on the full beginning corpus this period
    pub period_return: f64,

    /// Amount actually withdrawn, capped at the remaining corpus
    pub withdrawal: f64,

    /// Corpus value after withdrawal and growth
    pub ending_value: f64,
}

impl PeriodRecord {
    /// Short "Mon-YY" label used by table and chart collaborators
    pub fn month_label(&self) -> String {
        self.date.format("%b-%y").to_string()
    }
}

/// Twelve consecutive periods rolled into one row; the last row may
/// cover a partial group of 1-11 periods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearSummary {
    /// 1-based group number
    pub year_index: u32,

    /// Calendar year label for the group
    pub calendar_year: i32,

    /// Beginning value of the group's first period
    pub beginning_value: f64,

    /// Sum of withdrawals over the group
    pub total_withdrawal: f64,

    /// Sum of period returns over the group
    pub total_return: f64,

    /// Ending value of the group's last period
    pub ending_value: f64,
}

impl YearSummary {
    /// Roll monthly records up into year groups.
    ///
    /// Grouping is positional: every 12 records from simulation start form
    /// a group, regardless of calendar boundaries, so a plan starting in
    /// March spans March-February per group. `calendar_year` advances once
    /// per group from the start year and can therefore disagree with the
    /// calendar months a mid-year group actually covers.
    pub fn from_periods(periods: &[PeriodRecord], start_year: i32) -> Vec<YearSummary> {
        periods
            .chunks(12)
            .enumerate()
            .map(|(i, group)| YearSummary {
                year_index: i as u32 + 1,
                calendar_year: start_year + i as i32,
                beginning_value: group[0].beginning_value,
                total_withdrawal: group.iter().map(|r| r.withdrawal).sum(),
                total_return: group.iter().map(|r| r.period_return).sum(),
                ending_value: group[group.len() - 1].ending_value,
            })
            .collect()
    }
}

/// Summary statistics for a full projection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of months simulated
    pub months: u32,

    /// Corpus remaining after the last period, or the initial corpus
    /// when no periods ran
    pub final_corpus_value: f64,

    /// Sum of all withdrawals taken
    pub total_withdrawals: f64,

    /// Sum of all monthly returns earned
    pub total_returns: f64,

    /// Projection length in years, to one decimal place
    pub duration_years: f64,
}

impl SummaryStatistics {
    /// Derive run statistics from the emitted records
    pub fn from_periods(periods: &[PeriodRecord], initial_corpus: f64) -> Self {
        let months = periods.len() as u32;
        Self {
            months,
            final_corpus_value: periods
                .last()
                .map(|r| r.ending_value)
                .unwrap_or(initial_corpus),
            total_withdrawals: periods.iter().map(|r| r.withdrawal).sum(),
            total_returns: periods.iter().map(|r| r.period_return).sum(),
            duration_years: (months as f64 / 12.0 * 10.0).round() / 10.0,
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    /// Monthly period records in emission order
    pub periods: Vec<PeriodRecord>,

    /// Positional yearly rollup of `periods`
    pub years: Vec<YearSummary>,

    /// Run-level summary statistics
    pub summary: SummaryStatistics,
}

impl Projection {
    /// Running total of withdrawals per period, for chart collaborators
    pub fn cumulative_withdrawals(&self) -> Vec<f64> {
        let mut total = 0.0;
        self.periods
            .iter()
            .map(|r| {
                total += r.withdrawal;
                total
            })
            .collect()
    }
}
