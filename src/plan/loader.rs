//! Load plans from a CSV file for batch projections

use std::error::Error;
use std::path::Path;

use chrono::NaiveDate;
use csv::Reader;

use super::SwpPlan;

/// A plan paired with its identifier from the batch file
#[derive(Debug, Clone)]
pub struct PlanRow {
    /// Identifier carried through to batch output
    pub plan_id: u32,

    /// The projection inputs
    pub plan: SwpPlan,
}

/// Raw CSV row matching the plans file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PlanID")]
    plan_id: u32,
    #[serde(rename = "StartDate")]
    start_date: String,
    #[serde(rename = "AnnualReturnRate")]
    annual_return_rate: f64,
    #[serde(rename = "AnnualInflationRate")]
    annual_inflation_rate: f64,
    #[serde(rename = "InitialCorpus")]
    initial_corpus: f64,
    #[serde(rename = "MonthlyWithdrawal")]
    monthly_withdrawal: f64,
}

impl CsvRow {
    fn to_plan_row(self) -> Result<PlanRow, Box<dyn Error>> {
        let start_date = NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d")
            .map_err(|e| format!("Bad StartDate '{}': {}", self.start_date, e))?;

        Ok(PlanRow {
            plan_id: self.plan_id,
            plan: SwpPlan::new(
                start_date,
                self.annual_return_rate,
                self.annual_inflation_rate,
                self.initial_corpus,
                self.monthly_withdrawal,
            ),
        })
    }
}

/// Load all plans from a CSV file
pub fn load_plans<P: AsRef<Path>>(path: P) -> Result<Vec<PlanRow>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut plans = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        plans.push(row.to_plan_row()?);
    }

    log::debug!("loaded {} plans", plans.len());
    Ok(plans)
}

/// Load plans from any reader (e.g., string buffer, network stream)
pub fn load_plans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<PlanRow>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut plans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        plans.push(row.to_plan_row()?);
    }

    Ok(plans)
}
