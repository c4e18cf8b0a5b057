//! AWS Lambda handler for running SWP projections
//!
//! Accepts plan inputs via JSON and returns the monthly records, yearly
//! rollup, and summary statistics. Supports Lambda Function URLs for
//! direct HTTP access.

use chrono::NaiveDate;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

use swp_engine::{
    PeriodRecord, ProjectionConfig, ProjectionEngine, SummaryStatistics, SwpPlan, YearSummary,
    DEFAULT_MAX_MONTHS,
};

/// Input plan for the projection
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// First withdrawal month (YYYY-MM-DD); defaults to today
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Effective annual return rate as a decimal (0.08 = 8%)
    pub annual_return_rate: f64,

    /// Annual inflation rate as a decimal
    pub annual_inflation_rate: f64,

    /// Invested corpus at the start of the projection
    pub initial_corpus: f64,

    /// Scheduled monthly withdrawal amount
    pub monthly_withdrawal: f64,

    /// Hard cap on projection length (default: 600 months)
    #[serde(default = "default_max_months")]
    pub max_months: u32,

    /// Whether to include the full monthly breakdown in the response
    #[serde(default = "default_true")]
    pub include_periods: bool,
}

fn default_max_months() -> u32 {
    DEFAULT_MAX_MONTHS
}

fn default_true() -> bool {
    true
}

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub summary: SummaryStatistics,
    pub years: Vec<YearSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periods: Option<Vec<PeriodRecord>>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(format!(r#"{{"error":"{}"}}"#, message)))
        .unwrap()
}

fn json_response(body: &ProjectionResponse) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // Parse request body
    let body = event.body();
    let body_str = match body {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ProjectionRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let plan = SwpPlan {
        start_date: request
            .start_date
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        annual_return_rate: request.annual_return_rate,
        annual_inflation_rate: request.annual_inflation_rate,
        initial_corpus: request.initial_corpus,
        monthly_withdrawal: request.monthly_withdrawal,
    };

    let engine = ProjectionEngine::new(ProjectionConfig {
        max_months: request.max_months,
    });

    let projection = match engine.project(&plan) {
        Ok(p) => p,
        Err(e) => {
            return Ok(error_response(400, &e.to_string()));
        }
    };

    let response = ProjectionResponse {
        summary: projection.summary,
        years: projection.years,
        periods: request.include_periods.then_some(projection.periods),
        execution_time_ms: start.elapsed().as_millis() as u64,
        error: None,
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
