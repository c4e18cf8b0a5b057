//! Effective-to-periodic rate conversion
//!
//! The plan quotes an effective annual return while the projection loop
//! compounds monthly, so the annual rate is converted through the nominal
//! rate transform (Excel's NOMINAL function) rather than applied directly.

/// Compounding periods per year for monthly projections.
pub const PERIODS_PER_YEAR: u32 = 12;

/// Nominal annual rate for an effective annual rate compounded `periods`
/// times per year: `m * ((1 + r)^(1/m) - 1)`.
///
/// Requires `1 + effective_rate > 0`; the engine rejects rates at or below
/// -100% before calling this.
pub fn nominal_rate(effective_rate: f64, periods: u32) -> f64 {
    let m = periods as f64;
    m * ((1.0 + effective_rate).powf(1.0 / m) - 1.0)
}

/// Monthly periodic rate equivalent to an effective annual rate.
///
/// Computed as `NOMINAL(rate, 12) / 12`, which algebraically reduces to
/// `(1 + rate)^(1/12) - 1`: compounding the result twelve times reproduces
/// the effective annual rate.
pub fn monthly_rate(annual_rate: f64) -> f64 {
    nominal_rate(annual_rate, PERIODS_PER_YEAR) / PERIODS_PER_YEAR as f64
}
