//! Equated Monthly Installment math.
//!
//! Pure functions; the HTTP layer never recomputes stored calculator rows,
//! it only validates their ranges.

use serde::Serialize;

/// Result of an EMI computation, rounded to currency precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmiBreakdown {
    pub emi: f64,
    pub total_interest: f64,
    pub total_amount: f64,
}

/// Rounds to 2 decimals (the precision used when persisting).
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Computes the EMI for `principal` at `annual_rate_pct` percent over
/// `tenure_months` months:
///
/// `EMI = P * r * (1+r)^N / ((1+r)^N - 1)` with `r = R / 12 / 100`.
///
/// A zero rate degenerates to straight-line repayment `P / N` (the formula
/// itself divides by zero there). Callers feeding API-validated input never
/// hit that branch, since the rate floor is 0.1%.
pub fn calculate(principal: f64, annual_rate_pct: f64, tenure_months: u32) -> EmiBreakdown {
    let n = tenure_months as f64;
    let monthly_rate = annual_rate_pct / 12.0 / 100.0;

    let emi = if monthly_rate == 0.0 {
        principal / n
    } else {
        let growth = (1.0 + monthly_rate).powf(n);
        principal * monthly_rate * growth / (growth - 1.0)
    };

    let emi = round2(emi);
    let total_amount = round2(emi * n);
    let total_interest = round2(total_amount - principal);

    EmiBreakdown {
        emi,
        total_interest,
        total_amount,
    }
}
