//! Standard normal quantiles
//!
//! Turns a confidence level into the z-score used for sample sizing.

use crate::core::error::{Error, Result};

// Acklam's rational approximation, highest power first
const CENTRAL_NUM: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];
const CENTRAL_DEN: [f64; 6] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
    1.0,
];
const TAIL_NUM: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];
const TAIL_DEN: [f64; 5] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
    1.0,
];

/// Split between the central and tail regions of the approximation
const TAIL_PROBABILITY: f64 = 0.02425;

fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, c| acc * x + c)
}

/// Standard normal distribution N(0,1)
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNormal;

impl StandardNormal {
    pub fn new() -> Self {
        StandardNormal
    }

    /// Quantile function. `NaN` outside the open interval (0, 1).
    pub fn ppf(&self, p: f64) -> f64 {
        if !(p > 0.0 && p < 1.0) {
            return f64::NAN;
        }

        if p < TAIL_PROBABILITY {
            let q = (-2.0 * p.ln()).sqrt();
            horner(&TAIL_NUM, q) / horner(&TAIL_DEN, q)
        } else if p <= 1.0 - TAIL_PROBABILITY {
            let q = p - 0.5;
            let r = q * q;
            q * horner(&CENTRAL_NUM, r) / horner(&CENTRAL_DEN, r)
        } else {
            -self.ppf(1.0 - p)
        }
    }

    /// Two-tailed critical value for a confidence level, `ppf(1 - (1 - ci) / 2)`
    pub fn two_tailed_z(&self, confidence_interval: f64) -> Result<f64> {
        if !(confidence_interval > 0.0 && confidence_interval < 1.0) {
            return Err(Error::ConfigurationError(format!(
                "confidence interval must be in (0, 1), got {}",
                confidence_interval
            )));
        }
        Ok(self.ppf(1.0 - (1.0 - confidence_interval) / 2.0))
    }
}
