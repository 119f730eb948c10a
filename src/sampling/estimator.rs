//! Sample size estimation
//!
//! The primary estimator uses the normal approximation for a proportion
//! with finite population correction. When the `stats` feature is not
//! compiled in, [`default_estimator`] selects the square-root fallback.

use std::fmt::Debug;

use serde::Serialize;

use crate::config::validation::validate_confidence;
use crate::config::ConfidenceConfig;
use crate::core::error::{Error, Result};

#[cfg(feature = "stats")]
use crate::stats::StandardNormal;

/// Rounding never goes beyond the nearest multiple of 10^3
const MAX_ROUNDING_ORDER: u32 = 3;

/// How the target sample size of a request was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeSource {
    /// No sampling, the whole table is used
    Skipped,
    /// Explicit sample size from the request
    Override,
    /// Normal approximation
    Normal,
    /// Square-root approximation, used when statistics support is unavailable
    SqrtFallback,
}

/// Strategy computing a sample size for a population
pub trait SampleSizeEstimator: Debug + Send + Sync {
    /// Which kind of estimate this strategy produces
    fn source(&self) -> SizeSource;

    /// Sample size for a population of `population` rows
    fn estimate(&self, population: usize, confidence: &ConfidenceConfig) -> Result<usize>;
}

/// Normal approximation with finite population correction:
/// `z = ppf(1 - (1 - ci) / 2)`, `u = z^2 p (1 - p) / e^2`, `s = u / (1 + u / N)`,
/// rounded up with [`smart_ceil`].
#[cfg(feature = "stats")]
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalApproximation {
    normal: StandardNormal,
}

#[cfg(feature = "stats")]
impl NormalApproximation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unrounded sample size `u / (1 + u / N)`
    pub fn raw_estimate(&self, population: usize, confidence: &ConfidenceConfig) -> Result<f64> {
        validate_confidence(confidence)?;

        let z = self.normal.two_tailed_z(confidence.confidence_interval)?;
        let p = confidence.population_proportion;
        let e = confidence.margin_of_error;
        let u = z * z * p * (1.0 - p) / (e * e);

        Ok(u / (1.0 + u / population as f64))
    }
}

#[cfg(feature = "stats")]
impl SampleSizeEstimator for NormalApproximation {
    fn source(&self) -> SizeSource {
        SizeSource::Normal
    }

    fn estimate(&self, population: usize, confidence: &ConfidenceConfig) -> Result<usize> {
        let raw = self.raw_estimate(population, confidence)?;
        Ok(smart_ceil(raw, None)? as usize)
    }
}

/// Degraded estimate `ceil(sqrt(N))`.
///
/// The confidence parameters do not enter the estimate but are still validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqrtApproximation;

impl SampleSizeEstimator for SqrtApproximation {
    fn source(&self) -> SizeSource {
        SizeSource::SqrtFallback
    }

    fn estimate(&self, population: usize, confidence: &ConfidenceConfig) -> Result<usize> {
        validate_confidence(confidence)?;
        Ok((population as f64).sqrt().ceil() as usize)
    }
}

/// Picks the best estimator compiled into this build
pub fn default_estimator() -> Box<dyn SampleSizeEstimator> {
    #[cfg(feature = "stats")]
    {
        Box::new(NormalApproximation::new())
    }

    #[cfg(not(feature = "stats"))]
    {
        log::info!("statistics support not compiled in, sample sizes use the sqrt(N) approximation");
        Box::new(SqrtApproximation)
    }
}

/// Round `x` up to a "round" number.
///
/// `order` defaults to the number of decimal digits of `ceil(x)`. The result
/// is the smallest multiple of `10^min(order, 3)` not below `x`; exact
/// multiples are returned unchanged.
pub fn smart_ceil(x: f64, order: Option<i32>) -> Result<u64> {
    if !x.is_finite() || x < 0.0 {
        return Err(Error::InvalidValue(format!(
            "cannot round {} to a sample size",
            x
        )));
    }

    let order = match order {
        Some(order) if order <= 0 => {
            return Err(Error::ConfigurationError(format!(
                "rounding order must be a positive integer, got {}",
                order
            )))
        }
        Some(order) => order as u32,
        None => decimal_digits(x.ceil() as u64),
    };

    let modulus = 10u64.pow(order.min(MAX_ROUNDING_ORDER)) as f64;
    let remainder = x % modulus;
    let rounded = if remainder == 0.0 {
        x
    } else {
        x + modulus - remainder
    };

    Ok(rounded.round() as u64)
}

fn decimal_digits(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |log| log + 1)
}
