//! Representative row sampling for table previews
//!
//! Large tables are previewed through a sample instead of in full. The
//! sample keeps the leading rows and the extremes of every orderable column
//! so outliers stay visible, and fills the rest uniformly at random.
//!
//! ```
//! use jupyter_datatables::core::{Column, Table};
//! use jupyter_datatables::sampling::{SampleRequest, Sampler};
//!
//! let table = Table::from_columns(vec![
//!     Column::int64("id", (0..5000).collect()),
//!     Column::float64("value", (0..5000).map(|i| (i % 97) as f64).collect()),
//! ])
//! .unwrap();
//!
//! let request = SampleRequest::new(table.row_count()).with_sample_size(Some(200));
//! let result = Sampler::new().select_seeded(&table, &request, Some(7)).unwrap();
//!
//! assert_eq!(result.effective_sample_size, 200);
//! assert!(result.selected_row_indices.windows(2).all(|w| w[0] < w[1]));
//! ```

pub mod estimator;
pub mod selector;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{ConfidenceConfig, DataTablesConfig};
use crate::core::error::{Error, Result};
use crate::core::table::TableSource;

pub use estimator::{
    default_estimator, smart_ceil, SampleSizeEstimator, SizeSource, SqrtApproximation,
};
#[cfg(feature = "stats")]
pub use estimator::NormalApproximation;
pub use selector::{extreme_count, forced_rows, largest_rows, smallest_rows, HEAD_ROWS};

/// Parameters of one sampling invocation
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRequest {
    /// Rows in the table
    pub total_rows: usize,
    /// Sampling activates above this many rows; `None` disables it
    pub limit: Option<usize>,
    /// Explicit sample size, must not exceed `total_rows`
    pub requested_sample_size: Option<usize>,
    /// Fraction of the sample taken from each tail of every orderable column
    pub extreme_fraction: f64,
    /// Parameters of the estimated sample size
    pub confidence: ConfidenceConfig,
}

impl SampleRequest {
    /// Request with the default configuration
    pub fn new(total_rows: usize) -> Self {
        Self::from_config(&DataTablesConfig::default(), total_rows)
    }

    /// Request for a table of `total_rows` rows under `config`
    pub fn from_config(config: &DataTablesConfig, total_rows: usize) -> Self {
        Self {
            total_rows,
            limit: config.limit,
            requested_sample_size: config.sample_size,
            extreme_fraction: config.extreme_fraction,
            confidence: config.confidence,
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_sample_size(mut self, sample_size: Option<usize>) -> Self {
        self.requested_sample_size = sample_size;
        self
    }

    pub fn with_extreme_fraction(mut self, extreme_fraction: f64) -> Self {
        self.extreme_fraction = extreme_fraction;
        self
    }

    pub fn with_confidence(mut self, confidence: ConfidenceConfig) -> Self {
        self.confidence = confidence;
        self
    }

    /// Whether the table is large enough to be sampled
    pub fn needs_sampling(&self) -> bool {
        matches!(self.limit, Some(limit) if self.total_rows > limit)
    }

    /// Checks the request before any sampling work is done
    pub fn validate(&self) -> Result<()> {
        if let Some(size) = self.requested_sample_size {
            if size > self.total_rows {
                return Err(Error::ValidationError(format!(
                    "sample size {} exceeds table size {}",
                    size, self.total_rows
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.extreme_fraction) {
            return Err(Error::ConfigurationError(format!(
                "extreme_fraction must be within [0, 1], got {}",
                self.extreme_fraction
            )));
        }

        Ok(())
    }
}

/// Outcome of one sampling invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleResult {
    /// Selected rows, unique and in original row order
    pub selected_row_indices: Vec<usize>,
    /// Requested or estimated sample size
    pub target_sample_size: usize,
    /// Number of selected rows
    pub effective_sample_size: usize,
    /// Whether the selection size differs from the target
    pub was_adjusted: bool,
    /// How the target was obtained
    pub size_source: SizeSource,
}

impl SampleResult {
    fn full(total_rows: usize) -> Self {
        Self {
            selected_row_indices: (0..total_rows).collect(),
            target_sample_size: total_rows,
            effective_sample_size: total_rows,
            was_adjusted: false,
            size_source: SizeSource::Skipped,
        }
    }

    /// Whether only part of the table was selected
    pub fn is_sampled(&self) -> bool {
        self.size_source != SizeSource::Skipped
    }

    /// Whether the target came from the square-root fallback
    pub fn is_degraded(&self) -> bool {
        self.size_source == SizeSource::SqrtFallback
    }
}

/// Selects preview samples. Holds no per-call state and can be shared between threads.
#[derive(Debug)]
pub struct Sampler {
    estimator: Box<dyn SampleSizeEstimator>,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler {
    /// Sampler using the best estimator compiled into this build
    pub fn new() -> Self {
        Self::with_estimator(default_estimator())
    }

    pub fn with_estimator(estimator: Box<dyn SampleSizeEstimator>) -> Self {
        Self { estimator }
    }

    pub fn estimator(&self) -> &dyn SampleSizeEstimator {
        self.estimator.as_ref()
    }

    /// Target size for a request that needs sampling, clamped to the table size
    pub fn target_sample_size(&self, request: &SampleRequest) -> Result<(usize, SizeSource)> {
        if let Some(size) = request.requested_sample_size {
            return Ok((size, SizeSource::Override));
        }

        let estimate = self
            .estimator
            .estimate(request.total_rows, &request.confidence)?;
        Ok((estimate.min(request.total_rows), self.estimator.source()))
    }

    /// Select a sample drawing the random fill from `rng`
    pub fn select<T, R>(&self, table: &T, request: &SampleRequest, rng: &mut R) -> Result<SampleResult>
    where
        T: TableSource + ?Sized,
        R: Rng + ?Sized,
    {
        request.validate()?;

        let total_rows = table.row_count();
        if total_rows != request.total_rows {
            return Err(Error::ValidationError(format!(
                "request describes {} rows but the table has {}",
                request.total_rows, total_rows
            )));
        }

        if !request.needs_sampling() {
            log::debug!("{} rows within limit {:?}, sampling skipped", total_rows, request.limit);
            return Ok(SampleResult::full(total_rows));
        }

        let (target, size_source) = self.target_sample_size(request)?;
        if size_source == SizeSource::SqrtFallback {
            log::info!(
                "sample size for {} rows approximated as sqrt(N) = {}",
                total_rows,
                target
            );
        }

        let per_tail = extreme_count(target, request.extreme_fraction);
        let mut selected = forced_rows(table, target, per_tail);
        let forced = selected.len();

        let remaining = target - forced.min(target);
        let complement: Vec<usize> = (0..total_rows).filter(|row| !selected.contains(row)).collect();
        let draws = remaining.min(complement.len());
        if draws > 0 {
            selected.extend(
                rand::seq::index::sample(rng, complement.len(), draws)
                    .into_iter()
                    .map(|i| complement[i]),
            );
        }

        let effective = selected.len();
        log::debug!(
            "sampled {} of {} rows: target {} ({:?}), {} forced, {} drawn",
            effective,
            total_rows,
            target,
            size_source,
            forced,
            draws
        );

        Ok(SampleResult {
            selected_row_indices: selected.into_iter().collect(),
            target_sample_size: target,
            effective_sample_size: effective,
            was_adjusted: effective != target,
            size_source,
        })
    }

    /// Select a sample from a generator seeded with `seed`, or a fresh random seed
    pub fn select_seeded<T>(
        &self,
        table: &T,
        request: &SampleRequest,
        seed: Option<u64>,
    ) -> Result<SampleResult>
    where
        T: TableSource + ?Sized,
    {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        self.select(table, request, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, Table};

    fn numbered(n: usize) -> Table {
        Table::from_columns(vec![
            Column::int64("id", (0..n as i64).collect()),
            Column::float64("wave", (0..n).map(|i| ((i * 37) % 101) as f64).collect()),
            Column::string("label", (0..n).map(|i| format!("row {}", i)).collect()),
        ])
        .unwrap()
    }

    #[test]
    fn test_within_limit_selects_everything() {
        let table = numbered(500);
        let request = SampleRequest::new(500);
        let result = Sampler::new().select_seeded(&table, &request, Some(1)).unwrap();

        assert_eq!(result.selected_row_indices, (0..500).collect::<Vec<_>>());
        assert_eq!(result.effective_sample_size, 500);
        assert!(!result.was_adjusted);
        assert!(!result.is_sampled());
    }

    #[test]
    fn test_no_limit_selects_everything() {
        let table = numbered(3000);
        let request = SampleRequest::new(3000).with_limit(None);
        let result = Sampler::new().select_seeded(&table, &request, Some(1)).unwrap();
        assert_eq!(result.effective_sample_size, 3000);
        assert_eq!(result.size_source, SizeSource::Skipped);
    }

    #[test]
    fn test_override_larger_than_table_fails() {
        let table = numbered(20);
        for limit in [None, Some(5), Some(100)] {
            let request = SampleRequest::new(20)
                .with_limit(limit)
                .with_sample_size(Some(21));
            assert!(matches!(
                Sampler::new().select_seeded(&table, &request, Some(1)),
                Err(Error::ValidationError(_))
            ));
        }
    }

    #[test]
    fn test_mismatched_row_count_fails() {
        let table = numbered(20);
        let request = SampleRequest::new(30);
        assert!(matches!(
            Sampler::new().select_seeded(&table, &request, None),
            Err(Error::ValidationError(_))
        ));
    }

    #[test]
    fn test_override_is_filled_exactly() {
        let table = numbered(2000);
        let request = SampleRequest::new(2000).with_sample_size(Some(300));
        let result = Sampler::new().select_seeded(&table, &request, Some(3)).unwrap();

        assert_eq!(result.target_sample_size, 300);
        assert_eq!(result.effective_sample_size, 300);
        assert_eq!(result.size_source, SizeSource::Override);
        assert!(!result.was_adjusted);
        // head rows are always present
        assert!((0..HEAD_ROWS).all(|row| result.selected_row_indices.contains(&row)));
    }

    #[test]
    fn test_forced_rows_exceeding_target_are_kept() {
        // Four orderable columns with disjoint extremes
        let n = 400;
        let table = Table::from_columns(vec![
            Column::int64("a", (0..n as i64).collect()),
            Column::int64("b", (0..n as i64).map(|i| (i + 100) % n as i64).collect()),
            Column::int64("c", (0..n as i64).map(|i| (i + 200) % n as i64).collect()),
            Column::int64("d", (0..n as i64).map(|i| (i + 300) % n as i64).collect()),
        ])
        .unwrap();
        let request = SampleRequest::new(n)
            .with_limit(Some(10))
            .with_sample_size(Some(20))
            .with_extreme_fraction(0.25);
        let result = Sampler::new().select_seeded(&table, &request, Some(9)).unwrap();

        assert!(result.effective_sample_size > 20);
        assert!(result.was_adjusted);
    }

    #[test]
    fn test_sqrt_fallback_is_observable() {
        let table = numbered(10_000);
        let request = SampleRequest::new(10_000);
        let sampler = Sampler::with_estimator(Box::new(SqrtApproximation));
        let result = sampler.select_seeded(&table, &request, Some(5)).unwrap();

        assert_eq!(result.size_source, SizeSource::SqrtFallback);
        assert!(result.is_degraded());
        assert_eq!(result.target_sample_size, 100);
        assert_eq!(result.effective_sample_size, 100);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new();
        let request = SampleRequest::new(0);
        let result = Sampler::new().select_seeded(&table, &request, Some(1)).unwrap();
        assert!(result.selected_row_indices.is_empty());
        assert!(!result.was_adjusted);
    }

    #[test]
    fn test_sampler_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Sampler>();
    }
}
