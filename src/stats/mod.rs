//! Statistics support for sample sizing
//!
//! Compiled only with the `stats` feature. Without it the sampler uses the
//! square-root approximation instead of the normal quantile.

pub mod distributions;

pub use distributions::StandardNormal;
