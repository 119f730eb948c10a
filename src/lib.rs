//! Interactive DataTables previews for Jupyter
//!
//! Large tables are previewed through a representative sample: leading rows
//! and per-column extremes are always kept, the rest is filled at random.
//! Each realized sample gets a content fingerprint that the notebook
//! front-end uses as the table's element id.

// Core module with fundamental data structures and traits
pub mod core;

// Configuration, loaded once by the caller and passed to every call
pub mod config;

// Normal distribution quantiles for sample sizing
#[cfg(feature = "stats")]
pub mod stats;

pub mod fingerprint;
pub mod jupyter;
pub mod sampling;

// Re-export core types
pub use crate::core::error::{Error, Result};
pub use crate::core::{Column, ColumnType, OrderKey, Table, TableSource, Value};

pub use config::{ConfidenceConfig, DataTablesConfig, SortDirective};
pub use fingerprint::{canonical_json, fingerprint, fingerprint_rows};
pub use jupyter::{DataTablesDisplay, Preview};
pub use sampling::{
    smart_ceil, SampleRequest, SampleResult, SampleSizeEstimator, Sampler, SizeSource,
    SqrtApproximation,
};
#[cfg(feature = "stats")]
pub use sampling::NormalApproximation;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
