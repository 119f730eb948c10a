//! Jupyter DataTables preview
//!
//! Ties sampling, ordering, fingerprinting and column metadata together
//! into everything the notebook front-end needs to render an interactive
//! table:
//! - the realized sample, sorted as configured
//! - a stable table id derived from the sample's content
//! - DataTables options with per-column type definitions
//! - the "Sample size: X out of N" caption

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value as JsonValue;

use crate::config::{DataTablesConfig, SortDirective};
use crate::core::error::Result;
use crate::core::table::Table;
use crate::fingerprint::fingerprint;
use crate::sampling::{SampleRequest, SampleResult, Sampler};

pub mod column_defs;

pub use column_defs::{column_defs, INDEX_COLUMNS};

/// Everything needed to render one table preview
#[derive(Debug, Clone)]
pub struct Preview {
    /// The realized sample, ordered per the sort directive
    pub table: Table,
    /// How the sample was selected
    pub sample: SampleResult,
    /// Rows in the source table
    pub total_rows: usize,
    /// Content fingerprint, used as the element id
    pub table_id: String,
    /// Space separated CSS classes
    pub classes: String,
    /// DataTables options with `columnDefs` filled in and `buttons` removed
    pub options: JsonValue,
    /// Buttons taken out of the options
    pub buttons: Vec<JsonValue>,
}

impl Preview {
    /// Build a preview with a randomly seeded sample
    pub fn build(table: &Table, config: &DataTablesConfig) -> Result<Self> {
        Self::build_seeded(table, config, None)
    }

    /// Build a preview whose random fill is seeded with `seed`
    pub fn build_seeded(table: &Table, config: &DataTablesConfig, seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::build_with(table, config, &Sampler::new(), &mut rng)
    }

    /// Build a preview with an explicit sampler and random source
    pub fn build_with<R: Rng + ?Sized>(
        table: &Table,
        config: &DataTablesConfig,
        sampler: &Sampler,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let total_rows = table.row_count();
        let request = SampleRequest::from_config(config, total_rows);
        let sample = sampler.select(table, &request, rng)?;

        if sample.is_sampled() && config.warnings {
            log::warn!(
                "Showing a sample of {} out of {} rows",
                sample.effective_sample_size,
                total_rows
            );
        }

        let realized = if sample.is_sampled() {
            table.take_rows(&sample.selected_row_indices)?
        } else {
            table.clone()
        };
        let realized = apply_sort(&realized, &config.sort)?;
        let table_id = fingerprint(&realized)?;

        let mut options = config.options.clone();
        let defs = column_defs(&realized, &options);
        let mut buttons = Vec::new();
        if let Some(map) = options.as_object_mut() {
            map.insert("columnDefs".to_string(), JsonValue::Array(defs));
            if let Some(JsonValue::Array(taken)) = map.remove("buttons") {
                buttons = taken;
            }
        }

        Ok(Self {
            table: realized,
            sample,
            total_rows,
            table_id,
            classes: config.classes.join(" "),
            options,
            buttons,
        })
    }

    /// Rows shown in the preview
    pub fn sample_size(&self) -> usize {
        self.table.row_count()
    }

    /// Human readable summary, e.g. `Sample size: 2,000 out of 15,000`
    pub fn caption(&self) -> String {
        format!(
            "Sample size: {} out of {}",
            format_thousands(self.sample_size()),
            format_thousands(self.total_rows)
        )
    }

    /// Options serialized for the front-end
    pub fn options_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.options)?)
    }
}

/// Order a realized sample as the directive asks
pub fn apply_sort(table: &Table, sort: &SortDirective) -> Result<Table> {
    match sort {
        SortDirective::None => Ok(table.clone()),
        SortDirective::Index => table.sort_by_index(),
        SortDirective::Values(columns) => table.sort_by_columns(columns.as_slice()),
    }
}

/// `1234567` -> `1,234,567`
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Jupyter display trait for tables
pub trait DataTablesDisplay {
    /// Build the DataTables preview of this table
    fn to_datatables_preview(&self, config: &DataTablesConfig) -> Result<Preview>;
}

impl DataTablesDisplay for Table {
    fn to_datatables_preview(&self, config: &DataTablesConfig) -> Result<Preview> {
        Preview::build(self, config)
    }
}
