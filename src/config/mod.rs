//! Configuration management for DataTables previews
//!
//! The configuration is a plain immutable value passed to every sampling
//! and preview call. It can be built from defaults, YAML/TOML files and
//! environment variables (see [`loader`]) and is checked by [`validation`].

use crate::core::error::Result;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::json;
use std::path::Path;

pub mod loader;
pub mod validation;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataTablesConfig {
    /// Take a sample once the table has more rows than this; `None` disables sampling
    #[serde(serialize_with = "serialize_limit", deserialize_with = "deserialize_limit")]
    pub limit: Option<usize>,
    /// Explicit sample size, overrides the estimated one
    pub sample_size: Option<usize>,
    /// Fraction of the sample reserved for each tail of every orderable column
    pub extreme_fraction: f64,
    /// Ordering applied to the realized sample
    pub sort: SortDirective,
    /// Log a warning when a preview shows a sample only
    pub warnings: bool,
    /// CSS classes of the rendered table
    pub classes: Vec<String>,
    /// Parameters of the sample size estimate
    pub confidence: ConfidenceConfig,
    /// DataTables constructor options
    pub options: serde_json::Value,
}

/// Sample size estimation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Confidence level
    pub confidence_interval: f64,
    /// Margin of error
    pub margin_of_error: f64,
    /// Expected population proportion
    pub population_proportion: f64,
}

/// How the realized sample is ordered before it is handed on
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SortSetting", into = "SortSetting")]
pub enum SortDirective {
    /// Keep original row order
    #[default]
    None,
    /// Sort by original row label
    Index,
    /// Sort by the values of one or more columns
    Values(Vec<String>),
}

/// On-disk spelling of [`SortDirective`]: `false`, `true`, `"col"` or `["a", "b"]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SortSetting {
    Flag(bool),
    Column(String),
    Columns(Vec<String>),
}

impl From<SortSetting> for SortDirective {
    fn from(setting: SortSetting) -> Self {
        match setting {
            SortSetting::Flag(false) => SortDirective::None,
            SortSetting::Flag(true) => SortDirective::Index,
            SortSetting::Column(column) => SortDirective::Values(vec![column]),
            SortSetting::Columns(columns) if columns.is_empty() => SortDirective::None,
            SortSetting::Columns(columns) => SortDirective::Values(columns),
        }
    }
}

impl From<SortDirective> for SortSetting {
    fn from(directive: SortDirective) -> Self {
        match directive {
            SortDirective::None => SortSetting::Flag(false),
            SortDirective::Index => SortSetting::Flag(true),
            SortDirective::Values(columns) => SortSetting::Columns(columns),
        }
    }
}

/// On-disk spelling of the sampling limit: a row count, or `false`/`null` to disable
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum LimitSetting {
    Rows(usize),
    Flag(bool),
}

fn serialize_limit<S: Serializer>(
    limit: &Option<usize>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match limit {
        Some(rows) => LimitSetting::Rows(*rows).serialize(serializer),
        None => LimitSetting::Flag(false).serialize(serializer),
    }
}

fn deserialize_limit<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<usize>, D::Error> {
    match Option::<LimitSetting>::deserialize(deserializer)? {
        None | Some(LimitSetting::Flag(false)) => Ok(None),
        Some(LimitSetting::Rows(rows)) => Ok(Some(rows)),
        Some(LimitSetting::Flag(true)) => Err(D::Error::custom(
            "limit must be a row count, or false to disable sampling",
        )),
    }
}

impl Default for DataTablesConfig {
    fn default() -> Self {
        Self {
            limit: Some(1000),
            sample_size: None,
            extreme_fraction: 0.05,
            sort: SortDirective::None,
            warnings: true,
            classes: vec!["table".into(), "cell-border".into(), "nowrap".into()],
            confidence: ConfidenceConfig::default(),
            options: default_options(),
        }
    }
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            confidence_interval: 0.975,
            margin_of_error: 0.02,
            population_proportion: 0.5,
        }
    }
}

/// Default DataTables constructor options
pub fn default_options() -> serde_json::Value {
    json!({
        "columnDefs": [
            {
                // the first column holds the row index
                "searchable": false,
                "width": "5%",
                "targets": 0
            },
            {
                "targets": "_all",
                "className": "dt-body-center dt-head-center"
            }
        ],
        "buttons": ["print", "csv", "pdf"],
        "order": [],
        "ordering": true,
        "paging": true,
        "responsive": true,
        "scrollX": true,
        "scrollY": false,
        "searching": true
    })
}

impl DataTablesConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        loader::load_from_env()
    }

    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        loader::load_from_file(path.as_ref())
    }

    /// Load configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        loader::load_from_yaml(yaml)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml: &str) -> Result<Self> {
        loader::load_from_toml(toml)
    }

    /// Load configuration with precedence: defaults -> file -> environment,
    /// discovering the file when none is given
    pub fn load_with_precedence<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self> {
        loader::load_with_precedence(config_file)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        loader::save_to_file(self, path.as_ref())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Convert to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builder-style override of the sampling limit
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Builder-style override of the sample size
    pub fn with_sample_size(mut self, sample_size: Option<usize>) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Builder-style override of the sort directive
    pub fn with_sort(mut self, sort: SortDirective) -> Self {
        self.sort = sort;
        self
    }

    /// Builder-style override of the estimation parameters
    pub fn with_confidence(mut self, confidence: ConfidenceConfig) -> Self {
        self.confidence = confidence;
        self
    }
}
