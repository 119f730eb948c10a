//! Configuration loading utilities
//!
//! This module handles loading configuration from various sources with proper
//! precedence and validation.

use super::*;
use crate::core::error::{Error, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

fn parse_env<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::ConfigurationError(format!("Invalid {}: {}", name, e)))
}

/// `none`, `off`, `false` or an empty value disable the setting
fn parse_optional_env(name: &str, raw: &str) -> Result<Option<usize>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "none" | "off" | "false" => Ok(None),
        _ => parse_env(name, raw).map(Some),
    }
}

/// Apply environment overrides on top of an existing configuration
pub fn apply_env(config: &mut DataTablesConfig) -> Result<()> {
    if let Ok(limit) = env::var("DATATABLES_LIMIT") {
        config.limit = parse_optional_env("DATATABLES_LIMIT", &limit)?;
    }

    if let Ok(sample_size) = env::var("DATATABLES_SAMPLE_SIZE") {
        config.sample_size = parse_optional_env("DATATABLES_SAMPLE_SIZE", &sample_size)?;
    }

    if let Ok(fraction) = env::var("DATATABLES_EXTREME_FRACTION") {
        config.extreme_fraction = parse_env("DATATABLES_EXTREME_FRACTION", &fraction)?;
    }

    if let Ok(ci) = env::var("DATATABLES_CONFIDENCE_INTERVAL") {
        config.confidence.confidence_interval = parse_env("DATATABLES_CONFIDENCE_INTERVAL", &ci)?;
    }

    if let Ok(e) = env::var("DATATABLES_MARGIN_OF_ERROR") {
        config.confidence.margin_of_error = parse_env("DATATABLES_MARGIN_OF_ERROR", &e)?;
    }

    if let Ok(p) = env::var("DATATABLES_POPULATION_PROPORTION") {
        config.confidence.population_proportion =
            parse_env("DATATABLES_POPULATION_PROPORTION", &p)?;
    }

    if let Ok(warnings) = env::var("DATATABLES_WARNINGS") {
        config.warnings = parse_env("DATATABLES_WARNINGS", &warnings)?;
    }

    Ok(())
}

/// Load configuration from environment variables
pub fn load_from_env() -> Result<DataTablesConfig> {
    let mut config = DataTablesConfig::default();
    apply_env(&mut config)?;
    Ok(config)
}

/// Load configuration from a file (YAML or TOML based on extension)
pub fn load_from_file(path: &Path) -> Result<DataTablesConfig> {
    if !path.exists() {
        return Err(Error::ConfigurationError(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        Error::ConfigurationError(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => load_from_yaml(&contents),
        Some("toml") => load_from_toml(&contents),
        Some("json") => serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigurationError(format!("Failed to parse JSON config: {}", e))),
        Some(ext) => Err(Error::ConfigurationError(format!(
            "Unsupported config file format: {}",
            ext
        ))),
        None => {
            // Try to parse as YAML first, then TOML
            load_from_yaml(&contents).or_else(|_| load_from_toml(&contents))
        }
    }
}

/// Load configuration from YAML string
pub fn load_from_yaml(yaml: &str) -> Result<DataTablesConfig> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse YAML config: {}", e)))
}

/// Load configuration from TOML string
pub fn load_from_toml(toml: &str) -> Result<DataTablesConfig> {
    toml::from_str(toml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse TOML config: {}", e)))
}

/// Load configuration with precedence: defaults -> file -> environment.
///
/// Without an explicit file the first one found by [`find_config_file`] is used.
pub fn load_with_precedence<P: AsRef<Path>>(config_file: Option<P>) -> Result<DataTablesConfig> {
    let config_file = match config_file {
        Some(path) => Some(path.as_ref().to_path_buf()),
        None => find_config_file(),
    };

    // Fields missing from the file keep their defaults
    let mut config = match config_file {
        Some(file_path) => {
            log::debug!("loading configuration from {}", file_path.display());
            load_from_file(&file_path)?
        }
        None => DataTablesConfig::default(),
    };

    // Environment has the highest precedence
    apply_env(&mut config)?;

    config.validate()?;

    Ok(config)
}

/// Save configuration to a file
pub fn save_to_file(config: &DataTablesConfig, path: &Path) -> Result<()> {
    let contents = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => config.to_yaml()?,
        Some("toml") => config.to_toml()?,
        Some("json") => serde_json::to_string_pretty(config)?,
        Some(ext) => {
            return Err(Error::ConfigurationError(format!(
                "Unsupported config file format: {}",
                ext
            )))
        }
        None => config.to_yaml()?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigurationError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    fs::write(path, contents).map_err(|e| {
        Error::ConfigurationError(format!(
            "Failed to write config file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Get configuration file paths in order of precedence
pub fn get_config_file_paths() -> Vec<std::path::PathBuf> {
    let mut paths: Vec<std::path::PathBuf> = vec![
        "datatables.yml".into(),
        "datatables.yaml".into(),
        "datatables.toml".into(),
    ];

    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join("jupyter-datatables");
        paths.push(dir.join("config.yml"));
        paths.push(dir.join("config.yaml"));
        paths.push(dir.join("config.toml"));
    }

    if let Ok(config_path) = env::var("DATATABLES_CONFIG_FILE") {
        paths.insert(0, config_path.into());
    }

    paths
}

/// First existing configuration file, if any
pub fn find_config_file() -> Option<std::path::PathBuf> {
    get_config_file_paths().into_iter().find(|p| p.exists())
}
