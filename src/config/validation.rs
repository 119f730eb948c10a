//! Configuration validation utilities
//!
//! Invalid settings are rejected up front and never silently corrected.

use super::*;
use crate::core::error::{Error, Result};

/// Validate the entire configuration
pub fn validate_config(config: &DataTablesConfig) -> Result<()> {
    validate_sampling(config)?;
    validate_confidence(&config.confidence)?;
    validate_options(&config.options)?;

    Ok(())
}

/// Validate limit, sample size and extreme fraction
pub fn validate_sampling(config: &DataTablesConfig) -> Result<()> {
    if config.limit == Some(0) {
        return Err(Error::ConfigurationError(
            "limit must be greater than 0, use no limit to disable sampling".to_string(),
        ));
    }

    if config.sample_size == Some(0) {
        return Err(Error::ConfigurationError(
            "sample_size must be greater than 0".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&config.extreme_fraction) {
        return Err(Error::ConfigurationError(format!(
            "extreme_fraction must be within [0, 1], got {}",
            config.extreme_fraction
        )));
    }

    if config.extreme_fraction > 0.5 {
        log::warn!(
            "extreme_fraction of {} leaves no room for random rows in the sample",
            config.extreme_fraction
        );
    }

    if let (Some(limit), Some(sample_size)) = (config.limit, config.sample_size) {
        if sample_size > limit {
            log::warn!(
                "sample_size {} is larger than the sampling limit {}",
                sample_size,
                limit
            );
        }
    }

    Ok(())
}

/// Validate the estimation parameters
pub fn validate_confidence(config: &ConfidenceConfig) -> Result<()> {
    let open_unit = |v: f64| v > 0.0 && v < 1.0;

    if !open_unit(config.confidence_interval) {
        return Err(Error::ConfigurationError(format!(
            "confidence_interval must be in (0, 1), got {}",
            config.confidence_interval
        )));
    }

    if !open_unit(config.margin_of_error) {
        return Err(Error::ConfigurationError(format!(
            "margin_of_error must be in (0, 1), got {}",
            config.margin_of_error
        )));
    }

    if !(0.0..=1.0).contains(&config.population_proportion) {
        return Err(Error::ConfigurationError(format!(
            "population_proportion must be within [0, 1], got {}",
            config.population_proportion
        )));
    }

    Ok(())
}

/// Validate the shape of the DataTables options
pub fn validate_options(options: &serde_json::Value) -> Result<()> {
    let map = options.as_object().ok_or_else(|| {
        Error::ConfigurationError("options must be a JSON object".to_string())
    })?;

    if let Some(defs) = map.get("columnDefs") {
        let defs = defs.as_array().ok_or_else(|| {
            Error::ConfigurationError("options.columnDefs must be an array".to_string())
        })?;
        if defs.iter().any(|d| !d.is_object()) {
            return Err(Error::ConfigurationError(
                "every entry of options.columnDefs must be an object".to_string(),
            ));
        }
    }

    if let Some(buttons) = map.get("buttons") {
        if !buttons.is_array() {
            return Err(Error::ConfigurationError(
                "options.buttons must be an array".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_rules() {
        let mut config = DataTablesConfig::default();
        assert!(validate_sampling(&config).is_ok());

        config.limit = Some(0);
        assert!(validate_sampling(&config).is_err());
        config.limit = None;
        assert!(validate_sampling(&config).is_ok());

        config.sample_size = Some(0);
        assert!(validate_sampling(&config).is_err());
        config.sample_size = Some(10);

        config.extreme_fraction = 1.5;
        assert!(validate_sampling(&config).is_err());
        config.extreme_fraction = -0.1;
        assert!(validate_sampling(&config).is_err());
        config.extreme_fraction = f64::NAN;
        assert!(validate_sampling(&config).is_err());
        config.extreme_fraction = 0.0;
        assert!(validate_sampling(&config).is_ok());
    }

    #[test]
    fn test_confidence_rules() {
        let mut confidence = ConfidenceConfig::default();
        assert!(validate_confidence(&confidence).is_ok());

        confidence.confidence_interval = 1.0;
        assert!(validate_confidence(&confidence).is_err());
        confidence.confidence_interval = 0.95;

        confidence.margin_of_error = 0.0;
        assert!(validate_confidence(&confidence).is_err());
        confidence.margin_of_error = 0.05;

        confidence.population_proportion = 1.2;
        assert!(validate_confidence(&confidence).is_err());
        confidence.population_proportion = 1.0;
        assert!(validate_confidence(&confidence).is_ok());
    }

    #[test]
    fn test_options_shape() {
        assert!(validate_options(&default_options()).is_ok());
        assert!(validate_options(&serde_json::json!([])).is_err());
        assert!(validate_options(&serde_json::json!({"columnDefs": {}})).is_err());
        assert!(validate_options(&serde_json::json!({"columnDefs": [1]})).is_err());
        assert!(validate_options(&serde_json::json!({"buttons": "csv"})).is_err());
    }
}
