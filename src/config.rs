//! Calculator input bounds and defaults
//!
//! Mirrors the limits the dashboard puts on its inputs. Loaded from JSON, with
//! any missing field falling back to its default, then optionally overridden
//! from the environment:
//!   PROJECTION_DEFAULT_INFLATION, PROJECTION_DEFAULT_RETURN, PROJECTION_MAX_YEARS

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::projection::{ProjectionConfig, DEFAULT_INFLATION_RATE_PCT, MAX_PROJECTION_YEARS};

/// Amount input settings for one calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountInput {
    pub default_amount: f64,
    pub min_amount: f64,
    pub step: f64,
    pub default_years: u32,
}

/// Inclusive numeric range with a default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateInput {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearsInput {
    pub min: u32,
    pub max: u32,
}

/// Full calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default = "default_sip")]
    pub sip: AmountInput,

    #[serde(default = "default_lumpsum")]
    pub lumpsum: AmountInput,

    #[serde(default = "default_years")]
    pub years: YearsInput,

    /// Expected annual return, percent
    #[serde(default = "default_return_rate")]
    pub return_rate: RateInput,

    /// Expected annual inflation, percent
    #[serde(default = "default_inflation_rate")]
    pub inflation_rate: RateInput,
}

fn default_sip() -> AmountInput {
    AmountInput { default_amount: 5000.0, min_amount: 500.0, step: 500.0, default_years: 10 }
}

fn default_lumpsum() -> AmountInput {
    AmountInput { default_amount: 100_000.0, min_amount: 1000.0, step: 1000.0, default_years: 5 }
}

fn default_years() -> YearsInput {
    YearsInput { min: 1, max: 30 }
}

fn default_return_rate() -> RateInput {
    RateInput { min: 1.0, max: 30.0, default: 12.0 }
}

fn default_inflation_rate() -> RateInput {
    RateInput { min: 0.0, max: 15.0, default: DEFAULT_INFLATION_RATE_PCT }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            sip: default_sip(),
            lumpsum: default_lumpsum(),
            years: default_years(),
            return_rate: default_return_rate(),
            inflation_rate: default_inflation_rate(),
        }
    }
}

impl CalculatorConfig {
    /// Load from a JSON file and check its bounds
    pub fn from_json_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every range is well ordered and every default lies inside it
    pub fn validate(&self) -> Result<(), ConfigError> {
        let years = &self.years;
        if years.min == 0 {
            return Err(invalid_bounds("years", "min must be at least 1".to_string()));
        }
        if years.min > years.max {
            return Err(invalid_bounds("years", format!("min {} exceeds max {}", years.min, years.max)));
        }
        if years.max > MAX_PROJECTION_YEARS {
            return Err(invalid_bounds(
                "years",
                format!("max {} exceeds the supported {}", years.max, MAX_PROJECTION_YEARS),
            ));
        }

        validate_amount_input("sip", &self.sip, years)?;
        validate_amount_input("lumpsum", &self.lumpsum, years)?;
        validate_rate_input("return_rate", &self.return_rate)?;
        validate_rate_input("inflation_rate", &self.inflation_rate)
    }

    /// Apply environment overrides on top of the current values
    pub fn apply_env_overrides(mut self) -> Self {
        if let Some(inflation) = env_f64("PROJECTION_DEFAULT_INFLATION") {
            self.inflation_rate.default = inflation;
        }
        if let Some(rate) = env_f64("PROJECTION_DEFAULT_RETURN") {
            self.return_rate.default = rate;
        }
        if let Some(max) = env_parse::<u32>("PROJECTION_MAX_YEARS") {
            self.years.max = max;
        }
        self
    }

    /// Engine settings derived from this configuration
    pub fn projection_config(&self) -> ProjectionConfig {
        ProjectionConfig {
            default_inflation_rate_pct: self.inflation_rate.default,
            max_years: self.years.max,
        }
    }

    /// Check SIP calculator inputs
    pub fn validate_sip(&self, amount: f64, years: u32, return_rate: f64, inflation: f64) -> Result<(), ConfigError> {
        check_min("monthly_investment", amount, self.sip.min_amount)?;
        self.validate_horizon_and_rates(years, return_rate, inflation)
    }

    /// Check lumpsum calculator inputs
    pub fn validate_lumpsum(&self, amount: f64, years: u32, return_rate: f64, inflation: f64) -> Result<(), ConfigError> {
        check_min("lumpsum_investment", amount, self.lumpsum.min_amount)?;
        self.validate_horizon_and_rates(years, return_rate, inflation)
    }

    /// Check goal-seeking inputs (targets have no upper bound)
    pub fn validate_goal(&self, target: f64, return_rate: f64) -> Result<(), ConfigError> {
        check_min("target_amount", target, f64::MIN_POSITIVE)?;
        check_range("return_rate", return_rate, self.return_rate.min, self.return_rate.max)
    }

    fn validate_horizon_and_rates(&self, years: u32, return_rate: f64, inflation: f64) -> Result<(), ConfigError> {
        check_range("years", years as f64, self.years.min as f64, self.years.max as f64)?;
        check_range("return_rate", return_rate, self.return_rate.min, self.return_rate.max)?;
        check_range("inflation_rate", inflation, self.inflation_rate.min, self.inflation_rate.max)
    }
}

fn invalid_bounds(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidBounds { field, reason }
}

fn validate_amount_input(field: &'static str, input: &AmountInput, years: &YearsInput) -> Result<(), ConfigError> {
    if !(input.min_amount.is_finite() && input.min_amount > 0.0) {
        return Err(invalid_bounds(field, format!("min_amount {} must be positive", input.min_amount)));
    }
    if !(input.step.is_finite() && input.step > 0.0) {
        return Err(invalid_bounds(field, format!("step {} must be positive", input.step)));
    }
    if !(input.default_amount.is_finite() && input.default_amount >= input.min_amount) {
        return Err(invalid_bounds(
            field,
            format!("default_amount {} is below min_amount {}", input.default_amount, input.min_amount),
        ));
    }
    if input.default_years < years.min || input.default_years > years.max {
        return Err(invalid_bounds(
            field,
            format!("default_years {} is outside [{}, {}]", input.default_years, years.min, years.max),
        ));
    }
    Ok(())
}

fn validate_rate_input(field: &'static str, input: &RateInput) -> Result<(), ConfigError> {
    if !(input.min.is_finite() && input.max.is_finite() && input.min <= input.max) {
        return Err(invalid_bounds(field, format!("range [{}, {}] is empty", input.min, input.max)));
    }
    if !(input.default >= input.min && input.default <= input.max) {
        return Err(invalid_bounds(
            field,
            format!("default {} is outside [{}, {}]", input.default, input.min, input.max),
        ));
    }
    Ok(())
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

fn check_min(field: &'static str, value: f64, min: f64) -> Result<(), ConfigError> {
    check_range(field, value, min, f64::MAX)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    env_parse::<f64>(key).filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_dashboard() {
        let config = CalculatorConfig::default();
        assert_eq!(config.sip.default_amount, 5000.0);
        assert_eq!(config.sip.default_years, 10);
        assert_eq!(config.lumpsum.default_amount, 100_000.0);
        assert_eq!(config.lumpsum.default_years, 5);
        assert_eq!(config.years.max, 30);
        assert_eq!(config.return_rate.default, 12.0);
        assert_eq!(config.inflation_rate.default, 6.0);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let path = env::temp_dir().join("investment_projection_partial_config.json");
        let mut file = File::create(&path).unwrap();
        writeln!(file, r#"{{"years": {{"min": 1, "max": 40}}}}"#).unwrap();

        let config = CalculatorConfig::from_json_path(&path).unwrap();
        assert_eq!(config.years.max, 40);
        assert_eq!(config.sip, default_sip());
        assert_eq!(config.inflation_rate.default, 6.0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CalculatorConfig::from_json_path(Path::new("/nonexistent/calculator.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let path = env::temp_dir().join("investment_projection_bad_config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(CalculatorConfig::from_json_path(&path), Err(ConfigError::Json(_))));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_validate_sip() {
        let config = CalculatorConfig::default();
        assert!(config.validate_sip(5000.0, 10, 12.0, 6.0).is_ok());
        assert!(matches!(
            config.validate_sip(100.0, 10, 12.0, 6.0),
            Err(ConfigError::OutOfRange { field: "monthly_investment", .. })
        ));
        assert!(matches!(
            config.validate_sip(5000.0, 31, 12.0, 6.0),
            Err(ConfigError::OutOfRange { field: "years", .. })
        ));
        assert!(matches!(
            config.validate_sip(5000.0, 10, 12.0, 16.0),
            Err(ConfigError::OutOfRange { field: "inflation_rate", .. })
        ));
    }

    #[test]
    fn test_validate_lumpsum_and_goal() {
        let config = CalculatorConfig::default();
        assert!(config.validate_lumpsum(100_000.0, 5, 12.0, 6.0).is_ok());
        assert!(config.validate_lumpsum(999.0, 5, 12.0, 6.0).is_err());
        assert!(config.validate_goal(1_000_000.0, 12.0).is_ok());
        assert!(config.validate_goal(0.0, 12.0).is_err());
        assert!(config.validate_goal(1_000_000.0, 0.5).is_err());
    }

    #[test]
    fn test_projection_config_follows_bounds() {
        let mut config = CalculatorConfig::default();
        config.inflation_rate.default = 4.5;
        let projection = config.projection_config();
        assert_eq!(projection.default_inflation_rate_pct, 4.5);
        assert_eq!(projection.max_years, 30);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(CalculatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_year_range_is_rejected() {
        let mut config = CalculatorConfig::default();
        config.years.max = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds { field: "years", .. })));

        config.years = YearsInput { min: 20, max: 10 };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds { field: "years", .. })));

        config.years = YearsInput { min: 1, max: MAX_PROJECTION_YEARS + 1 };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds { field: "years", .. })));
    }

    #[test]
    fn test_default_outside_its_range_is_rejected() {
        let mut config = CalculatorConfig::default();
        config.inflation_rate.default = 20.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds { field: "inflation_rate", .. })
        ));

        let mut config = CalculatorConfig::default();
        config.years.max = 8;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds { field: "sip", .. })));

        let mut config = CalculatorConfig::default();
        config.lumpsum.default_amount = 10.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds { field: "lumpsum", .. })));
    }

    #[test]
    fn test_loading_checks_bounds() {
        let path = env::temp_dir().join("investment_projection_inverted_config.json");
        std::fs::write(&path, r#"{"return_rate": {"min": 30.0, "max": 1.0, "default": 12.0}}"#).unwrap();

        let result = CalculatorConfig::from_json_path(&path);
        assert!(matches!(result, Err(ConfigError::InvalidBounds { field: "return_rate", .. })));

        std::fs::remove_file(&path).ok();
    }
}
