//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading loan
//! policies from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{LoanPolicy, PipelineSettings, RatePolicy};

/// Loads and provides access to the loan policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── pipeline.yaml   # Exchange rate, term and repayment method
/// └── rates.yaml      # Base rate and the four rule tables
/// ```
///
/// # Example
///
/// ```no_run
/// use loan_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Exchange rate: {}", loader.policy().settings().exchange_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: LoanPolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or an unsupported repayment method
    /// - The configured term is zero years or the exchange rate is not positive
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let pipeline_path = path.join("pipeline.yaml");
        let settings = Self::load_yaml::<PipelineSettings>(&pipeline_path)?;
        Self::check_settings(&settings, &pipeline_path)?;

        let rates_path = path.join("rates.yaml");
        let rates = Self::load_yaml::<RatePolicy>(&rates_path)?;

        debug!(
            config_dir = %path.display(),
            exchange_rate = %settings.exchange_rate,
            repayment_years = settings.repayment_years,
            repayment_method = %settings.repayment_method,
            "Loaded loan policy"
        );

        Ok(Self {
            policy: LoanPolicy::new(settings, rates),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_settings(settings: &PipelineSettings, path: &Path) -> EngineResult<()> {
        let message = if settings.repayment_years == 0 {
            "repayment_years must be at least 1"
        } else if settings.exchange_rate <= rust_decimal::Decimal::ZERO {
            "exchange_rate must be positive"
        } else {
            return Ok(());
        };

        Err(EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: message.to_string(),
        })
    }

    /// Returns the loaded loan policy.
    pub fn policy(&self) -> &LoanPolicy {
        &self.policy
    }

    /// Consumes the loader, returning the loan policy.
    pub fn into_policy(self) -> LoanPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepaymentMethod;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "loan_engine_config_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        let settings = loader.policy().settings();
        assert_eq!(settings.exchange_rate, dec("1330.21"));
        assert_eq!(settings.repayment_years, 5);
        assert_eq!(settings.repayment_method, RepaymentMethod::EqualInstallment);
        assert_eq!(settings.currency.code, "KRW");
    }

    #[test]
    fn test_shipped_configuration_equals_default_policy() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.policy(), &LoanPolicy::default());
    }

    #[test]
    fn test_rate_tables_loaded_in_file_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let rates = loader.policy().rates();

        assert_eq!(rates.base_rate, dec("4.0"));
        assert_eq!(rates.credit_score.tiers[0].above, dec("750"));
        assert_eq!(rates.credit_score.tiers[0].adjustment, dec("-1.0"));
        assert_eq!(rates.credit_score.otherwise, dec("1.0"));
        assert_eq!(rates.loan_amount.tiers[0].above, dec("50000"));
        assert_eq!(rates.loan_amount.tiers[1].above, dec("100000"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("pipeline.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_method_in_config_is_parse_error() {
        let dir = scratch_dir("bad_method");
        fs::write(
            dir.join("pipeline.yaml"),
            "exchange_rate: \"1330.21\"\nrepayment_years: 5\nrepayment_method: balloon\ncurrency:\n  code: KRW\n  unit: 원\n",
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.contains("pipeline.yaml"));
                assert!(message.contains("balloon"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_year_term_is_rejected() {
        let dir = scratch_dir("zero_term");
        fs::write(
            dir.join("pipeline.yaml"),
            "exchange_rate: \"1330.21\"\nrepayment_years: 0\nrepayment_method: equal_principal\ncurrency:\n  code: KRW\n  unit: 원\n",
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("repayment_years"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_rates_file_returns_not_found() {
        let dir = scratch_dir("no_rates");
        fs::write(
            dir.join("pipeline.yaml"),
            "exchange_rate: \"1000\"\nrepayment_years: 3\nrepayment_method: equal_principal\ncurrency:\n  code: KRW\n  unit: 원\n",
        )
        .unwrap();
        let _ = fs::remove_file(dir.join("rates.yaml"));

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.contains("rates.yaml")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }
}
