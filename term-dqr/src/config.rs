//! Configuration for report generation and export.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Default destination for the continuous feature table.
pub const CONTINUOUS_DEFAULT_PATH: &str = "continuous_data.csv";

/// Default destination for the categorical feature table.
pub const CATEGORICAL_DEFAULT_PATH: &str = "categorical_data.csv";

/// Rule used to break frequency ties when picking `mode` and `mode_2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeTieBreak {
    /// The value whose first occurrence comes earliest in row order wins.
    #[default]
    FirstOccurrence,
    /// The value with the smallest display string wins.
    Lexicographic,
}

/// Where and how the two report tables are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub continuous_path: PathBuf,
    pub categorical_path: PathBuf,
    /// Field delimiter for the CSV output
    pub delimiter: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            continuous_path: PathBuf::from(CONTINUOUS_DEFAULT_PATH),
            categorical_path: PathBuf::from(CATEGORICAL_DEFAULT_PATH),
            delimiter: b',',
        }
    }
}

/// Configuration for building a data quality report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Decimal places kept for non-temporal statistics and percentages
    pub decimals: u32,
    /// Cardinality that forces a column into the categorical group
    pub binary_cardinality: u64,
    /// Tie-break rule for mode selection
    pub tie_break: ModeTieBreak,
    /// Treat floating point NaN as a missing value
    pub nan_as_missing: bool,
    pub export: ExportConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            decimals: 2,
            binary_cardinality: 2,
            tie_break: ModeTieBreak::FirstOccurrence,
            nan_as_missing: true,
            export: ExportConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Creates a new builder starting from the default configuration.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder {
            config: Self::default(),
        }
    }

    /// Checks that the configuration can produce a meaningful report.
    pub fn validate(&self) -> Result<()> {
        if self.decimals > 15 {
            return Err(ReportError::Configuration(format!(
                "decimals must be at most 15, got {}",
                self.decimals
            )));
        }
        if self.binary_cardinality == 0 {
            return Err(ReportError::Configuration(
                "binary_cardinality must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`ReportConfig`].
#[derive(Debug, Clone)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// Set the number of decimal places used for rounding
    pub fn decimals(mut self, decimals: u32) -> Self {
        self.config.decimals = decimals;
        self
    }

    /// Set the cardinality that forces categorical routing
    pub fn binary_cardinality(mut self, cardinality: u64) -> Self {
        self.config.binary_cardinality = cardinality;
        self
    }

    /// Set the mode tie-break rule
    pub fn tie_break(mut self, tie_break: ModeTieBreak) -> Self {
        self.config.tie_break = tie_break;
        self
    }

    /// Choose whether NaN counts as missing
    pub fn nan_as_missing(mut self, enabled: bool) -> Self {
        self.config.nan_as_missing = enabled;
        self
    }

    /// Set the continuous table destination
    pub fn continuous_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.export.continuous_path = path.into();
        self
    }

    /// Set the categorical table destination
    pub fn categorical_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.export.categorical_path = path.into();
        self
    }

    /// Set the CSV delimiter used on export
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.config.export.delimiter = delimiter;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ReportConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.decimals, 2);
        assert_eq!(config.binary_cardinality, 2);
        assert_eq!(config.tie_break, ModeTieBreak::FirstOccurrence);
        assert!(config.nan_as_missing);
        assert_eq!(
            config.export.continuous_path,
            PathBuf::from("continuous_data.csv")
        );
        assert_eq!(
            config.export.categorical_path,
            PathBuf::from("categorical_data.csv")
        );
        assert_eq!(config.export.delimiter, b',');
    }

    #[test]
    fn test_builder_overrides() {
        let config = ReportConfig::builder()
            .decimals(3)
            .tie_break(ModeTieBreak::Lexicographic)
            .continuous_path("out/cont.csv")
            .delimiter(b';')
            .build()
            .unwrap();

        assert_eq!(config.decimals, 3);
        assert_eq!(config.tie_break, ModeTieBreak::Lexicographic);
        assert_eq!(config.export.continuous_path, PathBuf::from("out/cont.csv"));
        assert_eq!(config.export.delimiter, b';');
    }

    #[test]
    fn test_invalid_configurations() {
        assert!(ReportConfig::builder().decimals(16).build().is_err());
        assert!(ReportConfig::builder().binary_cardinality(0).build().is_err());
    }
}
