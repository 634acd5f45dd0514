/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Analysis configuration
//!
//! Every field has a default, so an empty JSON object `{}` is a valid
//! configuration file.

use super::errors::{InputError, Result};
use crate::phonon::{
    GruneisenAggregator, GruneisenDataset, ModeGruneisenCalculator, SlackOptions,
    ZeroFrequencyPolicy, DEFAULT_ZERO_TOLERANCE,
};
use crate::utils::FrequencyUnit;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_zero_tolerance() -> f64 {
    DEFAULT_ZERO_TOLERANCE
}

fn default_temperature() -> f64 {
    300.0
}

/// Settings shared by the analysis commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Gruneisen value reported for modes with vanishing reference frequency
    #[serde(default)]
    pub zero_frequency_policy: ZeroFrequencyPolicy,
    /// Frequencies at or below this magnitude (THz) count as zero
    #[serde(default = "default_zero_tolerance")]
    pub zero_frequency_tolerance: f64,
    /// Upper frequency (THz) of the low-frequency Debye fit
    #[serde(default)]
    pub debye_fit_max_frequency: Option<f64>,
    /// Temperature (K) for heat capacity and thermal conductivity
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Frequency unit of exported plot data
    #[serde(default)]
    pub units: FrequencyUnit,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            zero_frequency_policy: ZeroFrequencyPolicy::Zero,
            zero_frequency_tolerance: DEFAULT_ZERO_TOLERANCE,
            debye_fit_max_frequency: None,
            temperature: default_temperature(),
            units: FrequencyUnit::Thz,
        }
    }
}

impl AnalysisConfig {
    /// Read and validate a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.zero_frequency_tolerance.is_finite() && self.zero_frequency_tolerance >= 0.0) {
            return Err(InputError::InvalidConfig(format!(
                "zero_frequency_tolerance must be a non-negative number, got {}",
                self.zero_frequency_tolerance
            )));
        }
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return Err(InputError::InvalidConfig(format!(
                "temperature must be positive, got {}",
                self.temperature
            )));
        }
        if let Some(max) = self.debye_fit_max_frequency {
            if !(max.is_finite() && max > 0.0) {
                return Err(InputError::InvalidConfig(format!(
                    "debye_fit_max_frequency must be positive, got {}",
                    max
                )));
            }
        }
        Ok(())
    }

    /// Mode calculator with the configured zero-frequency handling
    pub fn calculator(&self) -> ModeGruneisenCalculator {
        ModeGruneisenCalculator::new(self.zero_frequency_policy, self.zero_frequency_tolerance)
    }

    /// Aggregator over `dataset` with the configured Debye fit window
    pub fn aggregator<'a>(&self, dataset: &'a GruneisenDataset) -> GruneisenAggregator<'a> {
        GruneisenAggregator::new(dataset).with_debye_fit_max_frequency(self.debye_fit_max_frequency)
    }

    /// Slack options at the configured temperature
    pub fn slack_options(&self) -> SlackOptions {
        SlackOptions::at_temperature(self.temperature)
    }
}
