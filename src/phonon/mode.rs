/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Mode Gruneisen parameters from frequencies sampled at several volumes
//!
//! γ = −d ln ω / d ln V is evaluated either by a central finite difference
//! between a plus- and a minus-strained cell, or by a least-squares line
//! through ln ω versus ln V for three or more cells.

use super::errors::{PhononError, Result};
use crate::utils::{linear_regression, UtilsError};
use log::debug;
use serde::{Deserialize, Serialize};

/// Default magnitude (THz) below which a reference frequency counts as zero
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-6;

/// Value reported when the reference frequency of a mode vanishes
///
/// This happens for the acoustic modes at Γ, where γ is undefined. The
/// finite-difference convention reports 0 there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroFrequencyPolicy {
    #[default]
    Zero,
    Nan,
}

impl ZeroFrequencyPolicy {
    /// The Gruneisen value emitted under this policy
    pub fn value(&self) -> f64 {
        match self {
            ZeroFrequencyPolicy::Zero => 0.0,
            ZeroFrequencyPolicy::Nan => f64::NAN,
        }
    }
}

/// Frequency of one mode in a cell of a given volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencySample {
    /// Cell volume in Å³
    pub volume: f64,
    /// Mode frequency in THz
    pub frequency: f64,
}

impl FrequencySample {
    pub fn new(volume: f64, frequency: f64) -> Self {
        Self { volume, frequency }
    }
}

/// How a mode Gruneisen parameter is extracted from strained cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GruneisenMethod {
    /// Central difference between exactly one plus/minus pair
    #[default]
    TwoPoint,
    /// Linear regression of ln ω against ln V over three or more cells
    Fit,
}

impl GruneisenMethod {
    /// Map the conventional `fit` flag onto a method
    pub fn from_fit_flag(fit: bool) -> Self {
        if fit {
            GruneisenMethod::Fit
        } else {
            GruneisenMethod::TwoPoint
        }
    }
}

/// Calculator for single-mode Gruneisen parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeGruneisenCalculator {
    policy: ZeroFrequencyPolicy,
    zero_tolerance: f64,
}

impl Default for ModeGruneisenCalculator {
    fn default() -> Self {
        Self {
            policy: ZeroFrequencyPolicy::Zero,
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
        }
    }
}

impl ModeGruneisenCalculator {
    /// Create a calculator
    ///
    /// # Arguments
    ///
    /// * `policy` - Value emitted when the reference frequency vanishes
    /// * `zero_tolerance` - Frequencies with a magnitude at or below this (THz) count as zero
    pub fn new(policy: ZeroFrequencyPolicy, zero_tolerance: f64) -> Self {
        Self {
            policy,
            zero_tolerance: zero_tolerance.abs(),
        }
    }

    pub fn policy(&self) -> ZeroFrequencyPolicy {
        self.policy
    }

    pub fn zero_tolerance(&self) -> f64 {
        self.zero_tolerance
    }

    /// Whether a frequency is numerically zero for this calculator
    pub fn is_zero_frequency(&self, frequency: f64) -> bool {
        frequency.abs() <= self.zero_tolerance
    }

    /// Whether `samples` fall under the zero-frequency policy for `method`
    ///
    /// Two-point checks the mean of the pair, a fit checks every sample.
    pub fn policy_applies(&self, method: GruneisenMethod, samples: &[FrequencySample]) -> bool {
        match method {
            GruneisenMethod::TwoPoint => match samples {
                [plus, minus] => self.is_zero_frequency((plus.frequency + minus.frequency) / 2.0),
                _ => false,
            },
            GruneisenMethod::Fit => samples.iter().any(|s| s.frequency <= self.zero_tolerance),
        }
    }

    /// Two-point central difference
    ///
    /// γ = −(V₀ / ω_ref)·(ω₊ − ω₋)/(V₊ − V₋) with ω_ref = (ω₊ + ω₋)/2.
    ///
    /// # Arguments
    ///
    /// * `plus` - The mode in the expanded cell
    /// * `minus` - The mode in the compressed cell
    /// * `equilibrium_volume` - V₀ in Å³
    pub fn two_point(
        &self,
        plus: FrequencySample,
        minus: FrequencySample,
        equilibrium_volume: f64,
    ) -> Result<f64> {
        let dv = plus.volume - minus.volume;
        if dv == 0.0 {
            return Err(PhononError::DegenerateFit(format!(
                "plus and minus volumes are both {} Å³",
                plus.volume
            )));
        }

        let reference = (plus.frequency + minus.frequency) / 2.0;
        if self.is_zero_frequency(reference) {
            debug!(
                "Reference frequency {:e} THz is zero, emitting {:?} policy value",
                reference, self.policy
            );
            return Ok(self.policy.value());
        }

        Ok(-(equilibrium_volume / reference) * (plus.frequency - minus.frequency) / dv)
    }

    /// Least-squares slope of ln ω versus ln V, negated
    ///
    /// # Arguments
    ///
    /// * `samples` - At least three (volume, frequency) pairs of the same mode
    pub fn fit(&self, samples: &[FrequencySample]) -> Result<f64> {
        if samples.len() < 3 {
            return Err(PhononError::MalformedInput(format!(
                "fit needs at least 3 volumes, got {}",
                samples.len()
            )));
        }
        if let Some(sample) = samples
            .iter()
            .find(|s| !(s.volume.is_finite() && s.volume > 0.0))
        {
            return Err(PhononError::MalformedInput(format!(
                "cell volume must be positive, got {}",
                sample.volume
            )));
        }
        if samples.iter().all(|s| s.volume == samples[0].volume) {
            return Err(PhononError::DegenerateFit(format!(
                "all {} volumes equal {} Å³",
                samples.len(),
                samples[0].volume
            )));
        }

        // ln ω is undefined for vanishing or imaginary modes
        if samples.iter().any(|s| s.frequency <= self.zero_tolerance) {
            debug!(
                "Non-positive frequency in fit samples, emitting {:?} policy value",
                self.policy
            );
            return Ok(self.policy.value());
        }

        let ln_volumes: Vec<f64> = samples.iter().map(|s| s.volume.ln()).collect();
        let ln_frequencies: Vec<f64> = samples.iter().map(|s| s.frequency.ln()).collect();

        let (slope, _) =
            linear_regression(&ln_volumes, &ln_frequencies).map_err(|err| match err {
                UtilsError::Degenerate(msg) => PhononError::DegenerateFit(format!("ln V {}", msg)),
                other => PhononError::from(other),
            })?;

        Ok(-slope)
    }

    /// Dispatch on a [`GruneisenMethod`]
    ///
    /// For [`GruneisenMethod::TwoPoint`] `samples` must hold exactly the
    /// plus and the minus cell, in that order.
    pub fn mode_gruneisen(
        &self,
        method: GruneisenMethod,
        samples: &[FrequencySample],
        equilibrium_volume: f64,
    ) -> Result<f64> {
        match method {
            GruneisenMethod::TwoPoint => match samples {
                [plus, minus] => self.two_point(*plus, *minus, equilibrium_volume),
                _ => Err(PhononError::MalformedInput(format!(
                    "two-point method needs exactly one plus/minus pair, got {} samples",
                    samples.len()
                ))),
            },
            GruneisenMethod::Fit => self.fit(samples),
        }
    }
}
