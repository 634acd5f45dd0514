/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Statistics over a Gruneisen dataset
//!
//! The aggregator borrows an immutable [`GruneisenDataset`] and derives
//! everything else on demand: weighted average Gruneisen parameters under a
//! frequency cutoff, Debye temperatures from the density of states, the heat
//! capacity and Slack's estimate of the lattice thermal conductivity.
//! Nothing is cached, so one dataset can back any number of aggregators.

use super::dataset::GruneisenDataset;
use super::errors::{PhononError, Result};
use crate::utils::constants::{
    ACOUSTIC_BRANCHES, AMU_TO_KG, ANGSTROM, BOLTZMANN, BOLTZMANN_EV_PER_K, BOLTZMANN_HZ_PER_K,
    HBAR, TERA,
};
use crate::utils::thz_to_kelvin;
use log::debug;
use ndarray::s;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Which modes enter an average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyLimit {
    /// Every mode with a non-negative frequency
    #[default]
    All,
    /// Bands 0, 1 and 2 at every q-point
    Acoustic,
    /// Modes at or below the Debye frequency of the DOS fit
    Debye,
}

impl FromStr for FrequencyLimit {
    type Err = PhononError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" | "all" => Ok(FrequencyLimit::All),
            "acoustic" => Ok(FrequencyLimit::Acoustic),
            "debye" => Ok(FrequencyLimit::Debye),
            _ => Err(PhononError::InvalidOption(format!(
                "unknown frequency limit '{}', expected none, acoustic or debye",
                s
            ))),
        }
    }
}

impl fmt::Display for FrequencyLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrequencyLimit::All => "none",
            FrequencyLimit::Acoustic => "acoustic",
            FrequencyLimit::Debye => "debye",
        };
        write!(f, "{}", name)
    }
}

/// Per-mode weight in an average
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Weighting {
    /// Multiplicity of the mode's q-point
    #[default]
    Multiplicity,
    /// Multiplicity times the mode heat capacity at `temperature` (K);
    /// `None` uses the acoustic Debye temperature
    HeatCapacity { temperature: Option<f64> },
}

/// Options of [`GruneisenAggregator::average_gruneisen`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageOptions {
    /// Root-mean-square instead of arithmetic mean
    pub squared: bool,
    pub limit: FrequencyLimit,
    pub weighting: Weighting,
}

impl Default for AverageOptions {
    fn default() -> Self {
        Self {
            squared: true,
            limit: FrequencyLimit::All,
            weighting: Weighting::Multiplicity,
        }
    }
}

impl AverageOptions {
    /// Default options with another cutoff
    pub fn with_limit(limit: FrequencyLimit) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

/// Options of [`GruneisenAggregator::thermal_conductivity_slack`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlackOptions {
    /// Temperature in K; `None` evaluates the model at the acoustic Debye
    /// temperature, which drops the 1/T factor
    pub temperature: Option<f64>,
    /// Debye temperature in K; the phonopy Debye temperature if `None`
    pub debye_temperature: Option<f64>,
    /// How the Gruneisen parameter entering the model is averaged
    pub average: AverageOptions,
}

impl Default for SlackOptions {
    fn default() -> Self {
        Self {
            temperature: None,
            debye_temperature: None,
            average: AverageOptions::default(),
        }
    }
}

impl SlackOptions {
    pub fn at_temperature(temperature: f64) -> Self {
        Self {
            temperature: Some(temperature),
            ..Self::default()
        }
    }
}

/// Above this ħω/k_BT a mode's heat capacity underflows to zero
const MAX_REDUCED_FREQUENCY: f64 = 1400.0;

/// Harmonic heat capacity of one mode in eV/K
fn mode_heat_capacity(frequency: f64, temperature: f64) -> f64 {
    if frequency <= 0.0 || temperature <= 0.0 {
        return 0.0;
    }
    let x = frequency * TERA / (BOLTZMANN_HZ_PER_K * temperature);
    if x > MAX_REDUCED_FREQUENCY {
        return 0.0;
    }
    let sinh = (x / 2.0).sinh();
    BOLTZMANN_EV_PER_K * x * x / (4.0 * sinh * sinh)
}

/// Slack prefactor with the Julian correction, in SI units
fn slack_prefactor(gamma: f64) -> f64 {
    let julian = 1.0 - 0.514 / gamma + 0.228 / (gamma * gamma);
    0.849 * 3.0 * 4f64.cbrt() / (20.0 * PI.powi(3) * julian) * (BOLTZMANN / HBAR).powi(3)
}

/// Stateless statistics engine over one dataset
#[derive(Debug, Clone, Copy)]
pub struct GruneisenAggregator<'a> {
    dataset: &'a GruneisenDataset,
    debye_fit_max_frequency: Option<f64>,
}

impl<'a> GruneisenAggregator<'a> {
    pub fn new(dataset: &'a GruneisenDataset) -> Self {
        Self {
            dataset,
            debye_fit_max_frequency: None,
        }
    }

    /// Restrict the low-frequency Debye fit to frequencies below `max_frequency` (THz)
    pub fn with_debye_fit_max_frequency(mut self, max_frequency: Option<f64>) -> Self {
        self.debye_fit_max_frequency = max_frequency;
        self
    }

    pub fn dataset(&self) -> &'a GruneisenDataset {
        self.dataset
    }

    /// Weighted average Gruneisen parameter
    ///
    /// Modes with a negative (imaginary) frequency or an undefined Gruneisen
    /// parameter never contribute. With `squared` the result is
    /// sqrt(Σwγ²/Σw), otherwise Σwγ/Σw.
    pub fn average_gruneisen(&self, options: &AverageOptions) -> Result<f64> {
        let n_bands = self.dataset.num_bands();
        let n_cols = match options.limit {
            FrequencyLimit::Acoustic => ACOUSTIC_BRANCHES.min(n_bands),
            FrequencyLimit::All | FrequencyLimit::Debye => n_bands,
        };
        let cutoff = match options.limit {
            FrequencyLimit::Debye => self.debye_frequency()?,
            FrequencyLimit::All | FrequencyLimit::Acoustic => f64::INFINITY,
        };
        let temperature = match options.weighting {
            Weighting::Multiplicity => None,
            Weighting::HeatCapacity { temperature: Some(t) } => {
                if !(t.is_finite() && t > 0.0) {
                    return Err(PhononError::InvalidOption(format!(
                        "heat-capacity weighting needs a positive temperature, got {}",
                        t
                    )));
                }
                Some(t)
            }
            Weighting::HeatCapacity { temperature: None } => Some(self.acoustic_debye_temp()?),
        };

        let frequencies = self.dataset.frequencies();
        let frequencies = frequencies.slice(s![.., ..n_cols]);
        let gruneisen = self.dataset.gruneisen();
        let gruneisen = gruneisen.slice(s![.., ..n_cols]);
        let multiplicities = self.dataset.multiplicities();

        let mut weight_sum = 0.0;
        let mut weighted_sum = 0.0;
        let mut count = 0usize;

        for (((q, _), &frequency), &gamma) in frequencies.indexed_iter().zip(gruneisen.iter()) {
            if frequency < 0.0 || frequency > cutoff || gamma.is_nan() {
                continue;
            }
            let mut weight = f64::from(multiplicities[q]);
            if let Some(t) = temperature {
                weight *= mode_heat_capacity(frequency, t);
            }
            let value = if options.squared { gamma * gamma } else { gamma };

            weight_sum += weight;
            weighted_sum += weight * value;
            count += 1;
        }

        if weight_sum.is_nan() || weight_sum <= 0.0 {
            return Err(PhononError::NoContributingModes(options.limit.to_string()));
        }

        let mean = weighted_sum / weight_sum;
        debug!(
            "Average Gruneisen over {} modes (limit {}, squared {}): {}",
            count, options.limit, options.squared, mean
        );
        Ok(if options.squared { mean.sqrt() } else { mean })
    }

    /// Debye frequency in THz from the low-frequency fit of the DOS
    pub fn debye_frequency(&self) -> Result<f64> {
        self.dataset.dos()?.debye_frequency(
            self.dataset.structure().num_sites(),
            self.debye_fit_max_frequency,
        )
    }

    /// Debye temperature in K from the phonopy-style Debye frequency
    pub fn debye_temp_phonopy(&self) -> Result<f64> {
        Ok(thz_to_kelvin(self.debye_frequency()?))
    }

    /// Debye temperature in K from the second moment of the DOS
    pub fn debye_temp_limit(&self) -> Result<f64> {
        self.dataset.dos()?.debye_temperature_limit()
    }

    /// Debye temperature of the acoustic branches, θ_limit / n^(1/3)
    pub fn acoustic_debye_temp(&self) -> Result<f64> {
        let n = self.dataset.structure().num_sites() as f64;
        Ok(self.debye_temp_limit()? / n.cbrt())
    }

    /// Heat capacity in J/(K·mol) at `temperature` (K)
    pub fn heat_capacity(&self, temperature: f64) -> Result<f64> {
        self.dataset.dos()?.cv(temperature)
    }

    /// Lattice thermal conductivity in W/(m·K) from Slack's model
    ///
    /// κ = A(γ)·M̄·θ_D³·δ / (γ²·n^(2/3)·T) with M̄ the mean atomic mass,
    /// δ³ the volume per atom and n the number of atoms in the cell.
    ///
    /// Without a temperature, T is the acoustic Debye temperature: θ_D/n^(1/3)
    /// for a supplied θ_D, [`Self::acoustic_debye_temp`] otherwise.
    pub fn thermal_conductivity_slack(&self, options: &SlackOptions) -> Result<f64> {
        if let Some(t) = options.temperature {
            if !(t.is_finite() && t > 0.0) {
                return Err(PhononError::InvalidOption(format!(
                    "temperature must be positive, got {}",
                    t
                )));
            }
        }

        let structure = self.dataset.structure();
        let n = structure.num_sites() as f64;

        let theta = match options.debye_temperature {
            Some(theta) => theta,
            None => self.debye_temp_phonopy()?,
        };
        let temperature = match (options.temperature, options.debye_temperature) {
            (Some(t), _) => t,
            (None, Some(theta)) => theta / n.cbrt(),
            (None, None) => self.acoustic_debye_temp()?,
        };
        let gamma = self.average_gruneisen(&options.average)?;
        if gamma == 0.0 || !gamma.is_finite() {
            return Err(PhononError::MalformedInput(format!(
                "average Gruneisen parameter {} leaves the Slack model undefined",
                gamma
            )));
        }

        let mass = structure.average_mass() * AMU_TO_KG;
        let delta = structure.volume_per_atom().cbrt() * ANGSTROM;

        let kappa = slack_prefactor(gamma) * mass * theta.powi(3) * delta
            / (gamma * gamma * n.powf(2.0 / 3.0) * temperature);

        debug!(
            "Slack conductivity at {} K: θ_D = {} K, γ = {}, κ = {} W/(m·K)",
            temperature, theta, gamma, kappa
        );
        Ok(kappa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::{Lattice, Site, Structure};

    #[test]
    fn test_limit_parsing() {
        assert_eq!("none".parse::<FrequencyLimit>().unwrap(), FrequencyLimit::All);
        assert_eq!("Acoustic".parse::<FrequencyLimit>().unwrap(), FrequencyLimit::Acoustic);
        assert!(matches!(
            "optical".parse::<FrequencyLimit>(),
            Err(PhononError::InvalidOption(_))
        ));
        assert_eq!(FrequencyLimit::Debye.to_string(), "debye");
    }

    #[test]
    fn test_mode_heat_capacity_limits() {
        assert_eq!(mode_heat_capacity(0.0, 300.0), 0.0);
        assert_eq!(mode_heat_capacity(1.0, 0.0), 0.0);
        // Classical limit k_B
        let classical = mode_heat_capacity(1e-3, 1000.0);
        assert!((classical - BOLTZMANN_EV_PER_K).abs() < 1e-9);
        assert!(mode_heat_capacity(10.0, 100.0) < mode_heat_capacity(1.0, 100.0));
        // Frozen out rather than inf/inf
        assert_eq!(mode_heat_capacity(10.0, 1e-3), 0.0);
        assert_eq!(mode_heat_capacity(10.0, 1e-310), 0.0);
    }

    #[test]
    fn test_negative_modes_ignored() {
        let structure = Structure::new(
            Lattice::cubic(3.0),
            vec![Site::new("Al", [0.0; 3], 26.9815385)],
        )
        .unwrap();
        let dataset = GruneisenDataset::new(
            vec![[0.0; 3], [0.5, 0.0, 0.0]],
            vec![1, 1],
            vec![-0.5, 1.0, 1.0, 2.0, 2.0, 3.0],
            vec![50.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            structure,
            None,
        )
        .unwrap();
        let aggregator = GruneisenAggregator::new(&dataset);
        let linear = AverageOptions {
            squared: false,
            ..AverageOptions::default()
        };
        assert_eq!(aggregator.average_gruneisen(&linear).unwrap(), 1.0);
    }
}
