/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Total phonon density of states
//!
//! The DOS is supplied by the phonon provider on its own frequency grid
//! (THz) and is normalized to 3·n states per cell. Everything here works on
//! that grid: the low-frequency Debye fit, the second-moment Debye
//! temperature and the harmonic thermodynamic functions.

use super::errors::{PhononError, Result};
use crate::utils::constants::{
    AVOGADRO, BOLTZMANN, BOLTZMANN_HZ_PER_K, BOLTZMANN_THZ_PER_K, TERA, THZ_TO_J,
};
use crate::utils::{quadratic_through_origin, spline_integral, trapezoid, UtilsError};
use log::debug;
use serde::{Deserialize, Serialize};

/// Molar gas constant k_B·N_A in J/(K·mol)
const GAS_CONSTANT: f64 = BOLTZMANN * AVOGADRO;

/// Beyond this x = hν/(2k_BT) a mode no longer contributes to Cv or S
const FROZEN_OUT: f64 = 700.0;

/// ln(2·sinh x) − x, which stays finite as x → ∞
fn ln_two_sinh_excess(x: f64) -> f64 {
    (-(-2.0 * x).exp()).ln_1p()
}

/// Total density of states sampled on a frequency grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhononDos {
    /// Frequency grid in THz, strictly increasing
    frequencies: Vec<f64>,
    /// States per THz per cell at each grid point
    densities: Vec<f64>,
}

impl PhononDos {
    /// Create a validated density of states
    ///
    /// # Arguments
    ///
    /// * `frequencies` - Strictly increasing frequency grid in THz (at least 4 points)
    /// * `densities` - Density at each grid point
    pub fn new(frequencies: Vec<f64>, densities: Vec<f64>) -> Result<Self> {
        let dos = Self {
            frequencies,
            densities,
        };
        dos.validate()?;
        Ok(dos)
    }

    /// Check the grid invariants
    pub fn validate(&self) -> Result<()> {
        if self.frequencies.len() != self.densities.len() {
            return Err(PhononError::MalformedInput(format!(
                "DOS has {} frequencies but {} densities",
                self.frequencies.len(),
                self.densities.len()
            )));
        }
        if self.frequencies.len() < 4 {
            return Err(PhononError::MalformedInput(format!(
                "DOS needs at least 4 grid points, got {}",
                self.frequencies.len()
            )));
        }
        if self
            .frequencies
            .iter()
            .chain(&self.densities)
            .any(|v| !v.is_finite())
        {
            return Err(PhononError::MalformedInput(
                "DOS contains non-finite values".to_string(),
            ));
        }
        if self.frequencies.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PhononError::MalformedInput(
                "DOS frequency grid must be strictly increasing".to_string(),
            ));
        }
        Ok(())
    }

    /// Frequency grid in THz
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Densities on the grid
    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    /// Number of states, ∫g(ν)dν
    pub fn integrated_states(&self) -> Result<f64> {
        Ok(trapezoid(&self.densities, &self.frequencies)?)
    }

    /// Grid points with ν > 0, the only ones carrying thermal weight
    fn positive(&self) -> (Vec<f64>, Vec<f64>) {
        self.frequencies
            .iter()
            .zip(&self.densities)
            .filter(|&(&f, _)| f > 0.0)
            .map(|(&f, &d)| (f, d))
            .unzip()
    }

    fn check_temperature(temperature: f64) -> Result<()> {
        if !(temperature.is_finite() && temperature >= 0.0) {
            return Err(PhononError::InvalidOption(format!(
                "temperature must be a non-negative number of kelvin, got {}",
                temperature
            )));
        }
        Ok(())
    }

    /// Coefficient `a` of the Debye law g(ν) = a·ν² fitted to the low-frequency DOS
    ///
    /// The fit runs through the origin over the first quarter of the grid,
    /// or over the grid fraction `freq_max_fit / (ν_max − ν_min)` when a
    /// maximum fit frequency (THz) is given.
    pub fn debye_fit_coefficient(&self, freq_max_fit: Option<f64>) -> Result<f64> {
        let n = self.frequencies.len();
        let n_fit = match freq_max_fit {
            None => n / 4,
            Some(max_freq) => {
                let span = self.frequencies[n - 1] - self.frequencies[0];
                ((max_freq / span * n as f64).max(0.0) as usize).min(n)
            }
        };
        if n_fit == 0 {
            return Err(PhononError::DegenerateFit(
                "Debye fit window contains no DOS points".to_string(),
            ));
        }

        let a = quadratic_through_origin(&self.frequencies[..n_fit], &self.densities[..n_fit])
            .map_err(|err| match err {
                UtilsError::Degenerate(msg) => PhononError::DegenerateFit(msg),
                other => PhononError::from(other),
            })?;
        debug!("Debye fit over {} DOS points: a = {:e} states/THz³", n_fit, a);

        if a <= 0.0 {
            return Err(PhononError::DegenerateFit(format!(
                "low-frequency DOS does not grow like ν² (a = {:e})",
                a
            )));
        }
        Ok(a)
    }

    /// Debye frequency in THz holding 3·`num_atoms` states below it
    ///
    /// With g(ν) = a·ν², ∫₀^ν_D g = a·ν_D³/3 = 3n gives ν_D = (9n/a)^(1/3).
    pub fn debye_frequency(&self, num_atoms: usize, freq_max_fit: Option<f64>) -> Result<f64> {
        let a = self.debye_fit_coefficient(freq_max_fit)?;
        Ok((9.0 * num_atoms as f64 / a).cbrt())
    }

    /// Debye temperature in K from the second moment of the DOS
    ///
    /// θ = sqrt(5/3·⟨ν²⟩)·h/k_B, where ⟨ν²⟩ = ∫g·ν² / ∫g is evaluated with
    /// interpolating cubic splines over the whole grid.
    pub fn debye_temperature_limit(&self) -> Result<f64> {
        let f_mesh: Vec<f64> = self.frequencies.iter().map(|f| f * TERA).collect();
        let weighted: Vec<f64> = f_mesh
            .iter()
            .zip(&self.densities)
            .map(|(f, d)| d * f * f)
            .collect();

        let i_a = spline_integral(&f_mesh, &weighted)?;
        let i_b = spline_integral(&f_mesh, &self.densities)?;
        if i_b <= 0.0 {
            return Err(PhononError::MalformedInput(format!(
                "DOS integrates to a non-positive number of states ({:e})",
                i_b
            )));
        }

        Ok((5.0 / 3.0 * i_a / i_b).sqrt() / BOLTZMANN_HZ_PER_K)
    }

    /// Constant-volume heat capacity in J/(K·mol) at `temperature` (K)
    pub fn cv(&self, temperature: f64) -> Result<f64> {
        Self::check_temperature(temperature)?;
        if temperature == 0.0 {
            return Ok(0.0);
        }

        let (freqs, dens) = self.positive();
        let integrand: Vec<f64> = freqs
            .iter()
            .zip(&dens)
            .map(|(&f, &d)| {
                let x = f / (2.0 * BOLTZMANN_THZ_PER_K * temperature);
                if x > FROZEN_OUT {
                    return 0.0;
                }
                let sinh = x.sinh();
                x * x / (sinh * sinh) * d
            })
            .collect();

        Ok(trapezoid(&integrand, &freqs)? * GAS_CONSTANT)
    }

    /// Vibrational entropy in J/(K·mol) at `temperature` (K)
    pub fn entropy(&self, temperature: f64) -> Result<f64> {
        Self::check_temperature(temperature)?;
        if temperature == 0.0 {
            return Ok(0.0);
        }

        let (freqs, dens) = self.positive();
        let integrand: Vec<f64> = freqs
            .iter()
            .zip(&dens)
            .map(|(&f, &d)| {
                let x = f / (2.0 * BOLTZMANN_THZ_PER_K * temperature);
                if x > FROZEN_OUT {
                    return 0.0;
                }
                (x / x.tanh() - x - ln_two_sinh_excess(x)) * d
            })
            .collect();

        Ok(trapezoid(&integrand, &freqs)? * GAS_CONSTANT)
    }

    /// Vibrational internal energy in J/mol at `temperature` (K)
    pub fn internal_energy(&self, temperature: f64) -> Result<f64> {
        Self::check_temperature(temperature)?;
        if temperature == 0.0 {
            return self.zero_point_energy();
        }

        let (freqs, dens) = self.positive();
        let integrand: Vec<f64> = freqs
            .iter()
            .zip(&dens)
            .map(|(&f, &d)| {
                let x = f / (2.0 * BOLTZMANN_THZ_PER_K * temperature);
                f / x.tanh() * d
            })
            .collect();

        Ok(trapezoid(&integrand, &freqs)? / 2.0 * THZ_TO_J * AVOGADRO)
    }

    /// Vibrational Helmholtz free energy in J/mol at `temperature` (K)
    pub fn helmholtz_free_energy(&self, temperature: f64) -> Result<f64> {
        Self::check_temperature(temperature)?;
        if temperature == 0.0 {
            return self.zero_point_energy();
        }

        let (freqs, dens) = self.positive();
        let integrand: Vec<f64> = freqs
            .iter()
            .zip(&dens)
            .map(|(&f, &d)| {
                // T·ln(2·sinh x) split into the zero-point part and a thermal part
                let zero_point = f / (2.0 * BOLTZMANN_THZ_PER_K);
                let x = zero_point / temperature;
                (zero_point + temperature * ln_two_sinh_excess(x)) * d
            })
            .collect();

        Ok(trapezoid(&integrand, &freqs)? * GAS_CONSTANT)
    }

    /// Zero-point energy in J/mol
    pub fn zero_point_energy(&self) -> Result<f64> {
        let (freqs, dens) = self.positive();
        let integrand: Vec<f64> = freqs.iter().zip(&dens).map(|(f, d)| f * d).collect();
        Ok(0.5 * trapezoid(&integrand, &freqs)? * THZ_TO_J * AVOGADRO)
    }
}
