/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Unit conversion utilities

use super::constants;
use super::errors::UtilsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Convert a phonon frequency in THz to its temperature equivalent in K
pub fn thz_to_kelvin(frequency: f64) -> f64 {
    frequency * constants::THZ_TO_KELVIN
}

/// Convert a temperature in K to the phonon frequency in THz
pub fn kelvin_to_thz(temperature: f64) -> f64 {
    temperature / constants::THZ_TO_KELVIN
}

/// Units available for the frequency axis of plot data
///
/// Frequencies are stored in THz throughout the crate; a unit only rescales
/// the values handed to a visualization sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FrequencyUnit {
    #[default]
    #[serde(rename = "thz")]
    Thz,
    #[serde(rename = "ev")]
    Ev,
    #[serde(rename = "mev")]
    Mev,
    #[serde(rename = "ha")]
    Ha,
    #[serde(rename = "cm-1", alias = "cm^-1")]
    InverseCm,
}

impl FrequencyUnit {
    /// Multiplicative factor converting THz into this unit
    pub fn factor(&self) -> f64 {
        match self {
            FrequencyUnit::Thz => 1.0,
            FrequencyUnit::Ev => constants::HZ_TO_EV * constants::TERA,
            FrequencyUnit::Mev => constants::HZ_TO_EV * constants::TERA / 1e-3,
            FrequencyUnit::Ha => constants::HZ_TO_HARTREE * constants::TERA,
            FrequencyUnit::InverseCm => constants::HZ_TO_INVERSE_METER * constants::TERA * 1e-2,
        }
    }

    /// Axis label for this unit
    pub fn label(&self) -> &'static str {
        match self {
            FrequencyUnit::Thz => "THz",
            FrequencyUnit::Ev => "eV",
            FrequencyUnit::Mev => "meV",
            FrequencyUnit::Ha => "Ha",
            FrequencyUnit::InverseCm => "cm^{-1}",
        }
    }

    /// Convert a frequency in THz into this unit
    pub fn from_thz(&self, frequency: f64) -> f64 {
        frequency * self.factor()
    }
}

impl FromStr for FrequencyUnit {
    type Err = UtilsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "thz" => Ok(FrequencyUnit::Thz),
            "ev" => Ok(FrequencyUnit::Ev),
            "mev" => Ok(FrequencyUnit::Mev),
            "ha" => Ok(FrequencyUnit::Ha),
            "cm-1" | "cm^-1" => Ok(FrequencyUnit::InverseCm),
            _ => Err(UtilsError::InvalidUnit(s.to_string())),
        }
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrequencyUnit::Thz => "thz",
            FrequencyUnit::Ev => "ev",
            FrequencyUnit::Mev => "mev",
            FrequencyUnit::Ha => "ha",
            FrequencyUnit::InverseCm => "cm-1",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_temperature_conversions() {
        assert_relative_eq!(thz_to_kelvin(1.0), 47.99243073366221, epsilon = 1e-9);
        assert_relative_eq!(kelvin_to_thz(thz_to_kelvin(5.5)), 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_unit_table() {
        assert_eq!(FrequencyUnit::Thz.factor(), 1.0);
        assert_relative_eq!(FrequencyUnit::Mev.factor(), 4.135667696, epsilon = 1e-12);
        assert_relative_eq!(FrequencyUnit::Ev.factor(), 4.135667696e-3, epsilon = 1e-15);
        assert_relative_eq!(FrequencyUnit::Ha.factor(), 1.519829846057e-4, epsilon = 1e-16);
        assert_relative_eq!(
            FrequencyUnit::InverseCm.factor(),
            33.356409519815204,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("THz".parse::<FrequencyUnit>().unwrap(), FrequencyUnit::Thz);
        assert_eq!("cm^-1".parse::<FrequencyUnit>().unwrap(), FrequencyUnit::InverseCm);
        assert!("kelvin".parse::<FrequencyUnit>().is_err());

        for unit in [
            FrequencyUnit::Thz,
            FrequencyUnit::Ev,
            FrequencyUnit::Mev,
            FrequencyUnit::Ha,
            FrequencyUnit::InverseCm,
        ] {
            assert_eq!(unit.to_string().parse::<FrequencyUnit>().unwrap(), unit);
        }
    }
}
