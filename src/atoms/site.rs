/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Atomic site of a periodic structure

use super::database;
use super::errors::{AtomError, Result};
use serde::{Deserialize, Serialize};

/// One atom of the unit cell
///
/// When deserialized without a `mass`, the standard atomic weight of the
/// species is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SiteRecord")]
pub struct Site {
    /// Element symbol
    pub species: String,
    /// Position in fractional coordinates of the lattice
    pub frac_coords: [f64; 3],
    /// Atomic mass in amu
    pub mass: f64,
}

/// Serialized form of a site, with the mass optional
#[derive(Deserialize)]
struct SiteRecord {
    species: String,
    frac_coords: [f64; 3],
    #[serde(default)]
    mass: Option<f64>,
}

impl TryFrom<SiteRecord> for Site {
    type Error = AtomError;

    fn try_from(record: SiteRecord) -> Result<Self> {
        match record.mass {
            Some(mass) => Ok(Self::new(&record.species, record.frac_coords, mass)),
            None => Self::from_symbol(&record.species, record.frac_coords),
        }
    }
}

impl Site {
    /// Create a site with an explicit mass (amu)
    pub fn new(species: &str, frac_coords: [f64; 3], mass: f64) -> Self {
        Self {
            species: species.to_string(),
            frac_coords,
            mass,
        }
    }

    /// Create a site whose mass is the standard atomic weight of `species`
    pub fn from_symbol(species: &str, frac_coords: [f64; 3]) -> Result<Self> {
        let atomic_number = database::atomic_number_from_symbol(species)
            .ok_or_else(|| AtomError::UnknownElement(species.to_string()))?;
        let mass = database::standard_atomic_weight(species)
            .ok_or_else(|| AtomError::UnknownElement(species.to_string()))?;
        let symbol = database::element_symbol(atomic_number).unwrap_or(species);

        Ok(Self::new(symbol, frac_coords, mass))
    }
}
