/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Equilibrium crystal structure used by the Gruneisen analysis
//!
//! Only the quantities the lattice-dynamics formulas need are kept: the
//! lattice (for the cell volume and the reciprocal lattice of band paths)
//! and the sites (for the atom count and masses).

use super::errors::{AtomError, Result};
use super::lattice::Lattice;
use super::site::Site;
use serde::{Deserialize, Serialize};

/// Periodic structure: a lattice plus the sites of one unit cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    lattice: Lattice,
    sites: Vec<Site>,
}

impl Structure {
    /// Create a validated structure
    pub fn new(lattice: Lattice, sites: Vec<Site>) -> Result<Self> {
        let structure = Self { lattice, sites };
        structure.validate()?;
        Ok(structure)
    }

    /// Check the invariants a structure must satisfy
    ///
    /// Used again after deserialization, which bypasses [`Structure::new`].
    pub fn validate(&self) -> Result<()> {
        if self.sites.is_empty() {
            return Err(AtomError::InvalidStructure(
                "structure has no sites".to_string(),
            ));
        }

        let volume = self.lattice.volume();
        if !(volume.is_finite() && volume > 0.0) {
            return Err(AtomError::InvalidLattice(format!(
                "cell volume must be positive, got {}",
                volume
            )));
        }

        if let Some(site) = self
            .sites
            .iter()
            .find(|site| !(site.mass.is_finite() && site.mass > 0.0))
        {
            return Err(AtomError::InvalidStructure(format!(
                "site {} has non-positive mass {}",
                site.species, site.mass
            )));
        }

        Ok(())
    }

    /// The lattice of the cell
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// The sites of the cell
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Number of atoms in the cell
    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    /// Cell volume in Å³
    pub fn volume(&self) -> f64 {
        self.lattice.volume()
    }

    /// Atomic masses in amu, in site order
    pub fn masses(&self) -> Vec<f64> {
        self.sites.iter().map(|site| site.mass).collect()
    }

    /// Mean atomic mass of the cell in amu
    pub fn average_mass(&self) -> f64 {
        self.sites.iter().map(|site| site.mass).sum::<f64>() / self.num_sites() as f64
    }

    /// Volume per atom in Å³
    pub fn volume_per_atom(&self) -> f64 {
        self.volume() / self.num_sites() as f64
    }

    /// Reduced formula-like label, e.g. "InP"
    pub fn formula(&self) -> String {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for site in &self.sites {
            match counts.iter_mut().find(|(species, _)| *species == site.species) {
                Some((_, count)) => *count += 1,
                None => counts.push((site.species.as_str(), 1)),
            }
        }

        counts
            .into_iter()
            .map(|(species, count)| {
                if count == 1 {
                    species.to_string()
                } else {
                    format!("{}{}", species, count)
                }
            })
            .collect()
    }
}
