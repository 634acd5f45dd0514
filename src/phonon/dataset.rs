/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Gruneisen parameters sampled on a q-point mesh
//!
//! A [`GruneisenDataset`] holds, for every sampled q-point, its multiplicity
//! and the frequency and Gruneisen parameter of each band. The arrays are
//! stored q-point-major as `(n_qpoints, n_bands)` matrices. The dataset is
//! validated once at construction and never mutated afterwards.

use super::dos::PhononDos;
use super::errors::{PhononError, Result};
use crate::atoms::Structure;
use crate::utils::constants::ACOUSTIC_BRANCHES;
use log::debug;
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One (q-point, band) mode of a dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mode {
    /// Index of the q-point in the dataset
    pub qpoint: usize,
    /// Band index at that q-point
    pub band: usize,
    /// Multiplicity of the q-point
    pub multiplicity: u32,
    /// Frequency in THz
    pub frequency: f64,
    /// Mode Gruneisen parameter
    pub gruneisen: f64,
}

impl Mode {
    /// Whether the mode belongs to one of the three acoustic branches
    pub fn is_acoustic(&self) -> bool {
        self.band < ACOUSTIC_BRANCHES
    }
}

/// Nested-row form used at the serialization boundary
#[derive(Debug, Serialize, Deserialize)]
struct DatasetRecord {
    qpoints: Vec<[f64; 3]>,
    multiplicities: Vec<u32>,
    frequencies: Vec<Vec<f64>>,
    /// NaN is written as null
    gruneisen: Vec<Vec<Option<f64>>>,
    structure: Structure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dos: Option<PhononDos>,
}

/// Mode Gruneisen parameters on a q-point mesh with the equilibrium structure
#[derive(Debug, Clone, PartialEq)]
pub struct GruneisenDataset {
    qpoints: Vec<[f64; 3]>,
    multiplicities: Vec<u32>,
    frequencies: Array2<f64>,
    gruneisen: Array2<f64>,
    structure: Structure,
    dos: Option<PhononDos>,
}

impl GruneisenDataset {
    /// Build a dataset from flattened, q-point-major arrays
    ///
    /// # Arguments
    ///
    /// * `qpoints` - Reduced reciprocal coordinates of each q-point
    /// * `multiplicities` - Weight of each q-point (≥ 1)
    /// * `frequencies` - `n_qpoints · n_bands` frequencies in THz
    /// * `gruneisen` - Gruneisen parameters parallel to `frequencies`
    /// * `structure` - Equilibrium structure; fixes `n_bands = 3 · num_sites`
    /// * `dos` - Total density of states, if the provider computed one
    pub fn new(
        qpoints: Vec<[f64; 3]>,
        multiplicities: Vec<u32>,
        frequencies: Vec<f64>,
        gruneisen: Vec<f64>,
        structure: Structure,
        dos: Option<PhononDos>,
    ) -> Result<Self> {
        let n_qpoints = qpoints.len();
        let n_bands = 3 * structure.num_sites();

        if frequencies.len() != gruneisen.len() {
            return Err(PhononError::MalformedInput(format!(
                "{} frequencies but {} Gruneisen parameters",
                frequencies.len(),
                gruneisen.len()
            )));
        }
        if frequencies.len() != n_qpoints * n_bands {
            return Err(PhononError::MalformedInput(format!(
                "expected {} q-points × {} bands = {} modes, got {}",
                n_qpoints,
                n_bands,
                n_qpoints * n_bands,
                frequencies.len()
            )));
        }

        let frequencies = Array2::from_shape_vec((n_qpoints, n_bands), frequencies)
            .map_err(|err| PhononError::MalformedInput(err.to_string()))?;
        let gruneisen = Array2::from_shape_vec((n_qpoints, n_bands), gruneisen)
            .map_err(|err| PhononError::MalformedInput(err.to_string()))?;

        let dataset = Self {
            qpoints,
            multiplicities,
            frequencies,
            gruneisen,
            structure,
            dos,
        };
        dataset.validate()?;

        debug!(
            "Gruneisen dataset for {}: {} q-points × {} bands, DOS {}",
            dataset.structure.formula(),
            n_qpoints,
            n_bands,
            if dataset.dos.is_some() { "present" } else { "absent" }
        );
        Ok(dataset)
    }

    /// Build a dataset from one row of band values per q-point
    pub fn from_rows(
        qpoints: Vec<[f64; 3]>,
        multiplicities: Vec<u32>,
        frequencies: Vec<Vec<f64>>,
        gruneisen: Vec<Vec<f64>>,
        structure: Structure,
        dos: Option<PhononDos>,
    ) -> Result<Self> {
        let n_bands = 3 * structure.num_sites();
        for (name, rows) in [("frequency", &frequencies), ("Gruneisen", &gruneisen)] {
            if let Some((q, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_bands) {
                return Err(PhononError::MalformedInput(format!(
                    "{} row of q-point {} has {} bands, expected {}",
                    name,
                    q,
                    row.len(),
                    n_bands
                )));
            }
        }
        if frequencies.len() != qpoints.len() || gruneisen.len() != qpoints.len() {
            return Err(PhononError::MalformedInput(format!(
                "{} q-points but {} frequency rows and {} Gruneisen rows",
                qpoints.len(),
                frequencies.len(),
                gruneisen.len()
            )));
        }

        Self::new(
            qpoints,
            multiplicities,
            frequencies.into_iter().flatten().collect(),
            gruneisen.into_iter().flatten().collect(),
            structure,
            dos,
        )
    }

    fn validate(&self) -> Result<()> {
        self.structure.validate()?;

        if self.multiplicities.len() != self.qpoints.len() {
            return Err(PhononError::MalformedInput(format!(
                "{} multiplicities for {} q-points",
                self.multiplicities.len(),
                self.qpoints.len()
            )));
        }
        if let Some(q) = self.multiplicities.iter().position(|&m| m == 0) {
            return Err(PhononError::MalformedInput(format!(
                "q-point {} has multiplicity 0",
                q
            )));
        }
        if self.frequencies.iter().any(|f| !f.is_finite()) {
            return Err(PhononError::MalformedInput(
                "frequencies must be finite".to_string(),
            ));
        }
        if self.gruneisen.iter().any(|g| g.is_infinite()) {
            return Err(PhononError::MalformedInput(
                "Gruneisen parameters must not be infinite".to_string(),
            ));
        }
        if let Some(dos) = &self.dos {
            dos.validate()?;
        }
        Ok(())
    }

    /// Reduced coordinates of the q-points
    pub fn qpoints(&self) -> &[[f64; 3]] {
        &self.qpoints
    }

    pub fn multiplicities(&self) -> &[u32] {
        &self.multiplicities
    }

    pub fn num_qpoints(&self) -> usize {
        self.qpoints.len()
    }

    pub fn num_bands(&self) -> usize {
        self.frequencies.ncols()
    }

    pub fn num_modes(&self) -> usize {
        self.frequencies.len()
    }

    /// Frequencies as an `(n_qpoints, n_bands)` view in THz
    pub fn frequencies(&self) -> ArrayView2<'_, f64> {
        self.frequencies.view()
    }

    /// Gruneisen parameters as an `(n_qpoints, n_bands)` view
    pub fn gruneisen(&self) -> ArrayView2<'_, f64> {
        self.gruneisen.view()
    }

    /// Frequencies of one band across all q-points
    pub fn band_frequencies(&self, band: usize) -> Option<ArrayView1<'_, f64>> {
        (band < self.num_bands()).then(|| self.frequencies.column(band))
    }

    /// Gruneisen parameters of one band across all q-points
    pub fn band_gruneisen(&self, band: usize) -> Option<ArrayView1<'_, f64>> {
        (band < self.num_bands()).then(|| self.gruneisen.column(band))
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Whether a total density of states was supplied
    pub fn has_dos(&self) -> bool {
        self.dos.is_some()
    }

    /// Total density of states, required by Debye and thermal quantities
    pub fn dos(&self) -> Result<&PhononDos> {
        self.dos.as_ref().ok_or_else(|| {
            PhononError::MissingDependency(
                "no total phonon density of states was supplied with this dataset".to_string(),
            )
        })
    }

    /// Iterate over all modes, q-point-major
    pub fn modes(&self) -> impl Iterator<Item = Mode> + '_ {
        self.frequencies
            .indexed_iter()
            .zip(self.gruneisen.iter())
            .map(move |(((qpoint, band), &frequency), &gruneisen)| Mode {
                qpoint,
                band,
                multiplicity: self.multiplicities[qpoint],
                frequency,
                gruneisen,
            })
    }

    /// Plain nested mapping of the dataset
    pub fn as_dict(&self) -> Result<Value> {
        let record = DatasetRecord {
            qpoints: self.qpoints.clone(),
            multiplicities: self.multiplicities.clone(),
            frequencies: self.frequencies.outer_iter().map(|row| row.to_vec()).collect(),
            gruneisen: self
                .gruneisen
                .outer_iter()
                .map(|row| row.iter().map(|&g| (!g.is_nan()).then_some(g)).collect())
                .collect(),
            structure: self.structure.clone(),
            dos: self.dos.clone(),
        };
        Ok(serde_json::to_value(record)?)
    }

    /// Rebuild a dataset from the mapping produced by [`as_dict`](Self::as_dict)
    pub fn from_dict(value: &Value) -> Result<Self> {
        let record = DatasetRecord::deserialize(value)?;
        let gruneisen = record
            .gruneisen
            .into_iter()
            .map(|row| row.into_iter().map(|g| g.unwrap_or(f64::NAN)).collect())
            .collect();

        Self::from_rows(
            record.qpoints,
            record.multiplicities,
            record.frequencies,
            gruneisen,
            record.structure,
            record.dos,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::{Lattice, Site};

    fn rocksalt_pair() -> Structure {
        Structure::new(
            Lattice::cubic(4.0),
            vec![
                Site::new("Na", [0.0, 0.0, 0.0], 22.98976928),
                Site::new("Cl", [0.5, 0.5, 0.5], 35.453),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_shape_validation() {
        let structure = rocksalt_pair();
        let ok = GruneisenDataset::new(
            vec![[0.0; 3], [0.5, 0.0, 0.0]],
            vec![1, 6],
            (0..12).map(f64::from).collect(),
            vec![1.0; 12],
            structure.clone(),
            None,
        )
        .unwrap();
        assert_eq!(ok.num_bands(), 6);
        assert_eq!(ok.frequencies()[[1, 2]], 8.0);
        assert_eq!(ok.modes().filter(|m| m.is_acoustic()).count(), 6);

        let short = GruneisenDataset::new(
            vec![[0.0; 3]],
            vec![1],
            vec![1.0; 5],
            vec![1.0; 5],
            structure.clone(),
            None,
        );
        assert!(matches!(short, Err(PhononError::MalformedInput(_))));

        let bad_weight = GruneisenDataset::new(
            vec![[0.0; 3]],
            vec![0],
            vec![1.0; 6],
            vec![1.0; 6],
            structure,
            None,
        );
        assert!(matches!(bad_weight, Err(PhononError::MalformedInput(_))));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = GruneisenDataset::from_rows(
            vec![[0.0; 3], [0.5, 0.0, 0.0]],
            vec![1, 1],
            vec![vec![1.0; 6], vec![1.0; 5]],
            vec![vec![1.0; 6], vec![1.0; 6]],
            rocksalt_pair(),
            None,
        );
        assert!(matches!(result, Err(PhononError::MalformedInput(_))));
    }

    #[test]
    fn test_missing_dos() {
        let dataset = GruneisenDataset::new(
            vec![[0.0; 3]],
            vec![1],
            vec![1.0; 6],
            vec![1.0; 6],
            rocksalt_pair(),
            None,
        )
        .unwrap();
        assert!(!dataset.has_dos());
        assert!(matches!(dataset.dos(), Err(PhononError::MissingDependency(_))));
    }

    #[test]
    fn test_nan_survives_dict() {
        let mut gruneisen = vec![1.25; 6];
        gruneisen[0] = f64::NAN;
        let dataset = GruneisenDataset::new(
            vec![[0.0; 3]],
            vec![1],
            vec![0.0, 0.0, 0.0, 8.0, 8.0, 9.0],
            gruneisen,
            rocksalt_pair(),
            None,
        )
        .unwrap();

        let dict = dataset.as_dict().unwrap();
        assert!(dict["gruneisen"][0][0].is_null());
        let restored = GruneisenDataset::from_dict(&dict).unwrap();
        assert!(restored.gruneisen()[[0, 0]].is_nan());
        assert_eq!(restored.gruneisen()[[0, 5]], 1.25);
    }
}
