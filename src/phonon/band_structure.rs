/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Gruneisen parameters along a high-symmetry path
//!
//! The path is a list of segments, each an ordered run of q-points. Every
//! point carries the frequency and Gruneisen parameter of each band. The
//! Gruneisen values are obtained from frequencies computed in the
//! equilibrium cell and in strained cells, one q-point and band at a time.

use super::errors::{PhononError, Result};
use super::mode::{FrequencySample, GruneisenMethod, ModeGruneisenCalculator};
use crate::atoms::Structure;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tolerance on reduced coordinates when recognizing Γ
const GAMMA_TOLERANCE: f64 = 1e-8;

fn is_gamma(qpoint: &[f64; 3]) -> bool {
    qpoint
        .iter()
        .all(|c| (c - c.round()).abs() < GAMMA_TOLERANCE)
}

/// One q-point on the path
#[derive(Debug, Clone, PartialEq)]
pub struct BandPoint {
    /// Reduced reciprocal coordinates
    pub qpoint: [f64; 3],
    /// Frequency of each band in THz
    pub frequencies: Vec<f64>,
    /// Gruneisen parameter of each band
    pub gruneisen: Vec<f64>,
}

/// A straight run of q-points between two (optionally labelled) ends
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub start_label: Option<String>,
    pub end_label: Option<String>,
    pub points: Vec<BandPoint>,
}

/// Q-points of one path segment before any frequencies are attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    #[serde(default)]
    pub start_label: Option<String>,
    #[serde(default)]
    pub end_label: Option<String>,
    pub qpoints: Vec<[f64; 3]>,
}

/// Frequencies along the whole path for one cell volume
///
/// `frequencies` holds one row per path q-point, in path order across all
/// segments, with one entry per band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrainedPhonons {
    /// Cell volume in Å³
    pub volume: f64,
    pub frequencies: Vec<Vec<f64>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BandPointRecord {
    qpoint: [f64; 3],
    frequencies: Vec<f64>,
    gruneisen: Vec<Option<f64>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SegmentRecord {
    start_label: Option<String>,
    end_label: Option<String>,
    points: Vec<BandPointRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BandStructureRecord {
    structure: Structure,
    segments: Vec<SegmentRecord>,
}

/// Per-band frequencies and Gruneisen parameters along a symmetry path
#[derive(Debug, Clone, PartialEq)]
pub struct GruneisenBandStructure {
    structure: Structure,
    segments: Vec<PathSegment>,
    n_bands: usize,
}

impl GruneisenBandStructure {
    /// Assemble a band structure from precomputed segments
    pub fn new(structure: Structure, segments: Vec<PathSegment>) -> Result<Self> {
        structure.validate()?;
        let n_bands = 3 * structure.num_sites();

        for (s, segment) in segments.iter().enumerate() {
            for (p, point) in segment.points.iter().enumerate() {
                if point.frequencies.len() != n_bands || point.gruneisen.len() != n_bands {
                    return Err(PhononError::MalformedInput(format!(
                        "segment {} point {} has {} frequencies and {} Gruneisen values, expected {}",
                        s,
                        p,
                        point.frequencies.len(),
                        point.gruneisen.len(),
                        n_bands
                    )));
                }
                if point.frequencies.iter().any(|f| !f.is_finite()) {
                    return Err(PhononError::MalformedInput(format!(
                        "segment {} point {} has a non-finite frequency",
                        s, p
                    )));
                }
            }
        }

        Ok(Self {
            structure,
            segments,
            n_bands,
        })
    }

    /// Compute Gruneisen parameters along a path from strained-cell frequencies
    ///
    /// # Arguments
    ///
    /// * `structure` - Equilibrium structure
    /// * `path` - Segments of q-points
    /// * `equilibrium` - Frequencies in the equilibrium cell, reported on the path
    /// * `strained` - Exactly `[plus, minus]` for [`GruneisenMethod::TwoPoint`],
    ///   two or more cells for [`GruneisenMethod::Fit`] (the equilibrium cell
    ///   joins the fit)
    /// * `method` - Finite difference or log-log regression
    /// * `calculator` - Zero-frequency handling
    pub fn from_strained(
        structure: Structure,
        path: Vec<SegmentSpec>,
        equilibrium: &StrainedPhonons,
        strained: &[StrainedPhonons],
        method: GruneisenMethod,
        calculator: &ModeGruneisenCalculator,
    ) -> Result<Self> {
        let n_bands = 3 * structure.num_sites();
        let n_points: usize = path.iter().map(|s| s.qpoints.len()).sum();

        match method {
            GruneisenMethod::TwoPoint if strained.len() != 2 => {
                return Err(PhononError::MalformedInput(format!(
                    "two-point method needs a plus and a minus cell, got {} strained cells",
                    strained.len()
                )));
            }
            GruneisenMethod::Fit if strained.len() < 2 => {
                return Err(PhononError::MalformedInput(format!(
                    "fit needs at least 3 volumes, got {} strained cells plus equilibrium",
                    strained.len()
                )));
            }
            _ => {}
        }
        if !(equilibrium.volume.is_finite() && equilibrium.volume > 0.0) {
            return Err(PhononError::MalformedInput(format!(
                "equilibrium volume must be positive, got {}",
                equilibrium.volume
            )));
        }
        for cell in std::iter::once(equilibrium).chain(strained) {
            if cell.frequencies.len() != n_points {
                return Err(PhononError::MalformedInput(format!(
                    "cell of volume {} has {} q-points, path has {}",
                    cell.volume,
                    cell.frequencies.len(),
                    n_points
                )));
            }
            if let Some(q) = cell.frequencies.iter().position(|row| row.len() != n_bands) {
                return Err(PhononError::MalformedInput(format!(
                    "cell of volume {} has {} bands at path point {}, expected {}",
                    cell.volume,
                    cell.frequencies[q].len(),
                    q,
                    n_bands
                )));
            }
        }

        let v0 = equilibrium.volume;
        let mut index = 0;
        let mut segments = Vec::with_capacity(path.len());

        for spec in path {
            let mut points = Vec::with_capacity(spec.qpoints.len());
            for qpoint in spec.qpoints {
                let mut gruneisen = Vec::with_capacity(n_bands);
                let mut fired = 0;

                for band in 0..n_bands {
                    let mut samples: Vec<FrequencySample> = strained
                        .iter()
                        .map(|cell| FrequencySample::new(cell.volume, cell.frequencies[index][band]))
                        .collect();
                    if method == GruneisenMethod::Fit {
                        samples.push(FrequencySample::new(v0, equilibrium.frequencies[index][band]));
                    }

                    if calculator.policy_applies(method, &samples) {
                        fired += 1;
                    }
                    gruneisen.push(calculator.mode_gruneisen(method, &samples, v0)?);
                }

                if fired > 0 && !is_gamma(&qpoint) {
                    warn!(
                        "{} band(s) at q = {:?} have vanishing frequency away from Γ, reported as {:?}",
                        fired,
                        qpoint,
                        calculator.policy()
                    );
                }

                points.push(BandPoint {
                    qpoint,
                    frequencies: equilibrium.frequencies[index].clone(),
                    gruneisen,
                });
                index += 1;
            }

            segments.push(PathSegment {
                start_label: spec.start_label,
                end_label: spec.end_label,
                points,
            });
        }

        debug!(
            "Band structure with {} segments, {} q-points, {} bands ({:?})",
            segments.len(),
            n_points,
            n_bands,
            method
        );
        Self::new(structure, segments)
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn num_bands(&self) -> usize {
        self.n_bands
    }

    /// Number of q-points over all segments
    pub fn num_points(&self) -> usize {
        self.segments.iter().map(|s| s.points.len()).sum()
    }

    /// All points in path order
    pub fn points(&self) -> impl Iterator<Item = &BandPoint> {
        self.segments.iter().flat_map(|s| s.points.iter())
    }

    /// Frequencies of one band along the whole path
    pub fn band_frequencies(&self, band: usize) -> Option<Vec<f64>> {
        (band < self.n_bands).then(|| self.points().map(|p| p.frequencies[band]).collect())
    }

    /// Gruneisen parameters of one band along the whole path
    pub fn band_gruneisen(&self, band: usize) -> Option<Vec<f64>> {
        (band < self.n_bands).then(|| self.points().map(|p| p.gruneisen[band]).collect())
    }

    /// Cumulative path length (1/Å, including 2π) at every point
    ///
    /// Each segment starts where the previous one ended, so jumps between
    /// disconnected segments add no length.
    pub fn distances(&self) -> Result<Vec<f64>> {
        let reciprocal = self.structure.lattice().reciprocal_lattice()?;
        let mut distances = Vec::with_capacity(self.num_points());
        let mut total = 0.0;

        for segment in &self.segments {
            let mut previous: Option<[f64; 3]> = None;
            for point in &segment.points {
                if let Some(prev) = previous {
                    total += reciprocal
                        .cartesian(point.qpoint)
                        .distance(&reciprocal.cartesian(prev));
                }
                distances.push(total);
                previous = Some(point.qpoint);
            }
        }
        Ok(distances)
    }

    /// Plain nested mapping of the band structure
    pub fn as_dict(&self) -> Result<Value> {
        let record = BandStructureRecord {
            structure: self.structure.clone(),
            segments: self
                .segments
                .iter()
                .map(|segment| SegmentRecord {
                    start_label: segment.start_label.clone(),
                    end_label: segment.end_label.clone(),
                    points: segment
                        .points
                        .iter()
                        .map(|p| BandPointRecord {
                            qpoint: p.qpoint,
                            frequencies: p.frequencies.clone(),
                            gruneisen: p.gruneisen.iter().map(|&g| (!g.is_nan()).then_some(g)).collect(),
                        })
                        .collect(),
                })
                .collect(),
        };
        Ok(serde_json::to_value(record)?)
    }

    /// Rebuild a band structure from the mapping produced by [`as_dict`](Self::as_dict)
    pub fn from_dict(value: &Value) -> Result<Self> {
        let record = BandStructureRecord::deserialize(value)?;
        let segments = record
            .segments
            .into_iter()
            .map(|segment| PathSegment {
                start_label: segment.start_label,
                end_label: segment.end_label,
                points: segment
                    .points
                    .into_iter()
                    .map(|p| BandPoint {
                        qpoint: p.qpoint,
                        frequencies: p.frequencies,
                        gruneisen: p.gruneisen.into_iter().map(|g| g.unwrap_or(f64::NAN)).collect(),
                    })
                    .collect(),
            })
            .collect();

        Self::new(record.structure, segments)
    }
}
