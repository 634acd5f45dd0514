/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Phonon data and anharmonic quantities
//!
//! This module computes mode Gruneisen parameters from frequencies at
//! several volumes, stores them on q-point meshes and band paths, and
//! derives averages, Debye temperatures and thermal conductivity from them.

pub mod aggregator;
pub mod band_structure;
pub mod dataset;
pub mod dos;
pub mod errors;
pub mod mode;

pub use aggregator::{AverageOptions, FrequencyLimit, GruneisenAggregator, SlackOptions, Weighting};
pub use band_structure::{BandPoint, GruneisenBandStructure, PathSegment, SegmentSpec, StrainedPhonons};
pub use dataset::{GruneisenDataset, Mode};
pub use dos::PhononDos;
pub use errors::{PhononError, Result};
pub use mode::{
    FrequencySample, GruneisenMethod, ModeGruneisenCalculator, ZeroFrequencyPolicy,
    DEFAULT_ZERO_TOLERANCE,
};
