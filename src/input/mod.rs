/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Reading and writing phonon data files
//!
//! Datasets and band structures are stored as the JSON form of their
//! `as_dict` mapping. Plot data and other serializable results are written
//! with [`write_json`].

pub mod config;
pub mod errors;

pub use config::AnalysisConfig;
pub use errors::{InputError, Result};

use crate::phonon::{GruneisenBandStructure, GruneisenDataset};
use log::info;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

fn read_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a Gruneisen dataset from a JSON file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<GruneisenDataset> {
    let path = path.as_ref();
    let dataset = GruneisenDataset::from_dict(&read_value(path)?)?;
    info!(
        "Loaded {} modes on {} q-points from {}",
        dataset.num_modes(),
        dataset.num_qpoints(),
        path.display()
    );
    Ok(dataset)
}

/// Write a Gruneisen dataset to a JSON file
pub fn save_dataset<P: AsRef<Path>>(dataset: &GruneisenDataset, path: P) -> Result<()> {
    write_json(&dataset.as_dict()?, path)
}

/// Load a Gruneisen band structure from a JSON file
pub fn load_band_structure<P: AsRef<Path>>(path: P) -> Result<GruneisenBandStructure> {
    let path = path.as_ref();
    let bands = GruneisenBandStructure::from_dict(&read_value(path)?)?;
    info!(
        "Loaded band structure with {} q-points from {}",
        bands.num_points(),
        path.display()
    );
    Ok(bands)
}

/// Write a Gruneisen band structure to a JSON file
pub fn save_band_structure<P: AsRef<Path>>(bands: &GruneisenBandStructure, path: P) -> Result<()> {
    write_json(&bands.as_dict()?, path)
}

/// Pretty-print any serializable value to a JSON file
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}
