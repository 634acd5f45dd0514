/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # gruneisen-rs
//!
//! Anharmonic lattice-dynamics quantities from phonon data.
//!
//! Given frequencies on a q-point mesh or along a band path, computed at the
//! equilibrium volume and at strained volumes, this crate derives mode
//! Gruneisen parameters, their weighted averages, Debye temperatures from a
//! density of states and Slack's estimate of the lattice thermal
//! conductivity. Phonon frequencies themselves come from an external phonon
//! code.
//!
//! ```no_run
//! use gruneisen_rs::input::load_dataset;
//! use gruneisen_rs::phonon::{AverageOptions, GruneisenAggregator, SlackOptions};
//!
//! let dataset = load_dataset("gruneisen.json")?;
//! let aggregator = GruneisenAggregator::new(&dataset);
//! let gamma = aggregator.average_gruneisen(&AverageOptions::default())?;
//! let kappa = aggregator.thermal_conductivity_slack(&SlackOptions::default())?;
//! println!("γ = {gamma}, κ = {kappa} W/(m·K)");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod atoms;
pub mod cli;
pub mod input;
pub mod phonon;
pub mod plot;
pub mod utils;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

pub use atoms::{Lattice, Site, Structure};
pub use phonon::{
    GruneisenAggregator, GruneisenBandStructure, GruneisenDataset, ModeGruneisenCalculator,
    PhononDos,
};
