/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Crystal structure module
//!
//! This module provides the equilibrium structure handed over by a structure
//! provider: lattice, sites and atomic masses.

pub mod database;
pub mod errors;
pub mod lattice;
pub mod site;
pub mod structure;
pub mod vector;

pub use errors::{AtomError, Result};
pub use lattice::Lattice;
pub use site::Site;
pub use structure::Structure;
pub use vector::Vector3D;
