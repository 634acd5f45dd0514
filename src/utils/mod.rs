/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Utility functions for lattice-dynamics calculations
//!
//! This module provides physical constants, unit conversions and the
//! numerical routines shared by the phonon modules.

pub mod constants;
pub mod conversions;
pub mod errors;
pub mod math;

pub use conversions::{kelvin_to_thz, thz_to_kelvin, FrequencyUnit};
pub use errors::{Result, UtilsError};
pub use math::{linear_regression, quadratic_through_origin, spline_integral, trapezoid};
