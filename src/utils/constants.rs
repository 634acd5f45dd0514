/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Physical constants used in lattice-dynamics calculations
//!
//! Values are CODATA 2018 (exact SI definitions where available).

use std::f64::consts::PI;

/// Planck constant in J·s
pub const PLANCK: f64 = 6.62607015e-34;

/// Reduced Planck constant in J·s
pub const HBAR: f64 = PLANCK / (2.0 * PI);

/// Boltzmann constant in J/K
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Boltzmann constant in eV/K
pub const BOLTZMANN_EV_PER_K: f64 = 8.617333262e-5;

/// Boltzmann constant expressed as a frequency, Hz/K
pub const BOLTZMANN_HZ_PER_K: f64 = 2.083661912e10;

/// Boltzmann constant expressed as a frequency, THz/K
pub const BOLTZMANN_THZ_PER_K: f64 = BOLTZMANN_HZ_PER_K / TERA;

/// Avogadro constant in 1/mol
pub const AVOGADRO: f64 = 6.02214076e23;

/// Atomic mass unit in kg
pub const AMU_TO_KG: f64 = 1.66053886e-27;

/// Angstrom in m
pub const ANGSTROM: f64 = 1e-10;

/// SI prefix tera
pub const TERA: f64 = 1e12;

/// Energy of a 1 THz quantum in J
pub const THZ_TO_J: f64 = PLANCK * TERA;

/// Temperature equivalent of a 1 THz quantum, h·10¹²/k_B ≈ 47.9924 K
pub const THZ_TO_KELVIN: f64 = PLANCK * TERA / BOLTZMANN;

/// Hertz-electron volt relationship, eV per Hz
pub const HZ_TO_EV: f64 = 4.135667696e-15;

/// Hertz-hartree relationship, Ha per Hz
pub const HZ_TO_HARTREE: f64 = 1.519829846057e-16;

/// Hertz-inverse meter relationship, 1/m per Hz
pub const HZ_TO_INVERSE_METER: f64 = 3.3356409519815204e-9;

/// Number of acoustic branches at every q-point
pub const ACOUSTIC_BRANCHES: usize = 3;
