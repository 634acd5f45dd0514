/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the phonon module

use crate::atoms::AtomError;
use crate::utils::UtilsError;
use thiserror::Error;

/// Errors raised while building or analysing phonon data
#[derive(Error, Debug)]
pub enum PhononError {
    /// Array lengths or band counts that do not fit together
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A multi-point fit whose volumes have no spread
    #[error("Degenerate fit: {0}")]
    DegenerateFit(String),

    /// An operation needs a capability the provider did not supply
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    /// An option value outside its closed set of variants
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// A cutoff policy that leaves nothing to average
    #[error("No modes contribute to the average with limit '{0}'")]
    NoContributingModes(String),

    #[error("Structure error: {0}")]
    Structure(#[from] AtomError),

    #[error("Numerical error: {0}")]
    Numerical(#[from] UtilsError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for phonon operations
pub type Result<T> = std::result::Result<T, PhononError>;
