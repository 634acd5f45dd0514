/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the utils module

use thiserror::Error;

/// Errors that can occur in the utils module
#[derive(Error, Debug)]
pub enum UtilsError {
    /// Generic error with a message
    #[error("Utility error: {0}")]
    Generic(String),

    /// Math-related errors
    #[error("Math error: {0}")]
    Math(String),

    /// Input without enough spread to determine a fit
    #[error("Degenerate input: {0}")]
    Degenerate(String),

    /// Frequency unit name outside the conversion table
    #[error("Unknown frequency unit '{0}' (expected one of thz, ev, mev, ha, cm-1)")]
    InvalidUnit(String),
}

/// A specialized Result type for utils operations
pub type Result<T> = std::result::Result<T, UtilsError>;
