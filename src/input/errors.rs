/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for loading configuration and phonon data files

use crate::phonon::PhononError;
use std::io;
use thiserror::Error;

/// Errors that can occur while reading or writing input files
#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    FileError(#[from] io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Phonon(#[from] PhononError),
}

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;
