/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Command-line entry point for gruneisen-rs

use clap::Parser;
use gruneisen_rs::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    cli::run(Cli::parse())
}
