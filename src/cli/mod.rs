/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Command Line Interface (CLI) module
//!
//! Argument definitions for the `gruneisen` binary and the code that runs
//! each subcommand against the library.

use crate::input::{self, AnalysisConfig};
use crate::phonon::{
    self, AverageOptions, FrequencyLimit, GruneisenAggregator, GruneisenDataset, SlackOptions,
    Weighting,
};
use crate::plot;
use crate::utils::FrequencyUnit;
use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gruneisen")]
#[command(about = "Gruneisen parameters, Debye temperatures and Slack conductivity from phonon data")]
#[command(version)]
pub struct Cli {
    /// JSON analysis configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print averages, Debye temperatures, heat capacity and conductivity.
    Summary {
        /// Gruneisen dataset (JSON)
        dataset: PathBuf,
        /// Temperature in K (overrides the configuration)
        #[arg(short, long)]
        temperature: Option<f64>,
    },
    /// Print one average Gruneisen parameter.
    Average {
        /// Gruneisen dataset (JSON)
        dataset: PathBuf,
        /// Frequency cutoff: none, acoustic or debye
        #[arg(short, long, default_value = "none")]
        limit: String,
        /// Arithmetic instead of root-mean-square average
        #[arg(long)]
        linear: bool,
        /// Weight modes by their heat capacity at this temperature (K)
        #[arg(short, long)]
        temperature: Option<f64>,
    },
    /// Export frequency/Gruneisen scatter data of a dataset.
    PlotData {
        /// Gruneisen dataset (JSON)
        dataset: PathBuf,
        /// Frequency unit: thz, ev, mev, ha or cm-1
        #[arg(short, long)]
        units: Option<String>,
        /// Output file; standard output if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export per-band dispersion data of a band structure.
    BandPlotData {
        /// Gruneisen band structure (JSON)
        band_structure: PathBuf,
        /// Frequency unit: thz, ev, mev, ha or cm-1
        #[arg(short, long)]
        units: Option<String>,
        /// Output file; standard output if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("reading configuration {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn resolve_units(units: Option<&str>, config: &AnalysisConfig) -> anyhow::Result<FrequencyUnit> {
    match units {
        Some(units) => Ok(units.parse::<FrequencyUnit>()?),
        None => Ok(config.units),
    }
}

fn emit<T: serde::Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            input::write_json(value, path)?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn describe(value: phonon::Result<f64>, unit: &str) -> String {
    match value {
        Ok(v) if unit.is_empty() => format!("{:.6}", v),
        Ok(v) => format!("{:.6} {}", v, unit),
        Err(err) => format!("n/a ({})", err),
    }
}

/// Human-readable summary of a dataset
pub fn format_summary(
    dataset: &GruneisenDataset,
    aggregator: &GruneisenAggregator,
    temperature: f64,
) -> String {
    let structure = dataset.structure();
    let mut summary = format!(
        "{}: {} atoms, {} bands, {} q-points, DOS {}\n",
        structure.formula(),
        structure.num_sites(),
        dataset.num_bands(),
        dataset.num_qpoints(),
        if dataset.has_dos() { "present" } else { "absent" }
    );

    summary.push_str("\nAverage Gruneisen parameter\n");
    for limit in [FrequencyLimit::All, FrequencyLimit::Acoustic, FrequencyLimit::Debye] {
        let squared = aggregator.average_gruneisen(&AverageOptions::with_limit(limit));
        let linear = aggregator.average_gruneisen(&AverageOptions {
            squared: false,
            ..AverageOptions::with_limit(limit)
        });
        summary.push_str(&format!(
            "  {:<9} rms {:<24} mean {}\n",
            limit.to_string(),
            describe(squared, ""),
            describe(linear, "")
        ));
    }

    summary.push_str("\nDebye temperature\n");
    summary.push_str(&format!("  phonopy fit    {}\n", describe(aggregator.debye_temp_phonopy(), "K")));
    summary.push_str(&format!("  second moment  {}\n", describe(aggregator.debye_temp_limit(), "K")));
    summary.push_str(&format!("  acoustic       {}\n", describe(aggregator.acoustic_debye_temp(), "K")));

    summary.push_str(&format!("\nAt {} K\n", temperature));
    summary.push_str(&format!(
        "  Cv             {}\n",
        describe(aggregator.heat_capacity(temperature), "J/(K·mol)")
    ));
    let slack = SlackOptions::at_temperature(temperature);
    summary.push_str(&format!(
        "  κ (Slack)      {}\n",
        describe(aggregator.thermal_conductivity_slack(&slack), "W/(m·K)")
    ));

    summary
}

/// Execute the parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary {
            dataset,
            temperature,
        } => {
            let data = input::load_dataset(&dataset)
                .with_context(|| format!("loading dataset {}", dataset.display()))?;
            let aggregator = config.aggregator(&data);
            let temperature = temperature.unwrap_or(config.temperature);
            print!("{}", format_summary(&data, &aggregator, temperature));
            Ok(())
        }
        Commands::Average {
            dataset,
            limit,
            linear,
            temperature,
        } => {
            let data = input::load_dataset(&dataset)
                .with_context(|| format!("loading dataset {}", dataset.display()))?;
            let options = AverageOptions {
                squared: !linear,
                limit: limit.parse()?,
                weighting: match temperature {
                    Some(t) => Weighting::HeatCapacity {
                        temperature: Some(t),
                    },
                    None => Weighting::Multiplicity,
                },
            };
            let average = config.aggregator(&data).average_gruneisen(&options)?;
            println!("{}", average);
            Ok(())
        }
        Commands::PlotData {
            dataset,
            units,
            output,
        } => {
            let data = input::load_dataset(&dataset)
                .with_context(|| format!("loading dataset {}", dataset.display()))?;
            let units = resolve_units(units.as_deref(), &config)?;
            emit(&plot::scatter_plot_data(&data, units), output.as_deref())
        }
        Commands::BandPlotData {
            band_structure,
            units,
            output,
        } => {
            let bands = input::load_band_structure(&band_structure)
                .with_context(|| format!("loading band structure {}", band_structure.display()))?;
            let units = resolve_units(units.as_deref(), &config)?;
            emit(&plot::band_plot_data(&bands, units)?, output.as_deref())
        }
    }
}
