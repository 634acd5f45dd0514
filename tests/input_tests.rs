/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use gruneisen_rs::atoms::{Lattice, Site, Structure};
use gruneisen_rs::input::{AnalysisConfig, InputError};
use gruneisen_rs::phonon::{GruneisenAggregator, GruneisenDataset, PhononDos, ZeroFrequencyPolicy};
use gruneisen_rs::utils::FrequencyUnit;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

/// Test helper to write a temporary configuration file
fn create_config_file(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("analysis.json");
    let mut file = File::create(&file_path).unwrap();
    writeln!(file, "{}", content).unwrap();
    (dir, file_path)
}

#[test]
fn test_load_full_config() {
    let (_dir, path) = create_config_file(
        r#"{
            "zero_frequency_policy": "nan",
            "zero_frequency_tolerance": 1e-4,
            "debye_fit_max_frequency": 2.5,
            "temperature": 298.15,
            "units": "mev"
        }"#,
    );
    let config = AnalysisConfig::from_file(&path).unwrap();

    assert_eq!(config.zero_frequency_policy, ZeroFrequencyPolicy::Nan);
    assert_eq!(config.debye_fit_max_frequency, Some(2.5));
    assert_eq!(config.temperature, 298.15);
    assert_eq!(config.units, FrequencyUnit::Mev);

    let calc = config.calculator();
    assert_eq!(calc.policy(), ZeroFrequencyPolicy::Nan);
    assert_eq!(calc.zero_tolerance(), 1e-4);
}

#[test]
fn test_config_drives_aggregator() {
    let (_dir, path) = create_config_file(r#"{"debye_fit_max_frequency": 2.0}"#);
    let config = AnalysisConfig::from_file(&path).unwrap();

    let grid: Vec<f64> = (0..101).map(|i| i as f64 * 0.05).collect();
    let densities = grid.iter().map(|f| 9.0 / 125.0 * f * f).collect();
    let dataset = GruneisenDataset::new(
        vec![[0.0; 3]],
        vec![1],
        vec![0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0],
        Structure::new(Lattice::cubic(3.0), vec![Site::new("Cu", [0.0; 3], 63.546)]).unwrap(),
        Some(PhononDos::new(grid, densities).unwrap()),
    )
    .unwrap();

    let configured = config.aggregator(&dataset).debye_frequency().unwrap();
    let default = GruneisenAggregator::new(&dataset).debye_frequency().unwrap();
    assert!((configured - 5.0).abs() < 1e-10);
    assert!((default - 5.0).abs() < 1e-10);
}

#[test]
fn test_malformed_config_files() {
    let (_dir, path) = create_config_file("{ not json");
    assert!(matches!(AnalysisConfig::from_file(&path), Err(InputError::ParseError(_))));

    let (_dir, path) = create_config_file(r#"{"zero_frequency_policy": "infinity"}"#);
    assert!(matches!(AnalysisConfig::from_file(&path), Err(InputError::ParseError(_))));

    let (_dir, path) = create_config_file(r#"{"zero_frequency_tolerance": -1.0}"#);
    assert!(matches!(AnalysisConfig::from_file(&path), Err(InputError::InvalidConfig(_))));

    let dir = tempdir().unwrap();
    assert!(matches!(
        AnalysisConfig::from_file(dir.path().join("missing.json")),
        Err(InputError::FileError(_))
    ));
}

#[test]
fn test_load_dataset_without_site_masses() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inp.json");
    let mut file = File::create(&path).unwrap();
    writeln!(
        file,
        r#"{{
            "qpoints": [[0.0, 0.0, 0.0]],
            "multiplicities": [1],
            "frequencies": [[0.0, 0.0, 0.0, 9.0, 9.0, 10.3]],
            "gruneisen": [[0.0, 0.0, 0.0, 1.2, 1.2, 1.4]],
            "structure": {{
                "lattice": {{"matrix": [[0.0, 2.935, 2.935], [2.935, 0.0, 2.935], [2.935, 2.935, 0.0]]}},
                "sites": [
                    {{"species": "In", "frac_coords": [0.0, 0.0, 0.0]}},
                    {{"species": "P", "frac_coords": [0.25, 0.25, 0.25], "mass": 30.973761998}}
                ]
            }}
        }}"#
    )
    .unwrap();

    let dataset = gruneisen_rs::input::load_dataset(&path).unwrap();
    let masses = dataset.structure().masses();
    assert_eq!(masses, vec![114.82, 30.973761998]);

    // Saved files always carry the resolved masses
    let saved = dir.path().join("saved.json");
    gruneisen_rs::input::save_dataset(&dataset, &saved).unwrap();
    let reloaded = gruneisen_rs::input::load_dataset(&saved).unwrap();
    assert_eq!(reloaded, dataset);
}
