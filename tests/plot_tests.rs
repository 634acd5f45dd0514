/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use gruneisen_rs::atoms::{Lattice, Site, Structure};
use gruneisen_rs::phonon::{
    BandPoint, GruneisenBandStructure, GruneisenDataset, PathSegment,
};
use gruneisen_rs::plot::{band_plot_data, scatter_plot_data};
use gruneisen_rs::utils::FrequencyUnit;
use rstest::rstest;

fn single_atom() -> Structure {
    Structure::new(Lattice::cubic(2.5), vec![Site::new("Li", [0.0; 3], 6.94)]).unwrap()
}

fn dataset() -> GruneisenDataset {
    GruneisenDataset::new(
        vec![[0.0; 3], [0.5, 0.5, 0.5]],
        vec![1, 8],
        vec![0.0, 0.0, 0.0, 4.0, 4.0, 9.0],
        vec![0.0, 0.0, 0.0, 1.5, 1.5, 0.9],
        single_atom(),
        None,
    )
    .unwrap()
}

fn point(qpoint: [f64; 3], f: f64) -> BandPoint {
    BandPoint {
        qpoint,
        frequencies: vec![f, f, 2.0 * f],
        gruneisen: vec![1.0, 1.0, 1.2],
    }
}

fn band_structure() -> GruneisenBandStructure {
    let segments = vec![
        PathSegment {
            start_label: Some("Γ".to_string()),
            end_label: Some("X".to_string()),
            points: vec![point([0.0; 3], 0.0), point([0.5, 0.0, 0.0], 3.0)],
        },
        PathSegment {
            start_label: Some("K".to_string()),
            end_label: Some("Γ".to_string()),
            points: vec![point([0.375, 0.375, 0.0], 3.5), point([0.0; 3], 0.0)],
        },
    ];
    GruneisenBandStructure::new(single_atom(), segments).unwrap()
}

#[rstest]
#[case(FrequencyUnit::Thz, 1.0)]
#[case(FrequencyUnit::Ev, 4.135667696e-3)]
#[case(FrequencyUnit::Mev, 4.135667696)]
#[case(FrequencyUnit::Ha, 1.519829846057e-4)]
#[case(FrequencyUnit::InverseCm, 33.356409519815204)]
fn test_scatter_scales_frequency_only(#[case] units: FrequencyUnit, #[case] factor: f64) {
    let data = scatter_plot_data(&dataset(), units);

    assert_eq!(data.points.len(), 6);
    assert_eq!(data.units, units);
    let top = data.points[5];
    assert_relative_eq!(top.frequency, 9.0 * factor, max_relative = 1e-12);
    assert_eq!(top.gruneisen, 0.9);
    assert_eq!(top.multiplicity, 8);
    assert_eq!(top.band, 2);
}

#[rstest]
#[case("thz", "Frequency (THz)")]
#[case("mev", "Frequency (meV)")]
#[case("cm-1", "Frequency (cm^{-1})")]
fn test_axis_labels(#[case] name: &str, #[case] label: &str) {
    let units: FrequencyUnit = name.parse().unwrap();
    assert_eq!(scatter_plot_data(&dataset(), units).frequency_label, label);
}

#[test]
fn test_band_plot_series() {
    let data = band_plot_data(&band_structure(), FrequencyUnit::Mev).unwrap();

    assert_eq!(data.distances.len(), 4);
    assert_eq!(data.bands.len(), 3);
    assert_relative_eq!(data.bands[2].frequencies[1], 6.0 * 4.135667696, max_relative = 1e-12);
    assert_eq!(data.bands[2].gruneisen, vec![1.2; 4]);
}

#[test]
fn test_band_plot_ticks_merge_discontinuities() {
    let data = band_plot_data(&band_structure(), FrequencyUnit::Thz).unwrap();
    let labels: Vec<&str> = data.ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Γ", "X|K", "Γ"]);
    assert_eq!(data.ticks[0].distance, 0.0);
    assert_eq!(data.ticks[2].distance, *data.distances.last().unwrap());
}

#[test]
fn test_plot_data_serializes() {
    let value = serde_json::to_value(scatter_plot_data(&dataset(), FrequencyUnit::InverseCm)).unwrap();
    assert_eq!(value["units"], "cm-1");
    assert_eq!(value["points"].as_array().unwrap().len(), 6);
}
