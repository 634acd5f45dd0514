/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use gruneisen_rs::atoms::{Lattice, Site, Structure};
use gruneisen_rs::input::{load_band_structure, save_band_structure};
use gruneisen_rs::phonon::{
    GruneisenBandStructure, GruneisenMethod, ModeGruneisenCalculator, PhononError, SegmentSpec,
    StrainedPhonons, ZeroFrequencyPolicy,
};
use tempfile::tempdir;

const V0: f64 = 40.0;

fn structure() -> Structure {
    let a = V0.cbrt();
    Structure::new(
        Lattice::cubic(a),
        vec![
            Site::new("Mg", [0.0, 0.0, 0.0], 24.305),
            Site::new("O", [0.5, 0.5, 0.5], 15.999),
        ],
    )
    .unwrap()
}

fn path() -> Vec<SegmentSpec> {
    vec![
        SegmentSpec {
            start_label: Some("Γ".to_string()),
            end_label: Some("X".to_string()),
            qpoints: vec![[0.0, 0.0, 0.0], [0.25, 0.0, 0.0], [0.5, 0.0, 0.0]],
        },
        SegmentSpec {
            start_label: Some("X".to_string()),
            end_label: Some("M".to_string()),
            qpoints: vec![[0.5, 0.0, 0.0], [0.5, 0.5, 0.0]],
        },
    ]
}

/// Equilibrium frequencies at the five path points
fn base_frequencies() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0, 0.0, 11.0, 11.0, 15.0],
        vec![2.1, 2.1, 3.9, 11.2, 11.4, 14.6],
        vec![3.8, 3.8, 6.5, 11.8, 12.0, 13.9],
        vec![3.8, 3.8, 6.5, 11.8, 12.0, 13.9],
        vec![4.4, 5.0, 7.1, 12.3, 12.5, 13.1],
    ]
}

/// Band b scales as V^-γ_b
const EXPONENTS: [f64; 6] = [1.1, 1.1, 1.6, 1.9, 1.9, 2.2];

fn cell(volume: f64) -> StrainedPhonons {
    StrainedPhonons {
        volume,
        frequencies: base_frequencies()
            .into_iter()
            .map(|row| {
                row.iter()
                    .zip(EXPONENTS)
                    .map(|(f, g)| f * (volume / V0).powf(-g))
                    .collect()
            })
            .collect(),
    }
}

fn two_point(calculator: &ModeGruneisenCalculator) -> GruneisenBandStructure {
    GruneisenBandStructure::from_strained(
        structure(),
        path(),
        &cell(V0),
        &[cell(V0 * 1.01), cell(V0 * 0.99)],
        GruneisenMethod::TwoPoint,
        calculator,
    )
    .unwrap()
}

#[test]
fn test_two_point_band_structure() {
    let bands = two_point(&ModeGruneisenCalculator::default());

    assert_eq!(bands.num_points(), 5);
    assert_eq!(bands.num_bands(), 6);
    assert_eq!(bands.segments().len(), 2);

    // Acoustic modes at Γ fall under the default zero policy
    for band in 0..3 {
        assert_eq!(bands.band_gruneisen(band).unwrap()[0], 0.0);
    }
    for (band, &exponent) in EXPONENTS.iter().enumerate() {
        for &g in &bands.band_gruneisen(band).unwrap()[1..] {
            assert_relative_eq!(g, exponent, max_relative = 1e-3);
        }
    }
    assert_eq!(bands.band_frequencies(5).unwrap()[0], 15.0);
}

#[test]
fn test_nan_policy_at_gamma() {
    let calc = ModeGruneisenCalculator::new(ZeroFrequencyPolicy::Nan, 1e-6);
    let bands = two_point(&calc);
    assert!(bands.band_gruneisen(0).unwrap()[0].is_nan());
    assert!(bands.band_gruneisen(3).unwrap()[0].is_finite());
}

#[test]
fn test_fit_band_structure() {
    let bands = GruneisenBandStructure::from_strained(
        structure(),
        path(),
        &cell(V0),
        &[cell(V0 * 0.98), cell(V0 * 0.99), cell(V0 * 1.01), cell(V0 * 1.02)],
        GruneisenMethod::Fit,
        &ModeGruneisenCalculator::default(),
    )
    .unwrap();

    // Exact power laws make the log-log fit exact
    for point in bands.points().skip(1) {
        for (g, exponent) in point.gruneisen.iter().zip(EXPONENTS) {
            assert_relative_eq!(*g, exponent, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_fit_with_equal_volumes_is_degenerate() {
    let result = GruneisenBandStructure::from_strained(
        structure(),
        path(),
        &cell(V0),
        &[cell(V0), cell(V0)],
        GruneisenMethod::Fit,
        &ModeGruneisenCalculator::default(),
    );
    assert!(matches!(result, Err(PhononError::DegenerateFit(_))));
}

#[test]
fn test_mismatched_path_length() {
    let mut short = cell(V0 * 1.01);
    short.frequencies.pop();
    let result = GruneisenBandStructure::from_strained(
        structure(),
        path(),
        &cell(V0),
        &[short, cell(V0 * 0.99)],
        GruneisenMethod::TwoPoint,
        &ModeGruneisenCalculator::default(),
    );
    assert!(matches!(result, Err(PhononError::MalformedInput(_))));
}

#[test]
fn test_round_trip() {
    let calc = ModeGruneisenCalculator::new(ZeroFrequencyPolicy::Nan, 1e-6);
    let original = two_point(&calc);

    let restored = GruneisenBandStructure::from_dict(&original.as_dict().unwrap()).unwrap();
    assert_eq!(restored.segments()[1].end_label.as_deref(), Some("M"));
    assert!(restored.band_gruneisen(0).unwrap()[0].is_nan());
    for band in 3..6 {
        assert_eq!(restored.band_gruneisen(band), original.band_gruneisen(band));
        assert_eq!(restored.band_frequencies(band), original.band_frequencies(band));
    }

    let dir = tempdir().unwrap();
    let file = dir.path().join("bands.json");
    let default_policy = two_point(&ModeGruneisenCalculator::default());
    save_band_structure(&default_policy, &file).unwrap();
    assert_eq!(load_band_structure(&file).unwrap(), default_policy);
}

#[test]
fn test_distances_continue_across_segments() {
    let bands = two_point(&ModeGruneisenCalculator::default());
    let distances = bands.distances().unwrap();
    let b = 2.0 * std::f64::consts::PI / V0.cbrt();

    assert_eq!(distances.len(), 5);
    assert_relative_eq!(distances[2], 0.5 * b, max_relative = 1e-12);
    // X repeated at the segment boundary adds no length
    assert_relative_eq!(distances[3], distances[2], max_relative = 1e-12);
    assert_relative_eq!(distances[4], b, max_relative = 1e-12);
}
