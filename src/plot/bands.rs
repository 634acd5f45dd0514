/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Frequency and Gruneisen dispersion along a band path

use crate::phonon::{GruneisenBandStructure, Result};
use crate::utils::FrequencyUnit;
use serde::Serialize;

/// Distances closer than this share a tick
const TICK_TOLERANCE: f64 = 1e-8;

/// A labelled position on the distance axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub distance: f64,
    pub label: String,
}

/// One band along the whole path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSeries {
    pub band: usize,
    /// Frequencies in the plot unit
    pub frequencies: Vec<f64>,
    pub gruneisen: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandPlotData {
    pub units: FrequencyUnit,
    pub frequency_label: String,
    /// Cumulative path length of every q-point in 1/Å
    pub distances: Vec<f64>,
    pub ticks: Vec<Tick>,
    pub bands: Vec<BandSeries>,
}

fn push_tick(ticks: &mut Vec<Tick>, distance: f64, label: &str) {
    if let Some(last) = ticks.last_mut() {
        if (last.distance - distance).abs() < TICK_TOLERANCE {
            // Discontinuity in the path, e.g. "X|K"
            if last.label != label {
                last.label = format!("{}|{}", last.label, label);
            }
            return;
        }
    }
    ticks.push(Tick {
        distance,
        label: label.to_string(),
    });
}

/// (path distance, frequency, Gruneisen) series per band
pub fn band_plot_data(bands: &GruneisenBandStructure, units: FrequencyUnit) -> Result<BandPlotData> {
    let distances = bands.distances()?;

    let mut ticks = Vec::new();
    let mut offset = 0;
    for segment in bands.segments() {
        if segment.points.is_empty() {
            continue;
        }
        let end = offset + segment.points.len() - 1;
        if let Some(label) = &segment.start_label {
            push_tick(&mut ticks, distances[offset], label);
        }
        if let Some(label) = &segment.end_label {
            push_tick(&mut ticks, distances[end], label);
        }
        offset = end + 1;
    }

    let series = (0..bands.num_bands())
        .map(|band| BandSeries {
            band,
            frequencies: bands
                .points()
                .map(|p| units.from_thz(p.frequencies[band]))
                .collect(),
            gruneisen: bands.points().map(|p| p.gruneisen[band]).collect(),
        })
        .collect();

    Ok(BandPlotData {
        units,
        frequency_label: format!("Frequency ({})", units.label()),
        distances,
        ticks,
        bands: series,
    })
}
