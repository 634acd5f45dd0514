/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Gruneisen parameter versus frequency on a q-point mesh

use crate::phonon::GruneisenDataset;
use crate::utils::FrequencyUnit;
use serde::Serialize;

/// One mode of the scatter plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub band: usize,
    /// Frequency in the plot unit
    pub frequency: f64,
    pub gruneisen: f64,
    /// Marker weight
    pub multiplicity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPlotData {
    pub units: FrequencyUnit,
    pub frequency_label: String,
    pub points: Vec<ScatterPoint>,
}

/// (frequency, Gruneisen, multiplicity) for every mode of `dataset`
pub fn scatter_plot_data(dataset: &GruneisenDataset, units: FrequencyUnit) -> ScatterPlotData {
    let points = dataset
        .modes()
        .map(|mode| ScatterPoint {
            band: mode.band,
            frequency: units.from_thz(mode.frequency),
            gruneisen: mode.gruneisen,
            multiplicity: mode.multiplicity,
        })
        .collect();

    ScatterPlotData {
        units,
        frequency_label: format!("Frequency ({})", units.label()),
        points,
    }
}
