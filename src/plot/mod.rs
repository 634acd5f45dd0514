/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Plot-ready series for external visualization
//!
//! Nothing here draws. The adapters turn datasets and band structures into
//! serializable series with the frequency axis scaled to the requested unit.

pub mod bands;
pub mod scatter;

pub use bands::{band_plot_data, BandPlotData, BandSeries, Tick};
pub use scatter::{scatter_plot_data, ScatterPlotData, ScatterPoint};
