/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use gruneisen_rs::utils::{
    constants, kelvin_to_thz, linear_regression, spline_integral, thz_to_kelvin, trapezoid,
    FrequencyUnit, UtilsError,
};

#[test]
fn test_temperature_conversions() {
    let kelvin = thz_to_kelvin(1.0);
    assert_relative_eq!(kelvin, 47.99243073366221, epsilon = 1e-9);
    assert_relative_eq!(kelvin_to_thz(kelvin), 1.0, epsilon = 1e-12);
    assert_relative_eq!(
        constants::THZ_TO_KELVIN * constants::BOLTZMANN_HZ_PER_K,
        constants::TERA,
        max_relative = 1e-9
    );
}

#[test]
fn test_unit_factors_are_consistent() {
    assert_relative_eq!(
        FrequencyUnit::Mev.factor(),
        1000.0 * FrequencyUnit::Ev.factor(),
        max_relative = 1e-12
    );
    assert_relative_eq!(FrequencyUnit::InverseCm.from_thz(2.0), 66.71281903963041, max_relative = 1e-12);
    assert!(matches!(
        "kelvin".parse::<FrequencyUnit>(),
        Err(UtilsError::InvalidUnit(_))
    ));
}

#[test]
fn test_spline_beats_trapezoid_on_smooth_data() {
    let x: Vec<f64> = (0..21).map(|i| i as f64 * 0.25).collect();
    let y: Vec<f64> = x.iter().map(|t| t * t * (-t).exp()).collect();
    // ∫0^5 t² e^-t dt = 2 − 37 e^-5
    let exact = 2.0 - 37.0 * (-5.0f64).exp();

    let spline_error = (spline_integral(&x, &y).unwrap() - exact).abs();
    let trapezoid_error = (trapezoid(&y, &x).unwrap() - exact).abs();
    assert!(spline_error < trapezoid_error / 5.0);
}

#[test]
fn test_regression_of_log_data() {
    let volumes = [38.0_f64, 39.0, 40.0, 41.0, 42.0];
    let ln_v: Vec<f64> = volumes.iter().map(|v| v.ln()).collect();
    let ln_w: Vec<f64> = volumes.iter().map(|v| 2.0 - 1.7 * v.ln()).collect();
    let (slope, intercept) = linear_regression(&ln_v, &ln_w).unwrap();
    assert_relative_eq!(slope, -1.7, epsilon = 1e-12);
    assert_relative_eq!(intercept, 2.0, epsilon = 1e-10);
}
