/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Numerical routines on sampled data
//!
//! All functions work on tabulated values (a frequency grid and the
//! quantity sampled on it) rather than on closures, because phonon
//! densities of states only exist on the provider's grid.

#![allow(clippy::needless_range_loop)]
use super::errors::{Result, UtilsError};

fn check_same_length(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(UtilsError::Generic(format!(
            "x_values and y_values must have the same length ({} != {})",
            x.len(),
            y.len()
        )));
    }
    Ok(())
}

/// Integrate tabulated values with the trapezoidal rule
///
/// # Arguments
///
/// * `y_values` - Sampled function values
/// * `x_values` - Sample positions (need not be uniform)
///
/// # Returns
///
/// The integral over the full sampled range, or 0 for fewer than two samples
pub fn trapezoid(y_values: &[f64], x_values: &[f64]) -> Result<f64> {
    check_same_length(x_values, y_values)?;

    Ok(x_values
        .windows(2)
        .zip(y_values.windows(2))
        .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) / 2.0)
        .sum::<f64>())
}

/// Solve a tridiagonal linear system with the Thomas algorithm
///
/// `lower[0]` and `upper[n - 1]` are ignored.
///
/// # Arguments
///
/// * `lower` - Sub-diagonal, `lower[i]` multiplies `x[i - 1]` in row `i`
/// * `diag` - Main diagonal
/// * `upper` - Super-diagonal, `upper[i]` multiplies `x[i + 1]` in row `i`
/// * `rhs` - Right-hand side
///
/// # Returns
///
/// The solution vector or an error on a vanishing pivot
pub fn solve_tridiagonal(lower: &[f64], diag: &[f64], upper: &[f64], rhs: &[f64]) -> Result<Vec<f64>> {
    let n = diag.len();
    if lower.len() != n || upper.len() != n || rhs.len() != n {
        return Err(UtilsError::Generic(
            "Tridiagonal bands and right-hand side must have the same length".to_string(),
        ));
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    let mut pivot = diag[0];
    if pivot.abs() < f64::MIN_POSITIVE {
        return Err(UtilsError::Math("Zero pivot in tridiagonal solve".to_string()));
    }
    c_prime[0] = upper[0] / pivot;
    d_prime[0] = rhs[0] / pivot;

    for i in 1..n {
        pivot = diag[i] - lower[i] * c_prime[i - 1];
        if pivot.abs() < f64::MIN_POSITIVE {
            return Err(UtilsError::Math(format!(
                "Zero pivot in tridiagonal solve at row {}",
                i
            )));
        }
        c_prime[i] = upper[i] / pivot;
        d_prime[i] = (rhs[i] - lower[i] * d_prime[i - 1]) / pivot;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }

    Ok(x)
}

/// Integrate tabulated values exactly through their interpolating cubic spline
///
/// The spline uses not-a-knot end conditions, which is the interpolating
/// cubic spline FITPACK builds for a zero smoothing factor. Cubic polynomials
/// are therefore integrated exactly.
///
/// # Arguments
///
/// * `x_values` - Strictly increasing sample positions (at least 4)
/// * `y_values` - Sampled function values
///
/// # Returns
///
/// The integral from the first to the last sample position
pub fn spline_integral(x_values: &[f64], y_values: &[f64]) -> Result<f64> {
    check_same_length(x_values, y_values)?;

    let n = x_values.len();
    if n < 4 {
        return Err(UtilsError::Generic(
            "Cubic spline integration requires at least 4 points".to_string(),
        ));
    }

    let dx: Vec<f64> = x_values.windows(2).map(|w| w[1] - w[0]).collect();
    if dx.iter().any(|&h| h <= 0.0 || !h.is_finite()) {
        return Err(UtilsError::Math(
            "Spline sample positions must be strictly increasing".to_string(),
        ));
    }
    let slope: Vec<f64> = (0..n - 1)
        .map(|i| (y_values[i + 1] - y_values[i]) / dx[i])
        .collect();

    // Slopes s[i] of the spline at every knot
    let mut lower = vec![0.0; n];
    let mut diag = vec![0.0; n];
    let mut upper = vec![0.0; n];
    let mut rhs = vec![0.0; n];

    for i in 1..n - 1 {
        lower[i] = dx[i];
        diag[i] = 2.0 * (dx[i - 1] + dx[i]);
        upper[i] = dx[i - 1];
        rhs[i] = 3.0 * (dx[i] * slope[i - 1] + dx[i - 1] * slope[i]);
    }

    let d = x_values[2] - x_values[0];
    diag[0] = dx[1];
    upper[0] = d;
    rhs[0] = ((dx[0] + 2.0 * d) * dx[1] * slope[0] + dx[0] * dx[0] * slope[1]) / d;

    let d = x_values[n - 1] - x_values[n - 3];
    diag[n - 1] = dx[n - 3];
    lower[n - 1] = d;
    rhs[n - 1] =
        (dx[n - 2] * dx[n - 2] * slope[n - 3] + (2.0 * d + dx[n - 2]) * dx[n - 3] * slope[n - 2]) / d;

    let s = solve_tridiagonal(&lower, &diag, &upper, &rhs)?;

    // Each interval is a cubic Hermite segment
    let integral: f64 = (0..n - 1)
        .map(|i| {
            let h = dx[i];
            h * (y_values[i] + y_values[i + 1]) / 2.0 + h * h * (s[i] - s[i + 1]) / 12.0
        })
        .sum();

    Ok(integral)
}

/// Ordinary least-squares fit of a straight line
///
/// # Arguments
///
/// * `x_values` - Abscissae (at least 2)
/// * `y_values` - Ordinates
///
/// # Returns
///
/// `(slope, intercept)`, or a `Degenerate` error when the abscissae have no spread
pub fn linear_regression(x_values: &[f64], y_values: &[f64]) -> Result<(f64, f64)> {
    check_same_length(x_values, y_values)?;

    let n = x_values.len();
    if n < 2 {
        return Err(UtilsError::Generic(
            "Linear regression requires at least 2 points".to_string(),
        ));
    }

    let n_f = n as f64;
    let x_mean = x_values.iter().sum::<f64>() / n_f;
    let y_mean = y_values.iter().sum::<f64>() / n_f;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in x_values.iter().zip(y_values) {
        sxx += (x - x_mean) * (x - x_mean);
        sxy += (x - x_mean) * (y - y_mean);
    }

    // Equal abscissae leave only rounding noise in sxx
    let scale = x_values.iter().fold(1.0_f64, |m, x| m.max(x.abs()));
    if sxx.sqrt() <= n_f * f64::EPSILON * scale {
        return Err(UtilsError::Degenerate(
            "abscissae have zero variance".to_string(),
        ));
    }

    let slope = sxy / sxx;
    Ok((slope, y_mean - slope * x_mean))
}

/// Least-squares coefficient `a` of the model `y = a·x²`
///
/// # Arguments
///
/// * `x_values` - Abscissae
/// * `y_values` - Ordinates
///
/// # Returns
///
/// The coefficient minimizing Σ(y − a·x²)², i.e. Σx²y / Σx⁴
pub fn quadratic_through_origin(x_values: &[f64], y_values: &[f64]) -> Result<f64> {
    check_same_length(x_values, y_values)?;

    let (numerator, denominator) = x_values
        .iter()
        .zip(y_values)
        .fold((0.0, 0.0), |(num, den), (&x, &y)| {
            let x2 = x * x;
            (num + x2 * y, den + x2 * x2)
        });

    if denominator <= 0.0 {
        return Err(UtilsError::Degenerate(
            "quadratic fit needs at least one non-zero abscissa".to_string(),
        ));
    }

    Ok(numerator / denominator)
}
