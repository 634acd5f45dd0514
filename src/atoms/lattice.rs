/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Crystal lattice representation

use super::errors::{AtomError, Result};
use super::vector::Vector3D;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Lattice vectors as the rows of a 3x3 matrix, in Å
///
/// `[[a1, a2, a3], [b1, b2, b3], [c1, c2, c3]]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    pub matrix: [[f64; 3]; 3],
}

impl Lattice {
    /// Create a lattice from its row-vector matrix
    pub fn new(matrix: [[f64; 3]; 3]) -> Self {
        Self { matrix }
    }

    /// Simple cubic lattice with edge `a`
    pub fn cubic(a: f64) -> Self {
        Self::new([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]])
    }

    /// Lattice from parameters (a, b, c, alpha, beta, gamma), angles in degrees
    pub fn from_parameters(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        let (cos_alpha, cos_beta) = (alpha.to_radians().cos(), beta.to_radians().cos());
        let (sin_gamma, cos_gamma) = gamma.to_radians().sin_cos();

        let c1 = c * cos_beta;
        let c2 = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c3 = (c * c - c1 * c1 - c2 * c2).sqrt();

        Self::new([
            [a, 0.0, 0.0],
            [b * cos_gamma, b * sin_gamma, 0.0],
            [c1, c2, c3],
        ])
    }

    /// The three lattice vectors
    pub fn vectors(&self) -> [Vector3D; 3] {
        [
            Vector3D::from_array(self.matrix[0]),
            Vector3D::from_array(self.matrix[1]),
            Vector3D::from_array(self.matrix[2]),
        ]
    }

    fn triple_product(&self) -> f64 {
        let [a, b, c] = self.vectors();
        a.dot(&b.cross(&c))
    }

    /// Cell volume in Å³
    pub fn volume(&self) -> f64 {
        self.triple_product().abs()
    }

    /// Reciprocal lattice including the 2π factor, in Å⁻¹
    pub fn reciprocal_lattice(&self) -> Result<Lattice> {
        let det = self.triple_product();
        if det.abs() < f64::EPSILON {
            return Err(AtomError::InvalidLattice(
                "lattice vectors are coplanar".to_string(),
            ));
        }

        let [a, b, c] = self.vectors();
        let factor = 2.0 * PI / det;
        Ok(Lattice::new([
            (b.cross(&c) * factor).to_array(),
            (c.cross(&a) * factor).to_array(),
            (a.cross(&b) * factor).to_array(),
        ]))
    }

    /// Cartesian position of fractional coordinates in this lattice
    pub fn cartesian(&self, frac_coords: [f64; 3]) -> Vector3D {
        let [a, b, c] = self.vectors();
        a * frac_coords[0] + b * frac_coords[1] + c * frac_coords[2]
    }
}
