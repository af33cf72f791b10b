//! Bicubic patch interpolation over a rectilinear knot lattice.
//!
//! Each lattice cell holds one [`Patch`] fitted to the values and first
//! derivatives at its four corners, so the surface is C¹ across cell edges.

use std::cmp::Ordering;

use nalgebra::{Matrix4, Vector4};

use crate::error::BicubicError;

/// Hermite basis: `A = M · F · Mᵀ`.
#[rustfmt::skip]
fn hermite_basis() -> Matrix4<f64> {
    Matrix4::new(
         1.0,  0.0,  0.0,  0.0,
         0.0,  0.0,  1.0,  0.0,
        -3.0,  3.0, -2.0, -1.0,
         2.0, -2.0,  1.0,  1.0,
    )
}

/// Corner samples of one cell, ordered `(0,0), (1,0), (0,1), (1,1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub f: [f64; 4],
    pub fx: [f64; 4],
    pub fy: [f64; 4],
    pub fxy: [f64; 4],
}

// ---------------------------------------------------------------------------
// Patch – one unit-square cell
// ---------------------------------------------------------------------------

/// Bicubic polynomial on the unit square, `Σ a_ij · u^i · v^j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// `a_ij` at row `i`, column `j`.
    coefficients: Matrix4<f64>,
}

impl Patch {
    /// Fit a patch to a cell of size `dx × dy`.
    ///
    /// Derivatives are given in lattice units and rescaled to the unit square.
    pub fn from_corners(dx: f64, dy: f64, c: &Corners) -> Self {
        let [f00, f10, f01, f11] = c.f;
        let [fx00, fx10, fx01, fx11] = c.fx.map(|v| v * dx);
        let [fy00, fy10, fy01, fy11] = c.fy.map(|v| v * dy);
        let [fxy00, fxy10, fxy01, fxy11] = c.fxy.map(|v| v * dx * dy);

        #[rustfmt::skip]
        let f = Matrix4::new(
            f00,  f01,  fy00,  fy01,
            f10,  f11,  fy10,  fy11,
            fx00, fx01, fxy00, fxy01,
            fx10, fx11, fxy10, fxy11,
        );
        let m = hermite_basis();
        Self {
            coefficients: m * f * m.transpose(),
        }
    }

    /// Evaluate at `(u, v)` in the unit square.
    pub fn sample(&self, u: f64, v: f64) -> f64 {
        let us = Vector4::new(1.0, u, u * u, u * u * u);
        let vs = Vector4::new(1.0, v, v * v, v * v * v);
        us.dot(&(self.coefficients * vs))
    }

    /// Coefficient of `u^i · v^j`.
    pub fn coefficient(&self, i: usize, j: usize) -> f64 {
        self.coefficients[(i, j)]
    }
}

// ---------------------------------------------------------------------------
// Bicubic – the full lattice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Bicubic {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Row-major over cells: `yi * (x.len() - 1) + xi`.
    patches: Vec<Patch>,
}

impl Bicubic {
    /// Build from knot axes and per-knot samples.
    ///
    /// `f`, `fx`, `fy` and `fxy` are row-wise from bottom-left to top-right:
    /// the sample at knot `(xi, yi)` lives at `xi + yi * x.len()`.
    pub fn new(
        x: &[f64],
        y: &[f64],
        f: &[f64],
        fx: &[f64],
        fy: &[f64],
        fxy: &[f64],
    ) -> Result<Self, BicubicError> {
        check_axis("x", x)?;
        check_axis("y", y)?;

        let expected = x.len() * y.len();
        for (name, values) in [("f", f), ("fx", fx), ("fy", fy), ("fxy", fxy)] {
            if values.len() != expected {
                return Err(BicubicError::BadDimensions {
                    name,
                    len: values.len(),
                    expected,
                });
            }
        }

        let row_len = x.len();
        let mut patches = Vec::with_capacity((x.len() - 1) * (y.len() - 1));
        for yi in 0..y.len() - 1 {
            for xi in 0..x.len() - 1 {
                let i = xi + yi * row_len;
                let quad = |s: &[f64]| [s[i], s[i + 1], s[i + row_len], s[i + row_len + 1]];
                let corners = Corners {
                    f: quad(f),
                    fx: quad(fx),
                    fy: quad(fy),
                    fxy: quad(fxy),
                };
                patches.push(Patch::from_corners(
                    x[xi + 1] - x[xi],
                    y[yi + 1] - y[yi],
                    &corners,
                ));
            }
        }
        log::debug!("Fitted {} bicubic patches", patches.len());

        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            patches,
        })
    }

    /// Value at `(x, y)`.
    ///
    /// Points on or outside the lattice boundary give `0.0`; there is no
    /// extrapolation.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        match self.locate(x, y) {
            Some((patch, u, v)) => patch.sample(u, v),
            None => 0.0,
        }
    }

    /// Patch containing `(x, y)` and the local coordinates inside it.
    fn locate(&self, x: f64, y: f64) -> Option<(&Patch, f64, f64)> {
        let (xi, u) = cell(&self.x, x)?;
        let (yi, v) = cell(&self.y, y)?;
        let patch = self.patches.get(yi * (self.x.len() - 1) + xi)?;
        Some((patch, u, v))
    }
}

/// Index of the cell strictly containing `p` and the position inside it.
fn cell(knots: &[f64], p: f64) -> Option<(usize, f64)> {
    let (first, last) = (*knots.first()?, *knots.last()?);
    if p.is_nan() || p <= first || p >= last {
        return None;
    }
    let upper = knots.partition_point(|&k| k < p);
    let lower = upper - 1;
    let t = (p - knots[lower]) / (knots[upper] - knots[lower]);
    Some((lower, t))
}

fn check_axis(axis: &'static str, knots: &[f64]) -> Result<(), BicubicError> {
    if knots.len() < 2 {
        return Err(BicubicError::TooFewKnots {
            axis,
            len: knots.len(),
        });
    }
    let ascending = knots
        .windows(2)
        .all(|w| w[0].partial_cmp(&w[1]) == Some(Ordering::Less));
    if !ascending {
        return Err(BicubicError::Unsorted { axis });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn corners() -> Corners {
        Corners {
            f: [12.4, 1.45, 13.4, 13.2],
            fx: [1.4, -3.0, 5.0, -2.0],
            fy: [5.4, -2.0, 7.0, -2.0],
            fxy: [1.4, -0.2, 0.5, -0.6],
        }
    }

    #[test]
    fn test_patch_matches_corner_values() {
        let c = corners();
        let patch = Patch::from_corners(2.5, 7.7, &c);
        assert_relative_eq!(patch.sample(0.0, 0.0), c.f[0], epsilon = 1e-9);
        assert_relative_eq!(patch.sample(1.0, 0.0), c.f[1], epsilon = 1e-9);
        assert_relative_eq!(patch.sample(0.0, 1.0), c.f[2], epsilon = 1e-9);
        assert_relative_eq!(patch.sample(1.0, 1.0), c.f[3], epsilon = 1e-9);
    }

    #[test]
    fn test_patch_coefficients() {
        let c = corners();
        let (dx, dy) = (2.5, 7.7);
        let patch = Patch::from_corners(dx, dy, &c);

        assert_relative_eq!(patch.coefficient(0, 0), c.f[0]);
        assert_relative_eq!(patch.coefficient(1, 0), dx * c.fx[0]);
        assert_relative_eq!(patch.coefficient(0, 1), dy * c.fy[0]);
        assert_relative_eq!(patch.coefficient(1, 1), dx * dy * c.fxy[0], epsilon = 1e-12);
        assert_relative_eq!(
            patch.coefficient(2, 0),
            -3.0 * c.f[0] + 3.0 * c.f[1] - 2.0 * dx * c.fx[0] - dx * c.fx[1],
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_patch_slope_matches_derivative() {
        let c = corners();
        let (dx, dy) = (2.5, 7.7);
        let patch = Patch::from_corners(dx, dy, &c);
        let h = 1e-6;
        let du = (patch.sample(h, 0.0) - patch.sample(0.0, 0.0)) / h;
        assert_relative_eq!(du, dx * c.fx[0], epsilon = 1e-4);
    }

    fn lattice() -> Bicubic {
        Bicubic::new(
            &[-2.5, 0.0, 1.5],
            &[-4.5, 3.2],
            &[12.4, 1.45, 1.33, 13.4, 13.2, 6.0],
            &[1.4, -3.0, 2.0, 5.0, -2.0, -0.3],
            &[5.4, -2.0, 3.0, 7.0, -2.0, 3.0],
            &[1.4, -0.2, 2.0, 0.5, -0.6, 0.3],
        )
        .unwrap()
    }

    #[test]
    fn test_sample_approaches_knot_values() {
        let b = lattice();
        let eps = 1e-9;
        assert_relative_eq!(b.sample(0.0 + eps, -4.5 + eps), 1.45, epsilon = 1e-6);
        assert_relative_eq!(b.sample(0.0 - eps, 3.2 - eps), 13.2, epsilon = 1e-6);
        assert_relative_eq!(b.sample(1.5 - eps, 3.2 - eps), 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sample_is_continuous_across_cells() {
        let b = lattice();
        let eps = 1e-9;
        for y in [-4.0, 0.0, 2.5] {
            let left = b.sample(0.0 - eps, y);
            let right = b.sample(0.0 + eps, y);
            assert_relative_eq!(left, right, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_outside_and_boundary_is_zero() {
        let b = lattice();
        assert_eq!(b.sample(-2.5, 0.0), 0.0);
        assert_eq!(b.sample(-3.0, 0.0), 0.0);
        assert_eq!(b.sample(0.0, 3.2), 0.0);
        assert_eq!(b.sample(0.5, 10.0), 0.0);
        assert!(b.sample(0.5, 0.0) != 0.0);
    }

    #[test]
    fn test_construction_errors() {
        let one = [0.0];
        let two = [0.0, 1.0];
        let four = [0.0; 4];

        assert_eq!(
            Bicubic::new(&one, &two, &four, &four, &four, &four).unwrap_err(),
            BicubicError::TooFewKnots { axis: "x", len: 1 }
        );
        assert_eq!(
            Bicubic::new(&two, &[1.0, 0.0], &four, &four, &four, &four).unwrap_err(),
            BicubicError::Unsorted { axis: "y" }
        );
        assert_eq!(
            Bicubic::new(&two, &two, &four, &[0.0; 3], &four, &four).unwrap_err(),
            BicubicError::BadDimensions {
                name: "fx",
                len: 3,
                expected: 4
            }
        );
    }
}
