//! Sample grid produced by interpolating the six annotation knots.

use std::io::{self, Write};

use crate::bicubic::Bicubic;
use crate::data::model::{GRID_COLS, GRID_ROWS};
use crate::error::BicubicError;

/// Knot x positions.
pub const KNOT_X: [f64; 3] = [-2.5, 0.0, 1.5];
/// Knot y positions.
pub const KNOT_Y: [f64; 2] = [-4.5, 3.2];
/// Values at the knots, row-wise from bottom-left.
pub const KNOT_F: [f64; 6] = [12.4, 1.45, 1.33, 13.4, 13.2, 6.0];
pub const KNOT_FX: [f64; 6] = [1.4, -3.0, 2.0, 5.0, -2.0, -0.3];
pub const KNOT_FY: [f64; 6] = [5.4, -2.0, 3.0, 7.0, -2.0, 3.0];
pub const KNOT_FXY: [f64; 6] = [1.4, -0.2, 2.0, 0.5, -0.6, 0.3];

/// Lattice spacing.
pub const STEP: f64 = 0.1;
/// Margin the lattice extends below the first knot on each axis.
pub const MARGIN: f64 = 0.2;

/// Interpolation over the fixed knots, all derivatives non-zero.
pub fn knot_interpolation() -> Result<Bicubic, BicubicError> {
    Bicubic::new(&KNOT_X, &KNOT_Y, &KNOT_F, &KNOT_FX, &KNOT_FY, &KNOT_FXY)
}

/// Sample `bicubic` over the `GRID_ROWS × GRID_COLS` lattice, y outer, x inner.
pub fn sample_rows(bicubic: &Bicubic) -> Vec<[f64; 3]> {
    let x_min = KNOT_X[0] - MARGIN;
    let y_min = KNOT_Y[0] - MARGIN;

    let mut rows = Vec::with_capacity(GRID_ROWS * GRID_COLS);
    for yi in 0..GRID_ROWS {
        for xi in 0..GRID_COLS {
            let x = xi as f64 * STEP + x_min;
            let y = yi as f64 * STEP + y_min;
            rows.push([x, y, bicubic.sample(x, y)]);
        }
    }
    rows
}

/// Write rows as `x y z` lines.
pub fn write_rows<W: Write>(mut out: W, rows: &[[f64; 3]]) -> io::Result<()> {
    for [x, y, z] in rows {
        writeln!(out, "{x} {y} {z}")?;
    }
    out.flush()
}
