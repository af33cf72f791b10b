use ndarray::Array2;

use super::model::{Grid, InputTable, SurfaceGrids, GRID_COLS, GRID_LEN, GRID_ROWS};
use crate::error::{PlotError, Result};

/// Reshape one column into a `(GRID_ROWS, GRID_COLS)` grid, row-major.
///
/// `grid[[r, c]] == column[r * GRID_COLS + c]`. Any length other than
/// [`GRID_LEN`] is rejected rather than padded or truncated.
pub fn reshape_column(column: Vec<f64>) -> Result<Grid> {
    let rows = column.len();
    Array2::from_shape_vec((GRID_ROWS, GRID_COLS), column).map_err(|_| PlotError::Reshape {
        rows,
        expected: GRID_LEN,
    })
}

impl SurfaceGrids {
    /// Split the table into its X, Y and Z columns and reshape each one.
    pub fn from_table(table: &InputTable) -> Result<Self> {
        Ok(Self {
            x: reshape_column(table.column(0))?,
            y: reshape_column(table.column(1))?,
            z: reshape_column(table.column(2))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_table;

    fn synthetic_table(rows: usize) -> InputTable {
        InputTable::new(
            (0..rows)
                .map(|i| {
                    let r = (i / GRID_COLS) as f64;
                    let c = (i % GRID_COLS) as f64;
                    [c * 0.1, r * 0.1, r * 100.0 + c]
                })
                .collect(),
        )
    }

    #[test]
    fn test_reshape_is_row_major() -> Result<()> {
        let column: Vec<f64> = (0..GRID_LEN).map(|i| i as f64).collect();
        let grid = reshape_column(column.clone())?;

        assert_eq!(grid.dim(), (GRID_ROWS, GRID_COLS));
        for r in 0..GRID_ROWS {
            for c in 0..GRID_COLS {
                assert_eq!(grid[[r, c]], column[r * GRID_COLS + c]);
            }
        }
        Ok(())
    }

    #[test]
    fn test_grids_from_table() -> Result<()> {
        let table = synthetic_table(GRID_LEN);
        let grids = SurfaceGrids::from_table(&table)?;

        assert_eq!(grids.shape(), (81, 44));
        assert_eq!(grids.x[[0, 43]], 43.0 * 0.1);
        assert_eq!(grids.y[[80, 0]], 80.0 * 0.1);
        assert_eq!(grids.z[[80, 43]], 8043.0);
        assert_eq!(grids.z[[1, 0]], 100.0);
        assert_eq!(grids.z_range(), (0.0, 8043.0));
        Ok(())
    }

    #[test]
    fn test_one_row_short_or_long_is_reshape_error() {
        for rows in [GRID_LEN - 1, GRID_LEN + 1] {
            let err = SurfaceGrids::from_table(&synthetic_table(rows)).unwrap_err();
            match err {
                PlotError::Reshape { rows: got, expected } => {
                    assert_eq!(got, rows);
                    assert_eq!(expected, 3564);
                }
                other => panic!("expected reshape error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_same_input_gives_same_grids() -> Result<()> {
        let text: String = synthetic_table(GRID_LEN)
            .rows
            .iter()
            .map(|[x, y, z]| format!("{x} {y} {z}\n"))
            .collect();

        let first = SurfaceGrids::from_table(&parse_table(text.as_bytes())?)?;
        let second = SurfaceGrids::from_table(&parse_table(text.as_bytes())?)?;
        assert_eq!(first, second);
        Ok(())
    }
}
