use ndarray::Array2;

// ---------------------------------------------------------------------------
// Fixed grid shape
// ---------------------------------------------------------------------------

/// Number of grid rows (y steps in the sample file).
pub const GRID_ROWS: usize = 81;
/// Number of grid columns (x steps in the sample file).
pub const GRID_COLS: usize = 44;
/// Rows the input file must contain.
pub const GRID_LEN: usize = GRID_ROWS * GRID_COLS;

/// A reshaped coordinate axis of shape `(GRID_ROWS, GRID_COLS)`.
pub type Grid = Array2<f64>;

// ---------------------------------------------------------------------------
// InputTable – the parsed text file
// ---------------------------------------------------------------------------

/// Rows of `(x, y, z)` in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputTable {
    pub rows: Vec<[f64; 3]>,
}

impl InputTable {
    pub fn new(rows: Vec<[f64; 3]>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy out column `idx` (0 = x, 1 = y, 2 = z), keeping row order.
    pub fn column(&self, idx: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[idx]).collect()
    }
}

// ---------------------------------------------------------------------------
// SurfaceGrids – the three reshaped axes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrids {
    pub x: Grid,
    pub y: Grid,
    pub z: Grid,
}

impl SurfaceGrids {
    /// `(rows, cols)` of the grids.
    pub fn shape(&self) -> (usize, usize) {
        self.z.dim()
    }

    /// Smallest and largest Z, ignoring NaN.
    pub fn z_range(&self) -> (f64, f64) {
        self.z
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

// ---------------------------------------------------------------------------
// AnnotationPoint – fixed overlay markers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AnnotationPoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// The knots of the interpolated sample surface, drawn on top of it.
pub const ANNOTATION_POINTS: [AnnotationPoint; 6] = [
    AnnotationPoint::new(-2.5, -4.5, 12.4),
    AnnotationPoint::new(0.0, -4.5, 1.45),
    AnnotationPoint::new(1.5, -4.5, 1.33),
    AnnotationPoint::new(-2.5, 3.2, 13.4),
    AnnotationPoint::new(0.0, 3.2, 13.2),
    AnnotationPoint::new(1.5, 3.2, 6.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_points_are_fixed() {
        let expected = [
            (-2.5, -4.5, 12.4),
            (0.0, -4.5, 1.45),
            (1.5, -4.5, 1.33),
            (-2.5, 3.2, 13.4),
            (0.0, 3.2, 13.2),
            (1.5, 3.2, 6.0),
        ];
        assert_eq!(ANNOTATION_POINTS.len(), 6);
        for (p, (x, y, z)) in ANNOTATION_POINTS.iter().zip(expected) {
            assert_eq!((p.x, p.y, p.z), (x, y, z));
        }
    }

    #[test]
    fn test_grid_len() {
        assert_eq!(GRID_LEN, 3564);
    }

    #[test]
    fn test_table_columns_keep_order() {
        let table = InputTable::new(vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.column(0), vec![1.0, 4.0]);
        assert_eq!(table.column(1), vec![2.0, 5.0]);
        assert_eq!(table.column(2), vec![3.0, 6.0]);
    }
}
