use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning an input file into surface grids.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Input path missing, unreadable or permission-denied.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field is not a valid floating-point literal (quoted and non-UTF-8
    /// fields included), or a line does not hold exactly three fields.
    #[error("line {line}, column {column}: '{value}' is not a number")]
    Parse {
        line: usize,
        column: usize,
        value: String,
    },

    /// Row count does not fill the fixed grid shape.
    #[error("cannot reshape {rows} rows into a {expected}-cell grid")]
    Reshape { rows: usize, expected: usize },

    /// The reader handed to `parse_table` failed mid-stream. File input is
    /// read into memory first, so `load_table` never returns this.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised while building a bicubic interpolation.
#[derive(Debug, Error, PartialEq)]
pub enum BicubicError {
    #[error("{axis} needs at least two knots, got {len}")]
    TooFewKnots { axis: &'static str, len: usize },

    #[error("{axis} knots must be strictly ascending")]
    Unsorted { axis: &'static str },

    #[error("{name} has {len} values but the lattice needs {expected}")]
    BadDimensions {
        name: &'static str,
        len: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, PlotError>;
