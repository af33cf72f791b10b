use std::fs;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use super::model::InputTable;
use crate::error::{PlotError, Result};

/// Fields expected on every line.
const FIELDS: usize = 3;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a whitespace-delimited `x y z` file into an [`InputTable`].
///
/// The file is opened, read to the end and closed before this returns.
pub fn load_table(path: &Path) -> Result<InputTable> {
    let bytes = fs::read(path).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(bytes.as_slice())
}

/// Parse `x y z` lines from any reader.
///
/// Layout: no header, one row per line, fields separated by a single space.
/// Blank lines are skipped. Quotes are literal characters, so a quoted field
/// is rejected like any other non-number.
pub fn parse_table<R: Read>(reader: R) -> Result<InputTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut rows = Vec::new();

    for (idx, result) in reader.byte_records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);

        if record.len() != FIELDS {
            return Err(PlotError::Parse {
                line,
                column: record.len().min(FIELDS) + 1,
                value: record
                    .iter()
                    .map(String::from_utf8_lossy)
                    .collect::<Vec<_>>()
                    .join(" "),
            });
        }

        let mut row = [0.0; FIELDS];
        for (col, (slot, field)) in row.iter_mut().zip(record.iter()).enumerate() {
            *slot = std::str::from_utf8(field)
                .ok()
                .and_then(|text| text.trim().parse::<f64>().ok())
                .ok_or_else(|| PlotError::Parse {
                    line,
                    column: col + 1,
                    value: String::from_utf8_lossy(field).into_owned(),
                })?;
        }
        rows.push(row);
    }

    Ok(InputTable::new(rows))
}
