//! Delimited table output for line-probe results.

use std::io::Write;
use std::path::Path;

use glam::Vec3;

use crate::error::{PostError, Result};

/// Writes probe results as comma-separated text.
///
/// One header row `x,y,z,<field...>`, then one row per sample position with
/// the probed values in field order. `rows` must be parallel to `positions`
/// and each row parallel to `fields`.
pub fn write_delimited(
    path: &Path,
    fields: &[String],
    positions: &[Vec3],
    rows: &[Vec<f64>],
) -> Result<()> {
    if rows.len() != positions.len() {
        return Err(PostError::Write(format!(
            "probe produced {} rows for {} positions",
            rows.len(),
            positions.len()
        )));
    }

    let file = std::fs::File::create(path)
        .map_err(|e| PostError::Write(format!("cannot create {}: {e}", path.display())))?;
    let mut out = std::io::BufWriter::new(file);

    write!(out, "x,y,z")?;
    for field in fields {
        write!(out, ",{field}")?;
    }
    writeln!(out)?;

    for (pos, row) in positions.iter().zip(rows) {
        write!(out, "{},{},{}", pos.x, pos.y, pos.z)?;
        for value in row {
            write!(out, ",{value}")?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    log::debug!(
        "wrote {} probe rows to {}",
        positions.len(),
        path.display()
    );
    Ok(())
}
