use super::traits::SquareMatrix;
use itertools::Itertools;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown export format: '{0}'. Expected 'numeric', 'occupancy' or 'text'")]
pub struct ParseExportFormatError(pub String);

/// Diagnostic output formats for a whole matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Brace-delimited numeric block with 8-decimal fixed-point values.
    #[default]
    Numeric,
    /// Same shape as [`Numeric`](Self::Numeric) with `1.0` for stored slots and `0.0` elsewhere.
    Occupancy,
    /// Fixed-width text grid.
    Text,
}

impl FromStr for ExportFormat {
    type Err = ParseExportFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(ExportFormat::Numeric),
            "occupancy" => Ok(ExportFormat::Occupancy),
            "text" => Ok(ExportFormat::Text),
            other => Err(ParseExportFormatError(other.to_string())),
        }
    }
}

fn write_block<W, F>(matrix: &dyn SquareMatrix, out: &mut W, cell: F) -> io::Result<()>
where
    W: Write,
    F: Fn(usize, usize) -> String,
{
    let dimension = matrix.dimension();
    writeln!(out, "{{")?;
    let rows = (0..dimension)
        .map(|y| format!("{{{}}}", (0..dimension).map(|x| cell(x, y)).join(",")))
        .join(",\n");
    writeln!(out, "{rows}}}")
}

/// Writes every element, row by row, as a nested brace literal.
pub fn write_numeric<W: Write>(matrix: &dyn SquareMatrix, out: &mut W) -> io::Result<()> {
    write_block(matrix, out, |x, y| format!("{:.8}", matrix.stored_value(x, y)))
}

/// Writes the storage pattern in the same shape as [`write_numeric`].
pub fn write_occupancy<W: Write>(matrix: &dyn SquareMatrix, out: &mut W) -> io::Result<()> {
    write_block(matrix, out, |x, y| {
        if matrix.has_element(x, y) { "1.0" } else { "0.0" }.to_string()
    })
}

pub fn write_text_dump<W: Write>(matrix: &dyn SquareMatrix, out: &mut W) -> io::Result<()> {
    let dimension = matrix.dimension();
    for y in 0..dimension {
        let row = (0..dimension)
            .map(|x| format!("{:12.7}", matrix.stored_value(x, y)))
            .join(" ");
        writeln!(out, "{row}")?;
    }
    Ok(())
}

pub fn write_matrix<W: Write>(
    matrix: &dyn SquareMatrix,
    format: ExportFormat,
    out: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Numeric => write_numeric(matrix, out),
        ExportFormat::Occupancy => write_occupancy(matrix, out),
        ExportFormat::Text => write_text_dump(matrix, out),
    }
}

pub fn export_to_path(
    matrix: &dyn SquareMatrix,
    path: &Path,
    format: ExportFormat,
) -> io::Result<()> {
    debug!(
        "Exporting {}x{} matrix as {:?} to {:?}",
        matrix.dimension(),
        matrix.dimension(),
        format,
        path
    );
    let mut writer = BufWriter::new(File::create(path)?);
    write_matrix(matrix, format, &mut writer)?;
    writer.flush()
}
