use crate::error::{CliError, Result};
use hessmat::engine::assembly::MatrixEntry;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Reads `row,column,value` records. A header line naming those three columns
/// is required; lines starting with `#` are skipped.
pub fn read_entries<R: Read>(reader: R) -> std::result::Result<Vec<MatrixEntry>, csv::Error> {
    csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

pub fn read_entries_from_path(path: &Path) -> Result<Vec<MatrixEntry>> {
    debug!("Reading matrix entries from {:?}", path);
    let file = std::fs::File::open(path)?;
    let entries = read_entries(file).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    if entries.is_empty() {
        warn!("No matrix entries found in {:?}", path);
    }
    Ok(entries)
}
