use super::config::MatrixConfig;
use super::error::EngineError;
use super::factory::{MatrixStore, build_matrix};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// One `(row, column, value)` contribution to a matrix.
///
/// Rows and columns are zero-based; `column` is the `x` coordinate and `row`
/// the `y` coordinate of the addressing contract.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MatrixEntry {
    pub row: usize,
    pub column: usize,
    pub value: f64,
}

impl MatrixEntry {
    pub fn new(row: usize, column: usize, value: f64) -> Self {
        Self { row, column, value }
    }
}

/// Builds a matrix from `config` and accumulates every entry into it.
///
/// Repeated coordinates (and their symmetric mirrors) are summed. When the
/// config asks for it, a sparse matrix is sealed afterwards.
#[instrument(level = "info", skip_all, fields(dimension = config.dimension))]
pub fn assemble<I>(config: &MatrixConfig, entries: I) -> Result<MatrixStore, EngineError>
where
    I: IntoIterator<Item = MatrixEntry>,
{
    let mut store = build_matrix(config);
    let matrix = store.as_matrix_mut();

    let mut count = 0usize;
    for (index, entry) in entries.into_iter().enumerate() {
        matrix
            .add_to_element(entry.column, entry.row, entry.value)
            .map_err(|source| EngineError::Assembly {
                index,
                row: entry.row,
                column: entry.column,
                source,
            })?;
        count += 1;
    }

    if config.seal_after_assembly {
        store.seal_insertion();
        debug!("Matrix sealed after assembly");
    }

    info!(
        entries = count,
        active_elements = store.as_matrix().active_elements(),
        "Matrix assembled"
    );
    Ok(store)
}
