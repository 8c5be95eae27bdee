use crate::cli::InspectArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::triplets::read_entries_from_path;
use hessmat::core::vector::rms_magnitude;
use hessmat::engine::assembly::assemble;
use hessmat::engine::error::EngineError;
use hessmat::engine::factory::MatrixStore;
use itertools::Itertools;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let app = build_config(&args.matrix, None)?;

    info!("Loading matrix entries from {:?}", &app.input_path);
    let entries = read_entries_from_path(&app.input_path)?;
    let store = assemble(&app.matrix, entries)?;

    let stdout = io::stdout();
    write_summary(&store, args.layout, &mut stdout.lock())?;
    Ok(())
}

/// RMS of the row sums, i.e. of `H·1`. `None` for an empty matrix.
fn row_sum_rms(store: &MatrixStore) -> std::result::Result<Option<f64>, EngineError> {
    let matrix = store.as_matrix();
    if matrix.dimension() == 0 {
        return Ok(None);
    }
    let ones = vec![1.0; matrix.dimension()];
    let mut row_sums = vec![0.0; matrix.dimension()];
    matrix.multiply_by_vector(&mut row_sums, &ones)?;
    Ok(Some(rms_magnitude(&row_sums, None)?))
}

pub fn write_summary<W: Write>(store: &MatrixStore, show_layout: bool, out: &mut W) -> Result<()> {
    let matrix = store.as_matrix();
    writeln!(out, "Dimension:       {}", matrix.dimension())?;
    writeln!(out, "Backend:         {}", store.backend())?;
    writeln!(out, "Layout:          {}", matrix.triangle())?;
    writeln!(out, "Active elements: {}", matrix.active_elements())?;
    writeln!(out, "Max |value|:     {:.8}", matrix.max_abs_value())?;
    if let Some(rms) = row_sum_rms(store)? {
        writeln!(out, "Row-sum RMS:     {:.8}", rms)?;
    }

    if let Some(sparse) = store.as_sparse() {
        writeln!(out, "Sealed:          {}", sparse.is_sealed())?;
        writeln!(out, "Reserved:        {}", sparse.reserved_elements())?;
        if show_layout {
            for (row, columns) in sparse.layout().iter().enumerate() {
                writeln!(out, "  row {:>4}: [{}]", row, columns.iter().join(", "))?;
            }
        }
    }
    Ok(())
}
