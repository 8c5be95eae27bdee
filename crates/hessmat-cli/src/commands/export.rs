use crate::cli::ExportArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::triplets::read_entries_from_path;
use hessmat::core::matrix::export::export_to_path;
use hessmat::engine::assembly::assemble;
use tracing::info;

pub fn run(args: ExportArgs) -> Result<()> {
    let app = build_config(&args.matrix, args.format)?;

    info!("Loading matrix entries from {:?}", &app.input_path);
    let entries = read_entries_from_path(&app.input_path)?;

    let store = assemble(&app.matrix, entries)?;
    let matrix = store.as_matrix();

    info!(
        "Writing {} matrix ({:?}) to {:?}",
        app.matrix.triangle, app.format, &args.output
    );
    export_to_path(matrix, &args.output, app.format)?;

    println!(
        "✓ Exported {}x{} {} matrix ({} stored elements) to: {}",
        matrix.dimension(),
        matrix.dimension(),
        app.matrix.triangle,
        matrix.active_elements(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::MatrixArgs;
    use crate::error::CliError;
    use hessmat::core::matrix::export::ExportFormat;
    use hessmat::engine::error::EngineError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn export_args(dir: &Path, set_values: &[&str]) -> ExportArgs {
        ExportArgs {
            matrix: MatrixArgs {
                input: dir.join("entries.csv"),
                config: None,
                backend: None,
                triangle: None,
                dimension: Some(2),
                seal: false,
                set_values: set_values.iter().map(|s| s.to_string()).collect(),
            },
            output: dir.join("matrix.m"),
            format: None,
        }
    }

    #[test]
    fn export_writes_accumulated_symmetric_matrix() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("entries.csv"),
            "row,column,value\n0,0,1.0\n0,1,0.5\n1,0,0.25\n",
        )
        .unwrap();

        run(export_args(dir.path(), &[])).unwrap();

        let content = fs::read_to_string(dir.path().join("matrix.m")).unwrap();
        assert_eq!(
            content,
            "{\n{1.00000000,0.75000000},\n{0.75000000,0.00000000}}\n"
        );
    }

    #[test]
    fn export_honours_format_override() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("entries.csv"), "row,column,value\n1,1,2.0\n").unwrap();

        let mut args = export_args(dir.path(), &["matrix.triangle=full"]);
        args.format = Some(ExportFormat::Occupancy);
        run(args).unwrap();

        let content = fs::read_to_string(dir.path().join("matrix.m")).unwrap();
        assert_eq!(content, "{\n{0.0,0.0},\n{0.0,1.0}}\n");
    }

    #[test]
    fn export_fails_on_out_of_range_entry() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("entries.csv"), "row,column,value\n5,0,1.0\n").unwrap();

        let result = run(export_args(dir.path(), &[]));
        assert!(matches!(
            result,
            Err(CliError::Engine(EngineError::Assembly { index: 0, .. }))
        ));
        assert!(!dir.path().join("matrix.m").exists());
    }
}
