use crate::error::{CliError, Result};
use hessmat::core::matrix::Triangle;
use hessmat::core::matrix::export::ExportFormat;
use hessmat::engine::config::Backend;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileMatrixConfig {
    pub backend: Option<Backend>,
    pub triangle: Option<Triangle>,
    pub dimension: Option<usize>,
    pub reserved_elements: Option<usize>,
    pub seal_after_assembly: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileExportConfig {
    pub format: Option<ExportFormat>,
}

/// Contents of a `matrix.toml` file. Every value is optional so CLI
/// arguments and defaults can fill the gaps.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub matrix: Option<FileMatrixConfig>,
    pub export: Option<FileExportConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn from_file_reads_kebab_case_tables() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matrix.toml");
        fs::write(
            &path,
            r#"
            [matrix]
            backend = "dense"
            triangle = "symmetric-lower"
            dimension = 12
            seal-after-assembly = true

            [export]
            format = "text"
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        let matrix = config.matrix.unwrap();
        assert_eq!(matrix.backend, Some(Backend::Dense));
        assert_eq!(matrix.triangle, Some(Triangle::SymmetricLower));
        assert_eq!(matrix.dimension, Some(12));
        assert_eq!(matrix.reserved_elements, None);
        assert_eq!(matrix.seal_after_assembly, Some(true));
        assert_eq!(config.export.unwrap().format, Some(ExportFormat::Text));
    }

    #[test]
    fn from_file_rejects_unknown_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matrix.toml");
        fs::write(&path, "[matrix]\ndimensions = 3\n").unwrap();

        let result = FileConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn from_file_reports_missing_file_as_io_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
