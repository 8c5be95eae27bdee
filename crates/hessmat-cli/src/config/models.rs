use hessmat::core::matrix::export::ExportFormat;
use hessmat::engine::config::MatrixConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub matrix: MatrixConfig,
    pub format: ExportFormat,
}
