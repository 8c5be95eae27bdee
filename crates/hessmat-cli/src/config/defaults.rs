use hessmat::core::matrix::Triangle;
use hessmat::core::matrix::export::ExportFormat;
use hessmat::engine::config::Backend;

pub struct DefaultsConfig {
    pub backend: Backend,
    pub triangle: Triangle,
    pub format: ExportFormat,
    pub seal_after_assembly: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sparse,
            triangle: Triangle::SymmetricUpper,
            format: ExportFormat::Numeric,
            seal_after_assembly: false,
        }
    }
}
