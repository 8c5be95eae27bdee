use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::MatrixArgs;
use crate::error::{CliError, Result};
use hessmat::core::matrix::export::ExportFormat;
use hessmat::engine::config::MatrixConfigBuilder;
use std::str::FromStr;
use tracing::debug;

/// Merges CLI arguments, `--set` overrides, the config file and defaults, in
/// that order of precedence.
pub fn build_config(args: &MatrixArgs, format: Option<ExportFormat>) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;
    let matrix_file = file_config.matrix.take().unwrap_or_default();
    let export_file = file_config.export.take().unwrap_or_default();

    let backend = args
        .backend
        .or(matrix_file.backend)
        .unwrap_or(defaults.backend);
    let triangle = args
        .triangle
        .or(matrix_file.triangle)
        .unwrap_or(defaults.triangle);
    let seal_after_assembly = args.seal
        || matrix_file
            .seal_after_assembly
            .unwrap_or(defaults.seal_after_assembly);

    let mut builder = MatrixConfigBuilder::new()
        .backend(backend)
        .triangle(triangle)
        .seal_after_assembly(seal_after_assembly);
    if let Some(dimension) = args.dimension.or(matrix_file.dimension) {
        builder = builder.dimension(dimension);
    }
    if let Some(reserved) = matrix_file.reserved_elements {
        builder = builder.reserved_elements(reserved);
    }
    let matrix = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let format = format.or(export_file.format).unwrap_or(defaults.format);
    debug!(?matrix, ?format, "Resolved configuration");

    Ok(AppConfig {
        input_path: args.input.clone(),
        matrix,
        format,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "matrix.backend" => {
                config.matrix.get_or_insert_with(Default::default).backend =
                    Some(parse_value(key, value_str, "backend")?);
            }
            "matrix.triangle" => {
                config.matrix.get_or_insert_with(Default::default).triangle =
                    Some(parse_value(key, value_str, "triangle")?);
            }
            "matrix.dimension" => {
                config.matrix.get_or_insert_with(Default::default).dimension =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "matrix.reserved-elements" => {
                config
                    .matrix
                    .get_or_insert_with(Default::default)
                    .reserved_elements = Some(parse_value(key, value_str, "integer")?);
            }
            "matrix.seal-after-assembly" => {
                config
                    .matrix
                    .get_or_insert_with(Default::default)
                    .seal_after_assembly = Some(parse_value(key, value_str, "boolean")?);
            }
            "export.format" => {
                config.export.get_or_insert_with(Default::default).format =
                    Some(parse_value(key, value_str, "format")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
