use crate::core::matrix::Triangle;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// Physical storage used for a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    Dense,
    #[default]
    Sparse,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Dense => f.write_str("dense"),
            Backend::Sparse => f.write_str("sparse"),
        }
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(Backend::Dense),
            "sparse" => Ok(Backend::Sparse),
            other => Err(ConfigError::InvalidParameter {
                parameter: "backend",
                reason: format!("unknown backend '{other}', expected 'dense' or 'sparse'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixConfig {
    pub backend: Backend,
    pub triangle: Triangle,
    pub dimension: usize,
    /// Initial entry capacity of a sparse matrix; `None` uses the default.
    pub reserved_elements: Option<usize>,
    /// Seal a sparse matrix once assembly has inserted every entry.
    pub seal_after_assembly: bool,
}

#[derive(Default)]
pub struct MatrixConfigBuilder {
    backend: Option<Backend>,
    triangle: Option<Triangle>,
    dimension: Option<usize>,
    reserved_elements: Option<usize>,
    seal_after_assembly: Option<bool>,
}

impl MatrixConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }
    pub fn triangle(mut self, triangle: Triangle) -> Self {
        self.triangle = Some(triangle);
        self
    }
    pub fn dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }
    pub fn reserved_elements(mut self, reserved: usize) -> Self {
        self.reserved_elements = Some(reserved);
        self
    }
    pub fn seal_after_assembly(mut self, seal: bool) -> Self {
        self.seal_after_assembly = Some(seal);
        self
    }

    pub fn build(self) -> Result<MatrixConfig, ConfigError> {
        let backend = self.backend.unwrap_or_default();
        let dimension = self
            .dimension
            .ok_or(ConfigError::MissingParameter("dimension"))?;
        let triangle = self
            .triangle
            .ok_or(ConfigError::MissingParameter("triangle"))?;

        if triangle.checked_active_elements(dimension).is_none() {
            return Err(ConfigError::InvalidParameter {
                parameter: "dimension",
                reason: format!("{dimension} is too large to address"),
            });
        }

        if let Some(reserved) = self.reserved_elements {
            if reserved == 0 {
                return Err(ConfigError::InvalidParameter {
                    parameter: "reserved_elements",
                    reason: "must be at least 1".to_string(),
                });
            }
            if backend == Backend::Dense {
                return Err(ConfigError::InvalidParameter {
                    parameter: "reserved_elements",
                    reason: "only applies to the sparse backend".to_string(),
                });
            }
        }

        Ok(MatrixConfig {
            backend,
            triangle,
            dimension,
            reserved_elements: self.reserved_elements,
            seal_after_assembly: self.seal_after_assembly.unwrap_or(false),
        })
    }
}
