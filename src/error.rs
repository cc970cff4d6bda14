use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ChainfigError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ChainfigError {
    #[error("Config key '{key}' not found in any driver")]
    NotFound { key: String },

    #[error("Config key '{key}' (value '{value}') is not of requested type {expected}")]
    WrongType {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Failed to read config key '{key}' from driver '{driver}': {source}")]
    DriverFailure {
        key: String,
        driver: String,
        source: DriverError,
    },

    #[error("Required field '{field}' (config key '{key}') not found in any driver")]
    MissingRequired { field: &'static str, key: &'static str },

    #[error(
        "Field '{field}' has unsupported type {type_name}: supported types are \
         String, i32, i64, bool, f64 and Option of each"
    )]
    UnsupportedFieldType {
        field: &'static str,
        type_name: &'static str,
    },

    #[error("Failed to set field '{field}' from config key '{key}': {source}")]
    Field {
        field: &'static str,
        key: &'static str,
        source: Box<ChainfigError>,
    },
}

impl ChainfigError {
    /// True for [`ChainfigError::NotFound`], the one error callers are expected
    /// to recover from.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChainfigError::NotFound { .. })
    }
}

/// A driver-side failure. Absence of a key is not an error; drivers report it
/// as `Ok(None)`.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Value of '{key}' is not valid unicode")]
    NotUnicode { key: String },

    #[error("Value at '{key}' is a {found}, not a scalar")]
    NotScalar { key: String, found: &'static str },

    #[error("{0}")]
    Other(String),
}
