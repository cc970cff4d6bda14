//! A TOML file exposed as a driver addressed by dotted keys.

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::driver::Driver;
use crate::error::DriverError;
use crate::value::float_literal;

/// Serves scalar values from a parsed TOML document.
///
/// `database.url` addresses `url` inside the `[database]` table. Scalars are
/// returned in their natural string form (`8080`, `true`, `1.5`, a datetime in
/// TOML notation). Floats always keep a fractional part, so `3.0` stays `3.0`. Asking for a key that holds a table or an array is a driver
/// error rather than a miss, since the key is clearly known to this source.
#[derive(Debug, Clone)]
pub struct TomlDriver {
    name: String,
    table: Table,
}

impl TomlDriver {
    /// Parse TOML text. `name` identifies the driver in diagnostics.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self, DriverError> {
        let name = name.into();
        let table: Table = content.parse().map_err(|e: toml::de::Error| DriverError::Parse {
            path: PathBuf::from(&name),
            message: e.to_string(),
        })?;
        Ok(Self { name, table })
    }

    /// Read and parse a TOML file. The driver is named after the path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DriverError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DriverError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table: Table = content.parse().map_err(|e: toml::de::Error| DriverError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded toml config");
        Ok(Self {
            name: path.display().to_string(),
            table,
        })
    }

    /// Like [`from_path`](Self::from_path), but a missing file yields an
    /// empty driver instead of an error.
    pub fn from_optional_path(path: impl AsRef<Path>) -> Result<Self, DriverError> {
        let path = path.as_ref();
        match Self::from_path(path) {
            Err(DriverError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "optional toml config not present");
                Ok(Self {
                    name: path.display().to_string(),
                    table: Table::new(),
                })
            }
            other => other,
        }
    }
}

/// Navigate a `toml::Table` by dotted key path (e.g. `"database.url"`).
fn table_get<'a>(table: &'a Table, dotted_key: &str) -> Option<&'a Value> {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, dotted_key),
    };

    let tbl = match path {
        Some(path) => {
            let mut current = table;
            for segment in path.split('.') {
                current = current.get(segment)?.as_table()?;
            }
            current
        }
        None => table,
    };

    tbl.get(leaf)
}

fn scalar_string(key: &str, value: &Value) -> Result<String, DriverError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(float_literal(f)),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(_) => Err(DriverError::NotScalar {
            key: key.to_string(),
            found: "array",
        }),
        Value::Table(_) => Err(DriverError::NotScalar {
            key: key.to_string(),
            found: "table",
        }),
    }
}

impl Driver for TomlDriver {
    fn get(&self, key: &str) -> Result<Option<String>, DriverError> {
        table_get(&self.table, key)
            .map(|v| scalar_string(key, v))
            .transpose()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
