use std::collections::HashMap;
use std::env::VarError;
use std::path::{Path, PathBuf};

use crate::driver::Driver;
use crate::error::DriverError;

/// Reads the process environment, optionally backed by dotenv files.
///
/// An empty value counts as unset. Dotenv files never override a variable
/// that exists in the process environment, and loading them does not modify
/// the environment: file values are kept inside the driver.
///
/// ```ignore
/// let env = EnvDriver::from_optional_files([".env.local", ".env"])?.with_prefix("MYAPP");
/// // resolver.get_int("PORT") now reads MYAPP_PORT
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvDriver {
    prefix: Option<String>,
    snapshot: Option<HashMap<String, String>>,
    file_vars: HashMap<String, String>,
}

impl EnvDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load dotenv files. Earlier files win over later ones for the same
    /// variable. A missing file is an error.
    pub fn from_files<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self, DriverError> {
        let mut driver = Self::new();
        for path in paths {
            driver.load_file(path.as_ref())?;
        }
        Ok(driver)
    }

    /// Like [`from_files`](Self::from_files), but files that do not exist are
    /// skipped. Any other I/O failure is still an error.
    pub fn from_optional_files<P: AsRef<Path>>(
        paths: impl IntoIterator<Item = P>,
    ) -> Result<Self, DriverError> {
        let mut driver = Self::new();
        for path in paths {
            let path = path.as_ref();
            match std::fs::metadata(path) {
                Ok(_) => driver.load_file(path)?,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "optional env file not present");
                }
                Err(e) => {
                    return Err(DriverError::Io {
                        path: path.to_path_buf(),
                        source: e,
                    });
                }
            }
        }
        Ok(driver)
    }

    /// Use a fixed set of variables instead of the live process environment.
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            snapshot: Some(vars.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Look up `{PREFIX}_{key}` instead of `key`.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    fn load_file(&mut self, path: &Path) -> Result<(), DriverError> {
        let iter = dotenvy::from_path_iter(path).map_err(|e| dotenv_error(path, e))?;
        let mut loaded = 0usize;
        for item in iter {
            let (key, value) = item.map_err(|e| dotenv_error(path, e))?;
            self.file_vars.entry(key).or_insert(value);
            loaded += 1;
        }
        tracing::debug!(path = %path.display(), loaded, "loaded env file");
        Ok(())
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}_{key}"),
            None => key.to_string(),
        }
    }

    fn process_var(&self, key: &str) -> Result<Option<String>, DriverError> {
        if let Some(snapshot) = &self.snapshot {
            return Ok(snapshot.get(key).cloned());
        }
        match std::env::var(key) {
            Ok(v) => Ok(Some(v)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(DriverError::NotUnicode {
                key: key.to_string(),
            }),
        }
    }
}

fn dotenv_error(path: &Path, err: dotenvy::Error) -> DriverError {
    match err {
        dotenvy::Error::Io(source) => DriverError::Io {
            path: PathBuf::from(path),
            source,
        },
        other => DriverError::Parse {
            path: PathBuf::from(path),
            message: other.to_string(),
        },
    }
}

impl Driver for EnvDriver {
    fn get(&self, key: &str) -> Result<Option<String>, DriverError> {
        let key = self.full_key(key);
        let value = match self.process_var(&key)? {
            Some(v) => Some(v),
            None => self.file_vars.get(&key).cloned(),
        };
        Ok(value.filter(|v| !v.is_empty()))
    }

    fn name(&self) -> &str {
        "env"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_snapshot() {
        let driver = EnvDriver::from_vars(vars(&[("HOST", "0.0.0.0")]));
        assert_eq!(driver.get("HOST").unwrap().as_deref(), Some("0.0.0.0"));
        assert_eq!(driver.get("PORT").unwrap(), None);
    }

    #[test]
    fn empty_value_is_not_found() {
        let driver = EnvDriver::from_vars(vars(&[("HOST", "")]));
        assert_eq!(driver.get("HOST").unwrap(), None);
    }

    #[test]
    fn prefix_is_prepended() {
        let driver = EnvDriver::from_vars(vars(&[("MYAPP_PORT", "80"), ("PORT", "1")]))
            .with_prefix("MYAPP");
        assert_eq!(driver.get("PORT").unwrap().as_deref(), Some("80"));
    }

    #[test]
    fn reads_live_process_environment() {
        let driver = EnvDriver::new();
        assert_eq!(
            driver.get("CARGO_PKG_NAME").unwrap().as_deref(),
            Some("chainfig")
        );
        assert_eq!(driver.name(), "env");
    }

    #[test]
    fn file_values_fill_gaps() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, ".env", "DATABASE_URL=pg://file\nPORT=9000\n");
        let mut driver = EnvDriver::from_files([&path]).unwrap();
        driver.snapshot = Some(vars(&[("PORT", "80")]).into_iter().collect());

        assert_eq!(driver.get("DATABASE_URL").unwrap().as_deref(), Some("pg://file"));
        assert_eq!(driver.get("PORT").unwrap().as_deref(), Some("80"));
    }

    #[test]
    fn earlier_file_wins() {
        let dir = TempDir::new().unwrap();
        let local = write(&dir, ".env.local", "PORT=1\n");
        let base = write(&dir, ".env", "PORT=2\nHOST=base\n");
        let mut driver = EnvDriver::from_files([&local, &base]).unwrap();
        driver.snapshot = Some(HashMap::new());

        assert_eq!(driver.get("PORT").unwrap().as_deref(), Some("1"));
        assert_eq!(driver.get("HOST").unwrap().as_deref(), Some("base"));
    }

    #[test]
    fn missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = EnvDriver::from_files([dir.path().join("nope.env")]).unwrap_err();
        assert!(matches!(err, DriverError::Io { .. }));
    }

    #[test]
    fn optional_missing_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let present = write(&dir, ".env", "HOST=here\n");
        let mut driver =
            EnvDriver::from_optional_files([dir.path().join("absent.env"), present]).unwrap();
        driver.snapshot = Some(HashMap::new());
        assert_eq!(driver.get("HOST").unwrap().as_deref(), Some("here"));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, ".env", "NOT A VALID LINE\n");
        let err = EnvDriver::from_files([&path]).unwrap_err();
        match err {
            DriverError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("Expected Parse, got: {other:?}"),
        }
    }
}
