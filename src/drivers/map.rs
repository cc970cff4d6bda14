use std::collections::HashMap;

use serde::Serialize;

use crate::driver::Driver;
use crate::error::DriverError;
use crate::flatten;

/// A static in-memory mapping. Useful for programmatic overrides, tests, and
/// as the target of the CLI `--set` adapter.
#[derive(Debug, Clone, Default)]
pub struct MapDriver {
    name: String,
    values: HashMap<String, String>,
}

impl MapDriver {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Build from key-value pairs. If a key repeats, the last pair wins.
    pub fn from_pairs<K, V>(name: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut driver = Self::new(name);
        driver.extend(pairs);
        driver
    }

    /// Build from any serializable value, flattened to dotted keys.
    ///
    /// `None` fields are left out. Sequences cannot be represented as a
    /// single raw string and are rejected.
    pub fn from_serialize<S: Serialize + ?Sized>(
        name: impl Into<String>,
        source: &S,
    ) -> Result<Self, DriverError> {
        let pairs = flatten::flatten(source).map_err(|e| DriverError::Other(e.to_string()))?;
        Ok(Self::from_pairs(name, pairs))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for MapDriver {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.values
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapDriver {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs("map", iter)
    }
}

impl Driver for MapDriver {
    fn get(&self, key: &str) -> Result<Option<String>, DriverError> {
        Ok(self.values.get(key).cloned())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
