//! The ordered driver chain and its typed accessors.
//!
//! Drivers are queried in the order they were added; the first one that
//! returns a value wins. A driver that fails (as opposed to simply not knowing
//! the key) halts the chain, so a broken source is never silently skipped.
//!
//! Accessors come in three flavors per type:
//!
//! - `get_*` returns a recoverable [`ChainfigError`].
//! - `must_get_*` panics on any error, including a missing key. Use it for
//!   startup-time configuration the program cannot run without.
//! - `get_*_or` returns the default when the key is absent, and panics when a
//!   value is present but malformed. A typo in a configured value is never
//!   mistaken for "not configured".

use std::fmt;

use crate::bind::{self, Unmarshal};
use crate::driver::Driver;
use crate::drivers::{EnvDriver, MapDriver};
use crate::error::{ChainfigError, Result};
use crate::report::{self, Report};
use crate::value::Scalar;

/// A raw value together with the driver that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub driver: String,
}

/// An ordered, immutable chain of [`Driver`]s.
pub struct Resolver {
    drivers: Vec<Box<dyn Driver>>,
}

impl Resolver {
    /// Build a resolver from drivers in precedence order (first = highest).
    pub fn new(drivers: Vec<Box<dyn Driver>>) -> Self {
        Self { drivers }
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Driver names in precedence order.
    pub fn driver_names(&self) -> Vec<&str> {
        self.drivers.iter().map(|d| d.name()).collect()
    }

    /// Find `key` in the first driver that has it, reporting which driver
    /// answered. Absence is `Ok(None)`.
    pub fn lookup(&self, key: &str) -> Result<Option<Resolved>> {
        for driver in &self.drivers {
            match driver.get(key) {
                Ok(Some(value)) => {
                    tracing::debug!(key, driver = driver.name(), "resolved config key");
                    return Ok(Some(Resolved {
                        value,
                        driver: driver.name().to_string(),
                    }));
                }
                Ok(None) => {
                    tracing::trace!(key, driver = driver.name(), "config key not in driver");
                }
                Err(source) => {
                    tracing::warn!(key, driver = driver.name(), error = %source, "driver failed");
                    return Err(ChainfigError::DriverFailure {
                        key: key.to_string(),
                        driver: driver.name().to_string(),
                        source,
                    });
                }
            }
        }
        Ok(None)
    }

    /// Raw string for `key` from the first driver that has it.
    pub fn resolve(&self, key: &str) -> Result<String> {
        match self.lookup(key)? {
            Some(resolved) => Ok(resolved.value),
            None => Err(ChainfigError::NotFound {
                key: key.to_string(),
            }),
        }
    }

    /// Resolve `key` and coerce it to `T`.
    pub fn get<T: Scalar>(&self, key: &str) -> Result<T> {
        let raw = self.resolve(key)?;
        T::parse(key, &raw)
    }

    /// Like [`get`](Self::get), but panics on any error.
    pub fn must_get<T: Scalar>(&self, key: &str) -> T {
        match self.get(key) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Like [`get`](Self::get), but returns `default` when no driver has the
    /// key. A present but malformed value panics.
    pub fn get_or<T: Scalar>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Ok(v) => v,
            Err(e) if e.is_not_found() => default,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    pub fn get_int(&self, key: &str) -> Result<i32> {
        self.get(key)
    }

    pub fn get_int64(&self, key: &str) -> Result<i64> {
        self.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key)
    }

    pub fn get_float64(&self, key: &str) -> Result<f64> {
        self.get(key)
    }

    pub fn must_get_string(&self, key: &str) -> String {
        self.must_get(key)
    }

    pub fn must_get_int(&self, key: &str) -> i32 {
        self.must_get(key)
    }

    pub fn must_get_int64(&self, key: &str) -> i64 {
        self.must_get(key)
    }

    pub fn must_get_bool(&self, key: &str) -> bool {
        self.must_get(key)
    }

    pub fn must_get_float64(&self, key: &str) -> f64 {
        self.must_get(key)
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_or(key, default.to_string())
    }

    pub fn get_int_or(&self, key: &str, default: i32) -> i32 {
        self.get_or(key, default)
    }

    pub fn get_int64_or(&self, key: &str, default: i64) -> i64 {
        self.get_or(key, default)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_or(key, default)
    }

    pub fn get_float64_or(&self, key: &str, default: f64) -> f64 {
        self.get_or(key, default)
    }

    /// Populate the annotated fields of `dest`. See [`bind`](crate::bind).
    pub fn unmarshal<T: Unmarshal>(&self, dest: &mut T) -> Result<()> {
        bind::unmarshal(self, dest)
    }

    /// Describe where each bindable field of `T` would get its value from.
    pub fn report<T: Unmarshal>(&self) -> Result<Report> {
        report::build::<T>(self)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("drivers", &self.driver_names())
            .finish()
    }
}

/// Builder for a [`Resolver`]. Drivers are added in precedence order: the
/// first driver added is consulted first.
#[derive(Default)]
pub struct ResolverBuilder {
    drivers: Vec<Box<dyn Driver>>,
}

impl ResolverBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Append a driver at the lowest precedence so far.
    pub fn driver<D: Driver + 'static>(mut self, driver: D) -> Self {
        self.drivers.push(Box::new(driver));
        self
    }

    /// Append several already-boxed drivers, keeping their order.
    pub fn drivers(mut self, drivers: impl IntoIterator<Item = Box<dyn Driver>>) -> Self {
        self.drivers.extend(drivers);
        self
    }

    /// Append a static key-value driver named `"map"`.
    pub fn map<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.driver(MapDriver::from_pairs("map", pairs))
    }

    /// Append a driver over the process environment.
    pub fn env(self) -> Self {
        self.driver(EnvDriver::new())
    }

    pub fn build(self) -> Resolver {
        Resolver::new(self.drivers)
    }
}
