//! The driver capability: the only thing a configuration source has to
//! implement to take part in a [`Resolver`](crate::Resolver) chain.

use std::sync::Arc;

use crate::error::DriverError;

/// A source of raw configuration strings.
///
/// `get` returns `Ok(None)` when the key is simply absent, so that an empty
/// string can still be a legitimate configured value for stores that allow it.
/// Any `Err` halts the resolver chain instead of falling through to the next
/// driver.
///
/// Drivers are shared read-only across callers. Implementations that cache
/// must synchronize internally.
pub trait Driver: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, DriverError>;

    /// Short, stable identifier used in errors and log fields.
    fn name(&self) -> &str;
}

impl<D: Driver + ?Sized> Driver for &D {
    fn get(&self, key: &str) -> Result<Option<String>, DriverError> {
        (**self).get(key)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    fn get(&self, key: &str) -> Result<Option<String>, DriverError> {
        (**self).get(key)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<D: Driver + ?Sized> Driver for Arc<D> {
    fn get(&self, key: &str) -> Result<Option<String>, DriverError> {
        (**self).get(key)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
