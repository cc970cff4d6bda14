//! Provenance report for a bindable struct: which driver (or default) each
//! field would be populated from.
//!
//! Values are never included, only whether one was found, so a report is
//! safe to print even when drivers hold secrets.

use std::fmt;

use crate::bind::Unmarshal;
use crate::error::Result;
use crate::resolver::Resolver;

/// Where a field's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Supplied by the named driver.
    Driver(String),
    /// No driver had the key; the field's default literal applies.
    Default,
    /// Nothing supplies the key.
    Unset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub field: &'static str,
    pub key: &'static str,
    pub required: bool,
    pub origin: Origin,
}

impl ReportEntry {
    /// A required field that would fail to bind.
    pub fn is_missing(&self) -> bool {
        self.required && self.origin == Origin::Unset
    }
}

/// Result of [`Resolver::report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn missing(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.is_missing())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let origin = match &entry.origin {
                Origin::Driver(name) => format!("<set>  # from {name}"),
                Origin::Default => "<default>".to_string(),
                Origin::Unset if entry.required => "<missing>  # required".to_string(),
                Origin::Unset => "<not set>".to_string(),
            };
            write!(f, "{} = {origin}", entry.key)?;
        }
        Ok(())
    }
}

pub(crate) fn build<T: Unmarshal>(resolver: &Resolver) -> Result<Report> {
    let mut entries = Vec::new();
    for spec in T::fields() {
        let origin = match resolver.lookup(spec.key)? {
            Some(resolved) => Origin::Driver(resolved.driver),
            None if spec.default.is_some() => Origin::Default,
            None => Origin::Unset,
        };
        entries.push(ReportEntry {
            field: spec.field,
            key: spec.key,
            required: spec.required && spec.default.is_none(),
            origin,
        });
    }
    Ok(Report { entries })
}
