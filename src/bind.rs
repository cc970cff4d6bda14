//! Struct binding: populate annotated fields of a record from a driver chain.
//!
//! The binder never inspects a type at runtime. `#[derive(Unmarshal)]`
//! generates a list of [`FieldSpec`]s (source key, required flag, default
//! literal, declared kind, setter) at compile time, and [`unmarshal`] walks that
//! list once in declaration order:
//!
//! 1. Unsupported field types fail before any driver is queried.
//! 2. The first driver that returns a value wins, same as
//!    [`Resolver::resolve`](crate::Resolver::resolve), and is coerced into the
//!    field immediately.
//! 3. With no driver value, a default literal is coerced instead. A malformed
//!    default is an error, never skipped.
//! 4. Otherwise a required field fails with
//!    [`MissingRequired`](ChainfigError::MissingRequired) and an optional one
//!    is left untouched (`Option` fields stay `None`).
//!
//! Fields that were set before a failing field keep their new values.

use crate::error::{ChainfigError, Result};
use crate::resolver::Resolver;
use crate::value::{Kind, Value};

/// A record that can be populated by [`unmarshal`]. Derive it with
/// `#[derive(Unmarshal)]`.
pub trait Unmarshal: Sized {
    /// Bindable fields in declaration order.
    fn fields() -> Vec<FieldSpec<Self>>;
}

/// Declared shape of a destination field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A supported primitive, either direct (`T`) or optional (`Option<T>`).
    Scalar { kind: Kind, optional: bool },
    /// Any other type. Binding such a field is an error.
    Unsupported,
}

/// Compile-time descriptor of one bindable field.
pub struct FieldSpec<T> {
    /// Rust field name.
    pub field: &'static str,
    /// Config key the field is read from.
    pub key: &'static str,
    pub required: bool,
    /// Raw default literal, coerced exactly like a driver value.
    pub default: Option<&'static str>,
    pub kind: FieldKind,
    /// Declared type as written in the source, for diagnostics.
    pub type_name: &'static str,
    /// Stores a coerced value. `None` for unsupported kinds.
    pub assign: Option<fn(&mut T, Value)>,
}

impl<T> FieldSpec<T> {
    fn scalar_kind(&self) -> Result<Kind> {
        match (self.kind, self.assign) {
            (FieldKind::Scalar { kind, .. }, Some(_)) => Ok(kind),
            _ => Err(ChainfigError::UnsupportedFieldType {
                field: self.field,
                type_name: self.type_name,
            }),
        }
    }

    fn set(&self, dest: &mut T, kind: Kind, raw: &str) -> Result<()> {
        let value = kind.parse(self.key, raw).map_err(|e| ChainfigError::Field {
            field: self.field,
            key: self.key,
            source: Box::new(e),
        })?;
        if let Some(assign) = self.assign {
            assign(dest, value);
        }
        Ok(())
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.kind, FieldKind::Scalar { optional: true, .. })
    }
}

/// Populate `dest` from `resolver`'s drivers according to its field specs.
///
/// Returns the first error encountered. Never panics on configuration
/// content; deciding whether a failure is fatal is left to the caller.
pub fn unmarshal<T: Unmarshal>(resolver: &Resolver, dest: &mut T) -> Result<()> {
    for spec in T::fields() {
        let kind = spec.scalar_kind()?;

        if let Some(resolved) = resolver.lookup(spec.key)? {
            spec.set(dest, kind, &resolved.value)?;
            continue;
        }

        if let Some(default) = spec.default {
            tracing::debug!(key = spec.key, field = spec.field, "applying default");
            spec.set(dest, kind, default)?;
            continue;
        }

        if spec.required {
            return Err(ChainfigError::MissingRequired {
                field: spec.field,
                key: spec.key,
            });
        }

        tracing::trace!(key = spec.key, field = spec.field, "left unset");
    }

    Ok(())
}
