//! Typed configuration from an ordered chain of sources.
//!
//! Chainfig resolves string keys through a list of [`Driver`]s (process
//! environment, dotenv files, TOML files, static maps, CLI overrides, or
//! anything else you implement) and coerces the result into a primitive
//! type. It can also populate a whole struct in one call from per-field
//! annotations.
//!
//! ```ignore
//! use chainfig::{EnvDriver, Resolver, TomlDriver, Unmarshal};
//!
//! #[derive(Default, Unmarshal)]
//! pub struct AppConfig {
//!     #[fig(key = "DATABASE_URL", required)]
//!     pub database_url: String,
//!     #[fig(key = "PORT", default = "8080")]
//!     pub port: i32,
//!     #[fig(key = "LOG_DIR")]
//!     pub log_dir: Option<String>,
//! }
//!
//! let resolver = Resolver::builder()
//!     .driver(EnvDriver::from_optional_files([".env"])?)
//!     .driver(TomlDriver::from_optional_path("app.toml")?)
//!     .build();
//!
//! let mut config = AppConfig::default();
//! resolver.unmarshal(&mut config)?;
//! let workers = resolver.get_int_or("WORKERS", 4);
//! ```
//!
//! # Precedence
//!
//! ```text
//! driver 1    queried first; a value here wins
//!    ↓ on a miss
//! driver 2
//!    ↓ on a miss
//! ...
//!    ↓ on a miss
//! NotFound    (or the field's default literal when binding)
//! ```
//!
//! The first driver that has a key wins, both for direct lookups and for
//! struct binding. A miss falls through to the next driver. A driver *error*
//! (unreadable file, non-unicode variable, a table where a scalar was asked
//! for) stops the chain and is reported as
//! [`DriverFailure`](ChainfigError::DriverFailure): a broken source is never
//! quietly skipped.
//!
//! # Typed accessors
//!
//! Every supported type (`String`, `i32`, `i64`, `bool`, `f64`) has three
//! accessors on [`Resolver`]:
//!
//! | Accessor | Missing key | Malformed value |
//! |----------|-------------|-----------------|
//! | `get_int` | `Err(NotFound)` | `Err(WrongType)` |
//! | `must_get_int` | panic | panic |
//! | `get_int_or` | the default | panic |
//!
//! Parsing is base-10 and locale-independent. Booleans accept `1 t T TRUE true
//! True` and `0 f F FALSE false False`, nothing else. A malformed value is
//! never turned into a zero value or a default.
//!
//! # Struct binding
//!
//! `#[derive(Unmarshal)]` reads three per-field settings inside `#[fig(...)]`:
//!
//! - **`key`** opts the field in and names the config key.
//! - **`required`** makes the field mandatory unless it has a default.
//! - **`default`** is a raw literal, coerced exactly like a driver value.
//!
//! `Option<T>` fields become `Some` only when a value or default exists.
//! Non-`Option` fields without a value are left as they were, so start from
//! `Default::default()`. Fields are processed once, in declaration order; if
//! one fails, earlier fields keep their new values.
//!
//! # Error handling
//!
//! All fallible operations return [`ChainfigError`]. Only
//! [`NotFound`](ChainfigError::NotFound) is an expected outcome; see the
//! [`error`] module for the rest.

extern crate self as chainfig;

pub mod drivers;
pub mod error;

mod bind;
#[cfg(feature = "clap")]
mod cli;
mod driver;
mod flatten;
mod report;
mod resolver;
mod value;

#[cfg(test)]
mod fixtures;

pub use bind::{FieldKind, FieldSpec, Unmarshal, unmarshal};
pub use chainfig_derive::Unmarshal;
#[cfg(feature = "clap")]
pub use cli::OverrideArgs;
pub use driver::Driver;
pub use drivers::{EnvDriver, MapDriver, TomlDriver};
pub use error::{ChainfigError, DriverError, Result};
pub use report::{Origin, Report, ReportEntry};
pub use resolver::{Resolved, Resolver, ResolverBuilder};
pub use value::{Kind, Scalar, Value};
