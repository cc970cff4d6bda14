//! Procedural macros for chainfig.
//!
//! This crate provides `#[derive(Unmarshal)]`, which turns per-field
//! `#[fig(...)]` annotations into the static field descriptors the chainfig
//! binder walks. Use it through the `chainfig` crate, which re-exports it.
//!
//! ```rust,ignore
//! use chainfig::Unmarshal;
//!
//! #[derive(Default, Unmarshal)]
//! pub struct AppConfig {
//!     #[fig(key = "DATABASE_URL", required)]
//!     pub database_url: String,
//!
//!     #[fig(key = "PORT", default = "8080")]
//!     pub port: i32,
//!
//!     #[fig(key = "LOG_DIR")]
//!     pub log_dir: Option<String>,
//! }
//! ```

mod unmarshal;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `chainfig::Unmarshal` for a struct with named fields.
///
/// # Field attributes
///
/// | Attribute | Meaning |
/// |-----------|---------|
/// | `key = "..."` | Config key to read. Fields without it are ignored. |
/// | `required` / `required = "true"` / `required = true` | Fail when no driver and no default supplies the key. A string value counts as true only if it is `"true"` in any case. |
/// | `default = "..."` | Raw literal used when no driver has the key; coerced like a driver value. |
///
/// Supported field types are `String`, `i32`, `i64`, `bool`, `f64` and
/// `Option` of each. Other types are accepted by the macro and reported as
/// unsupported when binding. Private fields are skipped even when annotated.
#[proc_macro_derive(Unmarshal, attributes(fig))]
pub fn derive_unmarshal(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match unmarshal::derive_unmarshal(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
