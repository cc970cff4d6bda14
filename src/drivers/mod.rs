//! Bundled [`Driver`](crate::Driver) implementations.
//!
//! None of these are special to the resolver; any type implementing the trait
//! can sit anywhere in the chain.

mod env;
mod file;
mod map;

pub use env::EnvDriver;
pub use file::TomlDriver;
pub use map::MapDriver;
