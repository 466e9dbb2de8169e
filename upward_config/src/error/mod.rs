//! Error types produced while searching for and loading configuration.

mod constructors;
mod types;

pub use types::{Location, ParseErrorKind, UpwardError};
