pub mod construct;
pub mod error;
pub mod options;
pub mod parser;
pub mod types;

use serde_json::Value;

pub use crate::construct::FromParser;
pub use crate::error::{Error, ErrorKind};
pub use crate::options::{FetchOptions, NumberCoercion};
pub use crate::parser::Parser;
pub use crate::types::{FromJson, JsonKind};

pub type Result<T> = std::result::Result<T, Error>;

pub fn from_value<T: FromParser>(value: &Value) -> Result<T> {
    from_value_with_options(value, &FetchOptions::default())
}

/// Fails with [`ErrorKind::TypeMismatch`] when `value` is not an object.
pub fn from_value_with_options<T: FromParser>(value: &Value, options: &FetchOptions) -> Result<T> {
    T::from_parser(Parser::try_from_value(value)?.with_options(*options))
}

pub fn fetch<'a, T: FromJson<'a>>(value: &'a Value, key: &str) -> Result<T> {
    Parser::try_from_value(value)?.fetch(key)
}

pub fn fetch_optional<'a, T: FromJson<'a>>(value: &'a Value, key: &str) -> Result<Option<T>> {
    Parser::try_from_value(value)?.fetch_optional(key)
}
