use serde_json::{Map, Value};
use tracing::debug;

use crate::{FetchOptions, Parser, Result};

/// A type that can build itself from a [`Parser`].
///
/// Only [`FromParser::from_parser`] must be written; it should fail fast by
/// propagating fetch errors with `?`, and may report its own validation
/// failures through [`Error::custom`](crate::Error::custom).
///
/// The `Option`-returning constructors discard the error. Use
/// [`FromParser::try_from_map`] or [`Parser::fetch_nested`] to keep it.
///
/// # Examples
/// ```
/// use json_fetch::{FromParser, Parser, Result};
/// use serde_json::json;
///
/// struct Pair {
///     key1: String,
///     key2: i64,
/// }
///
/// impl FromParser for Pair {
///     fn from_parser(parser: Parser<'_>) -> Result<Self> {
///         Ok(Self {
///             key1: parser.fetch("key1")?,
///             key2: parser.fetch("key2")?,
///         })
///     }
/// }
///
/// let value = json!({"key1": "value1", "key2": 1});
/// let pair = Pair::from_value(&value).unwrap();
/// assert_eq!(pair.key1, "value1");
/// assert_eq!(pair.key2, 1);
///
/// assert!(Pair::from_value(&json!({"key1": "value1"})).is_none());
/// assert!(Pair::from_optional_map(None).is_none());
/// ```
pub trait FromParser: Sized {
    fn from_parser(parser: Parser<'_>) -> Result<Self>;

    fn try_from_map(map: &Map<String, Value>) -> Result<Self> {
        Self::try_from_map_with_options(map, FetchOptions::default())
    }

    fn try_from_map_with_options(map: &Map<String, Value>, options: FetchOptions) -> Result<Self> {
        Self::from_parser(Parser::from_map(map).with_options(options))
    }

    fn from_map(map: &Map<String, Value>) -> Option<Self> {
        Self::from_map_with_options(map, FetchOptions::default())
    }

    fn from_map_with_options(map: &Map<String, Value>, options: FetchOptions) -> Option<Self> {
        match Self::try_from_map_with_options(map, options) {
            Ok(built) => Some(built),
            Err(err) => {
                debug!(
                    target_type = std::any::type_name::<Self>(),
                    key = err.key.as_deref(),
                    kind = ?err.kind,
                    "discarding construction error: {err}"
                );
                None
            }
        }
    }

    /// `None` input short-circuits without calling [`FromParser::from_parser`].
    fn from_optional_map(map: Option<&Map<String, Value>>) -> Option<Self> {
        map.and_then(Self::from_map)
    }

    fn from_value(value: &Value) -> Option<Self> {
        Self::from_optional_map(value.as_object())
    }
}
