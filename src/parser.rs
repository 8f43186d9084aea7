use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::{Error, FetchOptions, FromJson, FromParser, Result};

fn report(err: Error) -> Error {
    trace!(key = err.key.as_deref(), kind = ?err.kind, "{}", err.message);
    err
}

/// Typed, key-based reader over a decoded JSON object.
///
/// A parser borrows its source and never mutates it, so it is `Copy` and can
/// be shared freely. An absent source behaves like an empty object: required
/// fetches fail with [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) and
/// optional fetches yield `None`.
///
/// # Examples
/// ```
/// use json_fetch::Parser;
/// use serde_json::json;
///
/// let value = json!({"aNumber": 123, "aNullValue": null});
/// let parser = Parser::from_value(&value);
///
/// assert_eq!(parser.fetch::<i64>("aNumber").unwrap(), 123);
/// assert_eq!(parser.fetch_optional::<String>("aNullValue").unwrap(), None);
/// assert!(parser.fetch::<String>("missingKey").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser<'a> {
    source: Option<&'a Map<String, Value>>,
    options: FetchOptions,
}

impl<'a> Parser<'a> {
    pub fn new(source: Option<&'a Map<String, Value>>) -> Self {
        Self {
            source,
            options: FetchOptions::default(),
        }
    }

    pub fn from_map(source: &'a Map<String, Value>) -> Self {
        Self::new(Some(source))
    }

    /// Non-object values produce a parser with no source. Use
    /// [`Parser::try_from_value`] to reject them instead.
    pub fn from_value(value: &'a Value) -> Self {
        Self::new(value.as_object())
    }

    pub fn try_from_value(value: &'a Value) -> Result<Self> {
        value
            .as_object()
            .map(Self::from_map)
            .ok_or_else(|| report(Error::not_an_object(value)))
    }

    pub fn empty() -> Self {
        Self::new(None)
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    pub fn source(&self) -> Option<&'a Map<String, Value>> {
        self.source
    }

    /// True when `key` is present with a non-null value.
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.lookup(key), Some(value) if !value.is_null())
    }

    fn lookup(&self, key: &str) -> Option<&'a Value> {
        self.source?.get(key)
    }

    fn convert<T: FromJson<'a>>(&self, key: &str, value: &'a Value) -> Result<T> {
        T::from_json(value, &self.options)
            .ok_or_else(|| report(Error::type_mismatch(key, T::expected(), value)))
    }

    pub fn fetch_value(&self, key: &str) -> Result<&'a Value> {
        self.lookup(key).ok_or_else(|| report(Error::not_found(key)))
    }

    pub fn fetch<T: FromJson<'a>>(&self, key: &str) -> Result<T> {
        let value = self.fetch_value(key)?;
        self.convert(key, value)
    }

    /// Missing keys, explicit nulls and an absent source all yield `Ok(None)`.
    /// A present value of the wrong type is still an error.
    pub fn fetch_optional<T: FromJson<'a>>(&self, key: &str) -> Result<Option<T>> {
        match self.lookup(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::from_json(value, &self.options)
                .map(Some)
                .ok_or_else(|| report(Error::optional_type_mismatch(key, T::expected(), value))),
        }
    }

    /// Fetches a required `T` and converts it; a `None` from `transform` is
    /// an [`ErrorKind::TransformFailed`](crate::ErrorKind::TransformFailed) error.
    pub fn fetch_with<T, U, F>(&self, key: &str, transform: F) -> Result<U>
    where
        T: FromJson<'a>,
        F: FnOnce(T) -> Option<U>,
    {
        let value = self.fetch_value(key)?;
        let fetched: T = self.convert(key, value)?;
        transform(fetched).ok_or_else(|| report(Error::transform_failed(key, value)))
    }

    /// Unlike [`Parser::fetch_with`], a rejected value becomes `Ok(None)`.
    pub fn fetch_optional_with<T, U, F>(&self, key: &str, transform: F) -> Result<Option<U>>
    where
        T: FromJson<'a>,
        F: FnOnce(T) -> Option<U>,
    {
        Ok(self.fetch_optional::<T>(key)?.and_then(transform))
    }

    /// Fetches a required array of `T` and maps `transform` over it, dropping
    /// the elements it rejects. Output order follows input order.
    pub fn fetch_array<T, U, F>(&self, key: &str, transform: F) -> Result<Vec<U>>
    where
        T: FromJson<'a>,
        F: FnMut(T) -> Option<U>,
    {
        let fetched: Vec<T> = self.fetch(key)?;
        Ok(fetched.into_iter().filter_map(transform).collect())
    }

    pub fn fetch_optional_array<T: FromJson<'a>>(&self, key: &str) -> Result<Vec<T>> {
        Ok(self.fetch_optional::<Vec<T>>(key)?.unwrap_or_default())
    }

    pub fn fetch_optional_array_with<T, U, F>(&self, key: &str, transform: F) -> Result<Vec<U>>
    where
        T: FromJson<'a>,
        F: FnMut(T) -> Option<U>,
    {
        let fetched: Vec<T> = self.fetch_optional_array(key)?;
        Ok(fetched.into_iter().filter_map(transform).collect())
    }

    /// Parser over the required object at `key`, sharing this parser's options.
    pub fn child(&self, key: &str) -> Result<Parser<'a>> {
        let source: &'a Map<String, Value> = self.fetch(key)?;
        Ok(Parser::from_map(source).with_options(self.options))
    }

    /// Like [`Parser::child`], but a missing or null key gives a parser with
    /// no source instead of an error.
    pub fn child_optional(&self, key: &str) -> Result<Parser<'a>> {
        let source: Option<&'a Map<String, Value>> = self.fetch_optional(key)?;
        Ok(Parser::new(source).with_options(self.options))
    }

    /// Builds a nested [`FromParser`] type and surfaces its error, where
    /// [`FromParser::from_map`] would discard it.
    pub fn fetch_nested<U: FromParser>(&self, key: &str) -> Result<U> {
        U::from_parser(self.child(key)?)
    }

    pub fn fetch_optional_nested<U: FromParser>(&self, key: &str) -> Result<Option<U>> {
        let source: Option<&'a Map<String, Value>> = self.fetch_optional(key)?;
        source
            .map(|source| U::from_parser(Parser::from_map(source).with_options(self.options)))
            .transpose()
    }

    /// Hands the value at `key` to serde.
    pub fn fetch_decoded<U: Deserialize<'a>>(&self, key: &str) -> Result<U> {
        let value = self.fetch_value(key)?;
        U::deserialize(value).map_err(|err| {
            let expected = std::any::type_name::<U>().into();
            report(Error::type_mismatch(key, expected, value).with_detail(err))
        })
    }
}

impl<'a> From<&'a Map<String, Value>> for Parser<'a> {
    fn from(source: &'a Map<String, Value>) -> Self {
        Parser::from_map(source)
    }
}

impl<'a> From<Option<&'a Map<String, Value>>> for Parser<'a> {
    fn from(source: Option<&'a Map<String, Value>>) -> Self {
        Parser::new(source)
    }
}
