use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::types::JsonKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    TypeMismatch,
    TransformFailed,
    Custom,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub key: Option<String>,
    pub expected: Option<Cow<'static, str>>,
    pub actual: Option<JsonKind>,
    pub message: String,
}

impl Error {
    pub fn not_found(key: &str) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            key: Some(key.to_string()),
            expected: None,
            actual: None,
            message: format!("The key '{key}' was not found."),
        }
    }

    pub fn type_mismatch(key: &str, expected: Cow<'static, str>, value: &Value) -> Self {
        Self {
            kind: ErrorKind::TypeMismatch,
            key: Some(key.to_string()),
            message: format!(
                "The key '{key}' was not the right type {expected}. It had value '{value}'."
            ),
            expected: Some(expected),
            actual: Some(JsonKind::of(value)),
        }
    }

    /// Same cause as [`Error::type_mismatch`], worded for keys that were allowed to be absent.
    pub fn optional_type_mismatch(key: &str, expected: Cow<'static, str>, value: &Value) -> Self {
        Self {
            kind: ErrorKind::TypeMismatch,
            key: Some(key.to_string()),
            message: format!(
                "The key '{key}' was present, but did not have the right type {expected}. It had value '{value}'."
            ),
            expected: Some(expected),
            actual: Some(JsonKind::of(value)),
        }
    }

    pub fn transform_failed(key: &str, value: &Value) -> Self {
        Self {
            kind: ErrorKind::TransformFailed,
            key: Some(key.to_string()),
            expected: None,
            actual: Some(JsonKind::of(value)),
            message: format!("The value '{value}' at key '{key}' could not be transformed."),
        }
    }

    /// A root value that was expected to be an object.
    pub fn not_an_object(value: &Value) -> Self {
        let actual = JsonKind::of(value);
        Self {
            kind: ErrorKind::TypeMismatch,
            key: None,
            expected: Some(Cow::Borrowed("object")),
            actual: Some(actual),
            message: format!("Expected an object, found {actual} '{value}'."),
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Custom,
            key: None,
            expected: None,
            actual: None,
            message: message.into(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_detail(mut self, detail: impl fmt::Display) -> Self {
        self.message = format!("{} ({detail})", self.message);
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_type_mismatch(&self) -> bool {
        self.kind == ErrorKind::TypeMismatch
    }

    pub fn is_transform_failed(&self) -> bool {
        self.kind == ErrorKind::TransformFailed
    }
}
