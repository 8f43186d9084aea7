use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Number, Value};

use crate::FetchOptions;

/// Conversion from a borrowed JSON value into a concrete Rust type.
///
/// `from_json` returns `None` when the value has the wrong shape or does not
/// fit the target type; callers turn that into a type mismatch naming
/// [`FromJson::expected`].
pub trait FromJson<'a>: Sized {
    fn from_json(value: &'a Value, options: &FetchOptions) -> Option<Self>;

    fn expected() -> Cow<'static, str>;
}

fn integral_i64(number: &Number, options: &FetchOptions) -> Option<i64> {
    if let Some(i) = number.as_i64() {
        return Some(i);
    }
    if !number.is_f64() || !options.allows_integral_floats() {
        return None;
    }
    let f = number.as_f64()?;
    let i = f as i64;
    if i as f64 == f && i != i64::MAX {
        Some(i)
    } else {
        None
    }
}

fn integral_u64(number: &Number, options: &FetchOptions) -> Option<u64> {
    if let Some(u) = number.as_u64() {
        return Some(u);
    }
    if !number.is_f64() || !options.allows_integral_floats() {
        return None;
    }
    let f = number.as_f64()?;
    if f < 0.0 {
        return None;
    }
    let u = f as u64;
    if u as f64 == f && u != u64::MAX {
        Some(u)
    } else {
        None
    }
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl<'a> FromJson<'a> for $ty {
                fn from_json(value: &'a Value, options: &FetchOptions) -> Option<Self> {
                    match value {
                        Value::Number(number) => {
                            integral_i64(number, options).and_then(|i| <$ty>::try_from(i).ok())
                        }
                        _ => None,
                    }
                }

                fn expected() -> Cow<'static, str> {
                    Cow::Borrowed(stringify!($ty))
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl<'a> FromJson<'a> for $ty {
                fn from_json(value: &'a Value, options: &FetchOptions) -> Option<Self> {
                    match value {
                        Value::Number(number) => {
                            integral_u64(number, options).and_then(|u| <$ty>::try_from(u).ok())
                        }
                        _ => None,
                    }
                }

                fn expected() -> Cow<'static, str> {
                    Cow::Borrowed(stringify!($ty))
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl<'a> FromJson<'a> for f64 {
    fn from_json(value: &'a Value, _options: &FetchOptions) -> Option<Self> {
        value.as_f64()
    }

    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("f64")
    }
}

/// Fractions round to the nearest `f32`; integers must be exactly representable.
impl<'a> FromJson<'a> for f32 {
    fn from_json(value: &'a Value, _options: &FetchOptions) -> Option<Self> {
        let f = value.as_f64()? as f32;
        if !f.is_finite() {
            return None;
        }
        let integral = value
            .as_i64()
            .map(i128::from)
            .or_else(|| value.as_u64().map(i128::from));
        match integral {
            Some(exact) if f as i128 != exact => None,
            _ => Some(f),
        }
    }

    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("f32")
    }
}

impl<'a> FromJson<'a> for Number {
    fn from_json(value: &'a Value, _options: &FetchOptions) -> Option<Self> {
        match value {
            Value::Number(number) => Some(number.clone()),
            _ => None,
        }
    }

    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("number")
    }
}

impl<'a> FromJson<'a> for bool {
    fn from_json(value: &'a Value, _options: &FetchOptions) -> Option<Self> {
        value.as_bool()
    }

    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("bool")
    }
}

impl<'a> FromJson<'a> for &'a str {
    fn from_json(value: &'a Value, _options: &FetchOptions) -> Option<Self> {
        value.as_str()
    }

    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("string")
    }
}

impl<'a> FromJson<'a> for String {
    fn from_json(value: &'a Value, _options: &FetchOptions) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }

    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("string")
    }
}

/// Only `null` converts to `()`.
impl<'a> FromJson<'a> for () {
    fn from_json(value: &'a Value, _options: &FetchOptions) -> Option<Self> {
        value.as_null()
    }

    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("null")
    }
}

impl<'a> FromJson<'a> for &'a Value {
    fn from_json(value: &'a Value, _options: &FetchOptions) -> Option<Self> {
        Some(value)
    }

    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("any value")
    }
}

impl<'a> FromJson<'a> for Value {
    fn from_json(value: &'a Value, _options: &FetchOptions) -> Option<Self> {
        Some(value.clone())
    }

    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("any value")
    }
}

/// Accepts `null` as `Some(None)`, so a required fetch can tolerate an
/// explicit null while still failing on a missing key.
impl<'a, T: FromJson<'a>> FromJson<'a> for Option<T> {
    fn from_json(value: &'a Value, options: &FetchOptions) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_json(other, options).map(Some),
        }
    }

    fn expected() -> Cow<'static, str> {
        Cow::Owned(format!("{} or null", T::expected()))
    }
}

impl<'a> FromJson<'a> for &'a [Value] {
    fn from_json(value: &'a Value, _options: &FetchOptions) -> Option<Self> {
        value.as_array().map(Vec::as_slice)
    }

    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("array")
    }
}

// One element of the wrong type rejects the whole array.
impl<'a, T: FromJson<'a>> FromJson<'a> for Vec<T> {
    fn from_json(value: &'a Value, options: &FetchOptions) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(|item| T::from_json(item, options))
            .collect()
    }

    fn expected() -> Cow<'static, str> {
        Cow::Owned(format!("array of {}", T::expected()))
    }
}

impl<'a> FromJson<'a> for &'a Map<String, Value> {
    fn from_json(value: &'a Value, _options: &FetchOptions) -> Option<Self> {
        value.as_object()
    }

    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("object")
    }
}

impl<'a> FromJson<'a> for Map<String, Value> {
    fn from_json(value: &'a Value, _options: &FetchOptions) -> Option<Self> {
        value.as_object().cloned()
    }

    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("object")
    }
}

impl<'a, T: FromJson<'a>> FromJson<'a> for HashMap<String, T> {
    fn from_json(value: &'a Value, options: &FetchOptions) -> Option<Self> {
        value
            .as_object()?
            .iter()
            .map(|(key, item)| T::from_json(item, options).map(|item| (key.clone(), item)))
            .collect()
    }

    fn expected() -> Cow<'static, str> {
        Cow::Owned(format!("object of {}", T::expected()))
    }
}

impl<'a, T: FromJson<'a>> FromJson<'a> for BTreeMap<String, T> {
    fn from_json(value: &'a Value, options: &FetchOptions) -> Option<Self> {
        value
            .as_object()?
            .iter()
            .map(|(key, item)| T::from_json(item, options).map(|item| (key.clone(), item)))
            .collect()
    }

    fn expected() -> Cow<'static, str> {
        Cow::Owned(format!("object of {}", T::expected()))
    }
}
