//! Lenient numeric decoding
//!
//! Numeric fields accept JSON numbers or strings holding a number.
//! Anything else (non-numeric text, bools, null, objects) coerces to absent
//! so predicates over the field skip the record instead of failing the load.
//!
//! Coercion never rewrites the file: whenever the stored JSON differs from
//! the canonical form of the coerced number (`"1994"`, `"142 min"`, `9`
//! for a float field, `null`), the original value is kept in [`RawNumbers`]
//! and written back as long as the field still coerces to the same number.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Original JSON of numeric fields that do not hold a canonical number
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RawNumbers {
    pub year: Option<Value>,
    pub imdb_rating: Option<Value>,
    pub runtime_minutes: Option<Value>,
}

impl RawNumbers {
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.imdb_rating.is_none() && self.runtime_minutes.is_none()
    }
}

/// A number type a lenient field coerces to
pub(crate) trait Coerce: Copy + PartialEq {
    fn coerce(value: &Value) -> Option<Self>;

    /// The JSON written for a value with no raw original
    fn canonical(self) -> Value;
}

impl Coerce for i32 {
    fn coerce(value: &Value) -> Option<Self> {
        as_integer(value).and_then(|n| i32::try_from(n).ok())
    }

    fn canonical(self) -> Value {
        Value::from(self)
    }
}

impl Coerce for u32 {
    fn coerce(value: &Value) -> Option<Self> {
        as_integer(value).and_then(|n| u32::try_from(n).ok())
    }

    fn canonical(self) -> Value {
        Value::from(self)
    }
}

impl Coerce for f64 {
    fn coerce(value: &Value) -> Option<Self> {
        as_float(value)
    }

    fn canonical(self) -> Value {
        Value::from(self)
    }
}

/// Deserialize a field that is present, keeping an explicit `null`
///
/// Used with `#[serde(default)]` so an absent field stays `None`.
pub(crate) fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Split stored JSON into the coerced number and the raw value worth keeping
pub(crate) fn split<T: Coerce>(stored: Option<Value>) -> (Option<T>, Option<Value>) {
    let Some(stored) = stored else {
        return (None, None);
    };

    let value = T::coerce(&stored);
    if value.map(T::canonical).as_ref() == Some(&stored) {
        (value, None)
    } else {
        (value, Some(stored))
    }
}

/// JSON to write for a field: the raw original while it still coerces to
/// `value`, otherwise the canonical number
pub(crate) fn join<T: Coerce>(value: Option<T>, raw: &Option<Value>) -> Option<Value> {
    match raw {
        Some(stored) if T::coerce(stored) == value => Some(stored.clone()),
        _ => value.map(T::canonical),
    }
}

/// Overwrite a field from a patch when the patch supplied it
pub(crate) fn merge<T: Copy>(
    field: &mut Option<T>,
    raw: &mut Option<Value>,
    value: Option<T>,
    patch_raw: Option<Value>,
) {
    if patch_raw.is_some() {
        *field = value;
        *raw = patch_raw;
    } else if value.is_some() {
        *field = value;
        *raw = None;
    }
}

/// Integral numbers, integral floats (`1994.0`), or trimmed integer strings
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
