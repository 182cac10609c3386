//! Loose coercions over request values.
//!
//! Clients are allowed to send numbers where strings are expected and vice
//! versa. These helpers read a value as the wanted type and fail with a
//! [`CoercionError`] only when no sensible conversion exists.

use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot read {found} as {wanted}")]
pub struct CoercionError {
    pub wanted: &'static str,
    pub found: &'static str,
}

impl CoercionError {
    fn new(wanted: &'static str, value: &Value) -> Self {
        Self {
            wanted,
            found: type_name(value),
        }
    }
}

pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "real",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Text form of a scalar. Null reads as the empty string; arrays and
/// objects fail.
pub fn as_string(value: &Value) -> Result<String, CoercionError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) => Err(CoercionError::new("string", value)),
    }
}

/// Whether the value is a signed or unsigned integer.
pub fn is_integral(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n.is_i64() || n.is_u64())
}

/// Read a value as `u32`.
///
/// Null is zero, booleans are zero or one and reals are truncated. Negative
/// or out-of-range numbers, strings and containers fail.
pub fn as_u32(value: &Value) -> Result<u32, CoercionError> {
    let fail = || CoercionError::new("unsigned integer", value);
    match value {
        Value::Null => Ok(0),
        Value::Bool(b) => Ok(u32::from(*b)),
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                u32::try_from(v).map_err(|_| fail())
            } else if n.is_i64() {
                Err(fail())
            } else {
                match n.as_f64() {
                    Some(v) if (0.0..=u32::MAX as f64).contains(&v) => Ok(v as u32),
                    _ => Err(fail()),
                }
            }
        }
        _ => Err(fail()),
    }
}

/// Truthiness: non-zero numbers, non-empty strings and non-empty
/// containers are true.
pub fn as_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_coercion() {
        assert_eq!(as_string(&json!(null)).unwrap(), "");
        assert_eq!(as_string(&json!(true)).unwrap(), "true");
        assert_eq!(as_string(&json!(42)).unwrap(), "42");
        assert_eq!(as_string(&json!(-3)).unwrap(), "-3");
        assert_eq!(as_string(&json!("abc")).unwrap(), "abc");
        assert!(as_string(&json!([1])).is_err());
        let err = as_string(&json!({"a": 1})).unwrap_err();
        assert_eq!(err.found, "object");
    }

    #[test]
    fn integral() {
        assert!(is_integral(&json!(7)));
        assert!(is_integral(&json!(-7)));
        assert!(is_integral(&json!(u64::MAX)));
        assert!(!is_integral(&json!(7.5)));
        assert!(!is_integral(&json!("7")));
        assert!(!is_integral(&json!(null)));
    }

    #[test]
    fn u32_coercion() {
        assert_eq!(as_u32(&json!(7)).unwrap(), 7);
        assert_eq!(as_u32(&json!(u32::MAX)).unwrap(), u32::MAX);
        assert_eq!(as_u32(&json!(null)).unwrap(), 0);
        assert_eq!(as_u32(&json!(true)).unwrap(), 1);
        assert_eq!(as_u32(&json!(3.9)).unwrap(), 3);
        assert!(as_u32(&json!(-1)).is_err());
        assert!(as_u32(&json!(u64::from(u32::MAX) + 1)).is_err());
        assert!(as_u32(&json!("5")).is_err());
        assert!(as_u32(&json!([])).is_err());
    }

    #[test]
    fn bool_coercion() {
        assert!(!as_bool(&json!(null)));
        assert!(as_bool(&json!(true)));
        assert!(!as_bool(&json!(0)));
        assert!(as_bool(&json!(2)));
        assert!(as_bool(&json!("false")));
        assert!(!as_bool(&json!("")));
        assert!(!as_bool(&json!({})));
        assert!(as_bool(&json!([0])));
    }
}
