//! Scalar values and the closed set of value kinds a document may declare.

use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Kind of a configuration value.
///
/// The default document's value kind is authoritative: overrides must carry
/// exactly the same kind, so an integer never satisfies a float slot and a
/// boolean never satisfies an integer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// UTF-8 text.
    Text,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit floating point number.
    Float,
    /// Boolean flag.
    Boolean,
}

impl ValueKind {
    /// Name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// UTF-8 text.
    Text(String),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point number.
    Float(f64),
    /// Boolean flag.
    Boolean(bool),
}

impl Scalar {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Boolean(_) => ValueKind::Boolean,
        }
    }

    /// Returns the text when this is a [`Scalar::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Converts a decoded JSON value into a scalar.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the value is `null`, an
    /// array, an object, or an integer outside the `i64` range.
    pub fn from_json(value: &JsonValue) -> Result<Self, String> {
        match value {
            JsonValue::String(text) => Ok(Self::Text(text.clone())),
            JsonValue::Bool(flag) => Ok(Self::Boolean(*flag)),
            JsonValue::Number(number) => {
                if number.is_f64() {
                    number
                        .as_f64()
                        .map(Self::Float)
                        .ok_or_else(|| format!("number {number} is not representable"))
                } else {
                    number
                        .as_i64()
                        .map(Self::Integer)
                        .ok_or_else(|| format!("integer {number} does not fit in 64 bits"))
                }
            }
            JsonValue::Null => Err("null is not a supported value".to_owned()),
            JsonValue::Array(_) => Err("arrays are not supported values".to_owned()),
            JsonValue::Object(_) => Err("objects are not supported values".to_owned()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Integer(number) => write!(f, "{number}"),
            Self::Float(number) => write!(f, "{number:?}"),
            Self::Boolean(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("x"), ValueKind::Text)]
    #[case(json!(3), ValueKind::Integer)]
    #[case(json!(-3), ValueKind::Integer)]
    #[case(json!(3.0), ValueKind::Float)]
    #[case(json!(true), ValueKind::Boolean)]
    fn json_scalars_keep_their_kind(#[case] raw: JsonValue, #[case] kind: ValueKind) {
        let scalar = Scalar::from_json(&raw).expect("scalar");
        assert_eq!(scalar.kind(), kind);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!([1, 2]))]
    #[case(json!({"a": 1}))]
    #[case(json!(u64::MAX))]
    fn unsupported_json_is_rejected(#[case] raw: JsonValue) {
        assert!(Scalar::from_json(&raw).is_err());
    }

    #[test]
    fn display_quotes_text_only() {
        assert_eq!(Scalar::from("3").to_string(), "\"3\"");
        assert_eq!(Scalar::from(3_i64).to_string(), "3");
        assert_eq!(Scalar::from(1.5).to_string(), "1.5");
    }
}
