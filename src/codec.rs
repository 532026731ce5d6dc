//! Entity codec for provider responses.
//!
//! The provider answers boolean-shaped methods with the bare tokens `true` and
//! `false`. [`decode_bool`] is the only place that knows this; everything else
//! deals in real booleans and [`SoftLayerError::Protocol`] failures.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SoftLayerError;

/// Decodes a JSON response body into an entity.
///
/// # Errors
///
/// Returns [`SoftLayerError::Protocol`] when the payload does not match `T`.
pub fn decode<T: DeserializeOwned>(context: &str, bytes: &[u8]) -> Result<T, SoftLayerError> {
    serde_json::from_slice(bytes)
        .map_err(|err| SoftLayerError::protocol(format!("failed to decode {context}: {err}"), bytes))
}

/// Decodes a boolean token, tolerating surrounding whitespace.
///
/// # Errors
///
/// Returns [`SoftLayerError::Protocol`] for any payload other than `true` or
/// `false`.
pub fn decode_bool(context: &str, bytes: &[u8]) -> Result<bool, SoftLayerError> {
    match bytes.trim_ascii() {
        b"true" => Ok(true),
        b"false" => Ok(false),
        _ => Err(SoftLayerError::protocol(
            format!("{context} did not return a boolean"),
            bytes,
        )),
    }
}

/// Decodes a plain string response, stripping JSON quotes when present.
///
/// # Errors
///
/// Returns [`SoftLayerError::Protocol`] when the body is not UTF-8.
pub fn decode_string(context: &str, bytes: &[u8]) -> Result<String, SoftLayerError> {
    let text = std::str::from_utf8(bytes.trim_ascii()).map_err(|err| {
        SoftLayerError::protocol(format!("{context} returned invalid UTF-8: {err}"), bytes)
    })?;
    if text.starts_with('"') {
        return decode(context, text.as_bytes());
    }
    Ok(text.to_owned())
}

/// Encodes an entity as a request parameter.
///
/// # Errors
///
/// Returns [`SoftLayerError::Protocol`] when serialisation fails.
pub fn encode<T: Serialize>(context: &str, value: &T) -> Result<Value, SoftLayerError> {
    serde_json::to_value(value).map_err(|err| SoftLayerError::Protocol {
        message: format!("failed to encode {context}: {err}"),
        payload: String::new(),
    })
}

/// Deserialises a field the provider reports either as a string or a number.
///
/// # Errors
///
/// Fails when the value is neither a string, a number, nor null.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Deserialises `null` as the type's default value.
///
/// # Errors
///
/// Fails when a non-null value does not match `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"true".as_slice(), true)]
    #[case(b"false".as_slice(), false)]
    #[case(b" true\n".as_slice(), true)]
    fn decodes_boolean_tokens(#[case] payload: &[u8], #[case] expected: bool) {
        assert_eq!(decode_bool("deleteObject", payload), Ok(expected));
    }

    #[rstest]
    #[case(b"fake".as_slice())]
    #[case(b"".as_slice())]
    #[case(b"\"true\"".as_slice())]
    #[case(b"TRUE".as_slice())]
    fn rejects_anything_else(#[case] payload: &[u8]) {
        let err = decode_bool("deleteObject", payload).expect_err("should not decode");
        let SoftLayerError::Protocol { payload: raw, .. } = err else {
            panic!("expected protocol error, got {err:?}");
        };
        assert_eq!(raw.as_bytes(), payload);
    }

    #[test]
    fn decode_string_accepts_bare_and_quoted_bodies() {
        assert_eq!(
            decode_string("getPrimaryIpAddress", b"159.99.99.99"),
            Ok(String::from("159.99.99.99"))
        );
        assert_eq!(
            decode_string("getPrimaryIpAddress", b"\"159.99.99.99\""),
            Ok(String::from("159.99.99.99"))
        );
    }

    #[test]
    fn decode_reports_context() {
        let err = decode::<Vec<u64>>("getVirtualGuests", b"{").expect_err("invalid json");
        assert!(err.to_string().contains("getVirtualGuests"), "{err}");
    }
}
