//! Typed extraction from decoded storage values.
//!
//! The gateway hands back [`scale_value::Value`] trees; these helpers pull
//! primitives and records out of them, turning shape mismatches into
//! [`TypeFault`]s that name the offending field or storage item.

use crate::errors::{TorusResult, TypeFault};
use scale_value::{Composite, Primitive, Value, ValueDef};
use serde::de::DeserializeOwned;

/// Extract a `u128` primitive, if the value is one.
///
/// The gateway normalizes all unsigned integers to `u128` primitives.
pub fn extract_u128(value: &Value) -> Option<u128> {
    match &value.value {
        ValueDef::Primitive(Primitive::U128(n)) => Some(*n),
        _ => None,
    }
}

/// Decode a `u128` from a value, naming `what` on failure.
pub fn decode_u128(value: &Value, what: &str) -> TorusResult<u128> {
    extract_u128(value).ok_or_else(|| TypeFault::new(what, "expected an unsigned integer").into())
}

/// Decode a `u64` from a value.
pub fn decode_u64(value: &Value, what: &str) -> TorusResult<u64> {
    let n = decode_u128(value, what)?;
    u64::try_from(n).map_err(|_| TypeFault::new(what, "value does not fit into u64").into())
}

/// Decode a `u32` from a value.
pub fn decode_u32(value: &Value, what: &str) -> TorusResult<u32> {
    let n = decode_u128(value, what)?;
    u32::try_from(n).map_err(|_| TypeFault::new(what, "value does not fit into u32").into())
}

/// Decode a `u16` from a value.
pub fn decode_u16(value: &Value, what: &str) -> TorusResult<u16> {
    let n = decode_u128(value, what)?;
    u16::try_from(n).map_err(|_| TypeFault::new(what, "value does not fit into u16").into())
}

/// Decode a string from a value.
pub fn decode_string(value: &Value, what: &str) -> TorusResult<String> {
    match &value.value {
        ValueDef::Primitive(Primitive::String(s)) => Ok(s.clone()),
        _ => Err(TypeFault::new(what, "expected a string").into()),
    }
}

/// Look up a named field inside a composite or variant value.
pub fn field<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    let fields = match &value.value {
        ValueDef::Composite(Composite::Named(fields)) => Some(fields.as_slice()),
        ValueDef::Variant(variant) => match &variant.values {
            Composite::Named(fields) => Some(fields.as_slice()),
            _ => None,
        },
        _ => None,
    }?;
    fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
}

/// Deserialize a structured record out of a decoded value.
pub fn decode_record<T: DeserializeOwned>(value: &Value, what: &str) -> TorusResult<T> {
    scale_value::serde::from_value(value.clone())
        .map_err(|e| TypeFault::new(what, e.to_string()).into())
}

/// Extract the free balance out of a `System::Account` record
/// (`data.free`, possibly nested under a variant).
pub fn extract_free_balance(value: &Value) -> Option<u128> {
    if let Some(data) = field(value, "data") {
        if let Some(free) = field(data, "free") {
            return extract_u128(free);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_u128() {
        assert_eq!(extract_u128(&Value::u128(42)), Some(42));
        assert_eq!(extract_u128(&Value::string("42")), None);
    }

    #[test]
    fn test_decode_u16_range_check() {
        assert_eq!(decode_u16(&Value::u128(7), "Netuid").unwrap(), 7);
        let err = decode_u16(&Value::u128(1 << 20), "Netuid").unwrap_err();
        assert!(err.is_type_fault());
    }

    #[test]
    fn test_field_lookup() {
        let value = Value::named_composite([("name", Value::string("alpha"))]);
        assert!(field(&value, "name").is_some());
        assert!(field(&value, "missing").is_none());
    }

    #[test]
    fn test_extract_free_balance() {
        let account = Value::named_composite([
            ("nonce", Value::u128(1)),
            (
                "data",
                Value::named_composite([
                    ("free", Value::u128(1_000)),
                    ("reserved", Value::u128(0)),
                ]),
            ),
        ]);
        assert_eq!(extract_free_balance(&account), Some(1_000));

        let malformed = Value::named_composite([("nonce", Value::u128(1))]);
        assert_eq!(extract_free_balance(&malformed), None);
    }
}
