//! # Canonical Serialization
//!
//! This module defines [`CanonicalBytes`], the sole construction path
//! for bytes that get signed or digested anywhere in the stack.
//!
//! ## Security Invariant
//!
//! The inner `Vec<u8>` is private. The only way to construct
//! `CanonicalBytes` is through [`CanonicalBytes::new()`], which applies
//! the coercion pipeline before serialization. An attestation signed by
//! the Issuer must verify against bytes the Holder and Verifier rebuild
//! independently — a single divergent serialization path would produce
//! signatures that fail verification for honest parties.
//!
//! ## Coercion Rules
//!
//! 1. Reject floats — scores and thresholds must be strings or integers.
//! 2. Normalize RFC 3339 datetime strings to UTC with `Z` suffix,
//!    truncated to seconds.
//! 3. Sort object keys lexicographically (`serde_json`'s default map is
//!    ordered, so rebuilding the tree yields sorted keys).
//! 4. Compact separators, no whitespace.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS-compatible canonicalization.
///
/// The inner `Vec<u8>` is private — downstream code cannot construct
/// `CanonicalBytes` except through [`CanonicalBytes::new()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// This is the ONLY way to construct `CanonicalBytes`; all signature
    /// and digest computation in the stack must flow through here.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::FloatRejected`] if the value
    /// contains a float anywhere in its tree.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let coerced = coerce_json_value(value)?;
        let bytes = serde_json::to_vec(&coerced)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for signing or digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively coerce JSON values according to the canonicalization rules.
fn coerce_json_value(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Number(n) => {
            // Reject pure floats — scores must be strings or integers.
            if let Some(f) = n.as_f64() {
                if n.is_f64() && !n.is_i64() && !n.is_u64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(Value::Number(n))
        }
        Value::Object(map) => {
            let mut coerced = serde_json::Map::new();
            for (k, v) in map {
                coerced.insert(k, coerce_json_value(v)?);
            }
            Ok(Value::Object(coerced))
        }
        Value::Array(arr) => {
            let coerced: Result<Vec<_>, _> = arr.into_iter().map(coerce_json_value).collect();
            Ok(Value::Array(coerced?))
        }
        Value::String(s) => {
            // Datetime normalization: RFC 3339 strings become UTC with a
            // Z suffix, truncated to seconds.
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                let utc = dt.with_timezone(&chrono::Utc);
                Ok(Value::String(utc.format("%Y-%m-%dT%H:%M:%SZ").to_string()))
            } else {
                Ok(Value::String(s))
            }
        }
        // Bool and Null pass through unchanged.
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_bytes_sorted_and_compact() {
        let canonical = CanonicalBytes::new(&json!({"b": 2, "a": 1})).unwrap();
        assert_eq!(canonical.as_bytes(), br#"{"a":1,"b":2}"#);
    }

    #[test]
    fn canonical_bytes_deterministic() {
        let a = CanonicalBytes::new(&json!({"x": "1", "y": [1, 2]})).unwrap();
        let b = CanonicalBytes::new(&json!({"y": [1, 2], "x": "1"})).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_floats_anywhere_in_tree() {
        let err = CanonicalBytes::new(&json!({"score": 3.8})).unwrap_err();
        assert!(matches!(err, CanonicalizationError::FloatRejected(_)));

        let nested = CanonicalBytes::new(&json!({"a": {"b": [1, 2.5]}}));
        assert!(nested.is_err());
    }

    #[test]
    fn accepts_integers_and_strings() {
        assert!(CanonicalBytes::new(&json!({"sat": 1450, "gpa": "3.8"})).is_ok());
    }

    #[test]
    fn normalizes_rfc3339_to_utc_seconds() {
        let canonical =
            CanonicalBytes::new(&json!({"ts": "2026-01-15T07:30:00.123+05:00"})).unwrap();
        assert_eq!(
            canonical.as_bytes(),
            br#"{"ts":"2026-01-15T02:30:00Z"}"#
        );
    }

    #[test]
    fn leaves_non_datetime_strings_alone() {
        let canonical = CanonicalBytes::new(&json!({"id": "student123"})).unwrap();
        assert_eq!(canonical.as_bytes(), br#"{"id":"student123"}"#);
    }
}
