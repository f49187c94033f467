//! # Temporal Types
//!
//! UTC-only timestamp type for artifact metadata and expiry checks. All
//! timestamps are stored in UTC with second-level precision and a `Z`
//! suffix in serialized form.
//!
//! ## Design Decision
//!
//! Attestations and artifacts cross institutional boundaries in
//! different local time zones. To keep signed payloads and artifact
//! digests unambiguous, every timestamp is UTC; local rendering is a
//! presentation concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A UTC timestamp with second-level precision.
///
/// Serializes to ISO 8601 with a `Z` suffix (e.g. `2026-01-15T12:00:00Z`).
/// Subsecond precision is truncated during canonicalization so digests
/// stay deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Signed duration from `earlier` to `self`.
    pub fn signed_duration_since(&self, earlier: &Timestamp) -> chrono::Duration {
        self.0 - earlier.0
    }

    /// Return the timestamp as an ISO 8601 string with Z suffix,
    /// truncated to seconds (matching canonicalization rules).
    pub fn to_canonical_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn canonical_string_truncates_to_seconds() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.to_canonical_string(), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn duration_since_orders_correctly() {
        let earlier = Timestamp::from_datetime(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        let later = Timestamp::from_datetime(Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap());
        assert_eq!(
            later.signed_duration_since(&earlier),
            chrono::Duration::days(1)
        );
        assert!(later > earlier);
    }
}
