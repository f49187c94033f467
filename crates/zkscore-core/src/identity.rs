//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the three protocol roles. Each
//! identifier is a distinct type — you cannot pass a [`SubjectId`] where
//! an [`IssuerId`] is expected.
//!
//! ## Validation
//!
//! String-based identifiers ([`SubjectId`], [`IssuerId`], [`ScoreKind`])
//! validate format at construction time. The UUID-based
//! [`AttestationId`] is always valid by construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Maximum length for subject and issuer identifiers.
const MAX_ID_LEN: usize = 128;

fn printable_id(s: &str, max_len: usize) -> bool {
    !s.is_empty()
        && s.len() <= max_len
        && !s.trim().is_empty()
        && s.chars().all(|c| !c.is_control())
}

/// A unique identifier for the subject of an attestation (the student).
///
/// Opaque to the protocol — typically an institution-local registration
/// number such as `"student123"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(String);

impl SubjectId {
    /// Create a subject identifier, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSubjectId`] if the string is
    /// empty, longer than 128 characters, or contains control characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !printable_id(&s, MAX_ID_LEN) {
            return Err(ValidationError::InvalidSubjectId(s));
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a signing authority (the school).
///
/// The Verifier's trusted-issuer registry is keyed by this identifier;
/// it is the name under which an issuer's verifying key is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssuerId(String);

impl IssuerId {
    /// Create an issuer identifier, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIssuerId`] if the string is
    /// empty, longer than 128 characters, or contains control characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !printable_id(&s, MAX_ID_LEN) {
            return Err(ValidationError::InvalidIssuerId(s));
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IssuerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of score an attestation speaks about (`"gpa"`, `"sat"`).
///
/// Lowercase so that `"GPA"` and `"gpa"` cannot coexist as distinct
/// kinds in a score directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreKind(String);

impl ScoreKind {
    /// Create a score kind, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidScoreKind`] unless the string is
    /// 1-64 lowercase ASCII alphanumeric characters or underscores.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let ok = !s.is_empty()
            && s.len() <= 64
            && s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !ok {
            return Err(ValidationError::InvalidScoreKind(s));
        }
        Ok(Self(s))
    }

    /// Access the score kind string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for one signed attestation.
///
/// Freshly generated for every issuance; referenced by proof artifacts
/// and by the issuer cross-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttestationId(Uuid);

impl AttestationId {
    /// Create a new random attestation identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an attestation identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an attestation identifier from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAttestationId`] if the string is
    /// not a valid UUID.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| ValidationError::InvalidAttestationId(value.to_string()))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AttestationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AttestationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
