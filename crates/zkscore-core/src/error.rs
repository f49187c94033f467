//! # Error Hierarchy
//!
//! Structured error types for the foundational layer, built with
//! `thiserror`. Each variant carries the input that was rejected and
//! enough context to diagnose the failure without a debugger.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
///
/// Each identifier type enforces format constraints at construction time.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Subject identifier is empty, too long, or contains control characters.
    #[error("invalid subject id: \"{0}\" (expected 1-128 printable characters)")]
    InvalidSubjectId(String),

    /// Issuer identifier is empty, too long, or contains control characters.
    #[error("invalid issuer id: \"{0}\" (expected 1-128 printable characters)")]
    InvalidIssuerId(String),

    /// Score kind is not a lowercase identifier.
    #[error("invalid score kind: \"{0}\" (expected lowercase alphanumeric, 1-64 characters)")]
    InvalidScoreKind(String),

    /// Attestation identifier is not a valid UUID string.
    #[error("invalid attestation id: \"{0}\" (expected a UUID)")]
    InvalidAttestationId(String),

    /// Score value string could not be parsed as a bounded decimal.
    #[error("invalid score value: \"{value}\" ({reason})")]
    InvalidScoreValue {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Scores and thresholds must travel as decimal strings or integers.
    #[error("float values are not permitted in canonical representations; use string or integer for scores: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Errors from the scaled-numeric codec.
///
/// The codec is the shared decimal-to-integer transform between the
/// Holder and Verifier sides of a proof run. Both failure modes must be
/// checked before the external prover is invoked.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The scaled magnitude exceeds the circuit's declared input bit-width.
    #[error("scaled value for {value} x {factor} needs {bits} bits, circuit accepts at most {max_bits}")]
    ScaleOverflow {
        /// Decimal rendering of the value that was being scaled.
        value: String,
        /// The scale factor in use.
        factor: u64,
        /// Bit width the scaled integer would require.
        bits: u32,
        /// Maximum bit width the circuit accepts.
        max_bits: u16,
    },

    /// A scale factor of zero can never be inverted.
    #[error("scale factor must be a positive integer")]
    ZeroScaleFactor,
}
