//! # Proof Backend Trait (Sealed)
//!
//! The request/response boundary to the external proving service. All
//! backends (mock, snarkjs) implement [`ProofBackend`].
//!
//! ## Sealed Trait
//!
//! `ProofBackend` is **sealed**: only implementations defined within
//! this crate can exist. A verifier's trust decision rests on the
//! backend faithfully running the pairing checks, so an arbitrary
//! downstream implementation must not be injectable.
//!
//! ## Failure Semantics
//!
//! A backend distinguishes hard outcomes (the proof is malformed or
//! cryptographically invalid) from transient ones (the service is
//! unavailable or timed out). Transient failures are safe to retry with
//! the same immutable artifact; they are never retried automatically
//! here, because requests carry private score material.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::inputs::{CircuitInputs, PublicSignals};

/// Error during proof generation.
#[derive(Error, Debug)]
pub enum ProveError {
    /// The circuit inputs are invalid or missing.
    #[error("invalid circuit inputs: {0}")]
    InvalidInputs(String),

    /// The external toolchain ran but could not produce a proof.
    #[error("proof generation failed: {0}")]
    GenerationFailed(String),

    /// The external proving service could not be reached or started.
    #[error("external proving service unavailable: {0}")]
    Unavailable(String),

    /// The external proving service exceeded its configured deadline.
    #[error("external proving service timed out after {seconds}s")]
    TimedOut {
        /// The configured timeout that expired.
        seconds: u64,
    },
}

/// Error during proof verification.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The proof is structurally malformed.
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// The external verification service could not be reached or started.
    #[error("external verification service unavailable: {0}")]
    Unavailable(String),

    /// The external verification service exceeded its configured deadline.
    #[error("external verification service timed out after {seconds}s")]
    TimedOut {
        /// The configured timeout that expired.
        seconds: u64,
    },
}

impl VerifyError {
    /// Whether the failure is transient (service-side) rather than a
    /// verdict about the proof itself.
    ///
    /// Transient failures may be retried by the caller with the same
    /// artifact; a malformed proof may not.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::TimedOut { .. })
    }
}

/// Error loading an external verification key document.
#[derive(Error, Debug)]
pub enum KeyError {
    /// The key file could not be read.
    #[error("failed to read verification key: {0}")]
    Io(#[from] std::io::Error),

    /// The key file is not valid JSON.
    #[error("verification key is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The external service's verification key, treated as an opaque JSON
/// document (the `verification_key.json` the toolchain exports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalVerifyingKey(Value);

impl ExternalVerifyingKey {
    /// Wrap an in-memory key document.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Load a key document from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] on read or parse failure.
    pub fn from_file(path: &Path) -> Result<Self, KeyError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self(serde_json::from_str(&contents)?))
    }

    /// Access the underlying JSON document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// What a prover returns: the opaque proof document and the public
/// signals it disclosed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverOutput {
    /// The opaque proof document.
    pub proof: Value,
    /// The ordered public signals.
    pub public_signals: PublicSignals,
}

/// Private module that seals the [`ProofBackend`] trait.
mod private {
    /// Sealing marker trait. Not accessible outside `zkscore-zkp`.
    pub trait Sealed {}
}

/// Sealed trait defining the interface to a proving/verification
/// backend.
///
/// `Send + Sync` so independent proof runs can share one backend across
/// threads; backends hold no per-run state.
pub trait ProofBackend: private::Sealed + Send + Sync {
    /// Generate a proof for the scaled inputs.
    ///
    /// The private score inside `inputs` must not outlive the call: it
    /// is handed to the external service and never cached.
    ///
    /// # Errors
    ///
    /// [`ProveError::InvalidInputs`] for unusable inputs,
    /// [`ProveError::GenerationFailed`] when the toolchain rejects the
    /// witness, and [`ProveError::Unavailable`] /
    /// [`ProveError::TimedOut`] for service failures.
    fn prove(&self, inputs: &CircuitInputs) -> Result<ProverOutput, ProveError>;

    /// Verify a proof against its disclosed public signals.
    ///
    /// Returns `Ok(true)` for a cryptographically valid proof,
    /// `Ok(false)` for a well-formed but invalid one.
    ///
    /// # Errors
    ///
    /// [`VerifyError::MalformedProof`] for structurally invalid proof
    /// bytes, [`VerifyError::Unavailable`] / [`VerifyError::TimedOut`]
    /// for service failures.
    fn verify(
        &self,
        proof: &Value,
        public_signals: &PublicSignals,
        key: &ExternalVerifyingKey,
    ) -> Result<bool, VerifyError>;
}

// ---- Sealed trait implementations for authorized backends ----

impl private::Sealed for crate::mock::MockBackend {}
impl private::Sealed for crate::snarkjs::SnarkjsBackend {}
