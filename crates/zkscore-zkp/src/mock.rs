//! # Mock Proof Backend
//!
//! A deterministic, transparent backend for development and testing.
//! Produces SHA-256-based "proofs" that are verifiable but provide **no
//! zero-knowledge guarantees**.
//!
//! ## How It Works
//!
//! - `prove()` evaluates the comparison honestly (`score >= threshold`),
//!   discloses `[output, threshold]` as public signals, and returns
//!   `SHA256(canonical({circuit, signals}))` as the proof.
//! - `verify()` recomputes the same digest from the disclosed signals
//!   and checks equality.
//!
//! ## Security Warning
//!
//! **NOT PRIVATE, NOT SOUND.** Anyone can recompute the digest from the
//! public signals, so a mock proof demonstrates nothing beyond internal
//! consistency. It exists so the protocol roles are testable without a
//! proving toolchain — both the claim-proven and claim-refuted outcomes
//! are reachable deterministically.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use zkscore_core::CanonicalBytes;
use zkscore_crypto::sha256_digest;

use crate::inputs::{CircuitInputs, PublicSignals};
use crate::traits::{ExternalVerifyingKey, ProofBackend, ProveError, ProverOutput, VerifyError};

/// Identifier bound into every mock proof digest, so proofs from a
/// different circuit shape cannot be replayed against this one.
const CIRCUIT_TAG: &str = "score-threshold-comparator";

/// Scheme marker carried in the proof document.
const SCHEME: &str = "mock-sha256";

/// The proof document shape the mock backend emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MockProofDocument {
    scheme: String,
    digest: String,
}

/// A deterministic mock proof backend.
///
/// Stateless; one instance can serve any number of independent proof
/// runs concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackend;

impl MockBackend {
    /// Create a mock backend.
    pub fn new() -> Self {
        Self
    }

    fn expected_digest(signals: &PublicSignals) -> Result<String, VerifyError> {
        let canonical = CanonicalBytes::new(&serde_json::json!({
            "circuit": CIRCUIT_TAG,
            "signals": signals.values(),
        }))
        .map_err(|e| VerifyError::MalformedProof(format!("signals not canonicalizable: {e}")))?;
        Ok(sha256_digest(&canonical).to_hex())
    }
}

impl ProofBackend for MockBackend {
    fn prove(&self, inputs: &CircuitInputs) -> Result<ProverOutput, ProveError> {
        // The mock evaluates the circuit semantics honestly so callers
        // exercise both outcomes.
        let output = inputs.score_int() >= inputs.threshold_int();
        let public_signals = PublicSignals::new(vec![
            if output { "1" } else { "0" }.to_string(),
            inputs.threshold_int().to_string(),
        ]);

        let digest = Self::expected_digest(&public_signals)
            .map_err(|e| ProveError::GenerationFailed(e.to_string()))?;
        let proof = serde_json::json!({
            "scheme": SCHEME,
            "digest": digest,
        });

        Ok(ProverOutput {
            proof,
            public_signals,
        })
    }

    fn verify(
        &self,
        proof: &Value,
        public_signals: &PublicSignals,
        _key: &ExternalVerifyingKey,
    ) -> Result<bool, VerifyError> {
        let document: MockProofDocument = serde_json::from_value(proof.clone())
            .map_err(|e| VerifyError::MalformedProof(format!("not a mock proof document: {e}")))?;

        if document.scheme != SCHEME {
            return Err(VerifyError::MalformedProof(format!(
                "unknown proof scheme \"{}\"",
                document.scheme
            )));
        }
        if document.digest.len() != 64 || !document.digest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(VerifyError::MalformedProof(
                "digest is not 64 hex characters".to_string(),
            ));
        }

        Ok(document.digest == Self::expected_digest(public_signals)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ExternalVerifyingKey {
        ExternalVerifyingKey::from_value(serde_json::json!({"scheme": "mock"}))
    }

    #[test]
    fn prove_then_verify_roundtrip() {
        let backend = MockBackend::new();
        let output = backend.prove(&CircuitInputs::new(380, 350)).unwrap();
        assert!(output.public_signals.output().unwrap());
        assert!(backend
            .verify(&output.proof, &output.public_signals, &key())
            .unwrap());
    }

    #[test]
    fn refuted_claim_still_produces_valid_proof() {
        // score 380 < threshold 390: the claim is false, the proof of
        // that false outcome is still cryptographically "valid".
        let backend = MockBackend::new();
        let output = backend.prove(&CircuitInputs::new(380, 390)).unwrap();
        assert!(!output.public_signals.output().unwrap());
        assert!(backend
            .verify(&output.proof, &output.public_signals, &key())
            .unwrap());
    }

    #[test]
    fn prove_is_deterministic() {
        let backend = MockBackend::new();
        let a = backend.prove(&CircuitInputs::new(380, 350)).unwrap();
        let b = backend.prove(&CircuitInputs::new(380, 350)).unwrap();
        assert_eq!(a.proof, b.proof);
        assert_eq!(a.public_signals, b.public_signals);
    }

    #[test]
    fn tampered_signals_fail_verification() {
        let backend = MockBackend::new();
        let output = backend.prove(&CircuitInputs::new(380, 350)).unwrap();
        let tampered = PublicSignals::new(vec!["1".to_string(), "300".to_string()]);
        assert!(!backend.verify(&output.proof, &tampered, &key()).unwrap());
    }

    #[test]
    fn verify_rejects_non_document_proof() {
        let backend = MockBackend::new();
        let signals = PublicSignals::new(vec!["1".to_string(), "350".to_string()]);
        let err = backend
            .verify(&serde_json::json!("garbage"), &signals, &key())
            .unwrap_err();
        assert!(matches!(err, VerifyError::MalformedProof(_)));
    }

    #[test]
    fn verify_rejects_unknown_scheme() {
        let backend = MockBackend::new();
        let signals = PublicSignals::new(vec!["1".to_string(), "350".to_string()]);
        let proof = serde_json::json!({"scheme": "groth16", "digest": "ab".repeat(32)});
        let err = backend.verify(&proof, &signals, &key()).unwrap_err();
        assert!(matches!(err, VerifyError::MalformedProof(_)));
    }

    #[test]
    fn verify_rejects_short_digest() {
        let backend = MockBackend::new();
        let signals = PublicSignals::new(vec!["1".to_string(), "350".to_string()]);
        let proof = serde_json::json!({"scheme": SCHEME, "digest": "abcd"});
        let err = backend.verify(&proof, &signals, &key()).unwrap_err();
        assert!(matches!(err, VerifyError::MalformedProof(_)));
    }

    #[test]
    fn negative_inputs_are_supported() {
        let backend = MockBackend::new();
        let output = backend.prove(&CircuitInputs::new(-10, -20)).unwrap();
        assert!(output.public_signals.output().unwrap());
    }

    #[test]
    fn equal_score_and_threshold_proves_claim() {
        let backend = MockBackend::new();
        let output = backend.prove(&CircuitInputs::new(350, 350)).unwrap();
        assert!(output.public_signals.output().unwrap());
    }
}
