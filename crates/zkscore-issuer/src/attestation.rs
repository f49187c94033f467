//! # Signed Score Attestations
//!
//! An [`Attestation`] binds a subject's score to an issuer's identity.
//! The signature covers the canonical encoding of the tuple
//! `(subject_id, score_kind, score_value, attestation_id)` — exactly the
//! fields a Verifier can reconstruct without trusting the envelope.
//! `issued_at` and `issuer_id` ride outside the signed tuple: the issuer
//! is established by which registered key verifies the signature, and
//! the issuance time only feeds advisory expiry policies.

use serde::{Deserialize, Serialize};

use zkscore_core::{
    AttestationId, CanonicalBytes, CanonicalizationError, IssuerId, ScoreKind, ScoreValue,
    SubjectId, Timestamp,
};
use zkscore_crypto::{CryptoError, Ed25519Signature, VerifyingKey};

/// A signed statement that `subject_id` holds `score_value` for
/// `score_kind`, issued under `issuer_id`'s key.
///
/// Immutable once signed. One attestation may back any number of proof
/// artifacts (same score, different thresholds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    /// The subject the score belongs to.
    pub subject_id: SubjectId,
    /// The kind of score (`"gpa"`, `"sat"`).
    pub score_kind: ScoreKind,
    /// The attested decimal score.
    pub score_value: ScoreValue,
    /// The issuing authority's identifier.
    pub issuer_id: IssuerId,
    /// Unique identifier of this attestation.
    pub attestation_id: AttestationId,
    /// When the attestation was issued (UTC); advisory, unsigned.
    pub issued_at: Timestamp,
    /// Ed25519 signature over the canonical signed tuple.
    pub signature: Ed25519Signature,
}

impl Attestation {
    /// Canonical bytes of the signed tuple.
    ///
    /// Every role rebuilds this payload independently; it must be
    /// byte-identical everywhere, which [`CanonicalBytes`] guarantees.
    ///
    /// # Errors
    ///
    /// Propagates canonicalization failures.
    pub fn signing_payload(
        subject_id: &SubjectId,
        score_kind: &ScoreKind,
        score_value: &ScoreValue,
        attestation_id: &AttestationId,
    ) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::new(&serde_json::json!({
            "attestation_id": attestation_id,
            "score_kind": score_kind,
            "score_value": score_value,
            "subject_id": subject_id,
        }))
    }

    /// Canonical bytes of this attestation's signed tuple.
    ///
    /// # Errors
    ///
    /// Propagates canonicalization failures.
    pub fn payload(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        Self::signing_payload(
            &self.subject_id,
            &self.score_kind,
            &self.score_value,
            &self.attestation_id,
        )
    }

    /// Verify the signature against a verifying key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::VerificationFailed`] if the signature does
    /// not verify under `key`.
    pub fn verify_signature(&self, key: &VerifyingKey) -> Result<(), CryptoError> {
        let payload = self
            .payload()
            .map_err(|e| CryptoError::VerificationFailed(e.to_string()))?;
        key.verify(&payload, &self.signature)
    }

    /// Serialize to the interchange JSON document.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from the interchange JSON document.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` parse failures.
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }
}
