//! # Proof Artifacts
//!
//! The transferable bundle a Holder hands to a Verifier: opaque proof,
//! disclosed public signals, and the protocol metadata needed to
//! reconstruct the exact claim being proved. An artifact is
//! self-contained — it carries everything except the original score.
//!
//! ## Versioning
//!
//! Artifacts carry an explicit `version` field so a future change to
//! the scale-factor convention or the signal layout is detected and
//! rejected rather than silently misinterpreted.

use serde::{Deserialize, Serialize};

use zkscore_core::{AttestationId, IssuerId, ScoreKind, ScoreValue, SubjectId, Timestamp};

use crate::inputs::PublicSignals;

/// The artifact format version this crate produces and accepts.
pub const ARTIFACT_VERSION: u32 = 1;

/// Protocol metadata bound into a proof artifact.
///
/// `threshold` and `scale_factor` are copied verbatim from the proof
/// request — the Verifier recomputes the scaled threshold from them and
/// compares it against the embedded public signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// The subject the underlying attestation speaks about.
    pub subject_id: SubjectId,
    /// The kind of score that was attested.
    pub score_kind: ScoreKind,
    /// The issuer whose key signed the attestation.
    pub issuer_id: IssuerId,
    /// The attestation this proof was derived from.
    pub attestation_id: AttestationId,
    /// The decimal threshold the claim was proved against.
    pub threshold: ScoreValue,
    /// The scale factor used on both sides of the proof run.
    pub scale_factor: u64,
    /// When the artifact was packaged (UTC).
    pub timestamp: Timestamp,
}

/// A packaged, immutable proof artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofArtifact {
    /// Artifact format version; see [`ARTIFACT_VERSION`].
    pub version: u32,
    /// The opaque proof document returned by the external prover.
    pub proof: serde_json::Value,
    /// The ordered public signals the proof disclosed.
    pub public_signals: PublicSignals,
    /// Protocol metadata binding the proof to one attestation and claim.
    pub metadata: ArtifactMetadata,
}

impl ProofArtifact {
    /// Serialize the artifact to its interchange JSON document.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse an artifact from its interchange JSON document.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` parse failures (including malformed
    /// identifiers, signatures, and score values).
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }
}
