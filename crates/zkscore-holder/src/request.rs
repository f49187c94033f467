//! # Proof Request Construction
//!
//! Turns an attestation plus a target threshold into the scaled inputs
//! the external prover consumes, and the metadata the eventual artifact
//! will carry.
//!
//! ## Privacy Boundary
//!
//! The scaled private score lives inside
//! [`CircuitInputs`](zkscore_zkp::CircuitInputs) and is handed to the
//! prover once; it is never logged, cached, or copied into request
//! metadata.

use zkscore_core::{
    scale, AttestationId, CircuitLimits, IssuerId, ScoreKind, ScoreValue, SubjectId, Timestamp,
};
use zkscore_issuer::Attestation;
use zkscore_zkp::CircuitInputs;

use crate::error::RequestError;

/// The metadata captured at request time and copied verbatim into the
/// packaged artifact.
///
/// `threshold` and `scale_factor` must reach the Verifier exactly as
/// they were fed to the prover — the threshold-binding check recomputes
/// the scaled threshold from these two fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMetadata {
    /// The subject of the underlying attestation.
    pub subject_id: SubjectId,
    /// The attested score kind.
    pub score_kind: ScoreKind,
    /// The attesting issuer.
    pub issuer_id: IssuerId,
    /// The attestation the proof is derived from.
    pub attestation_id: AttestationId,
    /// The decimal threshold being proved against.
    pub threshold: ScoreValue,
    /// The scale factor used for both circuit inputs.
    pub scale_factor: u64,
}

/// A ready-to-prove request: scaled inputs plus artifact metadata.
#[derive(Debug, Clone)]
pub struct ProofRequest {
    /// Inputs for the external prover (private score, public threshold).
    pub inputs: CircuitInputs,
    /// Metadata destined for the packaged artifact.
    pub metadata: RequestMetadata,
}

/// Builds proof requests under a circuit range bound and an optional
/// attestation expiry policy.
///
/// The attestation signature's structural well-formedness (64 decodable
/// bytes) is enforced by its type at parse time; whether the signature
/// is *trusted* is the Verifier's concern, not the Holder's.
#[derive(Debug, Clone, Default)]
pub struct ProofRequestBuilder {
    limits: CircuitLimits,
    max_age: Option<chrono::Duration>,
}

impl ProofRequestBuilder {
    /// Create a builder with default circuit limits and no expiry policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the circuit's input range bound.
    pub fn with_limits(mut self, limits: CircuitLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Enforce a maximum attestation age at build time.
    ///
    /// Without a policy, attestations never go stale.
    pub fn with_max_age(mut self, max_age: chrono::Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Assemble circuit inputs and request metadata for one proof run.
    ///
    /// Scales both the attested score and the threshold with the same
    /// factor and rounding rule the Verifier will apply during
    /// threshold reconstruction.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Scale`] when either value exceeds the
    /// circuit's representable range (checked here, before the external
    /// prover is invoked), and [`RequestError::StaleAttestation`] when
    /// an expiry policy is configured and exceeded.
    pub fn build(
        &self,
        attestation: &Attestation,
        threshold: &ScoreValue,
        scale_factor: u64,
    ) -> Result<ProofRequest, RequestError> {
        if let Some(max_age) = self.max_age {
            let age = Timestamp::now().signed_duration_since(&attestation.issued_at);
            if age > max_age {
                return Err(RequestError::StaleAttestation {
                    attestation_id: attestation.attestation_id,
                    age_hours: age.num_hours(),
                });
            }
        }

        let score_int = scale(&attestation.score_value, scale_factor, &self.limits)?;
        let threshold_int = scale(threshold, scale_factor, &self.limits)?;

        tracing::debug!(
            attestation_id = %attestation.attestation_id,
            threshold = %threshold,
            scale_factor,
            "proof request assembled"
        );

        Ok(ProofRequest {
            inputs: CircuitInputs::new(score_int, threshold_int),
            metadata: RequestMetadata {
                subject_id: attestation.subject_id.clone(),
                score_kind: attestation.score_kind.clone(),
                issuer_id: attestation.issuer_id.clone(),
                attestation_id: attestation.attestation_id,
                threshold: *threshold,
                scale_factor,
            },
        })
    }
}
