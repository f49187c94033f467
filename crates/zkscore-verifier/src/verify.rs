//! # Claim Verification
//!
//! The ordered, short-circuiting check sequence a Verifier runs over a
//! received artifact. No partial trust: a failure at any step rejects
//! the artifact, and the result names the step that failed so a caller
//! can distinguish "bad actor" from "system error".
//!
//! ## Threshold Binding
//!
//! Step 3 is the check that prevents a Holder from proving against one
//! threshold while advertising another: the declared decimal threshold
//! in the metadata, rescaled with the declared factor, must equal the
//! threshold field element the proof actually disclosed.

use std::sync::Arc;

use thiserror::Error;

use zkscore_core::{scale, CircuitLimits, IssuerId};
use zkscore_zkp::{ExternalVerifyingKey, ProofArtifact, ProofBackend, ARTIFACT_VERSION};

use crate::error::VerifierError;
use crate::registry::TrustedIssuerRegistry;

/// Which verification check rejected an artifact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The artifact's format version is not supported by this verifier.
    #[error("unsupported artifact version {version}")]
    UnsupportedVersion {
        /// The version the artifact declared.
        version: u32,
    },

    /// The artifact is structurally incomplete or inconsistent.
    #[error("malformed artifact: {detail}")]
    MalformedArtifact {
        /// What was wrong.
        detail: String,
    },

    /// The declaring issuer is not in the trusted-issuer registry.
    #[error("issuer \"{issuer_id}\" is not trusted")]
    UntrustedIssuer {
        /// The issuer the artifact declared.
        issuer_id: IssuerId,
    },

    /// The metadata's threshold does not match the proof's public signal.
    #[error("claim mismatch: {detail}")]
    ClaimMismatch {
        /// How the declared and disclosed thresholds diverged.
        detail: String,
    },

    /// The proof failed cryptographic verification or was malformed.
    #[error("invalid proof: {detail}")]
    InvalidProof {
        /// Backend-reported detail.
        detail: String,
    },
}

/// The all-or-nothing outcome of one verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether every check passed and the artifact is trustworthy.
    pub valid: bool,
    /// The failing check, when `valid` is false.
    pub reason: Option<FailureReason>,
    /// Whether the threshold-binding check passed.
    pub threshold_confirmed: bool,
    /// Whether the declaring issuer was found in the registry.
    pub issuer_trusted: bool,
    /// The circuit's comparison output: `true` when the attested score
    /// was proven to meet the threshold, `false` when the claim was
    /// proven false. Meaningful only when `valid` is true.
    pub claim_proven: bool,
}

impl VerificationResult {
    fn rejected(reason: FailureReason, issuer_trusted: bool, threshold_confirmed: bool) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
            threshold_confirmed,
            issuer_trusted,
            claim_proven: false,
        }
    }

    fn verified(claim_proven: bool) -> Self {
        Self {
            valid: true,
            reason: None,
            threshold_confirmed: true,
            issuer_trusted: true,
            claim_proven,
        }
    }
}

/// Runs the verification sequence over received artifacts.
///
/// Holds a shared registry (concurrent verifications see one trust
/// state) and a proof backend. Stateless across artifacts — each call
/// is an independent verification attempt.
pub struct ClaimVerifier<B> {
    registry: Arc<TrustedIssuerRegistry>,
    backend: B,
    limits: CircuitLimits,
}

impl<B: ProofBackend> ClaimVerifier<B> {
    /// Create a verifier over a registry and backend, with default
    /// circuit limits.
    pub fn new(registry: Arc<TrustedIssuerRegistry>, backend: B) -> Self {
        Self {
            registry,
            backend,
            limits: CircuitLimits::default(),
        }
    }

    /// Override the circuit limits used during threshold reconstruction.
    pub fn with_limits(mut self, limits: CircuitLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Verify one artifact against the external verification key.
    ///
    /// Checks run in order and short-circuit on first failure:
    /// structure, issuer trust, threshold binding, proof validity,
    /// comparison output. Hard verdicts come back as a
    /// [`VerificationResult`]; only a transient backend failure (no
    /// verdict reached) is an `Err`, and the same artifact is safe to
    /// re-verify afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`VerifierError::ExternalService`] when the proof
    /// backend is unavailable or times out.
    pub fn verify(
        &self,
        artifact: &ProofArtifact,
        key: &ExternalVerifyingKey,
    ) -> Result<VerificationResult, VerifierError> {
        // 1. Structure.
        if let Some(reason) = self.structural_check(artifact) {
            tracing::debug!(reason = %reason, "artifact rejected structurally");
            return Ok(VerificationResult::rejected(reason, false, false));
        }

        // 2. Issuer trust.
        let issuer_id = &artifact.metadata.issuer_id;
        if self.registry.lookup(issuer_id).is_none() {
            tracing::debug!(issuer_id = %issuer_id, "artifact from untrusted issuer");
            return Ok(VerificationResult::rejected(
                FailureReason::UntrustedIssuer {
                    issuer_id: issuer_id.clone(),
                },
                false,
                false,
            ));
        }

        // 3. Threshold binding.
        let expected = match scale(
            &artifact.metadata.threshold,
            artifact.metadata.scale_factor,
            &self.limits,
        ) {
            Ok(value) => value,
            Err(e) => {
                return Ok(VerificationResult::rejected(
                    FailureReason::ClaimMismatch {
                        detail: format!("declared threshold cannot be reconstructed: {e}"),
                    },
                    true,
                    false,
                ));
            }
        };
        let embedded = match artifact.public_signals.threshold() {
            Ok(value) => value,
            Err(e) => {
                return Ok(VerificationResult::rejected(
                    FailureReason::MalformedArtifact {
                        detail: e.to_string(),
                    },
                    true,
                    false,
                ));
            }
        };
        if expected != embedded {
            tracing::warn!(
                expected,
                embedded,
                attestation_id = %artifact.metadata.attestation_id,
                "threshold binding mismatch"
            );
            return Ok(VerificationResult::rejected(
                FailureReason::ClaimMismatch {
                    detail: format!(
                        "metadata threshold scales to {expected}, proof discloses {embedded}"
                    ),
                },
                true,
                false,
            ));
        }

        // 4. Proof validity, delegated to the external backend.
        let proof_valid = match self
            .backend
            .verify(&artifact.proof, &artifact.public_signals, key)
        {
            Ok(outcome) => outcome,
            Err(e) if e.is_transient() => {
                tracing::warn!(error = %e, "verification backend failure");
                return Err(VerifierError::ExternalService {
                    detail: e.to_string(),
                });
            }
            Err(e) => {
                return Ok(VerificationResult::rejected(
                    FailureReason::InvalidProof {
                        detail: e.to_string(),
                    },
                    true,
                    true,
                ));
            }
        };
        if !proof_valid {
            return Ok(VerificationResult::rejected(
                FailureReason::InvalidProof {
                    detail: "proof rejected by the verification service".to_string(),
                },
                true,
                true,
            ));
        }

        // 5. Comparison output: proven true vs proven false, reported
        // distinctly from any verification failure.
        match artifact.public_signals.output() {
            Ok(claim_proven) => {
                tracing::info!(
                    attestation_id = %artifact.metadata.attestation_id,
                    claim_proven,
                    "artifact verified"
                );
                Ok(VerificationResult::verified(claim_proven))
            }
            Err(e) => Ok(VerificationResult::rejected(
                FailureReason::MalformedArtifact {
                    detail: e.to_string(),
                },
                true,
                true,
            )),
        }
    }

    fn structural_check(&self, artifact: &ProofArtifact) -> Option<FailureReason> {
        if artifact.version != ARTIFACT_VERSION {
            return Some(FailureReason::UnsupportedVersion {
                version: artifact.version,
            });
        }
        let metadata = &artifact.metadata;
        if metadata.subject_id.as_str().is_empty()
            || metadata.issuer_id.as_str().is_empty()
            || metadata.score_kind.as_str().is_empty()
        {
            return Some(FailureReason::MalformedArtifact {
                detail: "empty identifier in metadata".to_string(),
            });
        }
        if metadata.scale_factor == 0 {
            return Some(FailureReason::MalformedArtifact {
                detail: "scale_factor must be positive".to_string(),
            });
        }
        if artifact.public_signals.len() < 2 {
            return Some(FailureReason::MalformedArtifact {
                detail: format!(
                    "expected at least 2 public signals, got {}",
                    artifact.public_signals.len()
                ),
            });
        }
        None
    }
}
