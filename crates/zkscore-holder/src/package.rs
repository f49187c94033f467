//! # Proof Artifact Packaging
//!
//! Binds a prover's output and the request metadata into one immutable,
//! transferable [`ProofArtifact`]. Pure assembly: no proof validation
//! happens here — the external service already vouched for generation,
//! and the Verifier re-checks everything on receipt.

use zkscore_core::Timestamp;
use zkscore_zkp::{ArtifactMetadata, ProofArtifact, ProverOutput, ARTIFACT_VERSION};

use crate::request::RequestMetadata;

/// Assembles proof artifacts from prover output and request metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProofArtifactPackager;

impl ProofArtifactPackager {
    /// Package one proof run's results.
    ///
    /// Stamps the packaging timestamp and copies `threshold` and
    /// `scale_factor` verbatim from the request, so the Verifier can
    /// reconstruct the exact claim that was proved.
    pub fn package(output: ProverOutput, metadata: RequestMetadata) -> ProofArtifact {
        ProofArtifact {
            version: ARTIFACT_VERSION,
            proof: output.proof,
            public_signals: output.public_signals,
            metadata: ArtifactMetadata {
                subject_id: metadata.subject_id,
                score_kind: metadata.score_kind,
                issuer_id: metadata.issuer_id,
                attestation_id: metadata.attestation_id,
                threshold: metadata.threshold,
                scale_factor: metadata.scale_factor,
                timestamp: Timestamp::now(),
            },
        }
    }
}
