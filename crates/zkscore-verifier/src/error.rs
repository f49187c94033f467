//! # Verifier Error Types
//!
//! Hard protocol verdicts (untrusted issuer, claim mismatch, invalid
//! proof) are not errors — they are encoded in
//! [`VerificationResult`](crate::VerificationResult) so the caller
//! always learns which check failed. Only failures that prevented
//! reaching a verdict at all surface as [`VerifierError`].

use thiserror::Error;

/// Failures that prevented a verification verdict.
#[derive(Error, Debug)]
pub enum VerifierError {
    /// The external verification backend was unavailable or timed out.
    ///
    /// Artifacts are immutable, so the caller may retry the same
    /// artifact once the service recovers.
    #[error("external verification service failure: {detail}")]
    ExternalService {
        /// Backend-reported failure detail.
        detail: String,
    },
}
