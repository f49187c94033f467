//! # Holder Error Types

use thiserror::Error;

use zkscore_core::{AttestationId, CodecError};

/// Errors while assembling a proof request.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Score or threshold could not be represented after scaling.
    #[error("scaling failed: {0}")]
    Scale(#[from] CodecError),

    /// The attestation is older than the configured maximum age.
    #[error("attestation {attestation_id} is {age_hours}h old, exceeding the configured maximum age")]
    StaleAttestation {
        /// The attestation that went stale.
        attestation_id: AttestationId,
        /// Its age at build time, in whole hours.
        age_hours: i64,
    },
}
