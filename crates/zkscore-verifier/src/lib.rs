#![deny(missing_docs)]

//! # zkscore-verifier — The Institution Role
//!
//! The Verifier receives a [`ProofArtifact`](zkscore_zkp::ProofArtifact)
//! and decides, all-or-nothing, whether to accept the claim it carries:
//!
//! 1. structural well-formedness (version, metadata, signal layout);
//! 2. issuer trust against the [`TrustedIssuerRegistry`];
//! 3. threshold binding — the metadata's declared threshold, rescaled,
//!    must equal the threshold the proof actually discloses;
//! 4. cryptographic proof validity via the external backend;
//! 5. the circuit's comparison output, reported distinctly for proven
//!    and provably-false claims.
//!
//! An optional second channel, [`CrossCheck`], asks the Issuer
//! out-of-band whether the attestation id is genuine and unrevoked —
//! the guard a pure signature check cannot provide after key compromise
//! or revocation.

pub mod crosscheck;
pub mod error;
pub mod registry;
pub mod verify;

// Re-export primary types.
pub use crosscheck::{
    CrossCheck, CrossCheckConfig, CrossCheckError, HttpCrossCheck, InProcessCrossCheck,
    RevocationPolicy,
};
pub use error::VerifierError;
pub use registry::{IssuerRecord, RegistryError, TrustedIssuerRegistry};
pub use verify::{ClaimVerifier, FailureReason, VerificationResult};
