#![deny(missing_docs)]

//! # zkscore-zkp — External Proving Boundary
//!
//! The zero-knowledge proving and verification machinery is an external,
//! opaque service. This crate defines the request/response boundary the
//! protocol roles call into:
//!
//! - [`CircuitInputs`] — the scaled private score and public threshold
//!   handed to a prover. The private input never appears in `Debug`
//!   output.
//! - [`PublicSignals`] — the ordered field elements a proof discloses,
//!   with the contractual positions of the comparison output and the
//!   threshold.
//! - [`ProofArtifact`] — the versioned, transferable bundle of proof,
//!   public signals, and protocol metadata.
//! - [`ProofBackend`] — the sealed trait all backends implement.
//!
//! ## Backends
//!
//! [`MockBackend`] produces deterministic, transparent SHA-256 "proofs"
//! with no zero-knowledge guarantees — it exists so the protocol core is
//! testable without a proving toolchain. [`SnarkjsBackend`] drives the
//! `circom`/`snarkjs` toolchain as a subprocess with explicit timeouts.
//!
//! ## Sealed Trait
//!
//! `ProofBackend` is sealed: only backends defined in this crate can
//! exist, so an unvetted proving backend cannot be injected into a
//! verifier.

pub mod artifact;
pub mod inputs;
pub mod mock;
pub mod snarkjs;
pub mod traits;

// Re-export primary types.
pub use artifact::{ArtifactMetadata, ProofArtifact, ARTIFACT_VERSION};
pub use inputs::{
    CircuitInputs, PublicSignals, SignalError, OUTPUT_SIGNAL_INDEX, THRESHOLD_SIGNAL_INDEX,
};
pub use mock::MockBackend;
pub use snarkjs::{SnarkjsBackend, SnarkjsConfig};
pub use traits::{ExternalVerifyingKey, KeyError, ProofBackend, ProveError, ProverOutput, VerifyError};
