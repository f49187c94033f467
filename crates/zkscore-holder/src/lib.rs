#![deny(missing_docs)]

//! # zkscore-holder — The Student Role
//!
//! The Holder owns attestations and turns them into zero-knowledge
//! threshold claims. The private score crosses exactly one boundary: the
//! prover call inside a proof run. Everything the Holder hands to a
//! Verifier — the packaged [`ProofArtifact`](zkscore_zkp::ProofArtifact)
//! — is self-contained and score-free.
//!
//! ## Components
//!
//! - [`AttestationWallet`] — in-memory store of received attestations.
//! - [`ProofRequestBuilder`] — scales score and threshold into circuit
//!   inputs, enforcing the circuit's range bound and any expiry policy.
//! - [`ProofArtifactPackager`] — binds a prover's output and the request
//!   metadata into one transferable artifact.

pub mod error;
pub mod package;
pub mod request;
pub mod wallet;

// Re-export primary types.
pub use error::RequestError;
pub use package::ProofArtifactPackager;
pub use request::{ProofRequest, ProofRequestBuilder, RequestMetadata};
pub use wallet::AttestationWallet;
