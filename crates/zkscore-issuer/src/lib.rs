#![deny(missing_docs)]

//! # zkscore-issuer — The Signing Authority Role
//!
//! The Issuer holds subjects' raw scores and turns them into signed
//! [`Attestation`]s on request. It never sees thresholds or proofs; its
//! responsibilities end at binding a score to its own identity with an
//! Ed25519 signature, and answering the out-of-band cross-check
//! ("is this attestation id genuine and unrevoked?").
//!
//! ## Components
//!
//! - [`ScoreDirectory`] — in-memory keyed store of raw scores. The
//!   signer's precondition source; deliberately not persistent.
//! - [`AttestationSigner`] — owns the signing keypair, issues and
//!   verifies attestations, records issued ids.
//! - [`RevocationLedger`] / [`AttestationStatus`] — the issued/revoked
//!   bookkeeping behind the cross-check.

pub mod attestation;
pub mod error;
pub mod revocation;
pub mod scores;
pub mod signer;

// Re-export primary types.
pub use attestation::Attestation;
pub use error::IssueError;
pub use revocation::{AttestationStatus, RevocationLedger};
pub use scores::ScoreDirectory;
pub use signer::AttestationSigner;
