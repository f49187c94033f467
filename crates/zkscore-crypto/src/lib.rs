#![deny(missing_docs)]

//! # zkscore-crypto — Cryptographic Primitives for the ZkScore Stack
//!
//! This crate provides the cryptographic building blocks used by the
//! three protocol roles:
//!
//! - **Ed25519** signing and verification for score attestations.
//! - **SHA-256 digest computation** from
//!   [`CanonicalBytes`](zkscore_core::CanonicalBytes), producing
//!   [`ContentDigest`] values (used by the deterministic mock prover).
//! - **Verifying-key blob files** — the key material an Issuer exports
//!   and a Verifier's trusted-issuer registry consumes.
//!
//! ## Security Invariant
//!
//! Signing and digest operations take
//! [`CanonicalBytes`](zkscore_core::CanonicalBytes), never raw byte
//! slices. This prevents signature malleability from non-canonical
//! serialization: the Holder and Verifier rebuild the signed payload
//! independently, and both must arrive at identical bytes.

pub mod ed25519;
pub mod error;
pub mod keyfile;
pub mod sha256;

// Re-export primary types.
pub use ed25519::{Ed25519Signature, SigningKey, VerifyingKey};
pub use error::CryptoError;
pub use keyfile::{export_verifying_key, import_verifying_key, KEY_BLOB_PREFIX};
pub use sha256::{sha256_digest, ContentDigest, Sha256Accumulator};
