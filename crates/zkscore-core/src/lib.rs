#![deny(missing_docs)]

//! # zkscore-core — Foundational Types for the ZkScore Stack
//!
//! This crate defines the foundational types every other crate in the
//! workspace depends on. It has no internal crate dependencies — only
//! `serde`, `serde_json`, `thiserror`, `chrono`, and `uuid` from the
//! external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a [`SubjectId`] where an [`IssuerId`]
//!    is expected.
//!
//! 2. **[`CanonicalBytes`] is the sole path to signed payloads.** Every
//!    byte sequence that gets signed or digested flows through
//!    `CanonicalBytes::new()`, which applies JCS-compatible
//!    canonicalization (float rejection, datetime normalization, sorted
//!    keys, compact separators).
//!
//! 3. **Scores are exact decimals.** [`ScoreValue`] carries a decimal with
//!    at most two fraction digits as integer mantissa plus exponent —
//!    floats never enter the protocol, so both sides of a proof run scale
//!    to identical integers.
//!
//! 4. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod canonical;
pub mod codec;
pub mod error;
pub mod identity;
pub mod score;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use codec::{scale, unscale, CircuitLimits, DEFAULT_SCALE_FACTOR};
pub use error::{CanonicalizationError, CodecError, ValidationError};
pub use identity::{AttestationId, IssuerId, ScoreKind, SubjectId};
pub use score::ScoreValue;
pub use temporal::Timestamp;
