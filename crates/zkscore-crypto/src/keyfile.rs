//! # Verifying-Key Blob Files
//!
//! The Issuer exports its verifying key as a small text blob; the
//! Verifier's trusted-issuer registry consumes the same file. Signing
//! keys are never written by this module — private material stays in
//! process memory.
//!
//! ## Format
//!
//! A single line: `ed25519:<64 lowercase hex chars>`, newline-terminated.
//! The algorithm prefix lets a future key rotation to a different scheme
//! be detected instead of misparsed.

use std::fs;
use std::path::Path;

use crate::ed25519::VerifyingKey;
use crate::error::CryptoError;

/// Algorithm prefix for Ed25519 key blobs.
pub const KEY_BLOB_PREFIX: &str = "ed25519:";

/// Write a verifying key to `path` as a key blob.
///
/// # Errors
///
/// Returns [`CryptoError::Io`] on filesystem failure.
pub fn export_verifying_key(key: &VerifyingKey, path: &Path) -> Result<(), CryptoError> {
    fs::write(path, format!("{KEY_BLOB_PREFIX}{}\n", key.to_hex()))?;
    Ok(())
}

/// Read a verifying key from a key blob at `path`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyBlob`] if the file does not carry
/// the `ed25519:` prefix, and the underlying decode errors for bad hex
/// or invalid key material.
pub fn import_verifying_key(path: &Path) -> Result<VerifyingKey, CryptoError> {
    let contents = fs::read_to_string(path)?;
    let line = contents.trim();
    let hex = line.strip_prefix(KEY_BLOB_PREFIX).ok_or_else(|| {
        CryptoError::InvalidKeyBlob(format!(
            "missing \"{KEY_BLOB_PREFIX}\" prefix in {}",
            path.display()
        ))
    })?;
    VerifyingKey::from_hex(hex)
}
