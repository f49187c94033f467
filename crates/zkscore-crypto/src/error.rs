//! # Cryptographic Error Types
//!
//! Structured errors for all cryptographic operations in
//! `zkscore-crypto`, built with `thiserror`.

use thiserror::Error;

/// Errors from cryptographic operations in the ZkScore Stack.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Ed25519 signature verification failed.
    #[error("Ed25519 verification failed: {0}")]
    VerificationFailed(String),

    /// Invalid Ed25519 signature length.
    #[error("invalid Ed25519 signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// Invalid Ed25519 public key.
    #[error("invalid Ed25519 public key: {0}")]
    InvalidPublicKey(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),

    /// A verifying-key blob file had the wrong format.
    #[error("invalid key blob: {0}")]
    InvalidKeyBlob(String),

    /// I/O error (key blob file operations).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_failed_display() {
        let err = CryptoError::VerificationFailed("bad sig".to_string());
        assert!(format!("{err}").contains("bad sig"));
    }

    #[test]
    fn invalid_signature_length_display() {
        let err = CryptoError::InvalidSignatureLength(32);
        let msg = format!("{err}");
        assert!(msg.contains("64 bytes"));
        assert!(msg.contains("32"));
    }

    #[test]
    fn invalid_key_blob_display() {
        let err = CryptoError::InvalidKeyBlob("missing prefix".to_string());
        assert!(format!("{err}").contains("missing prefix"));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = CryptoError::from(io_err);
        assert!(format!("{err}").contains("file missing"));
    }
}
