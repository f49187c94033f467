//! # Ed25519 Signing and Verification
//!
//! Ed25519 digital signatures for score attestations. The Issuer signs
//! the canonical attestation tuple; Holders check structure and
//! Verifiers check trust against the same verifying key.
//!
//! ## Security Invariants
//!
//! - Signing input is [`CanonicalBytes`] — raw byte signing is not
//!   exposed, so every signature covers a canonically serialized payload.
//! - Private key material is zeroized on drop and never printed by
//!   `Debug`.
//! - Signature equality is constant-time (`subtle`).

use ed25519_dalek::{Signer, Verifier};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use zkscore_core::CanonicalBytes;

use crate::error::CryptoError;

/// Render bytes as lowercase hex.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode lowercase or uppercase hex into bytes.
///
/// # Errors
///
/// Returns [`CryptoError::HexDecode`] on odd length or non-hex characters.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, CryptoError> {
    if hex.len() % 2 != 0 {
        return Err(CryptoError::HexDecode(format!(
            "odd length: {}",
            hex.len()
        )));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| CryptoError::HexDecode(format!("invalid hex at offset {i}")))
        })
        .collect()
}

/// An Ed25519 digital signature (64 bytes).
///
/// Serializes as a lowercase hex string in attestation documents.
#[derive(Debug, Clone)]
pub struct Ed25519Signature([u8; 64]);

impl Ed25519Signature {
    /// Construct a signature from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidSignatureLength`] unless the slice
    /// is exactly 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Parse a signature from its hex rendering.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::HexDecode`] or
    /// [`CryptoError::InvalidSignatureLength`].
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        Self::from_slice(&hex_to_bytes(hex)?)
    }

    /// Access the raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Render the signature as lowercase hex.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }
}

impl PartialEq for Ed25519Signature {
    fn eq(&self, other: &Self) -> bool {
        // Constant-time: signature comparison must not leak a prefix
        // match through timing.
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for Ed25519Signature {}

impl Serialize for Ed25519Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// An Ed25519 signing (private) key.
///
/// Key material is zeroized on drop by `ed25519-dalek`'s `zeroize`
/// integration; `Debug` prints only the public counterpart.
pub struct SigningKey {
    inner: ed25519_dalek::SigningKey,
}

impl SigningKey {
    /// Generate a new random signing key using the OS CSPRNG.
    pub fn generate() -> Self {
        Self {
            inner: ed25519_dalek::SigningKey::generate(&mut rand_core::OsRng),
        }
    }

    /// Construct a signing key from a raw 32-byte seed.
    ///
    /// The caller's seed copy is zeroized before returning.
    pub fn from_seed(seed: &mut [u8; 32]) -> Self {
        let inner = ed25519_dalek::SigningKey::from_bytes(seed);
        seed.zeroize();
        Self { inner }
    }

    /// Sign canonicalized data.
    ///
    /// The input must be [`CanonicalBytes`] — there is no raw-byte
    /// signing path.
    pub fn sign(&self, data: &CanonicalBytes) -> Ed25519Signature {
        Ed25519Signature(self.inner.sign(data.as_bytes()).to_bytes())
    }

    /// Return the verifying (public) counterpart of this key.
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey {
            inner: self.inner.verifying_key(),
        }
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key().to_hex())
            .finish_non_exhaustive()
    }
}

/// An Ed25519 verifying (public) key.
///
/// The key material a Verifier registers per issuer; serializes as a
/// lowercase hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyingKey {
    inner: ed25519_dalek::VerifyingKey,
}

impl VerifyingKey {
    /// Construct a verifying key from raw 32-byte material.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPublicKey`] if the bytes are not a
    /// valid curve point.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map(|inner| Self { inner })
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
    }

    /// Parse a verifying key from its hex rendering.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::HexDecode`] or
    /// [`CryptoError::InvalidPublicKey`].
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex_to_bytes(hex)?;
        let arr: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            CryptoError::InvalidPublicKey(format!("expected 32 bytes, got {}", bytes.len()))
        })?;
        Self::from_bytes(&arr)
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.inner.as_bytes()
    }

    /// Render the key as lowercase hex.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(self.as_bytes())
    }

    /// SHA-256 fingerprint of the key material, as lowercase hex.
    ///
    /// Used by the trusted-issuer registry to detect key replacement
    /// without comparing raw key bytes in log output.
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        bytes_to_hex(&Sha256::digest(self.as_bytes()))
    }

    /// Verify a signature over canonicalized data.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::VerificationFailed`] if the signature does
    /// not verify.
    pub fn verify(
        &self,
        data: &CanonicalBytes,
        signature: &Ed25519Signature,
    ) -> Result<(), CryptoError> {
        let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
        self.inner
            .verify(data.as_bytes(), &sig)
            .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
    }
}

impl Serialize for VerifyingKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for VerifyingKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
