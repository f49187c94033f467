//! # SHA-256 Digest Computation
//!
//! Computes [`ContentDigest`] values from
//! [`CanonicalBytes`](zkscore_core::CanonicalBytes). The deterministic
//! mock proof backend builds its transparent "proofs" from these
//! digests.
//!
//! ## Security Invariant
//!
//! [`sha256_digest`] requires `CanonicalBytes`, not raw `&[u8]` — every
//! digest in the system is computed over properly canonicalized data.
//! [`Sha256Accumulator`] exists for the one composite case (canonical
//! bytes concatenated with raw signal bytes) and is the documented
//! exception.

use sha2::{Digest, Sha256};

use zkscore_core::CanonicalBytes;

use crate::ed25519::bytes_to_hex;

/// A SHA-256 content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Render the digest as lowercase hex.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.bytes)
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let mut acc = Sha256Accumulator::new();
    acc.update(data.as_bytes());
    acc.finalize()
}

/// Incremental SHA-256 for composite inputs.
///
/// Used where a digest covers canonical bytes concatenated with
/// non-JSON material (the mock proof binds canonical circuit data to
/// raw public-signal bytes).
pub struct Sha256Accumulator {
    hasher: Sha256,
}

impl Sha256Accumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Feed bytes into the digest.
    pub fn update(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Finalize into a [`ContentDigest`].
    pub fn finalize(self) -> ContentDigest {
        ContentDigest {
            bytes: self.hasher.finalize().into(),
        }
    }

    /// Finalize and render as lowercase hex.
    pub fn finalize_hex(self) -> String {
        self.finalize().to_hex()
    }
}

impl Default for Sha256Accumulator {
    fn default() -> Self {
        Self::new()
    }
}
