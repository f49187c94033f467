//! # Trusted Issuer Registry
//!
//! The Verifier-side mapping of issuer identity to verification key —
//! the single source of truth for who is trusted. An explicit, passed-in
//! instance, never a process-wide singleton: two verifiers (or two
//! tests) sharing trust state by accident is exactly the failure mode
//! this design rules out.
//!
//! ## Mutation Discipline
//!
//! Registration is idempotent for an identical key. Re-registering a
//! *different* key for a known issuer fails — silent key rotation is a
//! trust hazard. Rotation happens only through the explicit
//! [`replace`](TrustedIssuerRegistry::replace) operation, which logs the
//! displaced fingerprint for audit.
//!
//! Reads are concurrent; writes serialize against reads
//! (`parking_lot::RwLock`), so a reader never observes a
//! partially-applied registration.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;
use thiserror::Error;

use zkscore_core::IssuerId;
use zkscore_crypto::{import_verifying_key, CryptoError, VerifyingKey};

/// Errors from registry mutation.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// An issuer id is already registered with a different key.
    #[error("issuer \"{issuer_id}\" already registered with key {registered_fingerprint}; refusing to overwrite with {offered_fingerprint} (use replace)")]
    KeyConflict {
        /// The contested issuer id.
        issuer_id: IssuerId,
        /// Fingerprint of the currently registered key.
        registered_fingerprint: String,
        /// Fingerprint of the key that was offered.
        offered_fingerprint: String,
    },

    /// Key material could not be loaded or decoded.
    #[error("key material error: {0}")]
    Key(#[from] CryptoError),
}

/// One registered issuer: identity, key, and key fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerRecord {
    /// The issuer's identity.
    pub issuer_id: IssuerId,
    /// The issuer's Ed25519 verifying key.
    pub public_key: VerifyingKey,
    /// SHA-256 fingerprint of the key material.
    pub public_key_fingerprint: String,
}

/// The mapping of issuer identity to verification key.
#[derive(Debug, Default)]
pub struct TrustedIssuerRegistry {
    inner: RwLock<HashMap<IssuerId, IssuerRecord>>,
}

impl TrustedIssuerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an issuer's verifying key.
    ///
    /// Idempotent for an identical key.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::KeyConflict`] if the issuer is already
    /// registered with a different key.
    pub fn register(&self, issuer_id: IssuerId, key: VerifyingKey) -> Result<(), RegistryError> {
        let fingerprint = key.fingerprint();
        let mut map = self.inner.write();

        if let Some(existing) = map.get(&issuer_id) {
            if existing.public_key_fingerprint == fingerprint {
                return Ok(());
            }
            return Err(RegistryError::KeyConflict {
                issuer_id,
                registered_fingerprint: existing.public_key_fingerprint.clone(),
                offered_fingerprint: fingerprint,
            });
        }

        tracing::info!(issuer_id = %issuer_id, fingerprint = %fingerprint, "issuer registered");
        map.insert(
            issuer_id.clone(),
            IssuerRecord {
                issuer_id,
                public_key: key,
                public_key_fingerprint: fingerprint,
            },
        );
        Ok(())
    }

    /// Explicitly replace an issuer's key, returning the displaced
    /// fingerprint if one existed.
    ///
    /// This is the only sanctioned key-rotation path; the displaced
    /// fingerprint is logged for audit.
    pub fn replace(&self, issuer_id: IssuerId, key: VerifyingKey) -> Option<String> {
        let fingerprint = key.fingerprint();
        let mut map = self.inner.write();
        let displaced = map
            .insert(
                issuer_id.clone(),
                IssuerRecord {
                    issuer_id: issuer_id.clone(),
                    public_key: key,
                    public_key_fingerprint: fingerprint.clone(),
                },
            )
            .map(|record| record.public_key_fingerprint);

        if let Some(old) = &displaced {
            tracing::warn!(
                issuer_id = %issuer_id,
                displaced_fingerprint = %old,
                new_fingerprint = %fingerprint,
                "issuer key replaced"
            );
        }
        displaced
    }

    /// Register an issuer from an exported key blob file.
    ///
    /// # Errors
    ///
    /// Propagates key-loading failures and
    /// [`RegistryError::KeyConflict`].
    pub fn register_from_file(
        &self,
        issuer_id: IssuerId,
        path: &Path,
    ) -> Result<(), RegistryError> {
        let key = import_verifying_key(path)?;
        self.register(issuer_id, key)
    }

    /// Look up the record for an issuer, if trusted.
    pub fn lookup(&self, issuer_id: &IssuerId) -> Option<IssuerRecord> {
        self.inner.read().get(issuer_id).cloned()
    }

    /// Number of registered issuers.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether no issuers are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
