//! # Attestation Wallet
//!
//! The Holder's in-memory store of attestations received from issuers,
//! keyed by attestation id. Storage is not persistence — a wallet lives
//! as long as the holding process does.

use std::collections::HashMap;

use zkscore_core::AttestationId;
use zkscore_issuer::Attestation;

/// In-memory store of received attestations.
#[derive(Debug, Clone, Default)]
pub struct AttestationWallet {
    entries: HashMap<AttestationId, Attestation>,
}

impl AttestationWallet {
    /// Create an empty wallet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an attestation, replacing any previous copy with the same
    /// id. Returns the replaced attestation, if any.
    pub fn store(&mut self, attestation: Attestation) -> Option<Attestation> {
        self.entries
            .insert(attestation.attestation_id, attestation)
    }

    /// Look up an attestation by id.
    pub fn get(&self, id: &AttestationId) -> Option<&Attestation> {
        self.entries.get(id)
    }

    /// Iterate over all stored attestations.
    pub fn list(&self) -> impl Iterator<Item = &Attestation> {
        self.entries.values()
    }

    /// Number of stored attestations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the wallet is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
