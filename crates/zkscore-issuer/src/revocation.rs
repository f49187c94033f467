//! # Revocation Ledger
//!
//! The Issuer-side bookkeeping behind the cross-check: which attestation
//! ids were genuinely issued, and which have since been revoked. A pure
//! signature check cannot catch a revoked-but-validly-signed
//! attestation; this ledger is the second, independent channel a
//! Verifier can consult.
//!
//! Reads are concurrent; writes (issuance, revocation) serialize
//! against reads so a reader never observes a partially-applied update.

use std::collections::HashSet;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use zkscore_core::AttestationId;

/// The Issuer's answer to "is this attestation id genuine and
/// unrevoked?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationStatus {
    /// Whether the id was ever issued by this issuer.
    pub exists: bool,
    /// Whether the id has been revoked.
    pub revoked: bool,
}

impl AttestationStatus {
    /// Whether the attestation is issued and still standing.
    pub fn is_good(&self) -> bool {
        self.exists && !self.revoked
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    issued: HashSet<AttestationId>,
    revoked: HashSet<AttestationId>,
}

/// Issued/revoked bookkeeping for one issuer's attestations.
#[derive(Debug, Default)]
pub struct RevocationLedger {
    inner: RwLock<LedgerState>,
}

impl RevocationLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly issued attestation id.
    pub fn record_issued(&self, id: AttestationId) {
        self.inner.write().issued.insert(id);
    }

    /// Revoke an issued attestation.
    ///
    /// Returns `false` (and records nothing) if the id was never issued
    /// by this ledger.
    pub fn revoke(&self, id: &AttestationId) -> bool {
        let mut state = self.inner.write();
        if !state.issued.contains(id) {
            return false;
        }
        state.revoked.insert(*id);
        true
    }

    /// Look up the status of an attestation id.
    pub fn status(&self, id: &AttestationId) -> AttestationStatus {
        let state = self.inner.read();
        AttestationStatus {
            exists: state.issued.contains(id),
            revoked: state.revoked.contains(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_does_not_exist() {
        let ledger = RevocationLedger::new();
        let status = ledger.status(&AttestationId::new());
        assert!(!status.exists);
        assert!(!status.revoked);
        assert!(!status.is_good());
    }

    #[test]
    fn issued_id_exists_and_is_good() {
        let ledger = RevocationLedger::new();
        let id = AttestationId::new();
        ledger.record_issued(id);
        let status = ledger.status(&id);
        assert!(status.exists);
        assert!(!status.revoked);
        assert!(status.is_good());
    }

    #[test]
    fn revoked_id_is_not_good() {
        let ledger = RevocationLedger::new();
        let id = AttestationId::new();
        ledger.record_issued(id);
        assert!(ledger.revoke(&id));
        let status = ledger.status(&id);
        assert!(status.exists);
        assert!(status.revoked);
        assert!(!status.is_good());
    }

    #[test]
    fn revoking_unknown_id_is_rejected() {
        let ledger = RevocationLedger::new();
        assert!(!ledger.revoke(&AttestationId::new()));
    }

    #[test]
    fn status_serializes_for_the_wire() {
        let status = AttestationStatus {
            exists: true,
            revoked: false,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#"{"exists":true,"revoked":false}"#);
    }

    #[test]
    fn concurrent_reads_during_issuance() {
        use std::sync::Arc;
        let ledger = Arc::new(RevocationLedger::new());
        let ids: Vec<AttestationId> = (0..64).map(|_| AttestationId::new()).collect();

        let reader = {
            let ledger = Arc::clone(&ledger);
            let ids = ids.clone();
            std::thread::spawn(move || {
                for id in &ids {
                    // A status read must never see revoked-without-issued.
                    let status = ledger.status(id);
                    assert!(status.exists || !status.revoked);
                }
            })
        };

        for id in &ids {
            ledger.record_issued(*id);
            ledger.revoke(id);
        }
        reader.join().unwrap();
    }
}
