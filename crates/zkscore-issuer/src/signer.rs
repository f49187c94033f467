//! # Attestation Signer
//!
//! The Issuer's signing surface: looks up the subject's score, mints a
//! fresh attestation id, signs the canonical tuple, and records the id
//! in the revocation ledger. Issuance has no side effects beyond the
//! signed record and the ledger entry.

use std::path::Path;

use zkscore_core::{AttestationId, IssuerId, ScoreKind, SubjectId, Timestamp};
use zkscore_crypto::{export_verifying_key, CryptoError, SigningKey, VerifyingKey};

use crate::attestation::Attestation;
use crate::error::IssueError;
use crate::revocation::{AttestationStatus, RevocationLedger};
use crate::scores::ScoreDirectory;

/// The signing authority: keypair, score directory, and ledger.
///
/// Shared references suffice for every operation — the score directory
/// is read-only after construction and the ledger serializes its own
/// writes — so one signer can serve concurrent issuance and cross-check
/// traffic.
pub struct AttestationSigner {
    issuer_id: IssuerId,
    signing_key: SigningKey,
    directory: ScoreDirectory,
    ledger: RevocationLedger,
}

impl AttestationSigner {
    /// Create a signer with a freshly generated Ed25519 keypair.
    pub fn new(issuer_id: IssuerId, directory: ScoreDirectory) -> Self {
        Self::with_key(issuer_id, SigningKey::generate(), directory)
    }

    /// Create a signer over an existing signing key.
    pub fn with_key(issuer_id: IssuerId, signing_key: SigningKey, directory: ScoreDirectory) -> Self {
        Self {
            issuer_id,
            signing_key,
            directory,
            ledger: RevocationLedger::new(),
        }
    }

    /// The issuer identity attestations are issued under.
    pub fn issuer_id(&self) -> &IssuerId {
        &self.issuer_id
    }

    /// Read access to the score directory.
    pub fn directory(&self) -> &ScoreDirectory {
        &self.directory
    }

    /// Mutable access to the score directory (enrollment updates).
    pub fn directory_mut(&mut self) -> &mut ScoreDirectory {
        &mut self.directory
    }

    /// Issue a signed attestation for `(subject_id, score_kind)`.
    ///
    /// Generates a fresh attestation id, signs the canonical tuple, and
    /// records the id as issued.
    ///
    /// # Errors
    ///
    /// Returns [`IssueError::UnknownSubject`] if no score is on record
    /// for the pair.
    pub fn issue(
        &self,
        subject_id: &SubjectId,
        score_kind: &ScoreKind,
    ) -> Result<Attestation, IssueError> {
        let score_value = self
            .directory
            .score_of(subject_id, score_kind)
            .copied()
            .ok_or_else(|| IssueError::UnknownSubject {
                subject_id: subject_id.clone(),
                score_kind: score_kind.clone(),
            })?;

        let attestation_id = AttestationId::new();
        let payload =
            Attestation::signing_payload(subject_id, score_kind, &score_value, &attestation_id)?;
        let signature = self.signing_key.sign(&payload);
        self.ledger.record_issued(attestation_id);

        // The score itself stays out of the log stream.
        tracing::info!(
            subject_id = %subject_id,
            score_kind = %score_kind,
            attestation_id = %attestation_id,
            "issued attestation"
        );

        Ok(Attestation {
            subject_id: subject_id.clone(),
            score_kind: score_kind.clone(),
            score_value,
            issuer_id: self.issuer_id.clone(),
            attestation_id,
            issued_at: Timestamp::now(),
            signature,
        })
    }

    /// The verification counterpart of the signing key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Export the verifying key as a key blob for registry consumption.
    ///
    /// # Errors
    ///
    /// Propagates filesystem failures.
    pub fn export_verifying_key(&self, path: &Path) -> Result<(), CryptoError> {
        export_verifying_key(&self.verifying_key(), path)
    }

    /// Verify an attestation against this issuer's own key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::VerificationFailed`] for signatures this
    /// issuer did not produce.
    pub fn verify(&self, attestation: &Attestation) -> Result<(), CryptoError> {
        attestation.verify_signature(&self.verifying_key())
    }

    /// Answer the cross-check: was this id issued here, and is it still
    /// standing?
    pub fn status(&self, id: &AttestationId) -> AttestationStatus {
        self.ledger.status(id)
    }

    /// Revoke an issued attestation.
    ///
    /// Returns `false` if the id was never issued by this signer.
    pub fn revoke(&self, id: &AttestationId) -> bool {
        let revoked = self.ledger.revoke(id);
        if revoked {
            tracing::warn!(attestation_id = %id, "attestation revoked");
        }
        revoked
    }
}

impl std::fmt::Debug for AttestationSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttestationSigner")
            .field("issuer_id", &self.issuer_id)
            .field("verifying_key", &self.verifying_key().to_hex())
            .field("subjects", &self.directory.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_with_student() -> ScoreDirectory {
        let mut directory = ScoreDirectory::new();
        directory.record(
            SubjectId::new("student123").unwrap(),
            ScoreKind::new("gpa").unwrap(),
            "3.8".parse().unwrap(),
        );
        directory
    }

    fn signer() -> AttestationSigner {
        AttestationSigner::new(IssuerId::new("MySchool").unwrap(), directory_with_student())
    }

    #[test]
    fn issue_produces_verifiable_attestation() {
        let signer = signer();
        let attestation = signer
            .issue(
                &SubjectId::new("student123").unwrap(),
                &ScoreKind::new("gpa").unwrap(),
            )
            .unwrap();

        assert_eq!(attestation.issuer_id.as_str(), "MySchool");
        assert_eq!(attestation.score_value, "3.8".parse().unwrap());
        assert!(signer.verify(&attestation).is_ok());
    }

    #[test]
    fn issue_records_id_in_ledger() {
        let signer = signer();
        let attestation = signer
            .issue(
                &SubjectId::new("student123").unwrap(),
                &ScoreKind::new("gpa").unwrap(),
            )
            .unwrap();
        assert!(signer.status(&attestation.attestation_id).is_good());
    }

    #[test]
    fn issue_generates_fresh_ids() {
        let signer = signer();
        let subject = SubjectId::new("student123").unwrap();
        let kind = ScoreKind::new("gpa").unwrap();
        let a = signer.issue(&subject, &kind).unwrap();
        let b = signer.issue(&subject, &kind).unwrap();
        assert_ne!(a.attestation_id, b.attestation_id);
    }

    #[test]
    fn unknown_subject_is_rejected() {
        let signer = signer();
        let err = signer
            .issue(
                &SubjectId::new("nobody").unwrap(),
                &ScoreKind::new("gpa").unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, IssueError::UnknownSubject { .. }));
    }

    #[test]
    fn known_subject_unknown_kind_is_rejected() {
        let signer = signer();
        let err = signer
            .issue(
                &SubjectId::new("student123").unwrap(),
                &ScoreKind::new("sat").unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, IssueError::UnknownSubject { .. }));
    }

    #[test]
    fn revoke_flips_status() {
        let signer = signer();
        let attestation = signer
            .issue(
                &SubjectId::new("student123").unwrap(),
                &ScoreKind::new("gpa").unwrap(),
            )
            .unwrap();
        assert!(signer.revoke(&attestation.attestation_id));
        let status = signer.status(&attestation.attestation_id);
        assert!(status.exists);
        assert!(status.revoked);
    }

    #[test]
    fn revoke_rejects_foreign_ids() {
        let signer = signer();
        assert!(!signer.revoke(&AttestationId::new()));
    }

    #[test]
    fn export_verifying_key_writes_importable_blob() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("school.pub");
        let signer = signer();
        signer.export_verifying_key(&path).unwrap();
        let imported = zkscore_crypto::import_verifying_key(&path).unwrap();
        assert_eq!(imported, signer.verifying_key());
    }

    #[test]
    fn debug_redacts_key_material() {
        let signer = signer();
        let debug = format!("{signer:?}");
        assert!(debug.contains("MySchool"));
        assert!(debug.contains("verifying_key"));
    }
}
