//! End-to-end protocol flows across the three roles: Issuer signs,
//! Holder proves, Verifier checks. The mock backend stands in for the
//! external proving service, so every outcome is deterministic.

use std::sync::Arc;

use zkscore_core::{CircuitLimits, IssuerId, ScoreKind, ScoreValue, SubjectId};
use zkscore_holder::{AttestationWallet, ProofArtifactPackager, ProofRequestBuilder, RequestError};
use zkscore_issuer::{AttestationSigner, ScoreDirectory};
use zkscore_verifier::{ClaimVerifier, FailureReason, TrustedIssuerRegistry};
use zkscore_zkp::{
    ExternalVerifyingKey, MockBackend, ProofArtifact, ProofBackend, THRESHOLD_SIGNAL_INDEX,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn subject() -> SubjectId {
    SubjectId::new("student123").unwrap()
}

fn gpa() -> ScoreKind {
    ScoreKind::new("gpa").unwrap()
}

fn school_signer() -> Arc<AttestationSigner> {
    let mut directory = ScoreDirectory::new();
    directory.record(subject(), gpa(), "3.8".parse().unwrap());
    Arc::new(AttestationSigner::new(
        IssuerId::new("MySchool").unwrap(),
        directory,
    ))
}

fn external_key() -> ExternalVerifyingKey {
    ExternalVerifyingKey::from_value(serde_json::json!({"scheme": "mock"}))
}

/// Issue, prove against `threshold`, and package — the Holder's half of
/// the protocol.
fn build_artifact(signer: &AttestationSigner, threshold: &str) -> ProofArtifact {
    let attestation = signer.issue(&subject(), &gpa()).unwrap();

    let mut wallet = AttestationWallet::new();
    let id = attestation.attestation_id;
    wallet.store(attestation);
    let attestation = wallet.get(&id).unwrap();

    let threshold: ScoreValue = threshold.parse().unwrap();
    let request = ProofRequestBuilder::new()
        .build(attestation, &threshold, 100)
        .unwrap();
    let output = MockBackend::new().prove(&request.inputs).unwrap();
    ProofArtifactPackager::package(output, request.metadata)
}

fn verifier_with(registry: Arc<TrustedIssuerRegistry>) -> ClaimVerifier<MockBackend> {
    ClaimVerifier::new(registry, MockBackend::new())
}

#[test]
fn honest_flow_verifies_end_to_end() {
    init_tracing();
    let signer = school_signer();
    let artifact = build_artifact(&signer, "3.5");

    // gpa 3.8 and threshold 3.5 at factor 100 scale to 380 and 350; the
    // proof discloses the threshold signal.
    assert_eq!(
        artifact.public_signals.values()[THRESHOLD_SIGNAL_INDEX],
        "350"
    );
    assert_eq!(artifact.metadata.scale_factor, 100);

    let registry = Arc::new(TrustedIssuerRegistry::new());
    registry
        .register(signer.issuer_id().clone(), signer.verifying_key())
        .unwrap();

    let result = verifier_with(registry)
        .verify(&artifact, &external_key())
        .unwrap();
    assert!(result.valid);
    assert!(result.threshold_confirmed);
    assert!(result.issuer_trusted);
    assert!(result.claim_proven);
}

#[test]
fn verifier_without_registration_rejects_same_artifact() {
    let signer = school_signer();
    let artifact = build_artifact(&signer, "3.5");

    // A verifier that never registered "MySchool".
    let empty_registry = Arc::new(TrustedIssuerRegistry::new());
    let result = verifier_with(empty_registry)
        .verify(&artifact, &external_key())
        .unwrap();

    assert!(!result.valid);
    assert!(!result.issuer_trusted);
    assert!(matches!(
        result.reason,
        Some(FailureReason::UntrustedIssuer { .. })
    ));
}

#[test]
fn threshold_tampered_after_packaging_is_caught() {
    let signer = school_signer();
    let mut artifact = build_artifact(&signer, "3.5");
    // The proof is genuinely valid for 3.5; the metadata now lies.
    artifact.metadata.threshold = "2.0".parse().unwrap();

    let registry = Arc::new(TrustedIssuerRegistry::new());
    registry
        .register(signer.issuer_id().clone(), signer.verifying_key())
        .unwrap();

    let result = verifier_with(registry)
        .verify(&artifact, &external_key())
        .unwrap();
    assert!(!result.valid);
    assert!(result.issuer_trusted);
    assert!(!result.threshold_confirmed);
    assert!(matches!(
        result.reason,
        Some(FailureReason::ClaimMismatch { .. })
    ));
}

#[test]
fn threshold_above_score_is_a_verified_false_claim() {
    let signer = school_signer();
    // gpa 3.8 against threshold 3.9: provably false, not invalid.
    let artifact = build_artifact(&signer, "3.9");

    let registry = Arc::new(TrustedIssuerRegistry::new());
    registry
        .register(signer.issuer_id().clone(), signer.verifying_key())
        .unwrap();

    let result = verifier_with(registry)
        .verify(&artifact, &external_key())
        .unwrap();
    assert!(result.valid);
    assert!(result.threshold_confirmed);
    assert!(result.issuer_trusted);
    assert!(!result.claim_proven);
    assert!(result.reason.is_none());
}

#[test]
fn artifact_travels_as_score_free_json() {
    let signer = school_signer();
    let artifact = build_artifact(&signer, "3.5");

    let document = artifact.to_json().unwrap();
    // Self-contained and transferable without the original score: no
    // score field, no leaked decimal, and only [output, threshold] in
    // the disclosed signals.
    let value: serde_json::Value = serde_json::from_str(&document).unwrap();
    assert!(value["metadata"].get("score_value").is_none());
    assert_eq!(value["public_signals"], serde_json::json!(["1", "350"]));
    assert!(!document.contains("\"3.8\""));

    // The receiving side parses and verifies the same bytes.
    let received = ProofArtifact::from_json(&document).unwrap();
    let registry = Arc::new(TrustedIssuerRegistry::new());
    registry
        .register(signer.issuer_id().clone(), signer.verifying_key())
        .unwrap();
    let result = verifier_with(registry)
        .verify(&received, &external_key())
        .unwrap();
    assert!(result.valid);
}

#[test]
fn one_attestation_backs_many_thresholds() {
    let signer = school_signer();
    let attestation = signer.issue(&subject(), &gpa()).unwrap();

    let registry = Arc::new(TrustedIssuerRegistry::new());
    registry
        .register(signer.issuer_id().clone(), signer.verifying_key())
        .unwrap();
    let verifier = verifier_with(registry);

    for (threshold, expected_proven) in [("3.0", true), ("3.8", true), ("4.0", false)] {
        let request = ProofRequestBuilder::new()
            .build(&attestation, &threshold.parse().unwrap(), 100)
            .unwrap();
        let output = MockBackend::new().prove(&request.inputs).unwrap();
        let artifact = ProofArtifactPackager::package(output, request.metadata);

        let result = verifier.verify(&artifact, &external_key()).unwrap();
        assert!(result.valid, "threshold {threshold}");
        assert_eq!(result.claim_proven, expected_proven, "threshold {threshold}");
    }
}

#[test]
fn reregistering_issuer_with_different_key_raises_conflict() {
    let registry = TrustedIssuerRegistry::new();
    let original = school_signer();
    let imposter = school_signer(); // same name, fresh keypair

    registry
        .register(original.issuer_id().clone(), original.verifying_key())
        .unwrap();
    let err = registry
        .register(imposter.issuer_id().clone(), imposter.verifying_key())
        .unwrap_err();
    assert!(matches!(
        err,
        zkscore_verifier::RegistryError::KeyConflict { .. }
    ));
}

#[test]
fn issuer_key_travels_via_exported_blob() {
    let dir = tempfile::tempdir().unwrap();
    let key_path = dir.path().join("myschool.pub");

    let signer = school_signer();
    signer.export_verifying_key(&key_path).unwrap();

    let registry = Arc::new(TrustedIssuerRegistry::new());
    registry
        .register_from_file(signer.issuer_id().clone(), &key_path)
        .unwrap();

    let artifact = build_artifact(&signer, "3.5");
    let result = verifier_with(registry)
        .verify(&artifact, &external_key())
        .unwrap();
    assert!(result.valid);
}

#[test]
fn stale_attestation_blocked_by_expiry_policy() {
    let signer = school_signer();
    let mut attestation = signer.issue(&subject(), &gpa()).unwrap();
    attestation.issued_at = zkscore_core::Timestamp::from_datetime(
        chrono::Utc::now() - chrono::Duration::days(30),
    );

    let err = ProofRequestBuilder::new()
        .with_max_age(chrono::Duration::days(7))
        .build(&attestation, &"3.5".parse().unwrap(), 100)
        .unwrap_err();
    assert!(matches!(err, RequestError::StaleAttestation { .. }));
}

#[test]
fn oversized_scale_factor_is_caught_before_proving() {
    let signer = school_signer();
    let attestation = signer.issue(&subject(), &gpa()).unwrap();

    let err = ProofRequestBuilder::new()
        .with_limits(CircuitLimits { max_input_bits: 16 })
        .build(&attestation, &"3.5".parse().unwrap(), 1_000_000)
        .unwrap_err();
    assert!(matches!(err, RequestError::Scale(_)));
}

#[test]
fn attestation_signature_survives_the_wallet_and_wire() {
    let signer = school_signer();
    let attestation = signer.issue(&subject(), &gpa()).unwrap();

    // Interchange document round-trip, then signature check against the
    // issuer's registered key — what a Verifier does when the Holder
    // discloses the attestation itself.
    let document = attestation.to_json().unwrap();
    let received = zkscore_issuer::Attestation::from_json(&document).unwrap();
    assert!(received.verify_signature(&signer.verifying_key()).is_ok());

    // A different issuer's key must not verify it.
    let other = school_signer();
    assert!(received.verify_signature(&other.verifying_key()).is_err());
}
