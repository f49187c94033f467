//! # Issuer Cross-Check
//!
//! The optional second round-trip: having already verified the proof
//! cryptographically, the Verifier asks the Issuer out-of-band whether
//! the attestation id is genuine and unrevoked. A pure signature check
//! cannot catch key compromise or post-issuance revocation; this
//! channel can.
//!
//! ## Failure Semantics
//!
//! Transport failures are *soft* — distinct from the hard cryptographic
//! failures of claim verification. Whether an unreachable issuer blocks
//! acceptance is a local policy choice, expressed by
//! [`RevocationPolicy`]. Cross-check requests carry only public
//! identifiers, so bounded retry with backoff is safe.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use zkscore_core::{AttestationId, IssuerId};
use zkscore_issuer::{AttestationSigner, AttestationStatus};

/// Maximum number of retry attempts after the initial request.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries (doubles each attempt: 200ms, 400ms, 800ms).
const BASE_DELAY_MS: u64 = 200;

fn default_timeout_secs() -> u64 {
    10
}

/// Errors from the cross-check channel.
#[derive(Error, Debug)]
pub enum CrossCheckError {
    /// The channel's configuration is unusable.
    #[error("invalid cross-check configuration: {0}")]
    Config(String),

    /// The issuer endpoint could not be reached (soft failure).
    #[error("issuer cross-check unavailable: {0}")]
    Unavailable(String),

    /// The issuer endpoint answered with something unparseable.
    #[error("issuer cross-check returned a malformed response: {0}")]
    MalformedResponse(String),

    /// The channel reaches a different issuer than the one asked about.
    #[error("cross-check issuer mismatch: asked about \"{requested}\", channel reaches \"{actual}\"")]
    IssuerMismatch {
        /// The issuer named in the artifact.
        requested: IssuerId,
        /// The issuer this channel actually reaches.
        actual: IssuerId,
    },
}

/// The Verifier-side cross-check interface.
///
/// Implementations confirm, through a channel independent of the proof
/// artifact, that an attestation id is known to its issuer and not
/// revoked.
pub trait CrossCheck {
    /// Ask the issuer about one attestation id.
    ///
    /// # Errors
    ///
    /// Soft failures ([`CrossCheckError::Unavailable`]) mean no answer
    /// was obtained; policy decides whether that blocks acceptance.
    fn confirm(
        &self,
        issuer_id: &IssuerId,
        attestation_id: &AttestationId,
    ) -> Result<AttestationStatus, CrossCheckError>;
}

/// Cross-check against an issuer living in the same process.
///
/// Used in tests and single-process deployments, mirroring how a
/// Verifier would query the issuing organization directly.
pub struct InProcessCrossCheck {
    signer: Arc<AttestationSigner>,
}

impl InProcessCrossCheck {
    /// Create a channel to an in-process issuer.
    pub fn new(signer: Arc<AttestationSigner>) -> Self {
        Self { signer }
    }
}

impl CrossCheck for InProcessCrossCheck {
    fn confirm(
        &self,
        issuer_id: &IssuerId,
        attestation_id: &AttestationId,
    ) -> Result<AttestationStatus, CrossCheckError> {
        if issuer_id != self.signer.issuer_id() {
            return Err(CrossCheckError::IssuerMismatch {
                requested: issuer_id.clone(),
                actual: self.signer.issuer_id().clone(),
            });
        }
        Ok(self.signer.status(attestation_id))
    }
}

/// Configuration for the HTTP cross-check channel.
#[derive(Debug, Clone, Deserialize)]
pub struct CrossCheckConfig {
    /// Base URL of the issuer's status endpoint.
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Cross-check over HTTP:
/// `GET {base}/issuers/{issuer_id}/attestations/{attestation_id}/status`
/// returning `{"exists": bool, "revoked": bool}`.
///
/// Transport errors are retried with exponential backoff
/// (200ms, 400ms, 800ms) before surfacing as
/// [`CrossCheckError::Unavailable`].
pub struct HttpCrossCheck {
    base: Url,
    client: reqwest::blocking::Client,
}

impl HttpCrossCheck {
    /// Build the channel from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CrossCheckError::Config`] for an unparseable base URL
    /// or an unconstructible HTTP client.
    pub fn new(config: &CrossCheckConfig) -> Result<Self, CrossCheckError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| CrossCheckError::Config(format!("base URL: {e}")))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CrossCheckError::Config(format!("HTTP client: {e}")))?;
        Ok(Self { base, client })
    }

    fn status_url(
        &self,
        issuer_id: &IssuerId,
        attestation_id: &AttestationId,
    ) -> Result<Url, CrossCheckError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| CrossCheckError::Config("base URL cannot carry paths".to_string()))?
            .extend([
                "issuers",
                issuer_id.as_str(),
                "attestations",
                &attestation_id.to_string(),
                "status",
            ]);
        Ok(url)
    }
}

impl CrossCheck for HttpCrossCheck {
    fn confirm(
        &self,
        issuer_id: &IssuerId,
        attestation_id: &AttestationId,
    ) -> Result<AttestationStatus, CrossCheckError> {
        let url = self.status_url(issuer_id, attestation_id)?;

        // Bounded retry on transport errors only; the request carries
        // nothing but public identifiers.
        let mut last_err = None;
        for attempt in 0..=MAX_RETRIES {
            match self.client.get(url.clone()).send() {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_success() {
                        return Err(CrossCheckError::Unavailable(format!(
                            "issuer endpoint returned {status}"
                        )));
                    }
                    return response
                        .json::<AttestationStatus>()
                        .map_err(|e| CrossCheckError::MalformedResponse(e.to_string()));
                }
                Err(e) => {
                    if attempt < MAX_RETRIES {
                        let delay = Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt));
                        tracing::warn!(
                            attempt = attempt + 1,
                            max_retries = MAX_RETRIES,
                            "cross-check request failed, retrying in {delay:?}: {e}"
                        );
                        std::thread::sleep(delay);
                    }
                    last_err = Some(e);
                }
            }
        }

        Err(CrossCheckError::Unavailable(
            last_err.map(|e| e.to_string()).unwrap_or_default(),
        ))
    }
}

/// How a caller treats the cross-check outcome.
///
/// Revocation enforcement timing is a policy choice, not a protocol
/// guarantee: an institution may accept a cryptographically valid proof
/// while the issuer is unreachable (advisory) or insist on a positive
/// confirmation (hard-block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevocationPolicy {
    /// Accept on soft failure; reject only a definite negative answer.
    #[default]
    Advisory,
    /// Require a positive "issued and unrevoked" confirmation.
    HardBlock,
}

impl RevocationPolicy {
    /// Whether a cross-check outcome permits accepting the artifact.
    ///
    /// A definite answer binds under both policies; the policies differ
    /// only in how they treat "no answer".
    pub fn accepts(&self, outcome: &Result<AttestationStatus, CrossCheckError>) -> bool {
        match outcome {
            Ok(status) => status.is_good(),
            Err(_) => matches!(self, Self::Advisory),
        }
    }
}
