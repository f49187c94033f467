//! # Issuer Error Types

use thiserror::Error;

use zkscore_core::{CanonicalizationError, ScoreKind, SubjectId};

/// Errors during attestation issuance.
#[derive(Error, Debug)]
pub enum IssueError {
    /// No score record exists for the requested subject and kind.
    #[error("no {score_kind} score on record for subject \"{subject_id}\"")]
    UnknownSubject {
        /// The subject that was requested.
        subject_id: SubjectId,
        /// The score kind that was requested.
        score_kind: ScoreKind,
    },

    /// The signing payload could not be canonicalized.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_subject_display_names_both_keys() {
        let err = IssueError::UnknownSubject {
            subject_id: SubjectId::new("student999").unwrap(),
            score_kind: ScoreKind::new("gpa").unwrap(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("student999"));
        assert!(msg.contains("gpa"));
    }
}
