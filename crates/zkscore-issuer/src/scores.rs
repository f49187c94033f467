//! # Score Directory
//!
//! The Issuer's in-memory keyed store of raw subject scores — the
//! precondition source for issuance. A subject's record maps score
//! kinds to decimal values (`{"gpa": 3.8, "sat": 1450}`).
//!
//! Raw scores never leave this module except inside a signed
//! attestation; the directory is deliberately not persistent.

use std::collections::HashMap;

use zkscore_core::{ScoreKind, ScoreValue, SubjectId};

/// In-memory store of raw scores, keyed by subject and kind.
#[derive(Debug, Clone, Default)]
pub struct ScoreDirectory {
    subjects: HashMap<SubjectId, HashMap<ScoreKind, ScoreValue>>,
}

impl ScoreDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) one score for a subject.
    ///
    /// Creates the subject's record on first use.
    pub fn record(&mut self, subject_id: SubjectId, kind: ScoreKind, value: ScoreValue) {
        self.subjects
            .entry(subject_id)
            .or_default()
            .insert(kind, value);
    }

    /// Look up a subject's score of a given kind.
    pub fn score_of(&self, subject_id: &SubjectId, kind: &ScoreKind) -> Option<&ScoreValue> {
        self.subjects.get(subject_id)?.get(kind)
    }

    /// Whether the directory has any scores for a subject.
    pub fn has_subject(&self, subject_id: &SubjectId) -> bool {
        self.subjects.contains_key(subject_id)
    }

    /// Remove a subject and all of their scores.
    ///
    /// Returns `false` if the subject was not present.
    pub fn remove_subject(&mut self, subject_id: &SubjectId) -> bool {
        self.subjects.remove(subject_id).is_some()
    }

    /// Iterate over the subjects with at least one score.
    pub fn subjects(&self) -> impl Iterator<Item = &SubjectId> {
        self.subjects.keys()
    }

    /// Number of subjects with at least one score.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(s: &str) -> SubjectId {
        SubjectId::new(s).unwrap()
    }

    fn kind(s: &str) -> ScoreKind {
        ScoreKind::new(s).unwrap()
    }

    #[test]
    fn record_and_look_up() {
        let mut directory = ScoreDirectory::new();
        directory.record(subject("student123"), kind("gpa"), "3.8".parse().unwrap());
        directory.record(subject("student123"), kind("sat"), "1450".parse().unwrap());

        assert!(directory.has_subject(&subject("student123")));
        assert_eq!(
            directory.score_of(&subject("student123"), &kind("gpa")),
            Some(&"3.8".parse().unwrap())
        );
        assert_eq!(
            directory.score_of(&subject("student123"), &kind("sat")),
            Some(&"1450".parse().unwrap())
        );
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn missing_subject_and_kind_are_none() {
        let mut directory = ScoreDirectory::new();
        directory.record(subject("a"), kind("gpa"), "3.8".parse().unwrap());

        assert!(directory.score_of(&subject("b"), &kind("gpa")).is_none());
        assert!(directory.score_of(&subject("a"), &kind("sat")).is_none());
    }

    #[test]
    fn record_overwrites_existing_score() {
        let mut directory = ScoreDirectory::new();
        directory.record(subject("a"), kind("gpa"), "3.8".parse().unwrap());
        directory.record(subject("a"), kind("gpa"), "3.9".parse().unwrap());
        assert_eq!(
            directory.score_of(&subject("a"), &kind("gpa")),
            Some(&"3.9".parse().unwrap())
        );
    }

    #[test]
    fn remove_subject_drops_all_scores() {
        let mut directory = ScoreDirectory::new();
        directory.record(subject("a"), kind("gpa"), "3.8".parse().unwrap());
        assert!(directory.remove_subject(&subject("a")));
        assert!(!directory.remove_subject(&subject("a")));
        assert!(directory.is_empty());
    }
}
