//! # Circuit Inputs and Public Signals
//!
//! The data that crosses the proving boundary in each direction: scaled
//! integers in, ordered field elements out.
//!
//! ## Signal Layout Contract
//!
//! The comparison circuit discloses exactly two public signals, in this
//! order:
//!
//! - index [`OUTPUT_SIGNAL_INDEX`]: the comparison result, `1` when the
//!   attested score meets the threshold, `0` when it does not;
//! - index [`THRESHOLD_SIGNAL_INDEX`]: the public threshold the proof
//!   was generated against.
//!
//! The Verifier's threshold-binding check depends on this layout; a
//! circuit change that reorders signals is a protocol version change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position of the comparison output in the public signal vector.
pub const OUTPUT_SIGNAL_INDEX: usize = 0;

/// Position of the public threshold in the public signal vector.
pub const THRESHOLD_SIGNAL_INDEX: usize = 1;

/// The scaled inputs handed to a prover for one proof run.
///
/// `score_int` is the private witness; it exists only for the duration
/// of the request and is deliberately absent from `Debug` output so it
/// cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct CircuitInputs {
    score_int: i128,
    threshold_int: i128,
}

impl CircuitInputs {
    /// Assemble inputs from already-scaled integers.
    pub fn new(score_int: i128, threshold_int: i128) -> Self {
        Self {
            score_int,
            threshold_int,
        }
    }

    /// The public threshold input.
    pub fn threshold_int(&self) -> i128 {
        self.threshold_int
    }

    /// The private score witness. Crate-private: only proof backends
    /// read it, and only inside the boundary call.
    pub(crate) fn score_int(&self) -> i128 {
        self.score_int
    }

    /// The input document the external toolchain consumes:
    /// `{"score": "...", "threshold": "..."}` with decimal-string values.
    pub(crate) fn to_input_document(&self) -> serde_json::Value {
        serde_json::json!({
            "score": self.score_int.to_string(),
            "threshold": self.threshold_int.to_string(),
        })
    }
}

impl std::fmt::Debug for CircuitInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitInputs")
            .field("score_int", &"<private>")
            .field("threshold_int", &self.threshold_int)
            .finish()
    }
}

/// Errors reading a value out of a public signal vector.
#[derive(Error, Debug)]
pub enum SignalError {
    /// The signal vector has no value at the contractual position.
    #[error("missing public signal at index {index}")]
    Missing {
        /// The contractual position that was absent.
        index: usize,
    },

    /// The signal value could not be interpreted.
    #[error("malformed public signal at index {index}: \"{value}\"")]
    Malformed {
        /// The contractual position.
        index: usize,
        /// The raw signal value.
        value: String,
    },
}

/// The ordered public signals a proof disclosed.
///
/// Field elements travel as decimal strings, matching the
/// `public.json` format of the external toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicSignals(Vec<String>);

impl PublicSignals {
    /// Wrap an ordered signal vector.
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// The raw signal values, in disclosure order.
    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// Number of disclosed signals.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no signals were disclosed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The comparison output at [`OUTPUT_SIGNAL_INDEX`].
    ///
    /// # Errors
    ///
    /// [`SignalError::Missing`] if the vector is too short,
    /// [`SignalError::Malformed`] if the value is neither `"0"` nor `"1"`.
    pub fn output(&self) -> Result<bool, SignalError> {
        let raw = self.0.get(OUTPUT_SIGNAL_INDEX).ok_or(SignalError::Missing {
            index: OUTPUT_SIGNAL_INDEX,
        })?;
        match raw.as_str() {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(SignalError::Malformed {
                index: OUTPUT_SIGNAL_INDEX,
                value: other.to_string(),
            }),
        }
    }

    /// The public threshold at [`THRESHOLD_SIGNAL_INDEX`].
    ///
    /// # Errors
    ///
    /// [`SignalError::Missing`] if the vector is too short,
    /// [`SignalError::Malformed`] if the value is not a decimal integer.
    pub fn threshold(&self) -> Result<i128, SignalError> {
        let raw = self
            .0
            .get(THRESHOLD_SIGNAL_INDEX)
            .ok_or(SignalError::Missing {
                index: THRESHOLD_SIGNAL_INDEX,
            })?;
        raw.parse().map_err(|_| SignalError::Malformed {
            index: THRESHOLD_SIGNAL_INDEX,
            value: raw.clone(),
        })
    }
}
