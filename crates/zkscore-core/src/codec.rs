//! # Scaled-Numeric Codec
//!
//! The deterministic decimal-to-integer transform shared by the Holder
//! and Verifier sides of a proof run. Arithmetic circuits work over
//! integers, so a decimal score and threshold are multiplied by an
//! explicit scale factor before entering the circuit, and the Verifier
//! recomputes the same transform to check threshold binding.
//!
//! ## Determinism Invariant
//!
//! Both sides must round identically — the rule is
//! round-half-away-from-zero, computed in exact integer arithmetic. The
//! scale factor is never a global constant; it travels in the artifact
//! metadata so a Verifier can reconstruct the exact claim.
//!
//! ## Range Checking
//!
//! The external circuit declares a maximum input bit-width. Scaled
//! magnitudes are checked against [`CircuitLimits`] here, before the
//! external prover is ever invoked.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::score::ScoreValue;

/// Default scale factor when the protocol run does not override it.
///
/// Two fraction digits of precision; always carried explicitly in
/// artifact metadata rather than assumed.
pub const DEFAULT_SCALE_FACTOR: u64 = 100;

/// The circuit's declared bound on scaled input magnitudes.
///
/// Circuit-specific and configurable — the reference comparison circuit
/// accepts 100-bit inputs, but the bound is validated here rather than
/// hardcoded into the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitLimits {
    /// Maximum bit width of a scaled input magnitude.
    pub max_input_bits: u16,
}

impl Default for CircuitLimits {
    fn default() -> Self {
        Self {
            max_input_bits: 100,
        }
    }
}

impl CircuitLimits {
    /// Whether a scaled integer fits within the declared bit-width.
    pub fn permits(&self, value: i128) -> bool {
        bit_width(value) <= u32::from(self.max_input_bits)
    }
}

/// Number of bits needed to represent the magnitude of `value`.
fn bit_width(value: i128) -> u32 {
    128 - value.unsigned_abs().leading_zeros()
}

/// Compute `round(value * factor)` with round-half-away-from-zero.
///
/// # Errors
///
/// Returns [`CodecError::ZeroScaleFactor`] for `factor == 0` and
/// [`CodecError::ScaleOverflow`] when the scaled magnitude exceeds
/// `limits.max_input_bits`.
pub fn scale(value: &ScoreValue, factor: u64, limits: &CircuitLimits) -> Result<i128, CodecError> {
    if factor == 0 {
        return Err(CodecError::ZeroScaleFactor);
    }
    let overflow = |bits: u32| CodecError::ScaleOverflow {
        value: value.to_string(),
        factor,
        bits,
        max_bits: limits.max_input_bits,
    };

    let numerator = i128::from(value.mantissa())
        .checked_mul(i128::from(factor))
        .ok_or_else(|| overflow(128))?;
    let scaled = div_round_half_away(numerator, 10_i128.pow(u32::from(value.frac_digits())));

    if !limits.permits(scaled) {
        return Err(overflow(bit_width(scaled)));
    }
    Ok(scaled)
}

/// Compute `int_value / factor` as a decimal score.
///
/// The result is rounded half-away-from-zero to two fraction digits and
/// normalized (trailing fraction zeros stripped), so
/// `unscale(scale(v, f), f)` recovers `v` within one unit of the
/// smallest representable increment.
///
/// # Errors
///
/// Returns [`CodecError::ZeroScaleFactor`] for `factor == 0` and
/// [`CodecError::ScaleOverflow`] if the quotient does not fit in a score
/// mantissa.
pub fn unscale(int_value: i128, factor: u64) -> Result<ScoreValue, CodecError> {
    if factor == 0 {
        return Err(CodecError::ZeroScaleFactor);
    }
    // The quotient must land in an i64 score mantissa (63 magnitude bits).
    let overflow = || CodecError::ScaleOverflow {
        value: int_value.to_string(),
        factor,
        bits: bit_width(int_value),
        max_bits: 63,
    };

    let numerator = int_value.checked_mul(100).ok_or_else(|| overflow())?;
    let centi = div_round_half_away(numerator, i128::from(factor));
    let mantissa = i64::try_from(centi).map_err(|_| overflow())?;

    // Two fraction digits is always valid for `ScoreValue`.
    let value = ScoreValue::new(mantissa, 2).map_err(|_| overflow())?;
    Ok(value.normalized())
}

/// Integer division with round-half-away-from-zero.
///
/// `divisor` must be positive; callers pass powers of ten or validated
/// scale factors.
fn div_round_half_away(numerator: i128, divisor: i128) -> i128 {
    let quotient = numerator / divisor;
    let remainder = numerator % divisor;
    if remainder.abs() * 2 >= divisor {
        quotient + numerator.signum()
    } else {
        quotient
    }
}
