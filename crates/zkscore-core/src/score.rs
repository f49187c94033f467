//! # Exact Decimal Score Values
//!
//! [`ScoreValue`] is the protocol's decimal type: an integer mantissa
//! plus a fraction-digit count of at most two (`3.8` is mantissa 38,
//! one fraction digit; `1450` is mantissa 1450, zero fraction digits).
//!
//! ## Design Decision
//!
//! Floats are banned from every signed or scaled payload — binary
//! floating point cannot represent `3.8` exactly, and a one-ULP
//! divergence between the Holder's and Verifier's scaling would break
//! the threshold-binding check silently. Scores therefore travel as
//! decimal strings on the wire and as exact integer arithmetic
//! internally.

use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Maximum number of fraction digits a score may carry.
pub const MAX_FRACTION_DIGITS: u8 = 2;

/// Maximum number of digits in the integer part of a score.
const MAX_INTEGER_DIGITS: usize = 12;

/// An exact decimal with at most two fraction digits.
///
/// The represented value is `mantissa / 10^frac_digits`. Two values with
/// different renderings (`"3.8"` vs `"3.80"`) compare unequal — equality
/// is structural so that a value round-trips through its string form
/// byte-for-byte, which the attestation signature depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreValue {
    mantissa: i64,
    frac_digits: u8,
}

impl ScoreValue {
    /// Create a score value from a mantissa and fraction-digit count.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidScoreValue`] if `frac_digits`
    /// exceeds [`MAX_FRACTION_DIGITS`].
    pub fn new(mantissa: i64, frac_digits: u8) -> Result<Self, ValidationError> {
        if frac_digits > MAX_FRACTION_DIGITS {
            return Err(ValidationError::InvalidScoreValue {
                value: format!("{mantissa}e-{frac_digits}"),
                reason: format!("more than {MAX_FRACTION_DIGITS} fraction digits"),
            });
        }
        Ok(Self {
            mantissa,
            frac_digits,
        })
    }

    /// Create a whole-number score value (`1450` for an SAT score).
    pub fn from_integer(value: i64) -> Self {
        Self {
            mantissa: value,
            frac_digits: 0,
        }
    }

    /// The integer mantissa (`38` for `3.8`).
    pub fn mantissa(&self) -> i64 {
        self.mantissa
    }

    /// The number of fraction digits (`1` for `3.8`).
    pub fn frac_digits(&self) -> u8 {
        self.frac_digits
    }

    /// Strip trailing fraction zeros (`3.80` becomes `3.8`, `4.00`
    /// becomes `4`).
    pub fn normalized(mut self) -> Self {
        while self.frac_digits > 0 && self.mantissa % 10 == 0 {
            self.mantissa /= 10;
            self.frac_digits -= 1;
        }
        self
    }
}

impl std::fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.frac_digits == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let divisor = 10_i64.pow(u32::from(self.frac_digits));
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let abs = self.mantissa.unsigned_abs();
        let whole = abs / divisor.unsigned_abs();
        let frac = abs % divisor.unsigned_abs();
        write!(
            f,
            "{sign}{whole}.{frac:0width$}",
            width = usize::from(self.frac_digits)
        )
    }
}

impl FromStr for ScoreValue {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidScoreValue {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };

        if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("not a decimal number"));
        }
        if int_part.len() > MAX_INTEGER_DIGITS {
            return Err(invalid("integer part too large"));
        }
        if digits.contains('.') && frac_part.is_empty() {
            return Err(invalid("trailing decimal point"));
        }
        if frac_part.len() > usize::from(MAX_FRACTION_DIGITS) {
            return Err(invalid("more than 2 fraction digits"));
        }
        if !frac_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("not a decimal number"));
        }

        let frac_digits = frac_part.len() as u8;
        let scale = 10_i64.pow(u32::from(frac_digits));
        // MAX_INTEGER_DIGITS bounds the integer part, so this cannot overflow.
        let mut mantissa = int_part
            .parse::<i64>()
            .map_err(|_| invalid("integer part too large"))?
            * scale;
        if frac_digits > 0 {
            mantissa += frac_part
                .parse::<i64>()
                .map_err(|_| invalid("not a decimal number"))?;
        }
        if negative {
            mantissa = -mantissa;
        }

        Self::new(mantissa, frac_digits)
    }
}

impl Serialize for ScoreValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct ScoreValueVisitor;

impl Visitor<'_> for ScoreValueVisitor {
    type Value = ScoreValue;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a decimal string or an integer (floats are rejected)")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(de::Error::custom)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ScoreValue::from_integer(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i64::try_from(v)
            .map(ScoreValue::from_integer)
            .map_err(|_| de::Error::custom("score out of range"))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(de::Error::custom(format!(
            "float scores are not accepted (got {v}); use a decimal string"
        )))
    }
}

impl<'de> Deserialize<'de> for ScoreValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScoreValueVisitor)
    }
}
