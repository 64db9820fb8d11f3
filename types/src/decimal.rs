use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Scaling factor for fixed-point arithmetic
// Using 10000 for easy decimal representation (4 decimal places)
pub const SCALE: i64 = 10_000;

/// Fixed-point amount with 4 decimal places of precision.
///
/// Bets, payout ratios and profit totals are all carried as `Decimal` so
/// that addition and subtraction are exact: reversing a recorded profit
/// delta restores the previous total bit-for-bit, and serialized values
/// round-trip without loss. Serialized form is the raw scaled integer.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Decimal(i64);

impl Decimal {
    pub const ZERO: Decimal = Decimal(0);
    pub const ONE: Decimal = Decimal(SCALE);

    /// Create from an integer value
    pub const fn from_int(value: i64) -> Self {
        Decimal(value * SCALE)
    }

    /// Create from a raw scaled value (`raw = value * 10000`)
    pub const fn from_raw(raw: i64) -> Self {
        Decimal(raw)
    }

    /// Get the raw scaled value
    pub const fn raw(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Stake after one martingale step.
    pub const fn doubled(self) -> Self {
        Decimal(self.0 * 2)
    }

    /// Multiply two fixed-point numbers
    pub fn mul(self, other: Self) -> Self {
        let scaled = (self.0 as i128) * (other.0 as i128);
        Decimal((scaled / SCALE as i128) as i64)
    }
}

impl std::ops::Add for Decimal {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Decimal(self.0 + other.0)
    }
}

impl std::ops::Sub for Decimal {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Decimal(self.0 - other.0)
    }
}

impl std::ops::Neg for Decimal {
    type Output = Self;
    fn neg(self) -> Self {
        Decimal(-self.0)
    }
}

impl std::ops::Mul for Decimal {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Decimal::mul(self, other)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let int = abs / SCALE as u64;
        let frac = abs % SCALE as u64;
        if frac == 0 {
            return write!(f, "{sign}{int}");
        }
        let mut digits = format!("{frac:04}");
        while digits.ends_with('0') {
            digits.pop();
        }
        write!(f, "{sign}{int}.{digits}")
    }
}

/// Failure to parse a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseDecimalError {
    #[error("empty decimal string")]
    Empty,
    #[error("invalid digit in decimal string")]
    InvalidDigit,
    #[error("more than 4 decimal places")]
    TooManyDecimals,
    #[error("decimal value out of range")]
    OutOfRange,
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parse strings like `"1"`, `"0.95"`, `"-2.5"` (at most 4 decimal places).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match rest.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (rest, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseDecimalError::Empty);
        }
        if frac_part.len() > 4 {
            return Err(ParseDecimalError::TooManyDecimals);
        }
        let int: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse::<u32>()
                .map_err(|_| ParseDecimalError::InvalidDigit)? as i64
        };
        let frac: i64 = if frac_part.is_empty() {
            0
        } else {
            let padded = format!("{frac_part:0<4}");
            padded
                .parse::<u16>()
                .map_err(|_| ParseDecimalError::InvalidDigit)? as i64
        };
        let raw = int
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac))
            .ok_or(ParseDecimalError::OutOfRange)?;
        Ok(Decimal(if negative { -raw } else { raw }))
    }
}
