//! Fixed-precision price representation.
//!
//! The exchange quotes prices with exactly 7 fractional digits. Everything
//! that crosses the exchange boundary is converted through this type so that
//! top-price comparisons are exact integer comparisons instead of float
//! comparisons.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of fractional digits the exchange supports.
pub const PRICE_DECIMALS: u32 = 7;

const SCALE: i64 = 10_000_000;

#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    #[error("price {0} is not finite")]
    NotFinite(f64),

    #[error("price {0} exceeds the representable range")]
    OutOfRange(f64),

    #[error("malformed price string: {0:?}")]
    Malformed(String),

    #[error("price {0:?} has more than 7 fractional digits")]
    TooPrecise(String),
}

/// A price scaled to 7 fractional digits.
///
/// Ordering is the ordering of the underlying scaled integer, so `Price`
/// values can be compared exactly.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Convert a computed float price, rounding to 7 fractional digits.
    ///
    /// Fails when the value is not finite or does not fit the scaled
    /// integer representation.
    pub fn try_from_f64(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite(value));
        }
        let scaled = value * SCALE as f64;
        if scaled.abs() >= i64::MAX as f64 {
            return Err(PriceError::OutOfRange(value));
        }
        Ok(Self(scaled.round() as i64))
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// The scaled integer value (units of 10^-7).
    pub fn raw(self) -> i64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, PriceError> {
        let (sign, body) = match s.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(PriceError::Malformed(s.to_string()));
        }
        if frac_part.len() > PRICE_DECIMALS as usize {
            return Err(PriceError::TooPrecise(s.to_string()));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(PriceError::Malformed(s.to_string()));
        }
        let int: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| PriceError::Malformed(s.to_string()))?
        };
        let frac: i64 = if frac_part.is_empty() {
            0
        } else {
            let parsed: i64 = frac_part
                .parse()
                .map_err(|_| PriceError::Malformed(s.to_string()))?;
            parsed * 10i64.pow(PRICE_DECIMALS - frac_part.len() as u32)
        };
        int.checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac))
            .map(|v| Price(sign * v))
            .ok_or_else(|| PriceError::Malformed(s.to_string()))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let int = (self.0 / SCALE).abs();
        let frac = (self.0 % SCALE).abs();
        write!(f, "{}{}.{:07}", sign, int, frac)
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({})", self)
    }
}
