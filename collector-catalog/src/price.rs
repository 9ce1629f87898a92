//! Exact currency amounts.
//!
//! Prices are kept as whole cents so that sums over a collection never pick
//! up floating-point drift. Parsing accepts at most two fractional digits.
//! Serialized prices use the same decimal text as `Display`, e.g. `"650.00"`.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// A currency amount in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: i64) -> Self {
        Price(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Round a floating-point amount to the nearest cent.
    pub fn from_f64(amount: f64) -> Result<Self, ValidationError> {
        let cents = (amount * 100.0).round();
        // 2^53: beyond this f64 no longer holds every whole cent.
        if !cents.is_finite() || cents.abs() > 9_007_199_254_740_992.0 {
            return Err(ValidationError::InvalidPrice(amount.to_string()));
        }
        Ok(Price(cents as i64))
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Mean of `count` prices summing to `self`, rounded to the nearest cent.
    ///
    /// Returns zero when `count` is zero.
    pub fn average_over(self, count: i64) -> Price {
        if count <= 0 {
            return Price::ZERO;
        }
        let total = self.0 as i128;
        let count = count as i128;
        let rounded = if total >= 0 {
            (total + count / 2) / count
        } else {
            (total - count / 2) / count
        };
        Price(rounded as i64)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Price {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidPrice(s.to_string());

        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let (whole, frac) = match rest.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (rest, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(invalid)?;
        Ok(Price(if negative { -cents } else { cents }))
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

/// Accepts decimal text, or a plain number of currency units.
struct PriceVisitor;

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount such as \"12.50\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        v.checked_mul(100)
            .map(Price)
            .ok_or_else(|| E::custom(ValidationError::InvalidPrice(v.to_string())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Price)
            .ok_or_else(|| E::custom(ValidationError::InvalidPrice(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        Price::from_f64(v).map_err(E::custom)
    }
}
