//! Currency amounts
//!
//! Amounts are held as whole cents so sums over many expenses stay exact.
//! The ledger file stores them as plain JSON numbers in currency units
//! (`1000`, `12.5`); conversion happens only at the serde boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("no amount given")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' is too large")]
    TooLarge(String),
}

/// An amount in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// ```
    /// use allowance_tracker::models::Money;
    /// assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Nearest cent to a unit amount such as `12.5`
    pub fn from_units(units: f64) -> Option<Self> {
        let cents = (units * 100.0).round();
        (cents.is_finite() && cents.abs() <= i64::MAX as f64).then(|| Self(cents as i64))
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Currency units as a float, for per-day rates
    pub fn as_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn non_negative(&self) -> Self {
        if self.0 < 0 {
            Self(0)
        } else {
            *self
        }
    }

    /// Parse user input: an optional sign, an optional `$`, then a decimal.
    ///
    /// `12`, `12.5`, `$12.50`, `.75` and `-3` are accepted. Digits past the
    /// second decimal place round to the nearest cent.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        let not_a_number = || MoneyParseError::NotANumber(text.to_string());

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let digits = unsigned.strip_prefix('$').unwrap_or(unsigned);
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(not_a_number());
        }

        let frac_digit = |i: usize| frac.as_bytes().get(i).map_or(0, |b| i64::from(b - b'0'));
        let round_up = frac_digit(2) >= 5;
        let fraction = frac_digit(0) * 10 + frac_digit(1) + i64::from(round_up);

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| MoneyParseError::TooLarge(text.to_string()))?
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(|| MoneyParseError::TooLarge(text.to_string()))?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// `$12.50`, `-$3.00`, or the same with another symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, cents / 100, cents % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_units())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let units = f64::deserialize(deserializer)?;
        Money::from_units(units)
            .ok_or_else(|| serde::de::Error::custom(format!("amount out of range: {}", units)))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
