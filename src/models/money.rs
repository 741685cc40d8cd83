//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. GnuCash writes values as rationals (`"12345/100"`), which are
//! converted here. Formatting follows the accounting convention used in every
//! report: negatives in parentheses, thousands grouped.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use gnucash_reports::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Build an amount from a GnuCash rational `num/denom`.
    ///
    /// Denominators other than 100 are rounded half-to-even to the cent.
    /// Returns `None` for a zero denominator or on overflow.
    pub fn from_rational(num: i64, denom: i64) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        let (mut n, mut d) = (num as i128 * 100, denom as i128);
        if d < 0 {
            n = -n;
            d = -d;
        }
        let mut q = n.div_euclid(d);
        let r = n.rem_euclid(d);
        // r is in [0, d); round half to even
        let twice = r * 2;
        if twice > d || (twice == d && q % 2 != 0) {
            q += 1;
        }
        i64::try_from(q).ok().map(Self)
    }

    /// Parse a GnuCash rational string such as `"-12345/100"`.
    pub fn parse_rational(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        let (num, denom) = match s.split_once('/') {
            Some((n, d)) => (n, d),
            None => (s, "1"),
        };
        let num: i64 = num
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
        let denom: i64 = denom
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
        Self::from_rational(num, denom).ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// The amount as a decimal with trailing zeros dropped (`800`, `-12.5`)
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2).normalize()
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Amount as a float, for spreadsheet cells
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Accounting format: `$1,234.56` or `($1,234.56)`
    pub fn to_accounting(&self) -> String {
        let body = format!(
            "${}.{:02}",
            group_thousands(self.dollars().unsigned_abs()),
            self.cents_part()
        );
        if self.is_negative() {
            format!("({})", body)
        } else {
            body
        }
    }

    /// Accounting format with positives padded by one space on each side,
    /// so they line up with parenthesised negatives in a right-aligned column.
    pub fn to_accounting_padded(&self) -> String {
        if self.is_negative() {
            self.to_accounting()
        } else {
            format!(" {} ", self.to_accounting())
        }
    }
}

/// Insert `,` between groups of three digits
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_accounting())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
