//! Fixed-point money using integer minor units.
//!
//! Amounts arrive from the backend as JSON numbers (`12.5`) or numeric
//! strings (`"12.50"`). Both are parsed through [`rust_decimal::Decimal`] and
//! stored as an `i64` count of minor units (cents, fils), so sums never pick
//! up floating-point drift. Serialized amounts are decimal strings in major
//! units (`"35.30"`).

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use core::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of minor units per major unit for every supported currency.
const MINOR_PER_MAJOR: i64 = 100;

/// Errors that can occur when parsing a [`Money`] amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The input is empty or whitespace.
    #[error("amount cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("amount is not a number: {0}")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("amount cannot be negative: {0}")]
    Negative(String),
    /// The amount does not fit in minor units.
    #[error("amount is out of range: {0}")]
    OutOfRange(String),
    /// The JSON value has a type that cannot hold an amount.
    #[error("amount must be a number or numeric string")]
    UnsupportedType,
}

/// A non-negative monetary amount in minor units.
///
/// ```
/// use orderdesk_core::Money;
///
/// let total: Money = ["10.10", "20.20", "5.00"]
///     .iter()
///     .map(|s| Money::parse(s).unwrap())
///     .sum();
/// assert_eq!(total.minor_units(), 3530);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Money(i64);

impl Money {
    /// Zero in any currency.
    pub const ZERO: Self = Self(0);

    /// Create an amount from minor units.
    #[must_use]
    pub const fn from_minor_units(minor: i64) -> Self {
        Self(minor)
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Convert a decimal amount in major units, rounding half away from zero
    /// to two places.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative or too large.
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount.to_string()));
        }
        let minor = amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.trunc().to_i64())
            .ok_or_else(|| MoneyError::OutOfRange(amount.to_string()))?;
        Ok(Self(minor))
    }

    /// The amount in major units as a decimal.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Parse a textual amount such as `"12.50"` or `"1e2"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty, not numeric, negative, or out
    /// of range.
    pub fn parse(s: &str) -> Result<Self, MoneyError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::Empty);
        }
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| MoneyError::NotANumber(trimmed.to_owned()))?;
        Self::from_decimal(amount)
    }

    /// Read an amount from a JSON number or numeric string.
    ///
    /// Numbers are converted through their shortest textual form, so a JSON
    /// `10.1` becomes exactly 1010 minor units.
    ///
    /// # Errors
    ///
    /// Returns an error for any other JSON type or an unparseable value.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, MoneyError> {
        match value {
            serde_json::Value::Number(n) => Self::parse(&n.to_string()),
            serde_json::Value::String(s) => Self::parse(s),
            _ => Err(MoneyError::UnsupportedType),
        }
    }

    /// Multiply by an item quantity.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(quantity)).map(Self)
    }

    /// Format for display with the currency marker and thousands
    /// separators, e.g. `AED 1,234.50` or `$19.99`.
    #[must_use]
    pub fn display(self, currency: CurrencyCode) -> String {
        let major = self.0 / MINOR_PER_MAJOR;
        let minor = (self.0 % MINOR_PER_MAJOR).abs();
        let digits = major.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}{}{grouped}.{minor:02}", currency.prefix())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_decimal())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// ISO 4217 currency codes the console can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    AED,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Prefix placed before the amount when displaying.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::AED => "AED ",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// The ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::AED => "AED",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AED" => Ok(Self::AED),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}
