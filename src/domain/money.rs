//! Integer money: amounts are minor units (cents), never floats.

use std::fmt;
use std::iter::Sum;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::ValidationError;

static AMOUNT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-)?(\d+)(?:\.(\d{1,2}))?$").unwrap());

/// Monetary amount in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    pub const MAX: Money = Money(i64::MAX);
    pub const MIN: Money = Money(i64::MIN);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Round a float literal to the nearest cent.
    ///
    /// Only meant for reading human-written input such as `49.5` in a
    /// manifest; arithmetic always happens on cents.
    pub fn from_float(value: f64) -> Result<Self, ValidationError> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents > i64::MAX as f64 || cents < i64::MIN as f64 {
            return Err(ValidationError::InvalidAmount(value.to_string()));
        }
        Ok(Self(cents as i64))
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Format with a leading currency symbol, e.g. `$269.49` or `-$0.50`.
    pub fn with_symbol(self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.with_symbol(""))
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    /// Parse decimal text with at most two fraction digits: `99.99`, `120`, `49.5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidAmount(s.to_string());
        let caps = AMOUNT_REGEX.captures(s.trim()).ok_or_else(invalid)?;

        let units: i64 = caps[2].parse().map_err(|_| invalid())?;
        let fraction = match caps.get(3) {
            Some(m) if m.as_str().len() == 1 => m.as_str().parse::<i64>().map_err(|_| invalid())? * 10,
            Some(m) => m.as_str().parse::<i64>().map_err(|_| invalid())?,
            None => 0,
        };
        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(invalid)?;

        if caps.get(1).is_some() {
            Ok(Money(-cents))
        } else {
            Ok(Money(cents))
        }
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}
