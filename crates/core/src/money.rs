//! Non-negative monetary amounts in minor currency units.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Minor units per major unit (two-decimal granularity).
const MINOR_PER_MAJOR: u64 = 100;

/// Monetary amount in the smallest currency unit (hundredths).
///
/// Amounts are non-negative by construction. Arithmetic saturates at
/// `u64::MAX` minor units instead of wrapping.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Whole major units (e.g. `Money::from_major(3000)` is `3000.00`).
    pub const fn from_major(major: u64) -> Self {
        Self(major.saturating_mul(MINOR_PER_MAJOR))
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    pub fn saturating_mul(self, factor: u64) -> Money {
        Money(self.0.saturating_mul(factor))
    }

    /// `percent`% of this amount, rounded half-up to the nearest minor unit.
    pub fn percent(self, percent: u32) -> Money {
        let scaled = u128::from(self.0) * u128::from(percent);
        let rounded = (scaled + 50) / 100;
        Money(u64::try_from(rounded).unwrap_or(u64::MAX))
    }

    /// This amount increased by `percent`%.
    pub fn with_percent_added(self, percent: u32) -> Money {
        self.saturating_add(self.percent(percent))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / MINOR_PER_MAJOR, self.0 % MINOR_PER_MAJOR)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parse a decimal amount such as `"3000"`, `"12.5"` or `"12.34"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::validation("price is required"));
        }
        if s.starts_with('-') {
            return Err(DomainError::validation("price cannot be negative"));
        }

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(DomainError::validation(format!("invalid price: {s:?}")));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::validation(format!("invalid price: {s:?}")));
        }
        if frac.len() > 2 {
            return Err(DomainError::validation(
                "price supports at most two decimal places",
            ));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| DomainError::validation(format!("price out of range: {s:?}")))?
        };
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => u64::from(frac.as_bytes()[0] - b'0') * 10,
            _ => u64::from(frac.as_bytes()[0] - b'0') * 10 + u64::from(frac.as_bytes()[1] - b'0'),
        };

        whole
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(frac))
            .map(Money)
            .ok_or_else(|| DomainError::validation(format!("price out of range: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!("3000".parse::<Money>().unwrap(), Money::from_major(3000));
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_minor(1250));
        assert_eq!("12.34".parse::<Money>().unwrap(), Money::from_minor(1234));
        assert_eq!(".99".parse::<Money>().unwrap(), Money::from_minor(99));
        assert_eq!("7.".parse::<Money>().unwrap(), Money::from_major(7));
        assert_eq!(" 0 ".parse::<Money>().unwrap(), Money::ZERO);
    }

    #[test]
    fn rejects_negative_and_malformed_amounts() {
        for input in ["", "-1", "abc", "1.234", "1,5", ".", "1.2.3", "1e3"] {
            let err = input.parse::<Money>().unwrap_err();
            match err {
                DomainError::Validation(_) => {}
                _ => panic!("Expected Validation error for {input:?}"),
            }
        }
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_major(3360).to_string(), "3360.00");
        assert_eq!(Money::from_minor(1205).to_string(), "12.05");
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(Money::from_major(3000).percent(12), Money::from_major(360));
        assert_eq!(Money::from_minor(5).percent(10), Money::from_minor(1));
        assert_eq!(Money::from_minor(4).percent(10), Money::ZERO);
    }

    #[test]
    fn with_percent_added_matches_integer_rates() {
        assert_eq!(Money::from_major(5000).with_percent_added(6), Money::from_major(5300));
        assert_eq!(Money::from_major(1000).with_percent_added(10), Money::from_major(1100));
    }

    #[test]
    fn arithmetic_saturates() {
        assert_eq!(Money::from_minor(u64::MAX).with_percent_added(50), Money::from_minor(u64::MAX));
        assert_eq!(Money::from_major(u64::MAX), Money::from_minor(u64::MAX));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: formatting then parsing yields the same amount.
            #[test]
            fn display_parses_back(minor in 0u64..10_000_000_000) {
                let money = Money::from_minor(minor);
                prop_assert_eq!(money.to_string().parse::<Money>().unwrap(), money);
            }

            /// Property: adding a percentage never decreases the amount.
            #[test]
            fn percent_added_is_monotonic(minor in 0u64..10_000_000_000, pct in 0u32..500) {
                let money = Money::from_minor(minor);
                prop_assert!(money.with_percent_added(pct) >= money);
            }
        }
    }
}
