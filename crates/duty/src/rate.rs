use serde::{Deserialize, Serialize};

use dutydesk_core::{Money, ValueObject};

/// Duty rate as a whole percentage (e.g. `DutyRate::new(12)` is 12%).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DutyRate(u32);

impl ValueObject for DutyRate {}

impl DutyRate {
    pub const fn new(percent: u32) -> Self {
        Self(percent)
    }

    pub const fn percent(self) -> u32 {
        self.0
    }

    /// Duty payable on `amount`.
    pub fn duty_on(self, amount: Money) -> Money {
        amount.percent(self.0)
    }

    /// `amount × (1 + rate/100)`.
    pub fn apply(self, amount: Money) -> Money {
        amount.with_percent_added(self.0)
    }
}

impl core::fmt::Display for DutyRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Result of pricing a base price for a destination.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyQuote {
    pub duty_rate: DutyRate,
    pub total_price: Money,
}

impl ValueObject for DutyQuote {}

impl DutyQuote {
    pub fn new(duty_rate: DutyRate, base_price: Money) -> Self {
        Self {
            duty_rate,
            total_price: duty_rate.apply(base_price),
        }
    }

    /// Whether this quote is the correct quote for `base_price` at its rate.
    pub fn is_consistent_with(&self, base_price: Money) -> bool {
        self.duty_rate.apply(base_price) == self.total_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duty_on_and_apply_agree() {
        let rate = DutyRate::new(8);
        let price = Money::from_major(5000);
        assert_eq!(rate.duty_on(price), Money::from_major(400));
        assert_eq!(rate.apply(price), Money::from_major(5400));
    }

    #[test]
    fn quote_consistency_detects_tampered_totals() {
        let price = Money::from_major(3000);
        let quote = DutyQuote::new(DutyRate::new(12), price);
        assert!(quote.is_consistent_with(price));

        let tampered = DutyQuote {
            total_price: Money::from_major(3000),
            ..quote
        };
        assert!(!tampered.is_consistent_with(price));
    }

    #[test]
    fn zero_rate_is_identity() {
        let price = Money::from_minor(12_345);
        assert_eq!(DutyRate::new(0).apply(price), price);
    }
}
