//! Country → duty rate table.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use dutydesk_core::Money;

use crate::country::Country;
use crate::rate::{DutyQuote, DutyRate};

/// Rate applied to destinations missing from the table.
pub const DEFAULT_DUTY_RATE: DutyRate = DutyRate::new(10);

impl Country {
    /// Built-in duty rate for this destination.
    pub const fn builtin_rate(self) -> DutyRate {
        match self {
            Country::Usa => DutyRate::new(8),
            Country::Uk => DutyRate::new(10),
            Country::Eu => DutyRate::new(12),
            Country::Canada => DutyRate::new(7),
            Country::Australia => DutyRate::new(9),
            Country::Japan => DutyRate::new(11),
            Country::Singapore => DutyRate::new(6),
        }
    }
}

/// Price `base_price` for `destination_country` against the built-in table.
///
/// Never fails: unknown destinations use [`DEFAULT_DUTY_RATE`].
pub fn compute_duty(destination_country: &str, base_price: Money) -> DutyQuote {
    let duty_rate = destination_country
        .parse::<Country>()
        .map(Country::builtin_rate)
        .unwrap_or(DEFAULT_DUTY_RATE);
    DutyQuote::new(duty_rate, base_price)
}

#[derive(Debug, Error)]
pub enum DutyTableError {
    #[error("failed to parse duty table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duty table contains an empty country name")]
    EmptyCountry,
}

/// On-disk shape of a duty table. Missing fields fall back to the built-ins.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DutyTableConfig {
    default_rate: Option<u32>,
    rates: Option<BTreeMap<String, u32>>,
}

/// Lookup table from destination country (exact, case-sensitive) to duty rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyTable {
    rates: BTreeMap<String, DutyRate>,
    default_rate: DutyRate,
}

impl Default for DutyTable {
    fn default() -> Self {
        Self {
            rates: Country::ALL
                .into_iter()
                .map(|c| (c.as_str().to_string(), c.builtin_rate()))
                .collect(),
            default_rate: DEFAULT_DUTY_RATE,
        }
    }
}

impl DutyTable {
    /// Build a table from explicit entries.
    pub fn from_entries<I, S>(entries: I, default_rate: DutyRate) -> Result<Self, DutyTableError>
    where
        I: IntoIterator<Item = (S, DutyRate)>,
        S: Into<String>,
    {
        let mut rates = BTreeMap::new();
        for (country, rate) in entries {
            let country = country.into();
            if country.trim().is_empty() {
                return Err(DutyTableError::EmptyCountry);
            }
            rates.insert(country, rate);
        }
        Ok(Self {
            rates,
            default_rate,
        })
    }

    /// Parse a JSON table: `{"default_rate": 10, "rates": {"USA": 8}}`.
    pub fn from_json(json: &str) -> Result<Self, DutyTableError> {
        let config: DutyTableConfig = serde_json::from_str(json)?;
        let builtin = DutyTable::default();

        let default_rate = config
            .default_rate
            .map(DutyRate::new)
            .unwrap_or(builtin.default_rate);

        match config.rates {
            Some(rates) => DutyTable::from_entries(
                rates.into_iter().map(|(c, r)| (c, DutyRate::new(r))),
                default_rate,
            ),
            None => Ok(DutyTable {
                default_rate,
                ..builtin
            }),
        }
    }

    pub fn default_rate(&self) -> DutyRate {
        self.default_rate
    }

    /// Countries with an explicit rate, in name order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn contains(&self, country: &str) -> bool {
        self.rates.contains_key(country)
    }

    /// Rate for `country`, or the default rate when absent.
    pub fn rate_for(&self, country: &str) -> DutyRate {
        self.rates.get(country).copied().unwrap_or(self.default_rate)
    }

    /// Price `base_price` for `country`.
    pub fn quote(&self, country: &str, base_price: Money) -> DutyQuote {
        DutyQuote::new(self.rate_for(country), base_price)
    }
}
