use core::str::FromStr;

use serde::{Deserialize, Serialize};

use dutydesk_core::DomainError;

/// Known export destinations.
///
/// Destination strings stay free-form on products; this enum names the
/// destinations offered by the product form and seeded into the duty table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "USA")]
    Usa,
    #[serde(rename = "UK")]
    Uk,
    #[serde(rename = "EU")]
    Eu,
    Canada,
    Australia,
    Japan,
    Singapore,
}

impl Country {
    /// Form order.
    pub const ALL: [Country; 7] = [
        Country::Usa,
        Country::Uk,
        Country::Eu,
        Country::Canada,
        Country::Australia,
        Country::Japan,
        Country::Singapore,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Country::Usa => "USA",
            Country::Uk => "UK",
            Country::Eu => "EU",
            Country::Canada => "Canada",
            Country::Australia => "Australia",
            Country::Japan => "Japan",
            Country::Singapore => "Singapore",
        }
    }
}

impl core::fmt::Display for Country {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = DomainError;

    /// Exact, case-sensitive match on the display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Country::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown country: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_names_exactly() {
        for country in Country::ALL {
            assert_eq!(country.as_str().parse::<Country>().unwrap(), country);
        }
        assert!("usa".parse::<Country>().is_err());
        assert!("Mars".parse::<Country>().is_err());
    }

    #[test]
    fn serializes_as_display_name() {
        assert_eq!(serde_json::to_string(&Country::Eu).unwrap(), "\"EU\"");
        assert_eq!(serde_json::to_string(&Country::Canada).unwrap(), "\"Canada\"");
    }
}
