use core::str::FromStr;

use serde::{Deserialize, Serialize};

use dutydesk_core::DomainError;

/// Product category used by the category filter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Leather Goods")]
    LeatherGoods,
    Textiles,
    Electronics,
    Handicrafts,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::LeatherGoods,
        Category::Textiles,
        Category::Electronics,
        Category::Handicrafts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::LeatherGoods => "Leather Goods",
            Category::Textiles => "Textiles",
            Category::Electronics => "Electronics",
            Category::Handicrafts => "Handicrafts",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown category: {s:?}")))
    }
}
