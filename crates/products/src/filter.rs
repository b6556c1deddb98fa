//! Filter/search engine over the canonical product collection.
//!
//! Every filter is a stateless projection: canonical products in, the matching
//! subset out, in canonical order.

use serde::{Deserialize, Serialize};

use dutydesk_core::DomainResult;

use crate::category::Category;
use crate::product::Product;

/// Selector value that disables a country or category filter.
pub const ALL_SENTINEL: &str = "All";

/// Either everything or one specific value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection<T> {
    All,
    Only(T),
}

/// A single filter criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductFilter {
    /// Case-insensitive match on name, or case-sensitive match on HS code.
    Search(String),
    /// Exact match on destination country.
    Country(Selection<String>),
    /// Exact match on category; uncategorised products never match.
    Category(Selection<Category>),
}

impl ProductFilter {
    pub fn search(query: impl Into<String>) -> Self {
        ProductFilter::Search(query.into())
    }

    /// Country filter from a selector value (`"All"` disables filtering).
    pub fn country(selected: &str) -> Self {
        if selected == ALL_SENTINEL {
            ProductFilter::Country(Selection::All)
        } else {
            ProductFilter::Country(Selection::Only(selected.to_string()))
        }
    }

    /// Category filter from a selector value (`"All"` disables filtering).
    ///
    /// Unknown category names are rejected.
    pub fn category(selected: &str) -> DomainResult<Self> {
        if selected == ALL_SENTINEL {
            return Ok(ProductFilter::Category(Selection::All));
        }
        Ok(ProductFilter::Category(Selection::Only(selected.parse()?)))
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::Search(query) => search_matches(product, &query.to_lowercase(), query),
            ProductFilter::Country(Selection::All) | ProductFilter::Category(Selection::All) => true,
            ProductFilter::Country(Selection::Only(country)) => {
                product.destination_country() == country
            }
            ProductFilter::Category(Selection::Only(category)) => {
                product.category() == Some(*category)
            }
        }
    }

    /// Matching products, in canonical order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        match self {
            ProductFilter::Search(query) => {
                let folded = query.to_lowercase();
                products
                    .iter()
                    .filter(|p| search_matches(p, &folded, query))
                    .collect()
            }
            _ => products.iter().filter(|p| self.matches(p)).collect(),
        }
    }
}

fn search_matches(product: &Product, folded_query: &str, raw_query: &str) -> bool {
    product.name().to_lowercase().contains(folded_query) || product.hs_code().contains(raw_query)
}
