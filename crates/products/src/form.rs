//! Form boundary: the user-editable subset of a product.

use serde::{Deserialize, Serialize};

use dutydesk_core::{DomainError, DomainResult, Money};

use crate::category::Category;
use crate::product::Product;

/// User-editable product fields.
///
/// Identity, duty rate and total price are never part of the form; they are
/// always derived by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFormData {
    pub name: String,
    pub destination_country: String,
    pub hs_code: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl ProductFormData {
    /// Pre-filled form for editing `product`.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name().to_string(),
            destination_country: product.destination_country().to_string(),
            hs_code: product.hs_code().to_string(),
            price: product.price(),
            category: product.category(),
        }
    }

    /// Required-field checks (price non-negativity is enforced by `Money`).
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.destination_country.trim().is_empty() {
            return Err(DomainError::validation("destination country is required"));
        }
        if self.hs_code.trim().is_empty() {
            return Err(DomainError::validation("HS code is required"));
        }
        Ok(())
    }

    /// Copy name and HS code from a catalog entry.
    pub fn apply_catalog_entry(&mut self, entry: &CatalogEntry) {
        self.name = entry.product_name.clone();
        self.hs_code = entry.hs_code.clone();
    }

    /// Select the catalog entry named `product_name`, if any.
    ///
    /// Returns `false` and leaves the form untouched when no entry matches.
    pub fn select_from_catalog(&mut self, entries: &[CatalogEntry], product_name: &str) -> bool {
        match entries.iter().find(|e| e.product_name == product_name) {
            Some(entry) => {
                self.apply_catalog_entry(entry);
                true
            }
            None => false,
        }
    }
}

/// One record of the external HS code catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "HS Code")]
    pub hs_code: String,
}

impl CatalogEntry {
    pub fn new(product_name: impl Into<String>, hs_code: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            hs_code: hs_code.into(),
        }
    }

    /// Label shown in the selection list.
    pub fn label(&self) -> String {
        format!("{} - {}", self.product_name, self.hs_code)
    }
}
