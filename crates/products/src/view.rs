//! Displayed view over the catalog.

use crate::catalog::ProductCatalog;
use crate::filter::ProductFilter;
use crate::product::Product;

/// Holds the single active filter of the product list.
///
/// Filters do not compose: setting a new filter replaces the previous one, and
/// the visible set is always recomputed from the canonical catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    active: Option<ProductFilter>,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ProductFilter> {
        self.active.as_ref()
    }

    /// Replace the active filter.
    pub fn set_filter(&mut self, filter: ProductFilter) {
        tracing::debug!(?filter, "product filter replaced");
        self.active = Some(filter);
    }

    /// Show the full catalog again.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Products currently visible, in canonical order.
    pub fn visible<'a>(&self, catalog: &'a ProductCatalog) -> Vec<&'a Product> {
        match &self.active {
            Some(filter) => {
                let visible = filter.apply(catalog.products());
                tracing::debug!(total = catalog.len(), visible = visible.len(), "view recomputed");
                visible
            }
            None => catalog.products().iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dutydesk_core::Money;

    use crate::form::ProductFormData;

    fn catalog() -> ProductCatalog {
        let mut catalog = ProductCatalog::default();
        let rows = [
            ("Leather Bag", "USA"),
            ("Cotton Bundle", "EU"),
            ("Leather Belt", "EU"),
        ];
        for (name, country) in rows {
            catalog
                .create(
                    ProductFormData {
                        name: name.to_string(),
                        destination_country: country.to_string(),
                        hs_code: "0000.00".to_string(),
                        price: Money::from_major(10),
                        category: None,
                    },
                    Utc::now(),
                )
                .unwrap();
        }
        catalog
    }

    #[test]
    fn no_filter_shows_everything() {
        let catalog = catalog();
        assert_eq!(CatalogView::new().visible(&catalog).len(), 3);
    }

    #[test]
    fn last_filter_wins() {
        let catalog = catalog();
        let mut view = CatalogView::new();

        view.set_filter(ProductFilter::search("leather"));
        assert_eq!(view.visible(&catalog).len(), 2);

        // The country filter is evaluated against the canonical catalog, not
        // against the search results.
        view.set_filter(ProductFilter::country("EU"));
        let names: Vec<String> = view.visible(&catalog).iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec!["Cotton Bundle", "Leather Belt"]);
        assert_eq!(view.active(), Some(&ProductFilter::country("EU")));
    }

    #[test]
    fn reset_clears_filter() {
        let catalog = catalog();
        let mut view = CatalogView::new();
        view.set_filter(ProductFilter::country("USA"));
        view.reset();
        assert!(view.active().is_none());
        assert_eq!(view.visible(&catalog).len(), 3);
    }
}
