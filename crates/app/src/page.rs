//! Products page state: canonical catalog, displayed view and the product form.

use chrono::{DateTime, Utc};

use dutydesk_core::{DomainError, DomainResult};
use dutydesk_products::{
    CatalogEntry, CatalogView, Product, ProductCatalog, ProductFilter, ProductFormData, ProductId,
};

/// Owns the canonical catalog; every operation goes through this handle.
#[derive(Debug, Clone, Default)]
pub struct ProductsPage {
    catalog: ProductCatalog,
    view: CatalogView,
    entries: Vec<CatalogEntry>,
    /// Open form, if any, and the product it edits.
    draft: Option<ProductFormData>,
    editing: Option<ProductId>,
}

impl ProductsPage {
    pub fn new(catalog: ProductCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn editing(&self) -> Option<ProductId> {
        self.editing
    }

    pub fn draft(&self) -> Option<&ProductFormData> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut ProductFormData> {
        self.draft.as_mut()
    }

    pub fn catalog_entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn set_catalog_entries(&mut self, entries: Vec<CatalogEntry>) {
        self.entries = entries;
    }

    /// Open an empty form for a new product.
    pub fn open_add(&mut self) -> &ProductFormData {
        self.editing = None;
        self.draft.insert(ProductFormData::default())
    }

    /// Open the form pre-filled with an existing product.
    pub fn open_edit(&mut self, product_id: ProductId) -> DomainResult<&ProductFormData> {
        let product = self.catalog.get(product_id).ok_or(DomainError::NotFound)?;
        let form = ProductFormData::from_product(product);
        self.editing = Some(product_id);
        Ok(self.draft.insert(form))
    }

    pub fn close_form(&mut self) {
        self.draft = None;
        self.editing = None;
    }

    /// Fill name and HS code of the open form from the HS catalog.
    pub fn select_catalog_entry(&mut self, product_name: &str) -> DomainResult<bool> {
        let draft = self
            .draft
            .as_mut()
            .ok_or_else(|| DomainError::validation("no product form is open"))?;
        Ok(draft.select_from_catalog(&self.entries, product_name))
    }

    /// Submit `form`: creates, or edits the product the form was opened for.
    ///
    /// On success the form closes and the view shows the full catalog again.
    /// On failure the form stays open.
    pub fn submit(&mut self, form: ProductFormData, at: DateTime<Utc>) -> DomainResult<ProductId> {
        let product_id = self.catalog.submit(form, self.editing, at)?;
        self.close_form();
        self.view.reset();
        Ok(product_id)
    }

    /// Submit the open form as-is.
    pub fn submit_draft(&mut self, at: DateTime<Utc>) -> DomainResult<ProductId> {
        let form = self
            .draft
            .clone()
            .ok_or_else(|| DomainError::validation("no product form is open"))?;
        self.submit(form, at)
    }

    pub fn delete(&mut self, product_id: ProductId, at: DateTime<Utc>) -> DomainResult<()> {
        self.catalog.delete(product_id, at)?;
        if self.editing == Some(product_id) {
            self.close_form();
        }
        self.view.reset();
        Ok(())
    }

    pub fn search(&mut self, query: &str) {
        self.view.set_filter(ProductFilter::search(query));
    }

    pub fn filter_country(&mut self, country: &str) {
        self.view.set_filter(ProductFilter::country(country));
    }

    pub fn filter_category(&mut self, category: &str) -> DomainResult<()> {
        self.view.set_filter(ProductFilter::category(category)?);
        Ok(())
    }

    pub fn visible(&self) -> Vec<&Product> {
        self.view.visible(&self.catalog)
    }
}
