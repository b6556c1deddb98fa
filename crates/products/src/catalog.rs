//! Canonical product collection.

use chrono::{DateTime, Utc};

use dutydesk_core::{Aggregate, DomainError, DomainResult};
use dutydesk_duty::{DutyQuote, DutyTable};

use crate::form::ProductFormData;
use crate::product::{
    CreateProduct, DeleteProduct, Product, ProductCommand, ProductId, UpdateProduct,
};

/// The authoritative, unfiltered product set plus the duty table used to
/// price new and edited products.
///
/// Products keep insertion order. Every filtered view is derived from this
/// collection, never from another view.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    duty_table: DutyTable,
}

impl ProductCatalog {
    pub fn new(duty_table: DutyTable) -> Self {
        Self {
            products: Vec::new(),
            duty_table,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id_typed() == product_id)
    }

    pub fn duty_table(&self) -> &DutyTable {
        &self.duty_table
    }

    /// Swap the duty table. Existing products keep their priced snapshot.
    pub fn replace_duty_table(&mut self, duty_table: DutyTable) {
        tracing::info!(
            countries = duty_table.countries().count(),
            default_rate = %duty_table.default_rate(),
            "duty table replaced"
        );
        self.duty_table = duty_table;
    }

    /// Quote `form` against the current duty table.
    pub fn quote(&self, form: &ProductFormData) -> DutyQuote {
        if !self.duty_table.contains(&form.destination_country) {
            tracing::warn!(
                country = %form.destination_country,
                rate = %self.duty_table.default_rate(),
                "unknown destination, applying default duty rate"
            );
        }
        self.duty_table.quote(&form.destination_country, form.price)
    }

    /// Create or edit depending on whether an editing target is present.
    pub fn submit(
        &mut self,
        form: ProductFormData,
        editing: Option<ProductId>,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<ProductId> {
        match editing {
            Some(product_id) => self.update(product_id, form, occurred_at).map(|()| product_id),
            None => self.create(form, occurred_at),
        }
    }

    /// Create a product with an identifier minted from `occurred_at`.
    pub fn create(
        &mut self,
        form: ProductFormData,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<ProductId> {
        let product_id = ProductId::mint(occurred_at);
        self.create_with_id(product_id, form, occurred_at)?;
        Ok(product_id)
    }

    /// Create a product under a caller-chosen identifier.
    pub fn create_with_id(
        &mut self,
        product_id: ProductId,
        form: ProductFormData,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let quote = self.quote(&form);
        let command = ProductCommand::CreateProduct(CreateProduct {
            product_id,
            form,
            quote,
            occurred_at,
        });

        // An existing product decides the command so duplicates surface as a conflict.
        let events = match self.position(product_id) {
            Some(idx) => self.products[idx].handle(&command)?,
            None => Product::empty(product_id).handle(&command)?,
        };

        let mut product = Product::empty(product_id);
        for event in &events {
            product.apply(event);
        }
        tracing::info!(
            %product_id,
            country = %product.destination_country(),
            duty_rate = %product.duty_rate(),
            total_price = %product.total_price(),
            "product created"
        );
        self.products.push(product);
        Ok(())
    }

    /// Edit a product in place; duty is re-derived from the current table.
    pub fn update(
        &mut self,
        product_id: ProductId,
        form: ProductFormData,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let idx = self.position(product_id).ok_or(DomainError::NotFound)?;
        let quote = self.quote(&form);
        let command = ProductCommand::UpdateProduct(UpdateProduct {
            product_id,
            form,
            quote,
            occurred_at,
        });

        let product = &mut self.products[idx];
        let events = product.handle(&command)?;
        for event in &events {
            product.apply(event);
        }
        tracing::info!(
            %product_id,
            country = %product.destination_country(),
            duty_rate = %product.duty_rate(),
            total_price = %product.total_price(),
            "product updated"
        );
        Ok(())
    }

    /// Remove a product from the collection.
    pub fn delete(&mut self, product_id: ProductId, occurred_at: DateTime<Utc>) -> DomainResult<()> {
        let idx = self.position(product_id).ok_or(DomainError::NotFound)?;
        let command = ProductCommand::DeleteProduct(DeleteProduct {
            product_id,
            occurred_at,
        });

        let product = &mut self.products[idx];
        let events = product.handle(&command)?;
        for event in &events {
            product.apply(event);
        }
        if !product.is_live() {
            self.products.remove(idx);
            tracing::info!(%product_id, "product deleted");
        }
        Ok(())
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id_typed() == product_id)
    }
}
