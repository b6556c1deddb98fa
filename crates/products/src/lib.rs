//! Products domain module.
//!
//! Business rules for the export product catalog: the product aggregate, the
//! form boundary, the canonical catalog and the filter engine that projects it.
//! Everything here is deterministic domain logic (no IO, no rendering).

pub mod catalog;
pub mod category;
pub mod filter;
pub mod form;
pub mod product;
pub mod view;

pub use catalog::ProductCatalog;
pub use category::Category;
pub use filter::{ALL_SENTINEL, ProductFilter, Selection};
pub use form::{CatalogEntry, ProductFormData};
pub use product::{
    CreateProduct, DeleteProduct, Product, ProductCommand, ProductCreated, ProductDeleted,
    ProductEvent, ProductId, ProductUpdated, UpdateProduct,
};
pub use view::CatalogView;
