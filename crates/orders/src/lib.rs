//! Orders domain module.
//!
//! Read-only order summaries: line items with duty amounts and the order-level
//! aggregates derived from them. No mutation operations are defined.

pub mod order;

pub use order::{Order, OrderId, OrderItem, OrderStatus, ShippingTerms};
