//! Demo data for a fresh session.

use chrono::{DateTime, Utc};

use dutydesk_core::{AggregateId, DomainResult, Money};
use dutydesk_duty::DutyRate;
use dutydesk_orders::{Order, OrderId, OrderItem, OrderStatus, ShippingTerms};
use dutydesk_products::{CatalogEntry, Category, ProductCatalog, ProductFormData};

pub fn seed_catalog(catalog: &mut ProductCatalog, at: DateTime<Utc>) -> DomainResult<()> {
    catalog.create(
        ProductFormData {
            name: "Handcrafted Leather Bag".to_string(),
            destination_country: "USA".to_string(),
            hs_code: "4202.21".to_string(),
            price: Money::from_major(5000),
            category: Some(Category::LeatherGoods),
        },
        at,
    )?;
    catalog.create(
        ProductFormData {
            name: "Cotton Textile Bundle".to_string(),
            destination_country: "EU".to_string(),
            hs_code: "5208.51".to_string(),
            price: Money::from_major(3000),
            category: Some(Category::Textiles),
        },
        at,
    )?;
    Ok(())
}

/// HS catalog entries offered by the product form.
pub fn catalog_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("Handcrafted Leather Bag", "4202.21"),
        CatalogEntry::new("Cotton Textile Bundle", "5208.51"),
        CatalogEntry::new("Brass Table Lamp", "9405.11"),
        CatalogEntry::new("Hand-knotted Wool Carpet", "5701.10"),
    ]
}

pub fn order(at: DateTime<Utc>) -> Order {
    Order::new(
        OrderId::new(AggregateId::at(at)),
        vec![
            OrderItem::new(1, "Handcrafted Leather Bag", 2, Money::from_major(5000), DutyRate::new(8)),
            OrderItem::new(2, "Cotton Textile Bundle", 1, Money::from_major(3000), DutyRate::new(12)),
        ],
        ShippingTerms::DeliveredDutyPaid,
        OrderStatus::Pending,
    )
}
