//! Response DTOs and mapping from domain types.

use serde::Serialize;

use dutydesk_duty::DutyQuote;
use dutydesk_orders::{Order, OrderItem, OrderStatus};
use dutydesk_products::{Category, Product, ProductFormData};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub destination_country: String,
    pub hs_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub duty_rate: u32,
    pub price: String,
    pub total_price: String,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id_typed().to_string(),
            name: p.name().to_string(),
            destination_country: p.destination_country().to_string(),
            hs_code: p.hs_code().to_string(),
            category: p.category(),
            duty_rate: p.duty_rate().percent(),
            price: p.price().to_string(),
            total_price: p.total_price().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDto {
    /// `Some` while editing an existing product.
    pub editing: Option<String>,
    pub name: String,
    pub destination_country: String,
    pub hs_code: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl FormDto {
    pub fn new(form: &ProductFormData, editing: Option<String>) -> Self {
        Self {
            editing,
            name: form.name.clone(),
            destination_country: form.destination_country.clone(),
            hs_code: form.hs_code.clone(),
            price: form.price.to_string(),
            category: form.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteDto {
    pub destination_country: String,
    pub duty_rate: u32,
    pub price: String,
    pub total_price: String,
}

impl QuoteDto {
    pub fn new(destination_country: &str, price: dutydesk_core::Money, quote: &DutyQuote) -> Self {
        Self {
            destination_country: destination_country.to_string(),
            duty_rate: quote.duty_rate.percent(),
            price: price.to_string(),
            total_price: quote.total_price.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItemDto {
    pub line_no: u32,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub duty_rate: u32,
    pub duty_amount: String,
    pub total: String,
}

impl From<&OrderItem> for OrderItemDto {
    fn from(item: &OrderItem) -> Self {
        Self {
            line_no: item.line_no(),
            name: item.name().to_string(),
            quantity: item.quantity(),
            price: item.price().to_string(),
            duty_rate: item.duty_rate().percent(),
            duty_amount: item.duty_amount().to_string(),
            total: item.total().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDto {
    pub id: String,
    pub items: Vec<OrderItemDto>,
    pub subtotal: String,
    pub total_duty: String,
    pub total: String,
    pub shipping_terms: &'static str,
    pub shipping_terms_label: &'static str,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            items: order.items().iter().map(OrderItemDto::from).collect(),
            subtotal: order.subtotal().to_string(),
            total_duty: order.total_duty().to_string(),
            total: order.total().to_string(),
            shipping_terms: order.shipping_terms().code(),
            shipping_terms_label: order.shipping_terms().label(),
            status: order.status(),
            shipping_address: order.shipping_address().map(str::to_string),
        }
    }
}
