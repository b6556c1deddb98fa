use serde::{Deserialize, Serialize};

use dutydesk_core::{AggregateId, Entity, Money};
use dutydesk_duty::DutyRate;
use dutydesk_products::Product;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub AggregateId);

impl OrderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Who bears import duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingTerms {
    /// Delivered Duty Paid: the seller pays import duty.
    #[serde(rename = "DDP")]
    DeliveredDutyPaid,
    /// Delivered At Place: the buyer pays import duty on arrival.
    #[serde(rename = "DAP")]
    DeliveredAtPlace,
}

impl ShippingTerms {
    pub fn code(self) -> &'static str {
        match self {
            ShippingTerms::DeliveredDutyPaid => "DDP",
            ShippingTerms::DeliveredAtPlace => "DAP",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShippingTerms::DeliveredDutyPaid => "Delivered Duty Paid (DDP)",
            ShippingTerms::DeliveredAtPlace => "Delivered At Place (DAP)",
        }
    }
}

/// Order status tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
}

/// Order line with its duty breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    line_no: u32,
    name: String,
    quantity: u32,
    price: Money,
    duty_rate: DutyRate,
    duty_amount: Money,
    total: Money,
}

impl OrderItem {
    /// `duty_amount = price × quantity × rate/100`, `total = price × quantity + duty_amount`.
    pub fn new(
        line_no: u32,
        name: impl Into<String>,
        quantity: u32,
        price: Money,
        duty_rate: DutyRate,
    ) -> Self {
        let line_amount = price.saturating_mul(u64::from(quantity));
        let duty_amount = duty_rate.duty_on(line_amount);
        Self {
            line_no,
            name: name.into(),
            quantity,
            price,
            duty_rate,
            duty_amount,
            total: line_amount.saturating_add(duty_amount),
        }
    }

    /// Line for `quantity` units of a catalog product at its priced snapshot.
    pub fn for_product(line_no: u32, product: &Product, quantity: u32) -> Self {
        Self::new(line_no, product.name(), quantity, product.price(), product.duty_rate())
    }

    pub fn line_no(&self) -> u32 {
        self.line_no
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn duty_rate(&self) -> DutyRate {
        self.duty_rate
    }

    pub fn duty_amount(&self) -> Money {
        self.duty_amount
    }

    /// Price × quantity, before duty.
    pub fn line_amount(&self) -> Money {
        self.price.saturating_mul(u64::from(self.quantity))
    }

    pub fn total(&self) -> Money {
        self.total
    }
}

impl Entity for OrderItem {
    type Id = u32;

    fn id(&self) -> &Self::Id {
        &self.line_no
    }
}

/// Read-only order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    items: Vec<OrderItem>,
    subtotal: Money,
    total_duty: Money,
    total: Money,
    shipping_terms: ShippingTerms,
    status: OrderStatus,
    shipping_address: Option<String>,
}

impl Order {
    /// Build an order; aggregates are derived from `items`.
    pub fn new(
        id: OrderId,
        items: Vec<OrderItem>,
        shipping_terms: ShippingTerms,
        status: OrderStatus,
    ) -> Self {
        let subtotal = items
            .iter()
            .fold(Money::ZERO, |acc, item| acc.saturating_add(item.line_amount()));
        let total_duty = items
            .iter()
            .fold(Money::ZERO, |acc, item| acc.saturating_add(item.duty_amount()));
        let total = items
            .iter()
            .fold(Money::ZERO, |acc, item| acc.saturating_add(item.total()));

        Self {
            id,
            items,
            subtotal,
            total_duty,
            total,
            shipping_terms,
            status,
            shipping_address: None,
        }
    }

    pub fn with_shipping_address(mut self, address: impl Into<String>) -> Self {
        self.shipping_address = Some(address.into());
        self
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn total_duty(&self) -> Money {
        self.total_duty
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn shipping_terms(&self) -> ShippingTerms {
        self.shipping_terms
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn shipping_address(&self) -> Option<&str> {
        self.shipping_address.as_deref()
    }
}
