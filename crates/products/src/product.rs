use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dutydesk_core::{Aggregate, AggregateId, AggregateRoot, DomainError, Money};
use dutydesk_duty::{DutyQuote, DutyRate};
use dutydesk_events::Event;

use crate::category::Category;
use crate::form::ProductFormData;

/// Product identifier, minted from the creation timestamp.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    /// Mint a fresh identifier for a product created at `created_at`.
    pub fn mint(created_at: DateTime<Utc>) -> Self {
        Self(AggregateId::at(created_at))
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Aggregate root: Product.
///
/// Duty rate and total price are a snapshot taken when the product was last
/// created or edited; they are never recomputed lazily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    destination_country: String,
    hs_code: String,
    category: Option<Category>,
    price: Money,
    duty_rate: DutyRate,
    total_price: Money,
    version: u64,
    created: bool,
    deleted: bool,
}

impl Product {
    /// Create an empty, not-yet-created aggregate instance.
    pub fn empty(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            destination_country: String::new(),
            hs_code: String::new(),
            category: None,
            price: Money::ZERO,
            duty_rate: DutyRate::new(0),
            total_price: Money::ZERO,
            version: 0,
            created: false,
            deleted: false,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn destination_country(&self) -> &str {
        &self.destination_country
    }

    pub fn hs_code(&self) -> &str {
        &self.hs_code
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn duty_rate(&self) -> DutyRate {
        self.duty_rate
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Exists and has not been deleted.
    pub fn is_live(&self) -> bool {
        self.created && !self.deleted
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub product_id: ProductId,
    pub form: ProductFormData,
    pub quote: DutyQuote,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub product_id: ProductId,
    pub form: ProductFormData,
    pub quote: DutyQuote,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeleteProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProduct {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCommand {
    CreateProduct(CreateProduct),
    UpdateProduct(UpdateProduct),
    DeleteProduct(DeleteProduct),
}

/// Event: ProductCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub product_id: ProductId,
    pub name: String,
    pub destination_country: String,
    pub hs_code: String,
    pub category: Option<Category>,
    pub price: Money,
    pub duty_rate: DutyRate,
    pub total_price: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdated {
    pub product_id: ProductId,
    pub name: String,
    pub destination_country: String,
    pub hs_code: String,
    pub category: Option<Category>,
    pub price: Money,
    pub duty_rate: DutyRate,
    pub total_price: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDeleted {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductEvent {
    ProductCreated(ProductCreated),
    ProductUpdated(ProductUpdated),
    ProductDeleted(ProductDeleted),
}

impl Event for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated(_) => "products.product.created",
            ProductEvent::ProductUpdated(_) => "products.product.updated",
            ProductEvent::ProductDeleted(_) => "products.product.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductCreated(e) => e.occurred_at,
            ProductEvent::ProductUpdated(e) => e.occurred_at,
            ProductEvent::ProductDeleted(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Product {
    type Command = ProductCommand;
    type Event = ProductEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProductEvent::ProductCreated(e) => {
                self.id = e.product_id;
                self.name = e.name.clone();
                self.destination_country = e.destination_country.clone();
                self.hs_code = e.hs_code.clone();
                self.category = e.category;
                self.price = e.price;
                self.duty_rate = e.duty_rate;
                self.total_price = e.total_price;
                self.created = true;
            }
            ProductEvent::ProductUpdated(e) => {
                self.name = e.name.clone();
                self.destination_country = e.destination_country.clone();
                self.hs_code = e.hs_code.clone();
                self.category = e.category;
                self.price = e.price;
                self.duty_rate = e.duty_rate;
                self.total_price = e.total_price;
            }
            ProductEvent::ProductDeleted(_) => {
                self.deleted = true;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductCommand::CreateProduct(cmd) => self.handle_create(cmd),
            ProductCommand::UpdateProduct(cmd) => self.handle_update(cmd),
            ProductCommand::DeleteProduct(cmd) => self.handle_delete(cmd),
        }
    }
}

impl Product {
    fn ensure_product_id(&self, product_id: ProductId) -> Result<(), DomainError> {
        if self.id != product_id {
            return Err(DomainError::invariant("product_id mismatch"));
        }
        Ok(())
    }

    fn ensure_quote(form: &ProductFormData, quote: &DutyQuote) -> Result<(), DomainError> {
        if !quote.is_consistent_with(form.price) {
            return Err(DomainError::invariant(format!(
                "total price {} does not match price {} at duty rate {}",
                quote.total_price, form.price, quote.duty_rate
            )));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("product already exists"));
        }
        self.ensure_product_id(cmd.product_id)?;
        cmd.form.validate()?;
        Self::ensure_quote(&cmd.form, &cmd.quote)?;

        Ok(vec![ProductEvent::ProductCreated(ProductCreated {
            product_id: cmd.product_id,
            name: cmd.form.name.trim().to_string(),
            destination_country: cmd.form.destination_country.clone(),
            hs_code: cmd.form.hs_code.clone(),
            category: cmd.form.category,
            price: cmd.form.price,
            duty_rate: cmd.quote.duty_rate,
            total_price: cmd.quote.total_price,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if !self.is_live() {
            return Err(DomainError::not_found());
        }
        self.ensure_product_id(cmd.product_id)?;
        cmd.form.validate()?;
        Self::ensure_quote(&cmd.form, &cmd.quote)?;

        Ok(vec![ProductEvent::ProductUpdated(ProductUpdated {
            product_id: cmd.product_id,
            name: cmd.form.name.trim().to_string(),
            destination_country: cmd.form.destination_country.clone(),
            hs_code: cmd.form.hs_code.clone(),
            category: cmd.form.category,
            price: cmd.form.price,
            duty_rate: cmd.quote.duty_rate,
            total_price: cmd.quote.total_price,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_delete(&self, cmd: &DeleteProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if !self.is_live() {
            return Err(DomainError::not_found());
        }
        self.ensure_product_id(cmd.product_id)?;

        Ok(vec![ProductEvent::ProductDeleted(ProductDeleted {
            product_id: cmd.product_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dutydesk_duty::compute_duty;

    fn test_product_id() -> ProductId {
        ProductId::new(AggregateId::new())
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn leather_bag_form() -> ProductFormData {
        ProductFormData {
            name: "Handcrafted Leather Bag".to_string(),
            destination_country: "USA".to_string(),
            hs_code: "4202.21".to_string(),
            price: Money::from_major(5000),
            category: Some(Category::LeatherGoods),
        }
    }

    fn create_cmd(product_id: ProductId, form: ProductFormData) -> ProductCommand {
        let quote = compute_duty(&form.destination_country, form.price);
        ProductCommand::CreateProduct(CreateProduct {
            product_id,
            form,
            quote,
            occurred_at: test_time(),
        })
    }

    fn update_cmd(product_id: ProductId, form: ProductFormData) -> ProductCommand {
        let quote = compute_duty(&form.destination_country, form.price);
        ProductCommand::UpdateProduct(UpdateProduct {
            product_id,
            form,
            quote,
            occurred_at: test_time(),
        })
    }

    fn created_product() -> Product {
        let product_id = test_product_id();
        let mut product = Product::empty(product_id);
        let events = product.handle(&create_cmd(product_id, leather_bag_form())).unwrap();
        product.apply(&events[0]);
        product
    }

    #[test]
    fn create_product_emits_product_created_event() {
        let product_id = test_product_id();
        let product = Product::empty(product_id);

        let events = product.handle(&create_cmd(product_id, leather_bag_form())).unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            ProductEvent::ProductCreated(e) => {
                assert_eq!(e.product_id, product_id);
                assert_eq!(e.name, "Handcrafted Leather Bag");
                assert_eq!(e.duty_rate, DutyRate::new(8));
                assert_eq!(e.total_price, Money::from_major(5400));
            }
            _ => panic!("Expected ProductCreated event"),
        }
        assert_eq!(events[0].event_type(), "products.product.created");
    }

    #[test]
    fn create_product_rejects_empty_name() {
        let product_id = test_product_id();
        let product = Product::empty(product_id);
        let form = ProductFormData {
            name: "   ".to_string(),
            ..leather_bag_form()
        };

        let err = product.handle(&create_cmd(product_id, form)).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty name"),
        }
    }

    #[test]
    fn create_product_rejects_inconsistent_quote() {
        let product_id = test_product_id();
        let product = Product::empty(product_id);
        let cmd = ProductCommand::CreateProduct(CreateProduct {
            product_id,
            form: leather_bag_form(),
            quote: DutyQuote {
                duty_rate: DutyRate::new(8),
                total_price: Money::from_major(5000),
            },
            occurred_at: test_time(),
        });

        let err = product.handle(&cmd).unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation for inconsistent quote"),
        }
    }

    #[test]
    fn create_product_rejects_duplicate_creation() {
        let product = created_product();
        let err = product
            .handle(&create_cmd(product.id_typed(), leather_bag_form()))
            .unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for duplicate creation"),
        }
    }

    #[test]
    fn update_rederives_duty_and_keeps_identity() {
        let mut product = created_product();
        let id = product.id_typed();
        assert_eq!(product.duty_rate(), DutyRate::new(8));

        let form = ProductFormData {
            destination_country: "UK".to_string(),
            ..ProductFormData::from_product(&product)
        };
        let events = product.handle(&update_cmd(id, form)).unwrap();
        product.apply(&events[0]);

        assert_eq!(product.id_typed(), id);
        assert_eq!(product.destination_country(), "UK");
        assert_eq!(product.duty_rate(), DutyRate::new(10));
        assert_eq!(product.total_price(), Money::from_major(5500));
    }

    #[test]
    fn update_rejects_non_existent_product() {
        let product_id = test_product_id();
        let product = Product::empty(product_id);
        let err = product.handle(&update_cmd(product_id, leather_bag_form())).unwrap_err();
        match err {
            DomainError::NotFound => {}
            _ => panic!("Expected NotFound error for non-existent product"),
        }
    }

    #[test]
    fn update_rejects_mismatched_id() {
        let product = created_product();
        let err = product.handle(&update_cmd(test_product_id(), leather_bag_form())).unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation for product_id mismatch"),
        }
    }

    #[test]
    fn delete_marks_product_not_live() {
        let mut product = created_product();
        let cmd = ProductCommand::DeleteProduct(DeleteProduct {
            product_id: product.id_typed(),
            occurred_at: test_time(),
        });
        let events = product.handle(&cmd).unwrap();
        product.apply(&events[0]);
        assert!(!product.is_live());

        let err = product.handle(&cmd).unwrap_err();
        match err {
            DomainError::NotFound => {}
            _ => panic!("Expected NotFound error for deleted product"),
        }
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let product = created_product();
        let before = product.clone();
        let form = ProductFormData {
            price: Money::from_major(1),
            ..leather_bag_form()
        };
        let _ = product.handle(&update_cmd(product.id_typed(), form));
        assert_eq!(product, before);
    }

    #[test]
    fn version_increments_on_apply() {
        let mut product = created_product();
        assert_eq!(product.version(), 1);

        let events = product
            .handle(&update_cmd(product.id_typed(), leather_bag_form()))
            .unwrap();
        product.apply(&events[0]);
        assert_eq!(product.version(), 2);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn country() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("USA".to_string()),
                Just("UK".to_string()),
                Just("EU".to_string()),
                Just("Canada".to_string()),
                Just("Australia".to_string()),
                Just("Japan".to_string()),
                Just("Singapore".to_string()),
                "[A-Za-z]{1,12}",
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: after create and any edit, total == price × (1 + rate/100).
            #[test]
            fn total_price_invariant_holds_after_edits(
                name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
                first_country in country(),
                second_country in country(),
                first_price in 0u64..100_000_000,
                second_price in 0u64..100_000_000
            ) {
                let product_id = test_product_id();
                let mut product = Product::empty(product_id);
                let form = ProductFormData {
                    name,
                    destination_country: first_country,
                    hs_code: "4202.21".to_string(),
                    price: Money::from_minor(first_price),
                    category: None,
                };
                let events = product.handle(&create_cmd(product_id, form)).unwrap();
                product.apply(&events[0]);
                prop_assert_eq!(product.total_price(), product.duty_rate().apply(product.price()));

                let form = ProductFormData {
                    destination_country: second_country,
                    price: Money::from_minor(second_price),
                    ..ProductFormData::from_product(&product)
                };
                let events = product.handle(&update_cmd(product_id, form)).unwrap();
                product.apply(&events[0]);
                prop_assert_eq!(product.id_typed(), product_id);
                prop_assert_eq!(product.total_price(), product.duty_rate().apply(product.price()));
            }

            /// Property: handle is deterministic (same state + command = same events).
            #[test]
            fn handle_is_deterministic(
                name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
                price in 0u64..100_000_000
            ) {
                let product = created_product();
                let form = ProductFormData {
                    name,
                    price: Money::from_minor(price),
                    ..leather_bag_form()
                };
                let cmd = update_cmd(product.id_typed(), form);
                prop_assert_eq!(product.handle(&cmd), product.handle(&cmd));
            }
        }
    }
}
