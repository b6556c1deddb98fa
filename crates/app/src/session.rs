//! JSON-lines session driver.
//!
//! Each input line is one [`SessionCommand`]; each produces exactly one
//! [`SessionResponse`] line. Failures are reported per line and never end the
//! session.

use std::io::{BufRead, Write};

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use dutydesk_core::{DomainError, Money};
use dutydesk_orders::Order;
use dutydesk_products::{Category, ProductId};

use crate::dto::{FormDto, OrderDto, ProductDto, QuoteDto};
use crate::page::ProductsPage;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Visible products.
    List,
    OpenAdd,
    OpenEdit {
        id: String,
    },
    CloseForm,
    SelectCatalogEntry {
        product_name: String,
    },
    /// Submit the open form, overriding any provided fields.
    Submit {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        destination_country: Option<String>,
        #[serde(default)]
        hs_code: Option<String>,
        #[serde(default)]
        price: Option<String>,
        /// Absent keeps the category; `null` clears it.
        #[serde(default, deserialize_with = "present")]
        category: Option<Option<Category>>,
    },
    Delete {
        id: String,
    },
    Search {
        query: String,
    },
    FilterCountry {
        country: String,
    },
    FilterCategory {
        category: String,
    },
    /// Duty preview for a destination and price.
    Quote {
        destination_country: String,
        price: String,
    },
    Order,
}

/// Maps a present field (including `null`) to `Some`, so absence stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SessionResponse {
    Products { products: Vec<ProductDto> },
    Form { form: FormDto },
    Selected { selected: bool, form: FormDto },
    Quote { quote: QuoteDto },
    Order { order: OrderDto },
    Closed { closed: bool },
    Error { error: &'static str, message: String },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("malformed command: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("malformed command: {0}")]
    Encoding(#[from] core::str::Utf8Error),

    #[error("no product form is open")]
    NoOpenForm,

    #[error("no order loaded")]
    NoOrder,
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::Domain(e) => e.code(),
            SessionError::Malformed(_) | SessionError::Encoding(_) => "malformed_command",
            SessionError::NoOpenForm => "no_open_form",
            SessionError::NoOrder => "no_order",
        }
    }
}

impl From<SessionError> for SessionResponse {
    fn from(err: SessionError) -> Self {
        SessionResponse::Error {
            error: err.code(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    page: ProductsPage,
    order: Option<Order>,
}

impl Session {
    pub fn new(page: ProductsPage) -> Self {
        Self { page, order: None }
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn page(&self) -> &ProductsPage {
        &self.page
    }

    /// Process every line of `input`, writing one response line per command.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.split(b'\n') {
            let line = line?;
            let response = match core::str::from_utf8(&line) {
                Ok(text) if text.trim().is_empty() => continue,
                Ok(text) => self.handle_line(text),
                Err(err) => {
                    let err = SessionError::from(err);
                    tracing::warn!(code = err.code(), error = %err, "session command failed");
                    err.into()
                }
            };
            serde_json::to_writer(&mut output, &response)?;
            output.write_all(b"\n")?;
            output.flush()?;
        }
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> SessionResponse {
        let result = serde_json::from_str::<SessionCommand>(line)
            .map_err(SessionError::from)
            .and_then(|command| self.execute(command));

        result.unwrap_or_else(|err| {
            tracing::warn!(code = err.code(), error = %err, "session command failed");
            err.into()
        })
    }

    pub fn execute(&mut self, command: SessionCommand) -> Result<SessionResponse, SessionError> {
        match command {
            SessionCommand::List => Ok(self.products()),
            SessionCommand::OpenAdd => {
                let form = FormDto::new(self.page.open_add(), None);
                Ok(SessionResponse::Form { form })
            }
            SessionCommand::OpenEdit { id } => {
                let product_id: ProductId = id.parse()?;
                let form = FormDto::new(self.page.open_edit(product_id)?, Some(id));
                Ok(SessionResponse::Form { form })
            }
            SessionCommand::CloseForm => {
                self.page.close_form();
                Ok(SessionResponse::Closed { closed: true })
            }
            SessionCommand::SelectCatalogEntry { product_name } => {
                if self.page.draft().is_none() {
                    return Err(SessionError::NoOpenForm);
                }
                let selected = self.page.select_catalog_entry(&product_name)?;
                Ok(SessionResponse::Selected {
                    selected,
                    form: self.form_dto()?,
                })
            }
            SessionCommand::Submit {
                name,
                destination_country,
                hs_code,
                price,
                category,
            } => {
                let price = price.map(|p| p.parse::<Money>()).transpose()?;
                let draft = self.page.draft_mut().ok_or(SessionError::NoOpenForm)?;
                if let Some(name) = name {
                    draft.name = name;
                }
                if let Some(country) = destination_country {
                    draft.destination_country = country;
                }
                if let Some(hs_code) = hs_code {
                    draft.hs_code = hs_code;
                }
                if let Some(price) = price {
                    draft.price = price;
                }
                if let Some(category) = category {
                    draft.category = category;
                }
                self.page.submit_draft(Utc::now())?;
                Ok(self.products())
            }
            SessionCommand::Delete { id } => {
                self.page.delete(id.parse()?, Utc::now())?;
                Ok(self.products())
            }
            SessionCommand::Search { query } => {
                self.page.search(&query);
                Ok(self.products())
            }
            SessionCommand::FilterCountry { country } => {
                self.page.filter_country(&country);
                Ok(self.products())
            }
            SessionCommand::FilterCategory { category } => {
                self.page.filter_category(&category)?;
                Ok(self.products())
            }
            SessionCommand::Quote {
                destination_country,
                price,
            } => {
                let price: Money = price.parse()?;
                let quote = self
                    .page
                    .catalog()
                    .duty_table()
                    .quote(&destination_country, price);
                Ok(SessionResponse::Quote {
                    quote: QuoteDto::new(&destination_country, price, &quote),
                })
            }
            SessionCommand::Order => {
                let order = self.order.as_ref().ok_or(SessionError::NoOrder)?;
                Ok(SessionResponse::Order {
                    order: OrderDto::from(order),
                })
            }
        }
    }

    fn products(&self) -> SessionResponse {
        SessionResponse::Products {
            products: self.page.visible().into_iter().map(ProductDto::from).collect(),
        }
    }

    fn form_dto(&self) -> Result<FormDto, SessionError> {
        let draft = self.page.draft().ok_or(SessionError::NoOpenForm)?;
        Ok(FormDto::new(draft, self.page.editing().map(|id| id.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        let cmd: SessionCommand = serde_json::from_str(r#"{"op":"search","query":"leather"}"#).unwrap();
        assert_eq!(cmd, SessionCommand::Search { query: "leather".to_string() });

        let cmd: SessionCommand =
            serde_json::from_str(r#"{"op":"submit","price":"12.50","category":"Textiles"}"#).unwrap();
        assert_eq!(
            cmd,
            SessionCommand::Submit {
                name: None,
                destination_country: None,
                hs_code: None,
                price: Some("12.50".to_string()),
                category: Some(Some(Category::Textiles)),
            }
        );
    }

    #[test]
    fn submit_distinguishes_absent_and_null_category() {
        let absent: SessionCommand = serde_json::from_str(r#"{"op":"submit"}"#).unwrap();
        let cleared: SessionCommand =
            serde_json::from_str(r#"{"op":"submit","category":null}"#).unwrap();

        match (absent, cleared) {
            (
                SessionCommand::Submit { category: None, .. },
                SessionCommand::Submit { category: Some(None), .. },
            ) => {}
            other => panic!("Expected absent and cleared category, got {other:?}"),
        }
    }

    #[test]
    fn malformed_line_yields_error_response() {
        let mut session = Session::default();
        match session.handle_line("{not json") {
            SessionResponse::Error { error, .. } => assert_eq!(error, "malformed_command"),
            other => panic!("Expected error response, got {other:?}"),
        }
    }

    #[test]
    fn submit_without_open_form_is_rejected() {
        let mut session = Session::default();
        match session.handle_line(r#"{"op":"submit","name":"Bag"}"#) {
            SessionResponse::Error { error, .. } => assert_eq!(error, "no_open_form"),
            other => panic!("Expected error response, got {other:?}"),
        }
    }

    #[test]
    fn order_without_data_is_rejected() {
        let mut session = Session::default();
        assert!(matches!(
            session.execute(SessionCommand::Order),
            Err(SessionError::NoOrder)
        ));
    }
}
