//! Products page session: owns the canonical catalog and drives it from
//! JSON-lines commands.

pub mod config;
pub mod demo;
pub mod dto;
pub mod page;
pub mod session;

use anyhow::Result;
use chrono::Utc;

use dutydesk_products::ProductCatalog;

pub use config::AppConfig;
pub use page::ProductsPage;
pub use session::{Session, SessionCommand, SessionError, SessionResponse};

/// Build a session from configuration (duty table, demo seeding).
pub fn build_session(config: &AppConfig) -> Result<Session> {
    let duty_table = config.load_duty_table()?;
    let mut catalog = ProductCatalog::new(duty_table);

    if config.seed_demo {
        let now = Utc::now();
        demo::seed_catalog(&mut catalog, now)?;
        let mut page = ProductsPage::new(catalog);
        page.set_catalog_entries(demo::catalog_entries());
        tracing::info!(products = page.catalog().len(), "seeded demo catalog");
        return Ok(Session::new(page).with_order(demo::order(now)));
    }

    Ok(Session::new(ProductsPage::new(catalog)))
}
