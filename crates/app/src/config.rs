//! Environment configuration, read once at startup.

use std::path::PathBuf;

use anyhow::{Context, Result};

use dutydesk_duty::DutyTable;

pub const DUTY_TABLE_VAR: &str = "DUTYDESK_DUTY_TABLE";
pub const SEED_DEMO_VAR: &str = "DUTYDESK_SEED_DEMO";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON duty table replacing the built-in rates.
    pub duty_table_path: Option<PathBuf>,
    /// Seed demo products, HS catalog entries and the demo order.
    pub seed_demo: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            duty_table_path: None,
            seed_demo: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let duty_table_path = lookup(DUTY_TABLE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let seed_demo = match lookup(SEED_DEMO_VAR) {
            None => true,
            Some(raw) => raw.trim().parse::<bool>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "{SEED_DEMO_VAR} is not a boolean; seeding demo data");
                true
            }),
        };

        Self {
            duty_table_path,
            seed_demo,
        }
    }

    /// Configured duty table, or the built-in one.
    pub fn load_duty_table(&self) -> Result<DutyTable> {
        let Some(path) = &self.duty_table_path else {
            return Ok(DutyTable::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read duty table {}", path.display()))?;
        let table = DutyTable::from_json(&raw)
            .with_context(|| format!("invalid duty table {}", path.display()))?;
        tracing::info!(path = %path.display(), countries = table.countries().count(), "loaded duty table");
        Ok(table)
    }
}
