//! Duty pricing: destination countries, duty rates and the country → rate table.
//!
//! Pricing is pure: a quote depends only on the table, the destination and the
//! base price. Quotes are snapshots; callers store them rather than re-deriving.

pub mod country;
pub mod rate;
pub mod table;

pub use country::Country;
pub use rate::{DutyQuote, DutyRate};
pub use table::{DEFAULT_DUTY_RATE, DutyTable, DutyTableError, compute_duty};
