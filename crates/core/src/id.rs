//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::{NoContext, Timestamp, Uuid};

use crate::error::DomainError;

/// Identifier of an aggregate root.
///
/// Backed by a UUIDv7, so the identifier is minted from its creation timestamp
/// and sorts by creation time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(Uuid);

impl AggregateId {
    /// Create a new identifier stamped with the current time.
    ///
    /// Prefer [`AggregateId::at`] in tests for determinism of the timestamp part.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a new identifier stamped with `created_at`.
    ///
    /// Times before the Unix epoch are clamped to the epoch.
    pub fn at(created_at: DateTime<Utc>) -> Self {
        let seconds = u64::try_from(created_at.timestamp()).unwrap_or(0);
        let ts = Timestamp::from_unix(NoContext, seconds, created_at.timestamp_subsec_nanos());
        Self(Uuid::new_v7(ts))
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Creation time embedded in the identifier (millisecond precision).
    pub fn minted_at(&self) -> Option<DateTime<Utc>> {
        let (seconds, nanos) = self.0.get_timestamp()?.to_unix();
        DateTime::from_timestamp(i64::try_from(seconds).ok()?, nanos)
    }
}

impl Default for AggregateId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for AggregateId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for AggregateId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<AggregateId> for Uuid {
    fn from(value: AggregateId) -> Self {
        value.0
    }
}

impl FromStr for AggregateId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| DomainError::invalid_id(format!("AggregateId: {e}")))?;
        Ok(Self(uuid))
    }
}
