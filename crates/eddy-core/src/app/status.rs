//! Status views for observability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::PropName;

/// Store-wide counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropCounts {
    /// Names with a record (tracked at least once).
    pub tracked: usize,
    /// Names with an outstanding attempt whose result has not landed.
    pub loading: usize,
    /// Names currently exposing a resolved value.
    pub resolved: usize,
}

/// Per-name status snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropStatus {
    pub name: PropName,
    pub pending_count: u64,
    pub resolved_count: u64,
    pub loading: bool,
    pub has_value: bool,
    pub updated_at: DateTime<Utc>,
}
