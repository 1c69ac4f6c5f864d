//! Common types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation and last-edit stamps shared by every stored row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
}

impl Default for Timestamps {
    fn default() -> Self {
        Self {
            created_at: Utc::now(),
            edited_at: None,
        }
    }
}
