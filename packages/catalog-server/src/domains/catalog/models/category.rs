use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::CategoryId;

/// Category - a listing classification referenced by `Listing.category`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    /// Unique across categories
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Category {
            id: CategoryId::new(),
            name: name.into(),
            description,
            created_at: Utc::now(),
        }
    }
}
