//! Resident records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person living at the facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    pub id: Uuid,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    pub firstname: String,
    pub lastname: String,
    pub room: String,
}

/// Resident creation input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateResident {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub room: Option<String>,
}
