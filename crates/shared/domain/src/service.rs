//! Service catalogue records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A billable or trackable service offered to residents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    pub service_code: String,
    pub service_name: String,
}

/// Service creation input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateService {
    pub service_code: Option<String>,
    pub service_name: Option<String>,
}
