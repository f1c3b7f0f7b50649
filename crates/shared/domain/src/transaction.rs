//! Service usage events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One use of a service by a resident, recorded by a staff user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    pub service_code: String,
    /// Login name of the servicing user
    pub username: String,
    pub trans_date: DateTime<Utc>,
    pub resident_id: Uuid,
}

/// Transaction creation input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTransaction {
    pub service_code: Option<String>,
    pub username: Option<String>,
    pub trans_date: Option<DateTime<Utc>>,
    pub resident_id: Option<Uuid>,
}
