//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Field allow-lists
// =============================================================================

/// Fields a resident update may modify
pub const RESIDENT_MUTABLE_FIELDS: &[&str] = &["firstname", "lastname", "room"];

/// Resident columns matched by a wildcard search
pub const RESIDENT_SEARCH_FIELDS: &[&str] = &["firstname", "lastname"];

/// Fields a service update may modify
pub const SERVICE_MUTABLE_FIELDS: &[&str] = &["service_code", "service_name"];

/// Fields a transaction update may modify
pub const TRANSACTION_MUTABLE_FIELDS: &[&str] =
    &["service_code", "username", "trans_date", "resident_id"];

/// Fields a user update may modify
pub const USER_MUTABLE_FIELDS: &[&str] =
    &["user_id", "password", "firstname", "middlename", "lastname", "role"];

// =============================================================================
// Queries
// =============================================================================

/// Reserved filter key for substring search over searchable columns
pub const WILDCARD_FILTER_KEY: &str = "wildcard";

/// Maximum wildcard term length
pub const MAX_WILDCARD_LENGTH: usize = 50;

/// Trailing window (in calendar days) used by recent-record queries
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Row cap for high-volume transaction reads
pub const TRANSACTION_SELECT_LIMIT: u64 = 1500;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Authentication
// =============================================================================

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
