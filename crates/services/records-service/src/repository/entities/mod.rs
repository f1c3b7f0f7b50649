//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain records.

pub mod resident;
pub mod service;
pub mod transaction;
pub mod user;
