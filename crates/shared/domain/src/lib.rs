//! Domain layer - Facility record entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod password;
pub mod resident;
pub mod service;
pub mod transaction;
pub mod user;

pub use constants::*;
pub use error::{required, required_value, DomainError, DomainResult};
pub use password::Password;
pub use resident::{CreateResident, Resident};
pub use service::{CreateService, Service};
pub use transaction::{CreateTransaction, Transaction};
pub use user::{sortname, Credentials, LoginUser, NewAccount, RegisterUser, User};
