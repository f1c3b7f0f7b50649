//! Repository layer for data access.

pub mod entities;
pub mod query;
mod record_repository;
mod resident_repository;
mod service_repository;
mod transaction_repository;
mod user_repository;

pub use query::FieldMap;
pub use record_repository::{RecordEntity, RecordRepository, Records};
pub use resident_repository::ResidentStore;
pub use service_repository::ServiceStore;
pub use transaction_repository::TransactionStore;
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
