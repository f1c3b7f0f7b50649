//! Service layer - authentication and the service container.

mod auth_service;
mod container;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use container::Services;
