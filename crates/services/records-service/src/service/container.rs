//! Service container - one place to build every repository over a shared pool.

use std::sync::Arc;

use common::JwtConfig;
use sea_orm::DatabaseConnection;

use super::{AuthService, Authenticator};
use crate::repository::{ResidentStore, ServiceStore, TransactionStore, UserStore};

/// Repositories and the auth service, handed to the request handler.
#[derive(Clone)]
pub struct Services {
    pub residents: Arc<ResidentStore>,
    pub services: Arc<ServiceStore>,
    pub transactions: Arc<TransactionStore>,
    pub users: Arc<UserStore>,
    pub auth: Arc<dyn AuthService>,
}

impl Services {
    /// Create service container from database connection and JWT settings
    pub fn from_connection(db: DatabaseConnection, jwt: JwtConfig) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let auth = Arc::new(Authenticator::new(users.clone(), jwt));

        Self {
            residents: Arc::new(ResidentStore::new(db.clone())),
            services: Arc::new(ServiceStore::new(db.clone())),
            transactions: Arc::new(TransactionStore::new(db)),
            users,
            auth,
        }
    }
}
