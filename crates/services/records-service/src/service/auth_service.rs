//! Authentication service - account registration, login and session tokens.
//!
//! A session token is an HS256 JWT stored on the user row. It has no expiry;
//! it stays valid until a later login overwrites it.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig};
use domain::{
    required, Credentials, LoginUser, NewAccount, Password, RegisterUser, User, TOKEN_TYPE_BEARER,
};

use crate::repository::UserRepository;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub user_id: String,
    pub role: String,
    pub iat: i64,
    /// Unique per login so consecutive tokens always differ
    pub jti: Uuid,
}

/// Token returned after a successful login
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account
    async fn register_user(&self, input: RegisterUser) -> AppResult<User>;

    /// Verify credentials, issue and store a new session token
    async fn login_user(&self, input: LoginUser) -> AppResult<TokenResponse>;

    /// Verify token signature and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Resolve the user holding `token` as their current session
    async fn authenticate(&self, token: &str) -> AppResult<User>;
}

/// Concrete implementation of AuthService over the user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation
    }

    fn issue_token(&self, credentials: &Credentials) -> AppResult<TokenResponse> {
        let claims = Claims {
            sub: credentials.id,
            user_id: credentials.user_id.clone(),
            role: credentials.role.clone(),
            iat: Utc::now().timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register_user(&self, input: RegisterUser) -> AppResult<User> {
        let username = required(input.username, "username")?;
        let password = required(input.password, "password")?;
        let firstname = required(input.firstname, "firstname")?;
        let lastname = required(input.lastname, "lastname")?;
        let role = required(input.role, "role")?;

        // Fast-path error; the unique index still decides concurrent races
        if self.users.user_exists(&username).await? {
            return Err(AppError::DuplicateUser);
        }

        let hashed = Password::new(&password)?;
        let salt = hashed
            .salt()
            .ok_or_else(|| AppError::internal("Password hash has no salt"))?;

        self.users
            .create_user(NewAccount {
                username,
                password_hash: hashed.into_string(),
                salt,
                firstname,
                lastname,
                role,
            })
            .await
    }

    async fn login_user(&self, input: LoginUser) -> AppResult<TokenResponse> {
        let username = required(input.username, "username")?;
        let password = required(input.password, "password")?;

        if !self.users.user_exists(&username).await? {
            return Err(AppError::UserNotFound);
        }

        let credentials = self
            .users
            .find_credentials(&username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !Password::from_hash(credentials.password.as_str()).verify(&password) {
            tracing::warn!(user_id = %username, "Rejected login with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issue_token(&credentials)?;
        self.users
            .store_token(credentials.id, &token.access_token)
            .await?;
        tracing::info!(user_id = %username, "User logged in");

        Ok(token)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret_bytes()),
            &Self::validation(),
        )?;

        Ok(token_data.claims)
    }

    async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.verify_token(token)?;
        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !user.holds_token(token) {
            return Err(AppError::Unauthorized);
        }
        Ok(user)
    }
}
