//! User account entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Staff user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    /// Login name
    pub user_id: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub salt: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub lastname: String,
    pub sortname: String,
    pub role: String,
    /// Session token from the latest login
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl User {
    /// Check whether `token` is the session token currently stored for this user
    pub fn holds_token(&self, token: &str) -> bool {
        self.token.as_deref() == Some(token)
    }
}

/// Display name used for sorting, `"{lastname}, {firstname}"`.
pub fn sortname(firstname: &str, lastname: &str) -> String {
    format!("{}, {}", lastname, firstname)
}

/// Account registration input (plain text password)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterUser {
    pub username: Option<String>,
    pub password: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub role: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginUser {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Storage input for a new account (password already hashed)
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    pub firstname: String,
    pub lastname: String,
    pub role: String,
}

/// Private credential view of a user, never returned to clients
#[derive(Debug, Clone)]
pub struct Credentials {
    pub id: Uuid,
    pub user_id: String,
    pub role: String,
    pub password: String,
    pub salt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            created_date: Utc::now(),
            updated_date: Utc::now(),
            user_id: "jdoe".to_string(),
            password: "hash".to_string(),
            salt: "salt".to_string(),
            firstname: "Jane".to_string(),
            middlename: None,
            lastname: "Doe".to_string(),
            sortname: sortname("Jane", "Doe"),
            role: "staff".to_string(),
            token: Some("tok".to_string()),
        }
    }

    #[test]
    fn test_sortname() {
        assert_eq!(sortname("Jane", "Doe"), "Doe, Jane");
    }

    #[test]
    fn test_secrets_are_not_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();

        assert_eq!(json["user_id"], "jdoe");
        assert_eq!(json["sortname"], "Doe, Jane");
        assert!(json.get("password").is_none());
        assert!(json.get("salt").is_none());
        assert!(json.get("token").is_none());
    }

    #[test]
    fn test_holds_token() {
        let mut user = sample_user();
        assert!(user.holds_token("tok"));
        assert!(!user.holds_token("other"));

        user.token = None;
        assert!(!user.holds_token("tok"));
    }
}
