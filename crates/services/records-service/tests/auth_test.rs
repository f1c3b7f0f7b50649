//! Account and session tests against an in-memory database.

mod support;

use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use common::AppError;
use domain::{LoginUser, Password, RegisterUser};
use records_service_lib::repository::{FieldMap, RecordRepository, UserRepository};
use records_service_lib::service::Services;

use support::{fields, setup_services};

fn registration(username: &str, password: &str) -> RegisterUser {
    RegisterUser {
        username: Some(username.to_string()),
        password: Some(password.to_string()),
        firstname: Some("Jane".to_string()),
        lastname: Some("Doe".to_string()),
        role: Some("staff".to_string()),
    }
}

fn login(username: &str, password: &str) -> LoginUser {
    LoginUser {
        username: Some(username.to_string()),
        password: Some(password.to_string()),
    }
}

async fn registered(services: &Services) -> Uuid {
    services
        .auth
        .register_user(registration("jdoe", "correct-horse"))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_register_stores_hashed_password() {
    let services = setup_services().await;

    let user = services
        .auth
        .register_user(registration("jdoe", "correct-horse"))
        .await
        .unwrap();

    assert_eq!(user.user_id, "jdoe");
    assert_eq!(user.sortname, "Doe, Jane");
    assert!(user.token.is_none());
    assert_ne!(user.password, "correct-horse");
    assert!(!user.salt.is_empty());
    assert!(Password::from_hash(user.password.as_str()).verify("correct-horse"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let services = setup_services().await;
    registered(&services).await;

    let result = services
        .auth
        .register_user(registration("jdoe", "another-password"))
        .await;

    assert!(matches!(result, Err(AppError::DuplicateUser)));
}

#[tokio::test]
async fn test_unique_index_rejects_duplicate_account() {
    let services = setup_services().await;
    let id = registered(&services).await;
    let existing = services.users.find_by_id(id).await.unwrap().unwrap();

    // Bypasses the existence pre-check
    let result = services
        .users
        .create_user(domain::NewAccount {
            username: "jdoe".to_string(),
            password_hash: existing.password,
            salt: existing.salt,
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
            role: "staff".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::DuplicateUser)));
}

#[tokio::test]
async fn test_register_missing_field() {
    let services = setup_services().await;
    let mut input = registration("jdoe", "correct-horse");
    input.role = None;

    let result = services.auth.register_user(input).await;

    assert!(matches!(result, Err(AppError::MissingField(f)) if f == "role"));
    assert!(!services.users.user_exists("jdoe").await.unwrap());
}

#[tokio::test]
async fn test_login_unknown_user() {
    let services = setup_services().await;

    let result = services.auth.login_user(login("ghost", "whatever")).await;

    assert!(matches!(result, Err(AppError::UserNotFound)));
}

#[tokio::test]
async fn test_login_wrong_password_keeps_token() {
    let services = setup_services().await;
    let id = registered(&services).await;

    let result = services.auth.login_user(login("jdoe", "wrong-password")).await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
    let user = services.users.find_by_id(id).await.unwrap().unwrap();
    assert!(user.token.is_none());
}

#[tokio::test]
async fn test_login_stores_token() {
    let services = setup_services().await;
    let id = registered(&services).await;

    let response = services
        .auth
        .login_user(login("jdoe", "correct-horse"))
        .await
        .unwrap();

    assert_eq!(response.token_type, "Bearer");
    let user = services.users.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(user.token.as_deref(), Some(response.access_token.as_str()));

    let claims = services.auth.verify_token(&response.access_token).unwrap();
    assert_eq!(claims.sub, id);
    assert_eq!(claims.user_id, "jdoe");
    assert_eq!(claims.role, "staff");
}

#[tokio::test]
async fn test_store_token_unknown_user() {
    let services = setup_services().await;

    let result = services.users.store_token(Uuid::new_v4(), "token").await;

    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_store_token_advances_updated_date() {
    let services = setup_services().await;
    let id = registered(&services).await;
    let before = services.users.find_by_id(id).await.unwrap().unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;
    let stored = services.users.store_token(id, "session-token").await.unwrap();

    assert_eq!(stored.token.as_deref(), Some("session-token"));
    assert!(stored.updated_date > before.updated_date);
    assert_eq!(stored.created_date, before.created_date);
}

#[tokio::test]
async fn test_user_update_sets_middlename() {
    let services = setup_services().await;
    let id = registered(&services).await;
    let before = services.users.find_by_id(id).await.unwrap().unwrap();
    assert!(before.middlename.is_none());

    let updated = services
        .users
        .update(id, &fields(json!({ "middlename": "Q" })))
        .await
        .unwrap();

    assert_eq!(updated.middlename.as_deref(), Some("Q"));
    assert_eq!(updated.sortname, before.sortname);
}

#[tokio::test]
async fn test_new_login_replaces_session() {
    let services = setup_services().await;
    registered(&services).await;

    let first = services
        .auth
        .login_user(login("jdoe", "correct-horse"))
        .await
        .unwrap();
    let second = services
        .auth
        .login_user(login("jdoe", "correct-horse"))
        .await
        .unwrap();

    assert_ne!(first.access_token, second.access_token);
    let user = services.auth.authenticate(&second.access_token).await.unwrap();
    assert_eq!(user.user_id, "jdoe");

    let stale = services.auth.authenticate(&first.access_token).await;
    assert!(matches!(stale, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn test_authenticate_rejects_garbage() {
    let services = setup_services().await;

    let result = services.auth.authenticate("not-a-token").await;

    assert!(matches!(result, Err(AppError::Jwt(_))));
}

#[tokio::test]
async fn test_user_update_rehashes_password() {
    let services = setup_services().await;
    let id = registered(&services).await;
    let before = services.users.find_by_id(id).await.unwrap().unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;
    let updated = services
        .users
        .update(id, &fields(json!({ "password": "battery-staple" })))
        .await
        .unwrap();

    assert_ne!(updated.salt, before.salt);
    assert!(Password::from_hash(updated.password.as_str()).verify("battery-staple"));
    assert!(updated.updated_date > before.updated_date);

    services
        .auth
        .login_user(login("jdoe", "battery-staple"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_user_update_recomputes_sortname() {
    let services = setup_services().await;
    let id = registered(&services).await;

    let updated = services
        .users
        .update(id, &fields(json!({ "lastname": "Smith" })))
        .await
        .unwrap();

    assert_eq!(updated.sortname, "Smith, Jane");
}

#[tokio::test]
async fn test_user_update_rejects_taken_login_name() {
    let services = setup_services().await;
    let id = registered(&services).await;
    services
        .auth
        .register_user(registration("asmith", "correct-horse"))
        .await
        .unwrap();

    let result = services
        .users
        .update(id, &fields(json!({ "user_id": "asmith" })))
        .await;
    assert!(matches!(result, Err(AppError::DuplicateUser)));

    let result = services
        .users
        .update(id, &fields(json!({ "token": "forged" })))
        .await;
    assert!(matches!(result, Err(AppError::InvalidField(f)) if f == "token"));
}

#[tokio::test]
async fn test_user_select_and_delete() {
    let services = setup_services().await;
    let id = registered(&services).await;

    let staff = services
        .users
        .select(&fields(json!({ "role": "staff" })))
        .await
        .unwrap();
    assert_eq!(staff.len(), 1);

    let deleted = services.users.delete(id).await.unwrap();
    assert_eq!(deleted.user_id, "jdoe");
    assert!(services.users.select(&FieldMap::new()).await.unwrap().is_empty());
    assert!(services.users.find_by_id(id).await.unwrap().is_none());
}
