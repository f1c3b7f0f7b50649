//! User repository: account storage, credential lookup and session tokens.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr, Value,
};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{sortname, Credentials, NewAccount, Password, User, USER_MUTABLE_FIELDS};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::query::{build_changes, text_value, FieldMap};
use super::record_repository::{RecordEntity, RecordRepository, Records};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account storage used by the authentication service.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Check whether a login name is taken
    async fn user_exists(&self, username: &str) -> AppResult<bool>;

    /// Store a new account whose password is already hashed
    async fn create_user(&self, account: NewAccount) -> AppResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Private lookup including the stored hash and salt
    async fn find_credentials(&self, username: &str) -> AppResult<Option<Credentials>>;

    /// Persist a session token and return the updated user
    async fn store_token(&self, id: Uuid, token: &str) -> AppResult<User>;
}

impl RecordEntity for UserEntity {
    const MUTABLE_FIELDS: &'static [&'static str] = USER_MUTABLE_FIELDS;

    fn id_column() -> user::Column {
        user::Column::Id
    }

    fn updated_column() -> user::Column {
        user::Column::UpdatedDate
    }

    fn recency_column() -> user::Column {
        user::Column::CreatedDate
    }
}

/// User table access
#[derive(Clone)]
pub struct UserStore {
    records: Records<UserEntity>,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            records: Records::new(db),
        }
    }

    fn db(&self) -> &DatabaseConnection {
        self.records.db()
    }
}

/// The `users.user_id` unique index is the authoritative duplicate guard.
fn map_unique_violation(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateUser,
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn user_exists(&self, username: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::UserId.eq(username))
            .count(self.db())
            .await?;
        Ok(count > 0)
    }

    async fn create_user(&self, account: NewAccount) -> AppResult<User> {
        for (value, field) in [
            (&account.username, "username"),
            (&account.password_hash, "password"),
            (&account.salt, "salt"),
            (&account.firstname, "firstname"),
            (&account.lastname, "lastname"),
            (&account.role, "role"),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::missing(field));
            }
        }

        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            created_date: Set(now),
            updated_date: Set(now),
            user_id: Set(account.username),
            password: Set(account.password_hash),
            salt: Set(account.salt),
            sortname: Set(sortname(&account.firstname, &account.lastname)),
            firstname: Set(account.firstname),
            middlename: Set(None),
            lastname: Set(account.lastname),
            role: Set(account.role),
            token: Set(None),
        };

        let model = active_model
            .insert(self.db())
            .await
            .map_err(map_unique_violation)?;
        tracing::info!(user_id = %model.user_id, "User account created");
        Ok(User::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let model = self.records.find(id).await?;
        Ok(model.map(User::from))
    }

    async fn find_credentials(&self, username: &str) -> AppResult<Option<Credentials>> {
        let model = UserEntity::find()
            .filter(user::Column::UserId.eq(username))
            .one(self.db())
            .await?;
        Ok(model.map(Credentials::from))
    }

    async fn store_token(&self, id: Uuid, token: &str) -> AppResult<User> {
        let model = self
            .records
            .apply(id, vec![(user::Column::Token, Value::from(token.to_string()))])
            .await?;
        Ok(User::from(model))
    }
}

#[async_trait]
impl RecordRepository for UserStore {
    type Record = User;
    type NewRecord = NewAccount;

    async fn insert(&self, new: NewAccount) -> AppResult<User> {
        self.create_user(new).await
    }

    async fn select(&self, filter: &FieldMap) -> AppResult<Vec<User>> {
        let models = self.records.select(filter).await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn select_recent(&self, filter: &FieldMap) -> AppResult<Vec<User>> {
        let models = self.records.select_recent(filter).await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    /// Besides the allow-list check, a changed login name must stay unique, a
    /// new password is hashed with a fresh salt and `sortname` follows name
    /// changes.
    async fn update(&self, id: Uuid, changes: &FieldMap) -> AppResult<User> {
        let mut assignments = build_changes::<UserEntity>(changes)?;
        let current = self.records.find(id).await?.ok_or_not_found()?;
        let text = |key: &str| changes.get(key).map(text_value).transpose();

        if let Some(login) = text("user_id")? {
            if login != current.user_id && self.user_exists(&login).await? {
                return Err(AppError::DuplicateUser);
            }
        }

        if let Some(plain) = text("password")? {
            let hashed = Password::new(&plain)?;
            let salt = hashed
                .salt()
                .ok_or_else(|| AppError::internal("Password hash has no salt"))?;
            assignments.retain(|(column, _)| !matches!(column, user::Column::Password));
            assignments.push((user::Column::Password, Value::from(hashed.into_string())));
            assignments.push((user::Column::Salt, Value::from(salt)));
        }

        let firstname = text("firstname")?;
        let lastname = text("lastname")?;
        if firstname.is_some() || lastname.is_some() {
            let firstname = firstname.unwrap_or(current.firstname);
            let lastname = lastname.unwrap_or(current.lastname);
            assignments.push((user::Column::Sortname, Value::from(sortname(&firstname, &lastname))));
        }

        let model = self
            .records
            .apply(id, assignments)
            .await
            .map_err(|err| match err {
                AppError::Database(db_err) => map_unique_violation(db_err),
                other => other,
            })?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<User> {
        let model = self.records.delete(id).await?;
        tracing::info!(user_id = %model.user_id, "User account deleted");
        Ok(User::from(model))
    }
}
