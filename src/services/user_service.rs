//! Domain service for user accounts.

use thiserror::Error;

use crate::listing::UserListingParams;
use crate::models::{NewUser, User, UserUpdate};
use crate::validation::ValidationError;

/// Errors specific to user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sea_orm::DbErr>() {
            Ok(db) => Self::from(db),
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}

/// Domain service trait for users.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Creates a user. The password is encoded per the configured storage
    /// before it reaches the store.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::UsernameTaken`] if the username is in use.
    async fn create_user(&self, input: NewUser) -> Result<User, UserError>;

    /// Replaces username, password and email of an existing user.
    async fn update_user(&self, input: UserUpdate) -> Result<User, UserError>;

    async fn get_user(&self, id: i32) -> Result<User, UserError>;

    async fn get_user_by_username(&self, username: &str) -> Result<User, UserError>;

    /// One page of users, ordered by id unless `order=USERNAME`.
    async fn list_users(&self, params: UserListingParams) -> Result<Vec<User>, UserError>;

    /// Removes the user with their beats and likes. Deleting an absent user
    /// succeeds.
    async fn delete_user(&self, id: i32) -> Result<(), UserError>;
}
