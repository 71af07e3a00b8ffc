use anyhow::Context;
use async_trait::async_trait;
use sea_orm::SqlErr;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info};

use crate::config::{PasswordStorage, SecurityConfig};
use crate::db::CatalogStore;
use crate::listing::UserListingParams;
use crate::listing::dispatch::user_query;
use crate::models::{NewUser, User, UserUpdate};
use crate::services::constraint_violation;
use crate::services::password::hash_password;
use crate::services::user_service::{UserError, UserService};
use crate::validation::{
    ValidationError, validate_new_user, validate_user_listing, validate_user_update,
};

pub struct DefaultUserService {
    store: Arc<dyn CatalogStore>,
    security: SecurityConfig,
}

impl DefaultUserService {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    async fn encode_password(&self, password: String) -> Result<String, UserError> {
        match self.security.password_storage {
            PasswordStorage::Plaintext => Ok(password),
            PasswordStorage::Argon2 => {
                let security = self.security.clone();
                let hash = task::spawn_blocking(move || hash_password(&password, &security))
                    .await
                    .context("Password hashing task panicked")??;
                Ok(hash)
            }
        }
    }

    fn map_write_error(err: anyhow::Error, username: &str) -> UserError {
        match constraint_violation(&err) {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                UserError::UsernameTaken(username.to_string())
            }
            _ => UserError::from(err),
        }
    }
}

#[async_trait]
impl UserService for DefaultUserService {
    async fn create_user(&self, mut input: NewUser) -> Result<User, UserError> {
        validate_new_user(&input)?;

        let username = input.username.clone();
        input.password = self.encode_password(input.password).await?;

        let user = self
            .store
            .create_user(input)
            .await
            .map_err(|e| Self::map_write_error(e, &username))?;

        info!(user_id = user.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn update_user(&self, mut input: UserUpdate) -> Result<User, UserError> {
        validate_user_update(&input)?;

        let id = input.id;
        let username = input.username.clone();
        input.password = self.encode_password(input.password).await?;

        let user = self
            .store
            .update_user(input)
            .await
            .map_err(|e| Self::map_write_error(e, &username))?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        debug!(user_id = id, "Updated user");
        Ok(user)
    }

    async fn get_user(&self, id: i32) -> Result<User, UserError> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, UserError> {
        if username.is_empty() {
            return Err(ValidationError::EmptyField("username").into());
        }

        self.store
            .get_user_by_username(username.to_string())
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }

    async fn list_users(&self, params: UserListingParams) -> Result<Vec<User>, UserError> {
        let listing = validate_user_listing(&params)?;
        Ok(self.store.list_users(user_query(listing)).await?)
    }

    async fn delete_user(&self, id: i32) -> Result<(), UserError> {
        if self.store.delete_user(id).await? {
            info!(user_id = id, "Deleted user");
        }
        Ok(())
    }
}
