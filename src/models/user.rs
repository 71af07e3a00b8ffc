use serde::{Deserialize, Serialize};

use crate::entities::users;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Stored credential: an Argon2id PHC string, or the raw password under
    /// plaintext storage
    pub password: String,
    pub email: String,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password: model.password,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Full replacement of a user's mutable columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserUpdate {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub email: String,
}
