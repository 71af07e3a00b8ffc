//! Domain service for likes.

use thiserror::Error;

use crate::listing::PageParams;
use crate::models::{Like, LikedBeat};
use crate::validation::ValidationError;

/// Errors specific to like operations.
#[derive(Debug, Error)]
pub enum LikeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User not found: {0}")]
    UserNotFound(i32),

    #[error("Beat not found: {0}")]
    BeatNotFound(i32),

    #[error("Like not found: user {user_id}, beat {beat_id}")]
    NotFound { user_id: i32, beat_id: i32 },

    #[error("User {user_id} already likes beat {beat_id}")]
    AlreadyLiked { user_id: i32, beat_id: i32 },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for LikeError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for LikeError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sea_orm::DbErr>() {
            Ok(db) => Self::from(db),
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}

/// Domain service trait for likes.
#[async_trait::async_trait]
pub trait LikeService: Send + Sync {
    /// Records the like and increments the beat's `likes_count` atomically.
    ///
    /// # Errors
    ///
    /// Returns [`LikeError::AlreadyLiked`] if the pair exists, or
    /// [`LikeError::UserNotFound`] / [`LikeError::BeatNotFound`] if either side
    /// is missing.
    async fn like_beat(&self, like: Like) -> Result<LikedBeat, LikeError>;

    async fn get_like(&self, user_id: i32, beat_id: i32) -> Result<Like, LikeError>;

    async fn list_likes_by_user(
        &self,
        user_id: i32,
        page: PageParams,
    ) -> Result<Vec<Like>, LikeError>;

    async fn list_likes_by_beat(
        &self,
        beat_id: i32,
        page: PageParams,
    ) -> Result<Vec<Like>, LikeError>;

    /// Removes the like and decrements the counter. Removing an absent like
    /// succeeds without touching the counter.
    async fn unlike_beat(&self, like: Like) -> Result<(), LikeError>;
}
