//! Domain service for beats and the beat listings.

use thiserror::Error;

use crate::listing::BeatListingParams;
use crate::listing::dispatch::DispatchError;
use crate::models::{Beat, BeatUpdate, NewBeat};
use crate::validation::ValidationError;

/// Errors specific to beat operations.
#[derive(Debug, Error)]
pub enum BeatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Beat not found: {0}")]
    NotFound(i32),

    #[error("Creator not found: {0}")]
    CreatorNotFound(i32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for BeatError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for BeatError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sea_orm::DbErr>() {
            Ok(db) => Self::from(db),
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<DispatchError> for BeatError {
    fn from(err: DispatchError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for beats.
#[async_trait::async_trait]
pub trait BeatService: Send + Sync {
    /// Creates a beat owned by `creator_id` with zero likes and the
    /// placeholder storage key.
    ///
    /// # Errors
    ///
    /// Returns [`BeatError::CreatorNotFound`] if the creator does not exist.
    async fn create_beat(&self, input: NewBeat) -> Result<Beat, BeatError>;

    async fn update_beat(&self, input: BeatUpdate) -> Result<Beat, BeatError>;

    async fn get_beat(&self, id: i32) -> Result<Beat, BeatError>;

    /// One page of beats selected by `order` and its filter.
    async fn list_beats(&self, params: BeatListingParams) -> Result<Vec<Beat>, BeatError>;

    /// Same as [`BeatService::list_beats`], restricted to one creator.
    async fn list_beats_by_creator(
        &self,
        creator_id: i32,
        params: BeatListingParams,
    ) -> Result<Vec<Beat>, BeatError>;

    async fn delete_beat(&self, id: i32) -> Result<(), BeatError>;
}
