use async_trait::async_trait;
use sea_orm::SqlErr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::db::CatalogStore;
use crate::listing::BeatListingParams;
use crate::listing::dispatch::beat_query;
use crate::models::{Beat, BeatUpdate, NewBeat};
use crate::services::beat_service::{BeatError, BeatService};
use crate::services::constraint_violation;
use crate::validation::{
    validate_beat_listing, validate_beat_update, validate_id, validate_new_beat,
};

pub struct DefaultBeatService {
    store: Arc<dyn CatalogStore>,
}

impl DefaultBeatService {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    async fn run_listing(
        &self,
        creator_id: Option<i32>,
        params: &BeatListingParams,
    ) -> Result<Vec<Beat>, BeatError> {
        let listing = validate_beat_listing(params)?;
        let query = beat_query(listing, creator_id)?;
        Ok(self.store.list_beats(query).await?)
    }
}

#[async_trait]
impl BeatService for DefaultBeatService {
    async fn create_beat(&self, input: NewBeat) -> Result<Beat, BeatError> {
        validate_new_beat(&input)?;

        let creator_id = input.creator_id;
        if self.store.get_user(creator_id).await?.is_none() {
            return Err(BeatError::CreatorNotFound(creator_id));
        }

        let beat = self
            .store
            .create_beat(input)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    BeatError::CreatorNotFound(creator_id)
                }
                _ => BeatError::from(e),
            })?;

        info!(beat_id = beat.id, creator_id, "Created beat");
        Ok(beat)
    }

    async fn update_beat(&self, input: BeatUpdate) -> Result<Beat, BeatError> {
        validate_beat_update(&input)?;

        let id = input.id;
        let beat = self
            .store
            .update_beat(input)
            .await?
            .ok_or(BeatError::NotFound(id))?;

        debug!(beat_id = id, "Updated beat");
        Ok(beat)
    }

    async fn get_beat(&self, id: i32) -> Result<Beat, BeatError> {
        self.store
            .get_beat(id)
            .await?
            .ok_or(BeatError::NotFound(id))
    }

    async fn list_beats(&self, params: BeatListingParams) -> Result<Vec<Beat>, BeatError> {
        self.run_listing(None, &params).await
    }

    async fn list_beats_by_creator(
        &self,
        creator_id: i32,
        params: BeatListingParams,
    ) -> Result<Vec<Beat>, BeatError> {
        let creator_id = validate_id("creator_id", creator_id)?;
        self.run_listing(Some(creator_id), &params).await
    }

    async fn delete_beat(&self, id: i32) -> Result<(), BeatError> {
        if self.store.delete_beat(id).await? {
            info!(beat_id = id, "Deleted beat");
        }
        Ok(())
    }
}
