use async_trait::async_trait;
use sea_orm::SqlErr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::db::{CatalogStore, LikeOutcome};
use crate::listing::PageParams;
use crate::listing::query::LikeQuery;
use crate::models::{Like, LikedBeat};
use crate::services::constraint_violation;
use crate::services::like_service::{LikeError, LikeService};
use crate::validation::{validate_id, validate_like, validate_page};

pub struct DefaultLikeService {
    store: Arc<dyn CatalogStore>,
}

impl DefaultLikeService {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LikeService for DefaultLikeService {
    async fn like_beat(&self, like: Like) -> Result<LikedBeat, LikeError> {
        validate_like(like.user_id, like.beat_id)?;

        let outcome = self
            .store
            .like_beat(like)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(SqlErr::UniqueConstraintViolation(_)) => LikeError::AlreadyLiked {
                    user_id: like.user_id,
                    beat_id: like.beat_id,
                },
                _ => LikeError::from(e),
            })?;

        match outcome {
            LikeOutcome::Liked(liked) => {
                info!(
                    user_id = like.user_id,
                    beat_id = like.beat_id,
                    likes_count = liked.beat.likes_count,
                    "Liked beat"
                );
                Ok(liked)
            }
            LikeOutcome::AlreadyLiked => Err(LikeError::AlreadyLiked {
                user_id: like.user_id,
                beat_id: like.beat_id,
            }),
            LikeOutcome::UserMissing => Err(LikeError::UserNotFound(like.user_id)),
            LikeOutcome::BeatMissing => Err(LikeError::BeatNotFound(like.beat_id)),
        }
    }

    async fn get_like(&self, user_id: i32, beat_id: i32) -> Result<Like, LikeError> {
        validate_like(user_id, beat_id)?;

        self.store
            .get_like(user_id, beat_id)
            .await?
            .ok_or(LikeError::NotFound { user_id, beat_id })
    }

    async fn list_likes_by_user(
        &self,
        user_id: i32,
        page: PageParams,
    ) -> Result<Vec<Like>, LikeError> {
        let user_id = validate_id("user_id", user_id)?;
        let page = validate_page(page)?;
        Ok(self.store.list_likes(LikeQuery::by_user(user_id, page)).await?)
    }

    async fn list_likes_by_beat(
        &self,
        beat_id: i32,
        page: PageParams,
    ) -> Result<Vec<Like>, LikeError> {
        let beat_id = validate_id("beat_id", beat_id)?;
        let page = validate_page(page)?;
        Ok(self.store.list_likes(LikeQuery::by_beat(beat_id, page)).await?)
    }

    async fn unlike_beat(&self, like: Like) -> Result<(), LikeError> {
        validate_like(like.user_id, like.beat_id)?;

        if self.store.unlike_beat(like).await? {
            debug!(user_id = like.user_id, beat_id = like.beat_id, "Removed like");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::catalog::MockCatalog;
    use crate::listing::query::LikeScope;
    use crate::models::Beat;

    const LIKE: Like = Like {
        user_id: 5,
        beat_id: 7,
    };

    fn beat(id: i32, likes_count: i64) -> Beat {
        Beat {
            id,
            creator_id: 1,
            title: "untitled".to_string(),
            genre: "LOFI".to_string(),
            key: "D major".to_string(),
            bpm: 80,
            tags: "chill".to_string(),
            s3_key: "not implemented".to_string(),
            likes_count,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_invalid_ids_never_reach_store() {
        let mut store = MockCatalog::new();
        store.expect_like_beat().times(0);
        store.expect_get_like().times(0);
        store.expect_unlike_beat().times(0);
        let service = DefaultLikeService::new(Arc::new(store));

        let bad = Like {
            user_id: 0,
            beat_id: 7,
        };
        assert!(matches!(
            service.like_beat(bad).await,
            Err(LikeError::Validation(_))
        ));
        assert!(matches!(
            service.get_like(5, -1).await,
            Err(LikeError::Validation(_))
        ));
        assert!(matches!(
            service.unlike_beat(bad).await,
            Err(LikeError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_pages_never_reach_store() {
        let mut store = MockCatalog::new();
        store.expect_list_likes().times(0);
        let service = DefaultLikeService::new(Arc::new(store));

        let page = PageParams {
            page_id: 1,
            page_size: 20,
        };
        assert!(service.list_likes_by_user(5, page).await.is_err());
        assert!(service.list_likes_by_beat(7, page).await.is_err());
    }

    #[tokio::test]
    async fn test_list_by_beat_builds_query() {
        let mut store = MockCatalog::new();
        store
            .expect_list_likes()
            .withf(|q| q.scope == LikeScope::Beat(7) && q.window.offset == 5)
            .times(1)
            .returning(|_| Ok(vec![LIKE]));
        let service = DefaultLikeService::new(Arc::new(store));

        let likes = service
            .list_likes_by_beat(
                7,
                PageParams {
                    page_id: 2,
                    page_size: 5,
                },
            )
            .await
            .unwrap();
        assert_eq!(likes, vec![LIKE]);
    }

    #[tokio::test]
    async fn test_like_outcomes_map_to_errors() {
        let mut store = MockCatalog::new();
        let mut outcomes = vec![
            LikeOutcome::BeatMissing,
            LikeOutcome::UserMissing,
            LikeOutcome::AlreadyLiked,
        ];
        store
            .expect_like_beat()
            .times(3)
            .returning(move |_| Ok(outcomes.pop().unwrap()));
        let service = DefaultLikeService::new(Arc::new(store));

        assert!(matches!(
            service.like_beat(LIKE).await,
            Err(LikeError::AlreadyLiked {
                user_id: 5,
                beat_id: 7
            })
        ));
        assert!(matches!(
            service.like_beat(LIKE).await,
            Err(LikeError::UserNotFound(5))
        ));
        assert!(matches!(
            service.like_beat(LIKE).await,
            Err(LikeError::BeatNotFound(7))
        ));
    }

    #[tokio::test]
    async fn test_like_returns_updated_beat() {
        let mut store = MockCatalog::new();
        store.expect_like_beat().times(1).returning(|like| {
            Ok(LikeOutcome::Liked(LikedBeat {
                like,
                beat: beat(like.beat_id, 1),
            }))
        });
        let service = DefaultLikeService::new(Arc::new(store));

        let liked = service.like_beat(LIKE).await.unwrap();
        assert_eq!(liked.like, LIKE);
        assert_eq!(liked.beat.likes_count, 1);
    }

    #[tokio::test]
    async fn test_get_missing_like() {
        let mut store = MockCatalog::new();
        store.expect_get_like().returning(|_, _| Ok(None));
        let service = DefaultLikeService::new(Arc::new(store));

        assert!(matches!(
            service.get_like(5, 999).await,
            Err(LikeError::NotFound {
                user_id: 5,
                beat_id: 999
            })
        ));
    }
}
