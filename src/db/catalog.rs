use anyhow::Result;
use async_trait::async_trait;

use super::Store;
use super::repositories::like::LikeOutcome;
use crate::listing::query::{BeatQuery, LikeQuery, UserQuery};
use crate::models::{Beat, BeatUpdate, Like, NewBeat, NewUser, User, UserUpdate};

/// Storage operations the catalog services depend on.
///
/// Lookups return `Ok(None)` for absent rows; deletes report whether a row
/// was removed. Constraint failures surface as `sea_orm::DbErr` inside the
/// `anyhow::Error`.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User>;
    async fn update_user(&self, update: UserUpdate) -> Result<Option<User>>;
    async fn get_user(&self, id: i32) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: String) -> Result<Option<User>>;
    async fn list_users(&self, query: UserQuery) -> Result<Vec<User>>;
    async fn delete_user(&self, id: i32) -> Result<bool>;

    async fn create_beat(&self, beat: NewBeat) -> Result<Beat>;
    async fn update_beat(&self, update: BeatUpdate) -> Result<Option<Beat>>;
    async fn get_beat(&self, id: i32) -> Result<Option<Beat>>;
    async fn list_beats(&self, query: BeatQuery) -> Result<Vec<Beat>>;
    async fn delete_beat(&self, id: i32) -> Result<bool>;

    async fn like_beat(&self, like: Like) -> Result<LikeOutcome>;
    async fn get_like(&self, user_id: i32, beat_id: i32) -> Result<Option<Like>>;
    async fn list_likes(&self, query: LikeQuery) -> Result<Vec<Like>>;
    async fn unlike_beat(&self, like: Like) -> Result<bool>;
}

#[async_trait]
impl CatalogStore for Store {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.user_repo().create(user).await
    }

    async fn update_user(&self, update: UserUpdate) -> Result<Option<User>> {
        self.user_repo().update(update).await
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    async fn get_user_by_username(&self, username: String) -> Result<Option<User>> {
        self.user_repo().get_by_username(&username).await
    }

    async fn list_users(&self, query: UserQuery) -> Result<Vec<User>> {
        self.user_repo().list(query).await
    }

    async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    async fn create_beat(&self, beat: NewBeat) -> Result<Beat> {
        self.beat_repo().create(beat).await
    }

    async fn update_beat(&self, update: BeatUpdate) -> Result<Option<Beat>> {
        self.beat_repo().update(update).await
    }

    async fn get_beat(&self, id: i32) -> Result<Option<Beat>> {
        self.beat_repo().get(id).await
    }

    async fn list_beats(&self, query: BeatQuery) -> Result<Vec<Beat>> {
        self.beat_repo().list(&query).await
    }

    async fn delete_beat(&self, id: i32) -> Result<bool> {
        self.beat_repo().delete(id).await
    }

    async fn like_beat(&self, like: Like) -> Result<LikeOutcome> {
        self.like_repo().like_beat(like).await
    }

    async fn get_like(&self, user_id: i32, beat_id: i32) -> Result<Option<Like>> {
        self.like_repo().get(user_id, beat_id).await
    }

    async fn list_likes(&self, query: LikeQuery) -> Result<Vec<Like>> {
        self.like_repo().list(query).await
    }

    async fn unlike_beat(&self, like: Like) -> Result<bool> {
        self.like_repo().unlike(like).await
    }
}

#[cfg(test)]
mockall::mock! {
    pub Catalog {}

    #[async_trait]
    impl CatalogStore for Catalog {
        async fn create_user(&self, user: NewUser) -> Result<User>;
        async fn update_user(&self, update: UserUpdate) -> Result<Option<User>>;
        async fn get_user(&self, id: i32) -> Result<Option<User>>;
        async fn get_user_by_username(&self, username: String) -> Result<Option<User>>;
        async fn list_users(&self, query: UserQuery) -> Result<Vec<User>>;
        async fn delete_user(&self, id: i32) -> Result<bool>;
        async fn create_beat(&self, beat: NewBeat) -> Result<Beat>;
        async fn update_beat(&self, update: BeatUpdate) -> Result<Option<Beat>>;
        async fn get_beat(&self, id: i32) -> Result<Option<Beat>>;
        async fn list_beats(&self, query: BeatQuery) -> Result<Vec<Beat>>;
        async fn delete_beat(&self, id: i32) -> Result<bool>;
        async fn like_beat(&self, like: Like) -> Result<LikeOutcome>;
        async fn get_like(&self, user_id: i32, beat_id: i32) -> Result<Option<Like>>;
        async fn list_likes(&self, query: LikeQuery) -> Result<Vec<Like>>;
        async fn unlike_beat(&self, like: Like) -> Result<bool>;
    }
}
