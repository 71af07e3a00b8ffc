use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
};

use crate::entities::{beats, likes};
use crate::listing::query::{BeatQuery, BeatShape};
use crate::models::beat::PLACEHOLDER_S3_KEY;
use crate::models::{Beat, BeatUpdate, NewBeat};

pub struct BeatRepository {
    conn: DatabaseConnection,
}

impl BeatRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, input: NewBeat) -> Result<Beat> {
        let active = beats::ActiveModel {
            creator_id: Set(input.creator_id),
            title: Set(input.title),
            genre: Set(input.genre),
            key: Set(input.key),
            bpm: Set(input.bpm),
            tags: Set(input.tags),
            s3_key: Set(PLACEHOLDER_S3_KEY.to_string()),
            likes_count: Set(0),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active.insert(&self.conn).await?;
        Ok(Beat::from(model))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Beat>> {
        let beat = beats::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query beat by ID")?;

        Ok(beat.map(Beat::from))
    }

    /// Run one listing query. Rows always come back in ascending `id` order.
    pub async fn list(&self, query: &BeatQuery) -> Result<Vec<Beat>> {
        let mut select = Self::shaped(beats::Entity::find(), &query.shape);
        if let Some(creator_id) = query.creator_id {
            select = select.filter(beats::Column::CreatorId.eq(creator_id));
        }

        let rows = select
            .order_by_asc(beats::Column::Id)
            .limit(query.window.limit)
            .offset(query.window.offset)
            .all(&self.conn)
            .await
            .context("Failed to list beats")?;

        Ok(rows.into_iter().map(Beat::from).collect())
    }

    fn shaped(select: Select<beats::Entity>, shape: &BeatShape) -> Select<beats::Entity> {
        match shape {
            BeatShape::All => select,
            BeatShape::BpmRange { min, max } => {
                select.filter(beats::Column::Bpm.between(*min, *max))
            }
            BeatShape::Key(key) => select.filter(beats::Column::Key.eq(key.as_str())),
            BeatShape::Genre(genre) => select.filter(beats::Column::Genre.eq(genre.as_str())),
        }
    }

    /// Replace the editable columns. `creator_id`, `likes_count`, `s3_key`
    /// and `created_at` are left alone.
    pub async fn update(&self, input: BeatUpdate) -> Result<Option<Beat>> {
        let Some(existing) = beats::Entity::find_by_id(input.id)
            .one(&self.conn)
            .await
            .context("Failed to query beat for update")?
        else {
            return Ok(None);
        };

        let mut active: beats::ActiveModel = existing.into();
        active.title = Set(input.title);
        active.genre = Set(input.genre);
        active.key = Set(input.key);
        active.bpm = Set(input.bpm);
        active.tags = Set(input.tags);
        let model = active.update(&self.conn).await?;

        Ok(Some(Beat::from(model)))
    }

    /// Removes the beat together with every like on it.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        likes::Entity::delete_many()
            .filter(likes::Column::BeatId.eq(id))
            .exec(&txn)
            .await?;

        let result = beats::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
