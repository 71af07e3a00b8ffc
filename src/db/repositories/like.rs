use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, SqlErr, TransactionTrait,
};

use crate::entities::{beats, likes, users};
use crate::listing::query::{LikeQuery, LikeScope};
use crate::models::{Beat, Like, LikedBeat};

/// Result of the like transaction. Only `Liked` commits anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked(LikedBeat),
    AlreadyLiked,
    UserMissing,
    BeatMissing,
}

pub struct LikeRepository {
    conn: DatabaseConnection,
}

impl LikeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Record the like and bump the beat's `likes_count` in one transaction.
    ///
    /// The counter update must be the first statement: the transaction has to
    /// hold SQLite's write lock before it reads, or concurrent likers hit a
    /// lock-upgrade deadlock.
    pub async fn like_beat(&self, like: Like) -> Result<LikeOutcome> {
        let txn = self.conn.begin().await?;

        let bumped = beats::Entity::update_many()
            .col_expr(
                beats::Column::LikesCount,
                Expr::col(beats::Column::LikesCount).add(1),
            )
            .filter(beats::Column::Id.eq(like.beat_id))
            .exec(&txn)
            .await?;

        let user_exists = users::Entity::find_by_id(like.user_id)
            .one(&txn)
            .await?
            .is_some();

        if !user_exists {
            txn.rollback().await?;
            return Ok(LikeOutcome::UserMissing);
        }
        if bumped.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(LikeOutcome::BeatMissing);
        }

        let active = likes::ActiveModel {
            user_id: Set(like.user_id),
            beat_id: Set(like.beat_id),
        };
        match likes::Entity::insert(active)
            .exec_without_returning(&txn)
            .await
        {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                txn.rollback().await?;
                return Ok(LikeOutcome::AlreadyLiked);
            }
            Err(e) => return Err(e.into()),
        }

        let beat = beats::Entity::find_by_id(like.beat_id)
            .one(&txn)
            .await?
            .context("Beat vanished inside like transaction")?;

        txn.commit().await?;

        Ok(LikeOutcome::Liked(LikedBeat {
            like,
            beat: Beat::from(beat),
        }))
    }

    pub async fn get(&self, user_id: i32, beat_id: i32) -> Result<Option<Like>> {
        let like = likes::Entity::find_by_id((user_id, beat_id))
            .one(&self.conn)
            .await
            .context("Failed to query like")?;

        Ok(like.map(Like::from))
    }

    /// Likes for one user or one beat, in `(user_id, beat_id)` order.
    pub async fn list(&self, query: LikeQuery) -> Result<Vec<Like>> {
        let select = match query.scope {
            LikeScope::User(user_id) => {
                likes::Entity::find().filter(likes::Column::UserId.eq(user_id))
            }
            LikeScope::Beat(beat_id) => {
                likes::Entity::find().filter(likes::Column::BeatId.eq(beat_id))
            }
        };

        let rows = select
            .order_by_asc(likes::Column::UserId)
            .order_by_asc(likes::Column::BeatId)
            .limit(query.window.limit)
            .offset(query.window.offset)
            .all(&self.conn)
            .await
            .context("Failed to list likes")?;

        Ok(rows.into_iter().map(Like::from).collect())
    }

    /// Remove the like. The counter only moves when a row was actually
    /// deleted.
    pub async fn unlike(&self, like: Like) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let result = likes::Entity::delete_by_id((like.user_id, like.beat_id))
            .exec(&txn)
            .await?;

        if result.rows_affected > 0 {
            beats::Entity::update_many()
                .col_expr(
                    beats::Column::LikesCount,
                    Expr::col(beats::Column::LikesCount).sub(1),
                )
                .filter(beats::Column::Id.eq(like.beat_id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
