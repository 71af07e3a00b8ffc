use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Set, TransactionTrait,
};

use crate::entities::{beats, likes, users};
use crate::listing::UserOrder;
use crate::listing::query::UserQuery;
use crate::models::{NewUser, User, UserUpdate};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a user. `password` is stored exactly as given, so callers hash
    /// it first.
    pub async fn create(&self, input: NewUser) -> Result<User> {
        let active = users::ActiveModel {
            username: Set(input.username),
            password: Set(input.password),
            email: Set(input.email),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active.insert(&self.conn).await?;
        Ok(User::from(model))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(User::from))
    }

    pub async fn list(&self, query: UserQuery) -> Result<Vec<User>> {
        let select = match query.order {
            UserOrder::Id => users::Entity::find().order_by_asc(users::Column::Id),
            UserOrder::Username => users::Entity::find()
                .order_by_asc(users::Column::Username)
                .order_by_asc(users::Column::Id),
        };

        let rows = select
            .limit(query.window.limit)
            .offset(query.window.offset)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Replace username, password and email. Returns `None` when no user has
    /// the given id.
    pub async fn update(&self, input: UserUpdate) -> Result<Option<User>> {
        let Some(existing) = users::Entity::find_by_id(input.id)
            .one(&self.conn)
            .await
            .context("Failed to query user for update")?
        else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = existing.into();
        active.username = Set(input.username);
        active.password = Set(input.password);
        active.email = Set(input.email);
        let model = active.update(&self.conn).await?;

        Ok(Some(User::from(model)))
    }

    /// Remove a user along with their beats and likes, keeping `likes_count`
    /// accurate on every beat the user had liked. Returns whether a user row
    /// was removed.
    ///
    /// Every statement is a write and the affected rows are selected through
    /// subqueries, so the transaction takes the write lock on its first
    /// statement.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let liked_by_user = likes::Entity::find()
            .select_only()
            .column(likes::Column::BeatId)
            .filter(likes::Column::UserId.eq(id))
            .into_query();

        beats::Entity::update_many()
            .col_expr(
                beats::Column::LikesCount,
                Expr::col(beats::Column::LikesCount).sub(1),
            )
            .filter(beats::Column::Id.in_subquery(liked_by_user))
            .exec(&txn)
            .await?;

        likes::Entity::delete_many()
            .filter(likes::Column::UserId.eq(id))
            .exec(&txn)
            .await?;

        let owned_by_user = beats::Entity::find()
            .select_only()
            .column(beats::Column::Id)
            .filter(beats::Column::CreatorId.eq(id))
            .into_query();

        likes::Entity::delete_many()
            .filter(likes::Column::BeatId.in_subquery(owned_by_user))
            .exec(&txn)
            .await?;

        beats::Entity::delete_many()
            .filter(beats::Column::CreatorId.eq(id))
            .exec(&txn)
            .await?;

        let result = users::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
