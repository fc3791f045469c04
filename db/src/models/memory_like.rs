use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{QuerySelect, Set, TransactionTrait};
use std::collections::HashSet;

/// One user's like on one memory.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "memory_likes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub memory_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::memory::Entity",
        from = "Column::MemoryId",
        to = "super::memory::Column::Id",
        on_delete = "Cascade"
    )]
    Memory,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::memory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memory.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub likes: i32,
}

impl Model {
    /// Likes the memory, or removes the like if the user already gave one.
    /// The row change and the counter update commit together. Returns `None`
    /// for an unknown memory.
    pub async fn toggle(
        db: &DatabaseConnection,
        memory_id: i64,
        user_id: i64,
    ) -> Result<Option<LikeState>, DbErr> {
        let txn = db.begin().await?;

        let removed = Entity::delete_many()
            .filter(Column::MemoryId.eq(memory_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let liked = if removed > 0 {
            super::memory::Entity::update_many()
                .col_expr(
                    super::memory::Column::Likes,
                    Expr::cust("MAX(likes - 1, 0)"),
                )
                .filter(super::memory::Column::Id.eq(memory_id))
                .exec(&txn)
                .await?;
            false
        } else {
            if super::memory::Entity::find_by_id(memory_id).one(&txn).await?.is_none() {
                txn.rollback().await?;
                return Ok(None);
            }
            let like = ActiveModel {
                memory_id: Set(memory_id),
                user_id: Set(user_id),
                created_at: Set(Utc::now()),
                ..Default::default()
            };
            let inserted = Entity::insert(like)
                .on_conflict(
                    OnConflict::columns([Column::MemoryId, Column::UserId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
            if inserted > 0 {
                super::memory::Entity::update_many()
                    .col_expr(
                        super::memory::Column::Likes,
                        Expr::col(super::memory::Column::Likes).add(1),
                    )
                    .filter(super::memory::Column::Id.eq(memory_id))
                    .exec(&txn)
                    .await?;
            }
            true
        };

        let likes = super::memory::Entity::find_by_id(memory_id)
            .select_only()
            .column(super::memory::Column::Likes)
            .into_tuple::<i32>()
            .one(&txn)
            .await?
            .unwrap_or_default();

        txn.commit().await?;
        Ok(Some(LikeState { liked, likes }))
    }

    /// Which of `memory_ids` the user has liked.
    pub async fn liked_by(
        db: &DatabaseConnection,
        user_id: i64,
        memory_ids: &[i64],
    ) -> Result<HashSet<i64>, DbErr> {
        if memory_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids: Vec<i64> = Entity::find()
            .select_only()
            .column(Column::MemoryId)
            .filter(Column::UserId.eq(user_id))
            .filter(Column::MemoryId.is_in(memory_ids.iter().copied()))
            .into_tuple()
            .all(db)
            .await?;
        Ok(ids.into_iter().collect())
    }

    pub async fn count_for_memory(db: &DatabaseConnection, memory_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::MemoryId.eq(memory_id))
            .count(db)
            .await
    }
}
