use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ConnectionTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect, Statement};
use std::collections::HashMap;

/// A user's place at an event. At most one per (event, user).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "event_registrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub registered_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "Cascade"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    AlreadyRegistered,
    /// `max_participants` was reached before this registration.
    Full,
}

/// Insert guarded by capacity and uniqueness in one statement, so concurrent
/// registrations cannot overfill an event.
const REGISTER_SQL: &str = "\
INSERT INTO event_registrations (event_id, user_id, registered_at) \
SELECT ?1, ?2, ?3 \
WHERE (SELECT max_participants FROM events WHERE id = ?1) IS NULL \
   OR (SELECT COUNT(*) FROM event_registrations WHERE event_id = ?1) \
      < (SELECT max_participants FROM events WHERE id = ?1) \
ON CONFLICT (event_id, user_id) DO NOTHING";

impl Model {
    pub async fn register(
        db: &DatabaseConnection,
        event_id: i64,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<RegisterOutcome, DbErr> {
        let res = db
            .execute(Statement::from_sql_and_values(
                db.get_database_backend(),
                REGISTER_SQL,
                [event_id.into(), user_id.into(), now.into()],
            ))
            .await?;

        if res.rows_affected() > 0 {
            return Ok(RegisterOutcome::Registered);
        }
        if Self::is_registered(db, event_id, user_id).await? {
            Ok(RegisterOutcome::AlreadyRegistered)
        } else {
            Ok(RegisterOutcome::Full)
        }
    }

    /// Returns true when a registration was removed.
    pub async fn unregister(db: &DatabaseConnection, event_id: i64, user_id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::EventId.eq(event_id))
            .filter(Column::UserId.eq(user_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn is_registered(db: &DatabaseConnection, event_id: i64, user_id: i64) -> Result<bool, DbErr> {
        let n = Entity::find()
            .filter(Column::EventId.eq(event_id))
            .filter(Column::UserId.eq(user_id))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    pub async fn count_for_event(db: &DatabaseConnection, event_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::EventId.eq(event_id))
            .count(db)
            .await
    }

    /// Registration counts keyed by event id. Events without registrations are absent.
    pub async fn counts_for_events(
        db: &DatabaseConnection,
        event_ids: &[i64],
    ) -> Result<HashMap<i64, i64>, DbErr> {
        if event_ids.is_empty() {
            return Ok(HashMap::new());
        }

        #[derive(FromQueryResult)]
        struct Row {
            event_id: i64,
            cnt: i64,
        }

        let rows: Vec<Row> = Entity::find()
            .select_only()
            .column(Column::EventId)
            .column_as(Expr::expr(Func::count(Expr::col(Column::Id))), "cnt")
            .filter(Column::EventId.is_in(event_ids.iter().copied()))
            .group_by(Column::EventId)
            .into_model::<Row>()
            .all(db)
            .await?;

        Ok(rows.into_iter().map(|r| (r.event_id, r.cnt)).collect())
    }

    /// Earliest registrations first, paired with the registered user.
    pub async fn attendees(
        db: &DatabaseConnection,
        event_id: i64,
        limit: u64,
    ) -> Result<Vec<(Model, Option<super::user::Model>)>, DbErr> {
        Entity::find()
            .filter(Column::EventId.eq(event_id))
            .find_also_related(super::user::Entity)
            .order_by_asc(Column::RegisteredAt)
            .order_by_asc(Column::Id)
            .limit(limit)
            .all(db)
            .await
    }

    /// Events the user is registered for, latest event date first.
    pub async fn events_for_user(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<Vec<super::event::Model>, DbErr> {
        super::event::Entity::find()
            .join(JoinType::InnerJoin, super::event::Relation::Registrations.def())
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(super::event::Column::EventDate)
            .all(db)
            .await
    }
}
