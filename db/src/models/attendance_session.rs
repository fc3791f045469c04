use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rand::Rng;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, QueryOrder, QuerySelect, Set, SqlErr};
use tracing::warn;

/// Length of a session token.
pub const TOKEN_LEN: usize = 12;

/// Alphabet a session token is drawn from.
const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Attempts at inserting a session before a token collision becomes an error.
const MAX_TOKEN_ATTEMPTS: u32 = 3;

/// A time-boxed window during which students may mark attendance.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "attendance_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User that opened the session.
    pub teacher_id: i64,
    pub department: String,
    pub year: String,
    pub subject: String,
    pub room: String,
    /// Unguessable token embedded in the QR code.
    #[sea_orm(unique)]
    pub token: String,
    pub date: NaiveDate,
    pub time_from: NaiveTime,
    pub expires_at: DateTime<Utc>,
    /// Flips to false exactly once, on close or lazy expiry.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Teacher,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    Records,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Values for a new session. The token is generated on insert.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub teacher_id: i64,
    pub department: String,
    pub year: String,
    pub subject: String,
    pub room: String,
    pub date: NaiveDate,
    pub time_from: NaiveTime,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Model {
    /// Random uppercase alphanumeric token of `TOKEN_LEN` characters.
    pub fn generate_token() -> String {
        let mut rng = rand::thread_rng();
        (0..TOKEN_LEN)
            .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
            .collect()
    }

    /// True once `now` is strictly past `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Inserts the session, regenerating the token on a unique collision.
    pub async fn create(db: &DatabaseConnection, new: NewSession) -> Result<Model, DbErr> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let session = ActiveModel {
                teacher_id: Set(new.teacher_id),
                department: Set(new.department.clone()),
                year: Set(new.year.clone()),
                subject: Set(new.subject.clone()),
                room: Set(new.room.clone()),
                token: Set(Self::generate_token()),
                date: Set(new.date),
                time_from: Set(new.time_from),
                expires_at: Set(new.expires_at),
                is_active: Set(true),
                created_at: Set(new.created_at),
                ..Default::default()
            };

            match session.insert(db).await {
                Ok(model) => return Ok(model),
                Err(err)
                    if attempt < MAX_TOKEN_ATTEMPTS
                        && matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
                {
                    warn!(attempt, "Session token collision, regenerating");
                }
                Err(err) => return Err(err),
            }
        }
    }

    pub async fn find_by_token(
        db: &DatabaseConnection,
        token: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Token.eq(token)).one(db).await
    }

    /// Deactivates the session if it is still active and past its deadline.
    ///
    /// Returns true only for the caller whose update flipped the flag.
    pub async fn deactivate_if_expired(
        db: &DatabaseConnection,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .filter(Column::Id.eq(id))
            .filter(Column::IsActive.eq(true))
            .filter(Column::ExpiresAt.lt(now))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Bulk form of `deactivate_if_expired` for every overdue session opened
    /// by a teacher, so listings never report a stale active flag.
    pub async fn expire_overdue_for_teacher(
        db: &DatabaseConnection,
        teacher_id: i64,
        now: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::IsActive.eq(true))
            .filter(Column::ExpiresAt.lt(now))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Same as `expire_overdue_for_teacher`, scoped to one class.
    pub async fn expire_overdue_for_class(
        db: &DatabaseConnection,
        department: &str,
        year: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .filter(Column::Department.eq(department))
            .filter(Column::Year.eq(year))
            .filter(Column::IsActive.eq(true))
            .filter(Column::ExpiresAt.lt(now))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Deactivates an active session. With `owner` set, only that teacher's
    /// session matches. Returns whether a row changed.
    pub async fn close(
        db: &DatabaseConnection,
        id: i64,
        owner: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut update = Entity::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .filter(Column::Id.eq(id))
            .filter(Column::IsActive.eq(true));
        if let Some(teacher_id) = owner {
            update = update.filter(Column::TeacherId.eq(teacher_id));
        }
        let res = update.exec(db).await?;
        Ok(res.rows_affected > 0)
    }

    /// Most recent sessions opened by a teacher.
    pub async fn recent_for_teacher(
        db: &DatabaseConnection,
        teacher_id: i64,
        limit: u64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(db)
            .await
    }

    /// Sessions already over for a class, used as the denominator of a
    /// student's attendance rate.
    pub async fn count_inactive_for_class(
        db: &DatabaseConnection,
        department: &str,
        year: &str,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::Department.eq(department))
            .filter(Column::Year.eq(year))
            .filter(Column::IsActive.eq(false))
            .count(db)
            .await
    }
}
