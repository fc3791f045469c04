use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func, OnConflict};
use sea_orm::{FromQueryResult, QueryOrder, QuerySelect, Set};
use std::collections::HashMap;

/// Proof that a student was present at a session. At most one per
/// (session, student).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub session_id: i64,
    pub student_id: i64,

    // Snapshot of the student at marking time.
    pub student_name: String,
    pub roll_number: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,

    pub marked_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::attendance_session::Entity",
        from = "Column::SessionId",
        to = "super::attendance_session::Column::Id",
        on_delete = "Cascade"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::attendance_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewRecord {
    pub session_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub roll_number: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    pub marked_at: DateTime<Utc>,
}

impl Model {
    /// Inserts the record unless one already exists for the same session and
    /// student. Returns true when this call created it.
    ///
    /// The unique index on `(session_id, student_id)` decides the winner of
    /// concurrent attempts.
    pub async fn insert_once(db: &DatabaseConnection, new: NewRecord) -> Result<bool, DbErr> {
        let record = ActiveModel {
            session_id: Set(new.session_id),
            student_id: Set(new.student_id),
            student_name: Set(new.student_name),
            roll_number: Set(new.roll_number),
            department: Set(new.department),
            year: Set(new.year),
            marked_at: Set(new.marked_at),
            ..Default::default()
        };

        let inserted = Entity::insert(record)
            .on_conflict(
                OnConflict::columns([Column::SessionId, Column::StudentId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(inserted > 0)
    }

    pub async fn find_for(
        db: &DatabaseConnection,
        session_id: i64,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .filter(Column::StudentId.eq(student_id))
            .one(db)
            .await
    }

    pub async fn count_for_session(db: &DatabaseConnection, session_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .count(db)
            .await
    }

    /// Newest records first.
    pub async fn recent_for_session(
        db: &DatabaseConnection,
        session_id: i64,
        limit: u64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .order_by_desc(Column::MarkedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(db)
            .await
    }

    /// All records of a session in marking order.
    pub async fn for_session(db: &DatabaseConnection, session_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .order_by_asc(Column::MarkedAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// A student's records paired with their sessions, newest first.
    pub async fn history_for_student(
        db: &DatabaseConnection,
        student_id: i64,
    ) -> Result<Vec<(Model, Option<super::attendance_session::Model>)>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(super::attendance_session::Entity)
            .order_by_desc(Column::MarkedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Present counts keyed by session id. Sessions without records are absent.
    pub async fn counts_for_sessions(
        db: &DatabaseConnection,
        session_ids: &[i64],
    ) -> Result<HashMap<i64, i64>, DbErr> {
        if session_ids.is_empty() {
            return Ok(HashMap::new());
        }

        #[derive(FromQueryResult)]
        struct Row {
            session_id: i64,
            cnt: i64,
        }

        let rows: Vec<Row> = Entity::find()
            .select_only()
            .column(Column::SessionId)
            .column_as(Expr::expr(Func::count(Expr::col(Column::Id))), "cnt")
            .filter(Column::SessionId.is_in(session_ids.iter().copied()))
            .group_by(Column::SessionId)
            .into_model::<Row>()
            .all(db)
            .await?;

        Ok(rows.into_iter().map(|r| (r.session_id, r.cnt)).collect())
    }

    /// Records per student across the sessions a teacher has run.
    pub async fn counts_for_teacher_by_student(
        db: &DatabaseConnection,
        teacher_id: i64,
    ) -> Result<HashMap<i64, i64>, DbErr> {
        #[derive(FromQueryResult)]
        struct Row {
            student_id: i64,
            cnt: i64,
        }

        let rows: Vec<Row> = Entity::find()
            .select_only()
            .column(Column::StudentId)
            .column_as(Expr::expr(Func::count(Expr::col((Entity, Column::Id)))), "cnt")
            .inner_join(super::attendance_session::Entity)
            .filter(super::attendance_session::Column::TeacherId.eq(teacher_id))
            .group_by(Column::StudentId)
            .into_model::<Row>()
            .all(db)
            .await?;

        Ok(rows.into_iter().map(|r| (r.student_id, r.cnt)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance_session::{self, NewSession};
    use crate::models::user::{self, NewUser, Role};
    use crate::test_utils::setup_test_db;
    use chrono::Duration;

    async fn user(db: &DatabaseConnection, username: &str, role: Role) -> user::Model {
        user::Model::create(
            db,
            NewUser {
                username: username.into(),
                email: format!("{username}@campus.test"),
                password: "secret123".into(),
                full_name: username.to_uppercase(),
                role,
                department: Some("Computer Engineering".into()),
                year: Some("SE".into()),
                semester: None,
                roll_number: None,
                phone: None,
            },
        )
        .await
        .unwrap()
    }

    async fn session(db: &DatabaseConnection, teacher_id: i64) -> attendance_session::Model {
        let now = Utc::now();
        attendance_session::Model::create(
            db,
            NewSession {
                teacher_id,
                department: "Computer Engineering".into(),
                year: "SE".into(),
                subject: "DBMS".into(),
                room: "204".into(),
                date: now.date_naive(),
                time_from: now.time(),
                expires_at: now + Duration::minutes(15),
                created_at: now,
            },
        )
        .await
        .unwrap()
    }

    fn record(session_id: i64, student: &user::Model) -> NewRecord {
        NewRecord {
            session_id,
            student_id: student.id,
            student_name: student.full_name.clone(),
            roll_number: student.roll_number.clone(),
            department: student.department.clone(),
            year: student.year.clone(),
            marked_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn second_insert_is_a_no_op() {
        let db = setup_test_db().await;
        let t = user(&db, "prof", Role::Teacher).await;
        let s = user(&db, "stud", Role::Student).await;
        let sess = session(&db, t.id).await;

        assert!(Model::insert_once(&db, record(sess.id, &s)).await.unwrap());
        assert!(!Model::insert_once(&db, record(sess.id, &s)).await.unwrap());
        assert_eq!(Model::count_for_session(&db, sess.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn counts_group_by_session() {
        let db = setup_test_db().await;
        let t = user(&db, "prof", Role::Teacher).await;
        let a = user(&db, "a", Role::Student).await;
        let b = user(&db, "b", Role::Student).await;
        let s1 = session(&db, t.id).await;
        let s2 = session(&db, t.id).await;

        Model::insert_once(&db, record(s1.id, &a)).await.unwrap();
        Model::insert_once(&db, record(s1.id, &b)).await.unwrap();
        Model::insert_once(&db, record(s2.id, &a)).await.unwrap();

        let counts = Model::counts_for_sessions(&db, &[s1.id, s2.id]).await.unwrap();
        assert_eq!(counts.get(&s1.id), Some(&2));
        assert_eq!(counts.get(&s2.id), Some(&1));

        let other = user(&db, "prof2", Role::Teacher).await;
        let s3 = session(&db, other.id).await;
        Model::insert_once(&db, record(s3.id, &b)).await.unwrap();
        let per_student = Model::counts_for_teacher_by_student(&db, t.id).await.unwrap();
        assert_eq!(per_student.get(&a.id), Some(&2));
        assert_eq!(per_student.get(&b.id), Some(&1));

        let history = Model::history_for_student(&db, a.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|(_, s)| s.is_some()));
    }
}
