use super::user::{DEPARTMENT, TEACHER_EMAIL};
use crate::seed::{Seeder, fixed_user};
use chrono::{Duration, NaiveTime, Utc};
use db::models::attendance_record::{self, NewRecord};
use db::models::attendance_session::{self, NewSession};
use db::models::user::{self, Role};
use rand::Rng;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

const PAST_SESSIONS: i64 = 3;
/// Chance a student attended a seeded session.
const PRESENCE_RATE: f64 = 0.8;

/// Closed sessions from previous days so histories are not empty.
pub struct AttendanceSeeder;

#[async_trait::async_trait]
impl Seeder for AttendanceSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        if attendance_session::Entity::find().count(db).await? > 0 {
            return Ok(());
        }
        let teacher = fixed_user(db, TEACHER_EMAIL).await?;
        let students = user::Entity::find()
            .filter(user::Column::Role.eq(Role::Student))
            .filter(user::Column::Department.eq(DEPARTMENT))
            .filter(user::Column::Year.eq("SE"))
            .all(db)
            .await?;

        for days_ago in 1..=PAST_SESSIONS {
            let created_at = Utc::now() - Duration::days(days_ago);
            let session = attendance_session::Model::create(
                db,
                NewSession {
                    teacher_id: teacher.id,
                    department: DEPARTMENT.into(),
                    year: "SE".into(),
                    subject: "Data Structures".into(),
                    room: "301".into(),
                    date: created_at.date_naive(),
                    time_from: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
                    expires_at: created_at + Duration::minutes(15),
                    created_at,
                },
            )
            .await?;

            for student in &students {
                let present = rand::thread_rng().gen_bool(PRESENCE_RATE);
                if !present {
                    continue;
                }
                attendance_record::Model::insert_once(
                    db,
                    NewRecord {
                        session_id: session.id,
                        student_id: student.id,
                        student_name: student.full_name.clone(),
                        roll_number: student.roll_number.clone(),
                        department: student.department.clone(),
                        year: student.year.clone(),
                        marked_at: created_at + Duration::minutes(2),
                    },
                )
                .await?;
            }

            attendance_session::Model::close(db, session.id, Some(teacher.id)).await?;
        }
        Ok(())
    }
}
