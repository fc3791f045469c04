use super::user::{ADMIN_EMAIL, DEPARTMENT, TEACHER_EMAIL};
use crate::seed::{Seeder, fixed_user};
use chrono::NaiveTime;
use db::models::timetable_entry::{self, Model, NewEntry, Weekday};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};

const SUBJECTS: [&str; 5] = [
    "Data Structures",
    "Discrete Mathematics",
    "Computer Graphics",
    "Digital Electronics",
    "Object Oriented Programming",
];
const PERIODS_PER_DAY: i32 = 4;

pub struct TimetableSeeder;

#[async_trait::async_trait]
impl Seeder for TimetableSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        if timetable_entry::Entity::find().count(db).await? > 0 {
            return Ok(());
        }
        let admin = fixed_user(db, ADMIN_EMAIL).await?;
        let teacher = fixed_user(db, TEACHER_EMAIL).await?;

        for (d, day) in Weekday::ALL.into_iter().enumerate() {
            for period in 1..=PERIODS_PER_DAY {
                let subject = SUBJECTS[(d + period as usize) % SUBJECTS.len()];
                let starts = 9 + period as u32 - 1;
                // Period 1 of every day is the seeded teacher's.
                let teacher_id = (period == 1).then_some(teacher.id);
                Model::create(
                    db,
                    NewEntry {
                        department: DEPARTMENT.into(),
                        year: "SE".into(),
                        semester: "3".into(),
                        day,
                        period,
                        subject: subject.into(),
                        teacher_id,
                        teacher_name: teacher_id.map(|_| teacher.full_name.clone()),
                        room: Some((300 + period).to_string()),
                        time_from: NaiveTime::from_hms_opt(starts, 0, 0),
                        time_to: NaiveTime::from_hms_opt(starts + 1, 0, 0),
                        created_by: admin.id,
                    },
                )
                .await?;
            }
        }
        Ok(())
    }
}
