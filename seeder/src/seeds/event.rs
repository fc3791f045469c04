use super::user::{DEPARTMENT, ORGANIZER_EMAIL};
use crate::seed::{Seeder, fixed_user};
use chrono::{Duration, NaiveTime, Utc};
use db::models::event::{self, DEPARTMENT_ALL, NewEvent};
use db::models::event_registration;
use db::models::user::{self, Role};
use fake::{Fake, faker::lorem::en::Sentence};
use rand::seq::SliceRandom;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

/// (title, event_type, days from today, capacity, department is own)
const EVENTS: [(&str, &str, i64, Option<i32>, bool); 4] = [
    ("Code Sprint", "technical", 10, Some(60), true),
    ("Annual Cultural Night", "cultural", 21, None, false),
    ("Inter-College Football", "sports", 30, Some(22), false),
    ("Resume Workshop", "workshop", 5, Some(40), true),
];
const REGISTRATIONS_PER_EVENT: usize = 6;

pub struct EventSeeder;

#[async_trait::async_trait]
impl Seeder for EventSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        if event::Entity::find().count(db).await? > 0 {
            return Ok(());
        }
        let organizer = fixed_user(db, ORGANIZER_EMAIL).await?;
        let students = user::Entity::find()
            .filter(user::Column::Role.eq(Role::Student))
            .all(db)
            .await?;
        let now = Utc::now();

        for (title, event_type, days_ahead, capacity, own_department) in EVENTS {
            let event_date = (now + Duration::days(days_ahead)).date_naive();
            let created = event::Model::create(
                db,
                NewEvent {
                    title: title.into(),
                    description: Some(Sentence(8..16).fake()),
                    department: (if own_department { DEPARTMENT } else { DEPARTMENT_ALL }).into(),
                    event_type: event_type.into(),
                    venue: Some("Main Auditorium".into()),
                    event_date,
                    event_time: NaiveTime::from_hms_opt(10, 0, 0),
                    reg_deadline: Some(event_date - Duration::days(2)),
                    max_participants: capacity,
                    organizer_id: organizer.id,
                    organizer_name: organizer.full_name.clone(),
                    banner_image: None,
                    tags: Some(event_type.into()),
                },
            )
            .await?;

            let picked: Vec<_> = students
                .choose_multiple(&mut rand::thread_rng(), REGISTRATIONS_PER_EVENT)
                .collect();
            for student in picked {
                event_registration::Model::register(db, created.id, student.id, now).await?;
            }
        }
        Ok(())
    }
}
