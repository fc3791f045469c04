use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::models::achievement::{self, NewAchievement};
use db::models::user::{self, Role};
use fake::{Fake, faker::lorem::en::Sentence};
use rand::seq::SliceRandom;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

/// (title, achievement_type, approved)
const ACHIEVEMENTS: [(&str, &str, bool); 5] = [
    ("Smart India Hackathon finalist", "competition", true),
    ("Best paper, student research symposium", "research", true),
    ("State chess championship, 2nd place", "sports", true),
    ("AWS Cloud Practitioner", "certification", false),
    ("Open source contributor of the month", "technical", false),
];

/// A few approved achievements for the public wall and a couple left pending.
pub struct AchievementSeeder;

#[async_trait::async_trait]
impl Seeder for AchievementSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        if achievement::Entity::find().count(db).await? > 0 {
            return Ok(());
        }
        let students = user::Entity::find()
            .filter(user::Column::Role.eq(Role::Student))
            .all(db)
            .await?;
        let today = Utc::now().date_naive();

        for (i, (title, achievement_type, approved)) in ACHIEVEMENTS.into_iter().enumerate() {
            let Some(student) = students.choose(&mut rand::thread_rng()) else {
                return Ok(());
            };
            let created = achievement::Model::create(
                db,
                NewAchievement {
                    student_id: student.id,
                    student_name: student.full_name.clone(),
                    title: title.into(),
                    description: Some(Sentence(6..12).fake()),
                    achievement_type: achievement_type.into(),
                    date: Some(today - Duration::days(30 * (i as i64 + 1))),
                    certificate_image: None,
                    department: student.department.clone(),
                },
            )
            .await?;
            if approved {
                achievement::Model::approve(db, created.id).await?;
            }
        }
        Ok(())
    }
}
