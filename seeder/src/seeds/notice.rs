use super::user::{ADMIN_EMAIL, ORGANIZER_EMAIL, TEACHER_EMAIL};
use crate::seed::{Seeder, fixed_user};
use db::models::notice;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};
use services::{AuthContext, ServiceError, notice::{NoticeService, PostNotice}};

pub struct NoticeSeeder;

#[async_trait::async_trait]
impl Seeder for NoticeSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        if notice::Entity::find().count(db).await? > 0 {
            return Ok(());
        }

        let posts = [
            (
                ADMIN_EMAIL,
                PostNotice {
                    title: "Semester registration".into(),
                    content: "Registration for the next semester closes on Friday.".into(),
                    category: Some("admin".into()),
                    is_important: true,
                    ..Default::default()
                },
            ),
            (
                TEACHER_EMAIL,
                PostNotice {
                    title: "Data Structures unit test".into(),
                    content: "Unit test 2 covers trees and graphs. Bring your ID cards.".into(),
                    category: Some("exam".into()),
                    department: Some(super::user::DEPARTMENT.into()),
                    year: Some("SE".into()),
                    ..Default::default()
                },
            ),
            (
                ORGANIZER_EMAIL,
                PostNotice {
                    title: "Tech fest volunteers".into(),
                    content: "Sign up at the student council desk before Wednesday.".into(),
                    category: Some("event".into()),
                    ..Default::default()
                },
            ),
        ];

        for (email, post) in posts {
            let author = fixed_user(db, email).await?;
            NoticeService::post(db, AuthContext::new(author.id, author.role), post)
                .await
                .map_err(|e| match e {
                    ServiceError::Database(db_err) => db_err,
                    other => DbErr::Custom(other.to_string()),
                })?;
        }
        Ok(())
    }
}
