use super::user::ORGANIZER_EMAIL;
use crate::seed::{Seeder, fixed_user};
use db::models::event;
use db::models::memory::{self, DEFAULT_ALBUM, NewMemory};
use db::models::memory_like;
use db::models::user::{self, Role};
use rand::Rng;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

const PHOTOS_PER_EVENT: usize = 3;
/// Chance a student liked a seeded photo.
const LIKE_RATE: f64 = 0.3;

/// Gallery photos for the seeded events, plus a spread of likes.
pub struct MemorySeeder;

#[async_trait::async_trait]
impl Seeder for MemorySeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        if memory::Entity::find().count(db).await? > 0 {
            return Ok(());
        }
        let organizer = fixed_user(db, ORGANIZER_EMAIL).await?;
        let students = user::Entity::find()
            .filter(user::Column::Role.eq(Role::Student))
            .all(db)
            .await?;
        let events = event::Entity::find()
            .order_by_asc(event::Column::Id)
            .all(db)
            .await?;

        let mut created = Vec::new();
        for ev in &events {
            for i in 1..=PHOTOS_PER_EVENT {
                created.push(
                    memory::Model::create(
                        db,
                        NewMemory {
                            event_id: Some(ev.id),
                            uploader_id: organizer.id,
                            uploader_name: organizer.full_name.clone(),
                            title: format!("{} #{i}", ev.title),
                            description: None,
                            image_path: format!("mem_seed_{}_{i}.jpg", ev.id),
                            album: ev.title.clone(),
                        },
                    )
                    .await?,
                );
            }
        }
        created.push(
            memory::Model::create(
                db,
                NewMemory {
                    event_id: None,
                    uploader_id: organizer.id,
                    uploader_name: organizer.full_name.clone(),
                    title: "Campus in the monsoon".into(),
                    description: None,
                    image_path: "mem_seed_campus.jpg".into(),
                    album: DEFAULT_ALBUM.into(),
                },
            )
            .await?,
        );

        for photo in &created {
            for student in &students {
                if rand::thread_rng().gen_bool(LIKE_RATE) {
                    memory_like::Model::toggle(db, photo.id, student.id).await?;
                }
            }
        }
        Ok(())
    }
}
