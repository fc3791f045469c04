use crate::context::AuthContext;
use crate::error::{ServiceError, ServiceResult};
use crate::upload;
use chrono::{DateTime, Utc};
use db::models::event;
use db::models::memory::{self, DEFAULT_ALBUM, MemoryFilter, NewMemory};
use db::models::memory_like::{self, LikeState};
use db::models::user::{self, Role};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::collections::HashSet;
use tracing::info;

pub use db::models::memory::Model as Memory;

#[derive(Debug, Clone)]
pub struct GalleryItem {
    pub memory: Memory,
    pub event_title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Gallery {
    pub items: Vec<GalleryItem>,
    pub albums: Vec<String>,
    /// Ids among `items` the viewer has liked. Empty for anonymous viewers.
    pub liked: HashSet<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadMemories {
    pub event_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub album: Option<String>,
    /// Original file names, one memory per accepted image.
    pub files: Vec<String>,
}

pub struct MemoryService;

impl MemoryService {
    pub async fn gallery(
        db: &DatabaseConnection,
        viewer: Option<AuthContext>,
        filter: MemoryFilter,
    ) -> ServiceResult<Gallery> {
        let items: Vec<GalleryItem> = memory::Model::gallery(db, filter)
            .await?
            .into_iter()
            .map(|(memory, event)| GalleryItem {
                memory,
                event_title: event.map(|e| e.title),
            })
            .collect();
        let albums = memory::Model::albums(db).await?;
        let liked = match viewer {
            Some(ctx) => {
                let ids: Vec<i64> = items.iter().map(|i| i.memory.id).collect();
                memory_like::Model::liked_by(db, ctx.user_id, &ids).await?
            }
            None => HashSet::new(),
        };

        Ok(Gallery {
            items,
            albums,
            liked,
        })
    }

    /// Files that are not images are skipped. At least one must be accepted.
    pub async fn upload(
        db: &DatabaseConnection,
        ctx: AuthContext,
        params: UploadMemories,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<Memory>> {
        if !matches!(ctx.role, Role::Organizer | Role::Admin) {
            return Err(ServiceError::Forbidden(
                "Only organizers and admins can upload memories".into(),
            ));
        }
        // the index keeps names distinct within one batch
        let stored: Vec<String> = params
            .files
            .iter()
            .enumerate()
            .filter_map(|(i, f)| upload::stored_name(&format!("mem{i}"), f, now))
            .collect();
        if stored.is_empty() {
            return Err(ServiceError::Invalid(format!(
                "No image files provided (allowed: {})",
                upload::ALLOWED_EXTENSIONS.join(", ")
            )));
        }
        if let Some(event_id) = params.event_id {
            if event::Entity::find_by_id(event_id).one(db).await?.is_none() {
                return Err(ServiceError::NotFound("Event not found".into()));
            }
        }

        let uploader = user::Entity::find_by_id(ctx.user_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
        let album = params
            .album
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ALBUM.into());

        let mut created = Vec::with_capacity(stored.len());
        for image_path in stored {
            created.push(
                memory::Model::create(
                    db,
                    NewMemory {
                        event_id: params.event_id,
                        uploader_id: uploader.id,
                        uploader_name: uploader.full_name.clone(),
                        title: params.title.clone(),
                        description: params.description.clone(),
                        image_path,
                        album: album.clone(),
                    },
                )
                .await?,
            );
        }

        info!(count = created.len(), uploader_id = ctx.user_id, "Memories uploaded");
        Ok(created)
    }

    pub async fn toggle_like(db: &DatabaseConnection, ctx: AuthContext, memory_id: i64) -> ServiceResult<LikeState> {
        memory_like::Model::toggle(db, memory_id, ctx.user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Memory not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::models::user::NewUser;
    use db::test_utils::setup_test_db;

    async fn add_user(db: &DatabaseConnection, username: &str, role: Role) -> AuthContext {
        let u = user::Model::create(
            db,
            NewUser {
                username: username.into(),
                email: format!("{username}@campus.test"),
                password: "secret123".into(),
                full_name: format!("{username} full"),
                role,
                department: None,
                year: None,
                semester: None,
                roll_number: None,
                phone: None,
            },
        )
        .await
        .unwrap();
        AuthContext::new(u.id, role)
    }

    fn photos(files: &[&str]) -> UploadMemories {
        UploadMemories {
            title: "Annual day".into(),
            files: files.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn upload_keeps_images_only() {
        let db = setup_test_db().await;
        let org = add_user(&db, "org", Role::Organizer).await;
        let student = add_user(&db, "stud", Role::Student).await;

        let created = MemoryService::upload(&db, org, photos(&["a.jpg", "notes.txt", "b.png"]), Utc::now())
            .await
            .unwrap();
        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|m| m.album == "General"));
        assert_ne!(created[0].image_path, created[1].image_path);

        assert!(matches!(
            MemoryService::upload(&db, org, photos(&["virus.exe"]), Utc::now()).await,
            Err(ServiceError::Invalid(_))
        ));
        assert!(matches!(
            MemoryService::upload(&db, student, photos(&["a.jpg"]), Utc::now()).await,
            Err(ServiceError::Forbidden(_))
        ));
        let mut orphan = photos(&["a.jpg"]);
        orphan.event_id = Some(42);
        assert!(matches!(
            MemoryService::upload(&db, org, orphan, Utc::now()).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn likes_toggle_per_user() {
        let db = setup_test_db().await;
        let org = add_user(&db, "org", Role::Organizer).await;
        let a = add_user(&db, "a", Role::Student).await;
        let b = add_user(&db, "b", Role::Student).await;
        let m = MemoryService::upload(&db, org, photos(&["a.jpg"]), Utc::now())
            .await
            .unwrap()
            .remove(0);

        assert_eq!(
            MemoryService::toggle_like(&db, a, m.id).await.unwrap(),
            LikeState { liked: true, likes: 1 }
        );
        assert_eq!(
            MemoryService::toggle_like(&db, b, m.id).await.unwrap(),
            LikeState { liked: true, likes: 2 }
        );
        assert_eq!(
            MemoryService::toggle_like(&db, a, m.id).await.unwrap(),
            LikeState { liked: false, likes: 1 }
        );

        let seen_by_b = MemoryService::gallery(&db, Some(b), MemoryFilter::default()).await.unwrap();
        assert!(seen_by_b.liked.contains(&m.id));
        assert_eq!(seen_by_b.items[0].memory.likes, 1);
        let anonymous = MemoryService::gallery(&db, None, MemoryFilter::default()).await.unwrap();
        assert!(anonymous.liked.is_empty());

        assert!(matches!(
            MemoryService::toggle_like(&db, a, 777).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
