use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, QueryOrder, QuerySelect, Set};

pub const DEFAULT_ALBUM: &str = "General";

/// A gallery photo. Only metadata is stored; `image_path` names the file.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "memories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_id: Option<i64>,
    pub uploader_id: i64,
    pub uploader_name: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub image_path: String,
    pub album: String,
    /// Mirrors the number of `memory_likes` rows.
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "SetNull"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UploaderId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Uploader,
    #[sea_orm(has_many = "super::memory_like::Entity")]
    Likes,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl Related<super::memory_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewMemory {
    pub event_id: Option<i64>,
    pub uploader_id: i64,
    pub uploader_name: String,
    pub title: String,
    pub description: Option<String>,
    pub image_path: String,
    pub album: String,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryFilter {
    pub event_id: Option<i64>,
    pub album: Option<String>,
}

impl Model {
    pub async fn create(db: &DatabaseConnection, new: NewMemory) -> Result<Model, DbErr> {
        let memory = ActiveModel {
            event_id: Set(new.event_id),
            uploader_id: Set(new.uploader_id),
            uploader_name: Set(new.uploader_name),
            title: Set(new.title),
            description: Set(new.description),
            image_path: Set(new.image_path),
            album: Set(new.album),
            likes: Set(0),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        memory.insert(db).await
    }

    /// Newest first, each paired with its event when it has one.
    pub async fn gallery(
        db: &DatabaseConnection,
        filter: MemoryFilter,
    ) -> Result<Vec<(Model, Option<super::event::Model>)>, DbErr> {
        let mut query = Entity::find();
        if let Some(event_id) = filter.event_id {
            query = query.filter(Column::EventId.eq(event_id));
        }
        if let Some(album) = filter.album {
            query = query.filter(Column::Album.eq(album));
        }
        query
            .find_also_related(super::event::Entity)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn for_event(db: &DatabaseConnection, event_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::EventId.eq(event_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Distinct album names in alphabetical order.
    pub async fn albums(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
        Entity::find()
            .select_only()
            .column(Column::Album)
            .distinct()
            .order_by_asc(Column::Album)
            .into_tuple::<String>()
            .all(db)
            .await
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Entity::find().count(db).await
    }
}
