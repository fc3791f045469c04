use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, Condition, QueryOrder, Set};
use serde::Serialize;

/// Audience value matching every department or year.
pub const AUDIENCE_ALL: &str = "All";

/// A noticeboard post, with its pre-rendered WhatsApp share text.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "notices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    pub author_id: i64,
    pub author_name: String,
    pub author_role: String,
    pub department: String,
    pub year: String,
    pub is_important: bool,
    #[sea_orm(column_type = "Text")]
    pub whatsapp_message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewNotice {
    pub title: String,
    pub content: String,
    pub category: String,
    pub author_id: i64,
    pub author_name: String,
    pub author_role: String,
    pub department: String,
    pub year: String,
    pub is_important: bool,
    pub whatsapp_message: String,
}

/// Restricts a listing to notices addressed to one class.
#[derive(Debug, Clone, Default)]
pub struct NoticeFilter {
    /// `(department, year)` of the reader; `None` shows every notice.
    pub audience: Option<(String, String)>,
    pub category: Option<String>,
}

impl Model {
    pub async fn create(db: &DatabaseConnection, new: NewNotice) -> Result<Model, DbErr> {
        let notice = ActiveModel {
            title: Set(new.title),
            content: Set(new.content),
            category: Set(new.category),
            author_id: Set(new.author_id),
            author_name: Set(new.author_name),
            author_role: Set(new.author_role),
            department: Set(new.department),
            year: Set(new.year),
            is_important: Set(new.is_important),
            whatsapp_message: Set(new.whatsapp_message),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        notice.insert(db).await
    }

    /// Important notices first, then newest first.
    pub async fn list(db: &DatabaseConnection, filter: NoticeFilter) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();

        if let Some((department, year)) = filter.audience {
            query = query
                .filter(
                    Condition::any()
                        .add(Column::Department.eq(AUDIENCE_ALL))
                        .add(Column::Department.eq(department)),
                )
                .filter(
                    Condition::any()
                        .add(Column::Year.eq(AUDIENCE_ALL))
                        .add(Column::Year.eq(year)),
                );
        }
        if let Some(category) = filter.category {
            query = query.filter(Column::Category.eq(category));
        }

        query
            .order_by_desc(Column::IsImportant)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }
}
