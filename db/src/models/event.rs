use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, Condition, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Department value for events open to every department.
pub const DEPARTMENT_ALL: &str = "All";

/// A campus event students can register for.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// A department name or `All`.
    pub department: String,
    pub event_type: String,
    pub venue: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub reg_deadline: Option<NaiveDate>,
    /// `None` means unlimited.
    pub max_participants: Option<i32>,
    pub organizer_id: i64,
    pub organizer_name: String,
    pub banner_image: Option<String>,
    pub status: EventStatus,
    /// Comma-separated.
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_status_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventStatus {
    #[sea_orm(string_value = "upcoming")]
    Upcoming,

    #[sea_orm(string_value = "ongoing")]
    Ongoing,

    #[sea_orm(string_value = "completed")]
    Completed,

    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OrganizerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Organizer,
    #[sea_orm(has_many = "super::event_registration::Entity")]
    Registrations,
    #[sea_orm(has_many = "super::memory::Entity")]
    Memories,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizer.def()
    }
}

impl Related<super::event_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registrations.def()
    }
}

impl Related<super::memory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub department: String,
    pub event_type: String,
    pub venue: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub reg_deadline: Option<NaiveDate>,
    pub max_participants: Option<i32>,
    pub organizer_id: i64,
    pub organizer_name: String,
    pub banner_image: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Matches the department itself and events open to `All`.
    pub department: Option<String>,
    pub event_type: Option<String>,
    pub status: Option<EventStatus>,
    /// Substring of the title or description.
    pub search: Option<String>,
}

impl Model {
    pub async fn create(db: &DatabaseConnection, new: NewEvent) -> Result<Model, DbErr> {
        let event = ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            department: Set(new.department),
            event_type: Set(new.event_type),
            venue: Set(new.venue),
            event_date: Set(new.event_date),
            event_time: Set(new.event_time),
            reg_deadline: Set(new.reg_deadline),
            max_participants: Set(new.max_participants),
            organizer_id: Set(new.organizer_id),
            organizer_name: Set(new.organizer_name),
            banner_image: Set(new.banner_image),
            status: Set(EventStatus::Upcoming),
            tags: Set(new.tags),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        event.insert(db).await
    }

    /// Latest event date first.
    pub async fn list(db: &DatabaseConnection, filter: EventFilter) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();

        if let Some(department) = filter.department {
            query = query.filter(
                Condition::any()
                    .add(Column::Department.eq(department))
                    .add(Column::Department.eq(DEPARTMENT_ALL)),
            );
        }
        if let Some(event_type) = filter.event_type {
            query = query.filter(Column::EventType.eq(event_type));
        }
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(search) = filter.search {
            query = query.filter(
                Condition::any()
                    .add(Column::Title.contains(&search))
                    .add(Column::Description.contains(&search)),
            );
        }

        query
            .order_by_desc(Column::EventDate)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Entity::find().count(db).await
    }

    /// Events of a department, counting those open to `All`.
    pub async fn count_for_department(
        db: &DatabaseConnection,
        department: &str,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(
                Condition::any()
                    .add(Column::Department.eq(department))
                    .add(Column::Department.eq(DEPARTMENT_ALL)),
            )
            .count(db)
            .await
    }
}
