use chrono::{DateTime, NaiveTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One period of a class's weekly schedule.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "timetable_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub department: String,
    pub year: String,
    pub semester: String,
    pub day: Weekday,
    pub period: i32,
    pub subject: String,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub room: Option<String>,
    pub time_from: Option<NaiveTime>,
    pub time_to: Option<NaiveTime>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Teaching days, Monday through Saturday.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "weekday_type")]
#[strum(ascii_case_insensitive)]
pub enum Weekday {
    #[sea_orm(string_value = "Monday")]
    Monday,
    #[sea_orm(string_value = "Tuesday")]
    Tuesday,
    #[sea_orm(string_value = "Wednesday")]
    Wednesday,
    #[sea_orm(string_value = "Thursday")]
    Thursday,
    #[sea_orm(string_value = "Friday")]
    Friday,
    #[sea_orm(string_value = "Saturday")]
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Teacher,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewEntry {
    pub department: String,
    pub year: String,
    pub semester: String,
    pub day: Weekday,
    pub period: i32,
    pub subject: String,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub room: Option<String>,
    pub time_from: Option<NaiveTime>,
    pub time_to: Option<NaiveTime>,
    pub created_by: i64,
}

impl Model {
    pub async fn create(db: &DatabaseConnection, new: NewEntry) -> Result<Model, DbErr> {
        let entry = ActiveModel {
            department: Set(new.department),
            year: Set(new.year),
            semester: Set(new.semester),
            day: Set(new.day),
            period: Set(new.period),
            subject: Set(new.subject),
            teacher_id: Set(new.teacher_id),
            teacher_name: Set(new.teacher_name),
            room: Set(new.room),
            time_from: Set(new.time_from),
            time_to: Set(new.time_to),
            created_by: Set(new.created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        entry.insert(db).await
    }

    /// Returns whether an entry was removed.
    pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn for_class(
        db: &DatabaseConnection,
        department: &str,
        year: &str,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Department.eq(department))
            .filter(Column::Year.eq(year))
            .order_by_asc(Column::Period)
            .all(db)
            .await
    }

    pub async fn for_teacher(db: &DatabaseConnection, teacher_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::Period)
            .all(db)
            .await
    }
}
