use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, QueryOrder, Set};

/// A student accomplishment. Hidden from the public list until approved.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "achievements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub achievement_type: String,
    pub date: Option<NaiveDate>,
    pub certificate_image: Option<String>,
    pub department: Option<String>,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewAchievement {
    pub student_id: i64,
    pub student_name: String,
    pub title: String,
    pub description: Option<String>,
    pub achievement_type: String,
    pub date: Option<NaiveDate>,
    pub certificate_image: Option<String>,
    pub department: Option<String>,
}

impl Model {
    /// Stored unapproved.
    pub async fn create(db: &DatabaseConnection, new: NewAchievement) -> Result<Model, DbErr> {
        let achievement = ActiveModel {
            student_id: Set(new.student_id),
            student_name: Set(new.student_name),
            title: Set(new.title),
            description: Set(new.description),
            achievement_type: Set(new.achievement_type),
            date: Set(new.date),
            certificate_image: Set(new.certificate_image),
            department: Set(new.department),
            approved: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        achievement.insert(db).await
    }

    /// Approved achievements, latest date first.
    pub async fn approved(
        db: &DatabaseConnection,
        department: Option<String>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find().filter(Column::Approved.eq(true));
        if let Some(department) = department {
            query = query.filter(Column::Department.eq(department));
        }
        query
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Pending submissions, oldest first.
    pub async fn pending(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Approved.eq(false))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Everything a student submitted, approved or not.
    pub async fn for_student(db: &DatabaseConnection, student_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn approve(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        let Some(achievement) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let mut active: ActiveModel = achievement.into();
        active.approved = Set(true);
        active.update(db).await.map(Some)
    }
}
