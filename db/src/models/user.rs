use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, Condition, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique login handle.
    pub username: String,
    /// User's unique email address.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub full_name: String,
    /// Portal-wide role.
    pub role: Role,
    pub department: Option<String>,
    /// Academic year label (FE, SE, TE, BE).
    pub year: Option<String>,
    pub semester: Option<String>,
    pub roll_number: Option<String>,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    /// Stored file name of the profile picture.
    pub profile_pic: Option<String>,
    /// Inactive users cannot log in.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Portal-wide user role.
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "student")]
    Student,

    #[sea_orm(string_value = "teacher")]
    Teacher,

    #[sea_orm(string_value = "organizer")]
    Organizer,

    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Role {
    /// Teachers and admins run attendance sessions and edit the timetable.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Teacher | Role::Admin)
    }

    /// Title-cased label, e.g. `Teacher`.
    pub fn title(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Organizer => "Organizer",
            Role::Admin => "Admin",
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_session::Entity")]
    AttendanceSessions,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::attendance_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceSessions.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields required to insert a user. The password is hashed on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    pub department: Option<String>,
    pub year: Option<String>,
    pub semester: Option<String>,
    pub roll_number: Option<String>,
    pub phone: Option<String>,
}

/// Self-editable profile fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    pub profile_pic: Option<String>,
}

impl Model {
    pub fn hash_password(password: &str) -> Result<String, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DbErr::Custom(format!("password hashing failed: {e}")))
    }

    pub fn verify_password(&self, password: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    pub async fn create(db: &DatabaseConnection, new: NewUser) -> Result<Model, DbErr> {
        let now = Utc::now();
        let user = ActiveModel {
            username: Set(new.username),
            email: Set(new.email),
            password_hash: Set(Self::hash_password(&new.password)?),
            full_name: Set(new.full_name),
            role: Set(new.role),
            department: Set(new.department),
            year: Set(new.year),
            semester: Set(new.semester),
            roll_number: Set(new.roll_number),
            phone: Set(new.phone),
            bio: Set(None),
            profile_pic: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        user.insert(db).await
    }

    pub async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Email.eq(email)).one(db).await
    }

    /// Returns any user already holding `email` or `username`.
    pub async fn find_conflicting(
        db: &DatabaseConnection,
        email: &str,
        username: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(
                Condition::any()
                    .add(Column::Email.eq(email))
                    .add(Column::Username.eq(username)),
            )
            .one(db)
            .await
    }

    /// All users ordered by role, then full name.
    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::Role)
            .order_by_asc(Column::FullName)
            .all(db)
            .await
    }

    /// Number of students enrolled in the given department and year.
    pub async fn count_students_in(
        db: &DatabaseConnection,
        department: &str,
        year: &str,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::Role.eq(Role::Student))
            .filter(Column::Department.eq(department))
            .filter(Column::Year.eq(year))
            .count(db)
            .await
    }

    pub async fn count_students_in_department(
        db: &DatabaseConnection,
        department: &str,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::Role.eq(Role::Student))
            .filter(Column::Department.eq(department))
            .count(db)
            .await
    }

    pub async fn count_by_role(db: &DatabaseConnection, role: Role) -> Result<u64, DbErr> {
        Entity::find().filter(Column::Role.eq(role)).count(db).await
    }

    /// Students of a department ordered by year, then roll number.
    pub async fn students_in_department(
        db: &DatabaseConnection,
        department: &str,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Role.eq(Role::Student))
            .filter(Column::Department.eq(department))
            .order_by_asc(Column::Year)
            .order_by_asc(Column::RollNumber)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn update_profile(
        db: &DatabaseConnection,
        id: i64,
        update: ProfileUpdate,
    ) -> Result<Option<Model>, DbErr> {
        let Some(user) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let mut active: ActiveModel = user.into();
        if let Some(full_name) = update.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(phone) = update.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(bio) = update.bio {
            active.bio = Set(Some(bio));
        }
        if let Some(department) = update.department {
            active.department = Set(Some(department));
        }
        if let Some(year) = update.year {
            active.year = Set(Some(year));
        }
        if let Some(profile_pic) = update.profile_pic {
            active.profile_pic = Set(Some(profile_pic));
        }
        active.updated_at = Set(Utc::now());
        active.update(db).await.map(Some)
    }

    pub async fn set_role(
        db: &DatabaseConnection,
        id: i64,
        role: Role,
    ) -> Result<Option<Model>, DbErr> {
        let Some(user) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let mut active: ActiveModel = user.into();
        active.role = Set(role);
        active.updated_at = Set(Utc::now());
        active.update(db).await.map(Some)
    }

    pub async fn toggle_active(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        let Some(user) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let next = !user.is_active;
        let mut active: ActiveModel = user.into();
        active.is_active = Set(next);
        active.updated_at = Set(Utc::now());
        active.update(db).await.map(Some)
    }
}
