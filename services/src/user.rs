use crate::context::AuthContext;
use crate::error::{ServiceError, ServiceResult};
use crate::upload;
use chrono::{DateTime, Utc};
use db::models::achievement;
use db::models::event_registration;
use db::models::user::{self, NewUser, ProfileUpdate, Role};
use sea_orm::{DatabaseConnection, EntityTrait, SqlErr};
use tracing::info;

pub use db::models::user::Model as User;

/// Self-service registration fields. The role is always `student`.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub department: Option<String>,
    pub year: Option<String>,
    pub semester: Option<String>,
    pub roll_number: Option<String>,
    pub phone: Option<String>,
}

impl Registration {
    fn into_new_user(self) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
            password: self.password,
            full_name: self.full_name,
            role: Role::Student,
            department: self.department,
            year: self.year,
            semester: self.semester,
            roll_number: self.roll_number,
            phone: self.phone,
        }
    }
}

/// A user with the events they joined and the achievements they submitted.
#[derive(Debug, Clone)]
pub struct ProfileOverview {
    pub user: User,
    pub events: Vec<db::models::event::Model>,
    pub achievements: Vec<achievement::Model>,
}

/// Fields a user may change on their own profile. `None` keeps the old value.
#[derive(Debug, Clone, Default)]
pub struct ProfileEdit {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    /// Original file name of a new profile picture.
    pub profile_pic: Option<String>,
}

pub struct UserService;

impl UserService {
    pub async fn register(db: &DatabaseConnection, reg: Registration) -> ServiceResult<User> {
        Self::insert(db, reg.into_new_user()).await
    }

    /// Admin-only creation with an arbitrary role.
    pub async fn create(
        db: &DatabaseConnection,
        ctx: AuthContext,
        new: NewUser,
    ) -> ServiceResult<User> {
        require_admin(&ctx)?;
        let user = Self::insert(db, new).await?;
        info!(user_id = user.id, role = %user.role, created_by = ctx.user_id, "User created by admin");
        Ok(user)
    }

    /// Checks credentials. Unknown email and wrong password are reported the same way.
    pub async fn authenticate(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> ServiceResult<User> {
        let invalid = || ServiceError::Unauthorized("Invalid email or password".into());

        let user = user::Model::find_by_email(db, email.trim())
            .await?
            .ok_or_else(invalid)?;
        if !user.verify_password(password) {
            return Err(invalid());
        }
        if !user.is_active {
            return Err(ServiceError::Forbidden("Account is deactivated".into()));
        }
        Ok(user)
    }

    pub async fn profile(db: &DatabaseConnection, ctx: AuthContext) -> ServiceResult<User> {
        user::Entity::find_by_id(ctx.user_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))
    }

    pub async fn overview(db: &DatabaseConnection, ctx: AuthContext) -> ServiceResult<ProfileOverview> {
        let user = Self::profile(db, ctx).await?;
        let events = event_registration::Model::events_for_user(db, ctx.user_id).await?;
        let achievements = achievement::Model::for_student(db, ctx.user_id).await?;
        Ok(ProfileOverview {
            user,
            events,
            achievements,
        })
    }

    pub async fn update_profile(
        db: &DatabaseConnection,
        ctx: AuthContext,
        edit: ProfileEdit,
        now: DateTime<Utc>,
    ) -> ServiceResult<User> {
        let full_name = match edit.full_name {
            Some(name) if name.trim().is_empty() => {
                return Err(ServiceError::Invalid("Full name cannot be blank".into()));
            }
            other => other.map(|n| n.trim().to_string()),
        };
        let profile_pic = match edit.profile_pic.filter(|p| !p.is_empty()) {
            Some(name) => Some(
                upload::stored_name(&format!("pp_{}", ctx.user_id), &name, now).ok_or_else(|| {
                    ServiceError::Invalid("Profile picture must be an image file".into())
                })?,
            ),
            None => None,
        };

        let user = user::Model::update_profile(
            db,
            ctx.user_id,
            ProfileUpdate {
                full_name,
                phone: edit.phone,
                bio: edit.bio,
                department: edit.department,
                year: edit.year,
                profile_pic,
            },
        )
        .await?
        .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
        info!(user_id = ctx.user_id, "Profile updated");
        Ok(user)
    }

    pub async fn list(db: &DatabaseConnection, ctx: AuthContext) -> ServiceResult<Vec<User>> {
        require_admin(&ctx)?;
        Ok(user::Model::list_all(db).await?)
    }

    pub async fn change_role(
        db: &DatabaseConnection,
        ctx: AuthContext,
        user_id: i64,
        role: Role,
    ) -> ServiceResult<User> {
        require_admin(&ctx)?;
        let user = user::Model::set_role(db, user_id, role)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
        info!(user_id, role = %role, changed_by = ctx.user_id, "User role changed");
        Ok(user)
    }

    pub async fn toggle_active(
        db: &DatabaseConnection,
        ctx: AuthContext,
        user_id: i64,
    ) -> ServiceResult<User> {
        require_admin(&ctx)?;
        if user_id == ctx.user_id {
            return Err(ServiceError::Invalid(
                "You cannot deactivate your own account".into(),
            ));
        }
        let user = user::Model::toggle_active(db, user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
        info!(user_id, is_active = user.is_active, changed_by = ctx.user_id, "User active flag toggled");
        Ok(user)
    }

    async fn insert(db: &DatabaseConnection, new: NewUser) -> ServiceResult<User> {
        if user::Model::find_conflicting(db, &new.email, &new.username)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(
                "A user with this email or username already exists".into(),
            ));
        }
        // The pre-check can race a concurrent insert; the unique index decides.
        match user::Model::create(db, new).await {
            Ok(user) => Ok(user),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(ServiceError::Conflict(
                    "A user with this email or username already exists".into(),
                ))
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn require_admin(ctx: &AuthContext) -> ServiceResult<()> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden("Admin access required".into()))
    }
}
