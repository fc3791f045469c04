use crate::context::AuthContext;
use crate::error::{ServiceError, ServiceResult};
use crate::upload;
use chrono::{DateTime, NaiveDate, Utc};
use db::models::achievement::{self, NewAchievement};
use db::models::user;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::info;

pub use db::models::achievement::Model as Achievement;

#[derive(Debug, Clone, Default)]
pub struct SubmitAchievement {
    pub title: String,
    pub description: Option<String>,
    pub achievement_type: String,
    pub date: Option<NaiveDate>,
    /// Original file name of the certificate image.
    pub certificate: Option<String>,
    /// Defaults to the submitter's department.
    pub department: Option<String>,
}

pub struct AchievementService;

impl AchievementService {
    /// Public wall of approved achievements.
    pub async fn list(db: &DatabaseConnection, department: Option<String>) -> ServiceResult<Vec<Achievement>> {
        Ok(achievement::Model::approved(db, department.filter(|d| !d.is_empty())).await?)
    }

    /// Any signed-in user may submit; entries wait for an admin.
    pub async fn submit(
        db: &DatabaseConnection,
        ctx: AuthContext,
        params: SubmitAchievement,
        now: DateTime<Utc>,
    ) -> ServiceResult<Achievement> {
        let title = params.title.trim();
        if title.is_empty() {
            return Err(ServiceError::Invalid("Title is required".into()));
        }
        let certificate_image = match params.certificate.filter(|c| !c.is_empty()) {
            Some(name) => Some(upload::stored_name("cert", &name, now).ok_or_else(|| {
                ServiceError::Invalid("Certificate must be an image file".into())
            })?),
            None => None,
        };

        let me = user::Entity::find_by_id(ctx.user_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;

        let achievement = achievement::Model::create(
            db,
            NewAchievement {
                student_id: me.id,
                student_name: me.full_name,
                title: title.to_string(),
                description: params.description,
                achievement_type: params.achievement_type,
                date: params.date,
                certificate_image,
                department: params
                    .department
                    .filter(|d| !d.trim().is_empty())
                    .or(me.department),
            },
        )
        .await?;

        info!(achievement_id = achievement.id, student_id = ctx.user_id, "Achievement submitted");
        Ok(achievement)
    }

    pub async fn pending(db: &DatabaseConnection, ctx: AuthContext) -> ServiceResult<Vec<Achievement>> {
        require_admin(&ctx)?;
        Ok(achievement::Model::pending(db).await?)
    }

    pub async fn approve(db: &DatabaseConnection, ctx: AuthContext, id: i64) -> ServiceResult<Achievement> {
        require_admin(&ctx)?;
        let achievement = achievement::Model::approve(db, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Achievement not found".into()))?;
        info!(achievement_id = id, approved_by = ctx.user_id, "Achievement approved");
        Ok(achievement)
    }
}

fn require_admin(ctx: &AuthContext) -> ServiceResult<()> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden("Admin access required".into()))
    }
}
