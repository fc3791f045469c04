use serde::{Deserialize, Serialize};
use services::achievement::Achievement;
use validator::Validate;

#[derive(Debug, Deserialize, Default)]
pub struct AchievementQuery {
    pub dept: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAchievementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Achievement type is required"))]
    pub achievement_type: String,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// Original file name of the certificate image.
    pub certificate: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct AchievementResponse {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub title: String,
    pub description: Option<String>,
    pub achievement_type: String,
    pub date: Option<String>,
    pub certificate_image: Option<String>,
    pub department: Option<String>,
    pub approved: bool,
    pub created_at: String,
}

impl From<Achievement> for AchievementResponse {
    fn from(a: Achievement) -> Self {
        Self {
            id: a.id,
            student_id: a.student_id,
            student_name: a.student_name,
            title: a.title,
            description: a.description,
            achievement_type: a.achievement_type,
            date: a.date.map(|d| d.to_string()),
            certificate_image: a.certificate_image,
            department: a.department,
            approved: a.approved,
            created_at: a.created_at.to_rfc3339(),
        }
    }
}
