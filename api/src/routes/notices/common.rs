use serde::{Deserialize, Serialize};
use services::notice::Notice;
use validator::Validate;

#[derive(Debug, Deserialize, Default)]
pub struct NoticeQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoticeRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub category: Option<String>,
    /// Omitted or blank means `All`.
    pub department: Option<String>,
    pub year: Option<String>,
    #[serde(default)]
    pub is_important: bool,
}

#[derive(Debug, Serialize, Default)]
pub struct NoticeResponse {
    pub id: i64,
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
    pub created_at: String,
}

impl From<Notice> for NoticeResponse {
    fn from(n: Notice) -> Self {
        Self {
            id: n.id,
            title: n.title,
            content: n.content,
            category: n.category,
            author_id: n.author_id,
            author_name: n.author_name,
            author_role: n.author_role,
            department: n.department,
            year: n.year,
            is_important: n.is_important,
            whatsapp_message: n.whatsapp_message,
            created_at: n.created_at.to_rfc3339(),
        }
    }
}
