use crate::context::AuthContext;
use crate::error::{ServiceError, ServiceResult};
use db::models::notice::{self, AUDIENCE_ALL, NewNotice, NoticeFilter};
use db::models::user::{self, Role};
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::info;

pub use db::models::notice::Model as Notice;

pub const DEFAULT_CATEGORY: &str = "general";

/// Characters of the body carried into the WhatsApp text.
const WHATSAPP_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Default)]
pub struct PostNotice {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    pub is_important: bool,
}

/// Plain text ready to paste into a WhatsApp group.
pub fn whatsapp_message(
    title: &str,
    content: &str,
    author: &str,
    role: Role,
    department: &str,
    year: &str,
) -> String {
    let excerpt: String = content.chars().take(WHATSAPP_EXCERPT_CHARS).collect();
    format!(
        "📢 *CampusConnect*\n*{title}*\n\n{excerpt}\n\n_From: {author} | {}_\n_Dept: {department} | Year: {year}_",
        role.title()
    )
}

pub struct NoticeService;

impl NoticeService {
    /// Students only see notices addressed to their department and year.
    pub async fn list(
        db: &DatabaseConnection,
        ctx: AuthContext,
        category: Option<String>,
    ) -> ServiceResult<Vec<Notice>> {
        let audience = if ctx.role == Role::Student {
            let me = user::Entity::find_by_id(ctx.user_id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
            Some((me.department.unwrap_or_default(), me.year.unwrap_or_default()))
        } else {
            None
        };

        let filter = NoticeFilter {
            audience,
            category: category.filter(|c| !c.is_empty()),
        };
        Ok(notice::Model::list(db, filter).await?)
    }

    pub async fn post(
        db: &DatabaseConnection,
        ctx: AuthContext,
        params: PostNotice,
    ) -> ServiceResult<Notice> {
        if ctx.role == Role::Student {
            return Err(ServiceError::Forbidden("Students cannot post notices".into()));
        }

        let author = user::Entity::find_by_id(ctx.user_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;

        let or_all = |v: Option<String>| {
            v.filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| AUDIENCE_ALL.into())
        };
        let department = or_all(params.department);
        let year = or_all(params.year);
        let category = params
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.into());

        let whatsapp = whatsapp_message(
            &params.title,
            &params.content,
            &author.full_name,
            ctx.role,
            &department,
            &year,
        );

        let notice = notice::Model::create(
            db,
            NewNotice {
                title: params.title,
                content: params.content,
                category,
                author_id: author.id,
                author_name: author.full_name,
                author_role: ctx.role.to_string(),
                department,
                year,
                is_important: params.is_important,
                whatsapp_message: whatsapp,
            },
        )
        .await?;

        info!(notice_id = notice.id, author_id = ctx.user_id, "Notice posted");
        Ok(notice)
    }
}
