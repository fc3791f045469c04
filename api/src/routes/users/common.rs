use crate::routes::auth::common::USERNAME_REGEX;
use db::models::user::Role;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(regex(
        path = *USERNAME_REGEX,
        message = "Username must be 3-32 letters, digits, dots or underscores"
    ))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    pub role: Role,
    pub department: Option<String>,
    pub year: Option<String>,
    pub semester: Option<String>,
    pub roll_number: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}
