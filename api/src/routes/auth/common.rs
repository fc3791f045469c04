use crate::routes::common::UserResponse;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static::lazy_static! {
    pub static ref USERNAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9_.]{3,32}$").unwrap();
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
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

    pub department: Option<String>,
    pub year: Option<String>,
    pub semester: Option<String>,
    pub roll_number: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// A user together with a freshly issued token.
#[derive(Debug, Serialize, Default)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_at: String,
}
