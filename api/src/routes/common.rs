use chrono::{NaiveDate, NaiveTime};
use db::models::user::Model as UserModel;
use serde::Serialize;
use validator::ValidationErrors;

/// Flattens validator messages into one `; `-separated string.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// Accepts `HH:MM` or `HH:MM:SS`.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// `YYYY-MM-DD`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Parses an optional field, treating blank as absent. `Err` carries the
/// message for a malformed value.
pub fn parse_optional<T>(
    raw: Option<&str>,
    parse: fn(&str) -> Option<T>,
    expected: &str,
) -> Result<Option<T>, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse(s)
            .map(Some)
            .ok_or_else(|| format!("Invalid value '{s}', expected {expected}")),
    }
}

/// Public view of a user. Never includes the password hash.
#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub department: Option<String>,
    pub year: Option<String>,
    pub semester: Option<String>,
    pub roll_number: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role.to_string(),
            department: user.department,
            year: user.year,
            semester: user.semester,
            roll_number: user.roll_number,
            phone: user.phone,
            bio: user.bio,
            profile_pic: user.profile_pic,
            is_active: user.is_active,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}
