use crate::routes::achievements::common::AchievementResponse;
use crate::routes::common::UserResponse;
use crate::routes::events::common::EventResponse;
use serde::{Deserialize, Serialize};
use services::user::ProfileOverview;
use validator::Validate;

/// Omitted fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be between 1 and 100 characters"))]
    pub full_name: Option<String>,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    /// Original file name of a new profile picture.
    pub profile_pic: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub events: Vec<EventResponse>,
    pub achievements: Vec<AchievementResponse>,
}

impl From<ProfileOverview> for ProfileResponse {
    fn from(p: ProfileOverview) -> Self {
        Self {
            user: p.user.into(),
            events: p.events.into_iter().map(EventResponse::from).collect(),
            achievements: p
                .achievements
                .into_iter()
                .map(AchievementResponse::from)
                .collect(),
        }
    }
}
