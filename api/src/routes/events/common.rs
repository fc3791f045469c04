use crate::routes::memories::common::MemoryResponse;
use serde::{Deserialize, Serialize};
use services::event::{Attendee, Event, EventDetail, EventSummary};
use validator::Validate;

#[derive(Debug, Deserialize, Default)]
pub struct EventQuery {
    pub dept: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    /// `upcoming`, `ongoing`, `completed` or `cancelled`
    pub status: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    pub description: Option<String>,
    /// Omitted or blank means `All`.
    pub department: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Event type is required"))]
    pub event_type: String,
    pub venue: Option<String>,
    /// `YYYY-MM-DD`
    pub event_date: String,
    /// `HH:MM`
    pub event_time: Option<String>,
    /// `YYYY-MM-DD`
    pub reg_deadline: Option<String>,
    #[validate(range(min = 1, message = "max_participants must be at least 1"))]
    pub max_participants: Option<i32>,
    /// Original file name of the banner image.
    pub banner: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct EventResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub department: String,
    pub event_type: String,
    pub venue: Option<String>,
    pub event_date: String,
    pub event_time: Option<String>,
    pub reg_deadline: Option<String>,
    pub max_participants: Option<i32>,
    pub organizer_id: i64,
    pub organizer_name: String,
    pub banner_image: Option<String>,
    pub status: String,
    pub tags: Option<String>,
    pub created_at: String,
}

impl From<Event> for EventResponse {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            department: e.department,
            event_type: e.event_type,
            venue: e.venue,
            event_date: e.event_date.to_string(),
            event_time: e.event_time.map(|t| t.format("%H:%M").to_string()),
            reg_deadline: e.reg_deadline.map(|d| d.to_string()),
            max_participants: e.max_participants,
            organizer_id: e.organizer_id,
            organizer_name: e.organizer_name,
            banner_image: e.banner_image,
            status: e.status.to_string(),
            tags: e.tags,
            created_at: e.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct EventSummaryResponse {
    #[serde(flatten)]
    pub event: EventResponse,
    pub registrations: i64,
}

impl From<EventSummary> for EventSummaryResponse {
    fn from(s: EventSummary) -> Self {
        Self {
            event: s.event.into(),
            registrations: s.registrations,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct AttendeeResponse {
    pub user_id: i64,
    pub full_name: String,
    pub department: Option<String>,
    pub year: Option<String>,
    pub registered_at: String,
}

impl From<Attendee> for AttendeeResponse {
    fn from(a: Attendee) -> Self {
        Self {
            user_id: a.user_id,
            full_name: a.full_name,
            department: a.department,
            year: a.year,
            registered_at: a.registered_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: EventResponse,
    pub registrations: u64,
    pub is_registered: bool,
    pub attendees: Vec<AttendeeResponse>,
    pub memories: Vec<MemoryResponse>,
}

impl From<EventDetail> for EventDetailResponse {
    fn from(d: EventDetail) -> Self {
        Self {
            event: d.event.into(),
            registrations: d.registrations,
            is_registered: d.is_registered,
            attendees: d.attendees.into_iter().map(AttendeeResponse::from).collect(),
            memories: d.memories.into_iter().map(MemoryResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct RegistrationResponse {
    pub event_id: i64,
    pub registered: bool,
}
