use crate::context::AuthContext;
use crate::error::{ServiceError, ServiceResult};
use crate::upload;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use db::models::event::{self, DEPARTMENT_ALL, EventFilter, EventStatus, NewEvent};
use db::models::event_registration::{self, RegisterOutcome};
use db::models::memory;
use db::models::user::{self, Role};
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::{info, warn};

pub use db::models::event::Model as Event;

/// Registrations shown on an event page.
pub const ATTENDEE_LIMIT: u64 = 30;

#[derive(Debug, Clone)]
pub struct EventSummary {
    pub event: Event,
    pub registrations: i64,
}

#[derive(Debug, Clone)]
pub struct Attendee {
    pub user_id: i64,
    pub full_name: String,
    pub department: Option<String>,
    pub year: Option<String>,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct EventDetail {
    pub event: Event,
    /// First registrations, at most `ATTENDEE_LIMIT`.
    pub attendees: Vec<Attendee>,
    pub registrations: u64,
    /// Always false for anonymous viewers.
    pub is_registered: bool,
    pub memories: Vec<memory::Model>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered,
    AlreadyRegistered,
}

#[derive(Debug, Clone, Default)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub event_type: String,
    pub venue: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub reg_deadline: Option<NaiveDate>,
    pub max_participants: Option<i32>,
    /// Original file name of the banner image.
    pub banner: Option<String>,
    pub tags: Option<String>,
}

pub struct EventService;

impl EventService {
    pub async fn list(db: &DatabaseConnection, filter: EventFilter) -> ServiceResult<Vec<EventSummary>> {
        let events = event::Model::list(db, filter).await?;
        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        let counts = event_registration::Model::counts_for_events(db, &ids).await?;

        Ok(events
            .into_iter()
            .map(|event| EventSummary {
                registrations: counts.get(&event.id).copied().unwrap_or(0),
                event,
            })
            .collect())
    }

    pub async fn detail(
        db: &DatabaseConnection,
        viewer: Option<AuthContext>,
        event_id: i64,
    ) -> ServiceResult<EventDetail> {
        let event = find_event(db, event_id).await?;

        let attendees = event_registration::Model::attendees(db, event_id, ATTENDEE_LIMIT)
            .await?
            .into_iter()
            .filter_map(|(reg, user)| {
                user.map(|u| Attendee {
                    user_id: u.id,
                    full_name: u.full_name,
                    department: u.department,
                    year: u.year,
                    registered_at: reg.registered_at,
                })
            })
            .collect();
        let registrations = event_registration::Model::count_for_event(db, event_id).await?;
        let is_registered = match viewer {
            Some(ctx) => event_registration::Model::is_registered(db, event_id, ctx.user_id).await?,
            None => false,
        };
        let memories = memory::Model::for_event(db, event_id).await?;

        Ok(EventDetail {
            event,
            attendees,
            registrations,
            is_registered,
            memories,
        })
    }

    /// Capacity is enforced by the insert itself; a full event is a conflict.
    pub async fn register(
        db: &DatabaseConnection,
        ctx: AuthContext,
        event_id: i64,
        now: DateTime<Utc>,
    ) -> ServiceResult<Registration> {
        let event = find_event(db, event_id).await?;
        if matches!(event.status, EventStatus::Completed | EventStatus::Cancelled) {
            return Err(ServiceError::Invalid(format!(
                "Registration is closed for {} events",
                event.status
            )));
        }
        if event.reg_deadline.is_some_and(|deadline| now.date_naive() > deadline) {
            return Err(ServiceError::Invalid("The registration deadline has passed".into()));
        }

        match event_registration::Model::register(db, event_id, ctx.user_id, now).await? {
            RegisterOutcome::Registered => {
                info!(event_id, user_id = ctx.user_id, "Registered for event");
                Ok(Registration::Registered)
            }
            RegisterOutcome::AlreadyRegistered => Ok(Registration::AlreadyRegistered),
            RegisterOutcome::Full => {
                warn!(event_id, user_id = ctx.user_id, "Registration refused, event is full");
                Err(ServiceError::Conflict("Event is full".into()))
            }
        }
    }

    /// Returns false when the caller was not registered.
    pub async fn unregister(db: &DatabaseConnection, ctx: AuthContext, event_id: i64) -> ServiceResult<bool> {
        find_event(db, event_id).await?;
        let removed = event_registration::Model::unregister(db, event_id, ctx.user_id).await?;
        if removed {
            info!(event_id, user_id = ctx.user_id, "Unregistered from event");
        }
        Ok(removed)
    }

    pub async fn create(
        db: &DatabaseConnection,
        ctx: AuthContext,
        params: CreateEvent,
        now: DateTime<Utc>,
    ) -> ServiceResult<Event> {
        if !matches!(ctx.role, Role::Organizer | Role::Admin) {
            return Err(ServiceError::Forbidden(
                "Only organizers and admins can create events".into(),
            ));
        }
        let title = params.title.trim();
        if title.is_empty() {
            return Err(ServiceError::Invalid("Title is required".into()));
        }
        if params.max_participants.is_some_and(|n| n < 1) {
            return Err(ServiceError::Invalid("max_participants must be at least 1".into()));
        }
        if params.reg_deadline.is_some_and(|d| d > params.event_date) {
            return Err(ServiceError::Invalid(
                "Registration deadline cannot be after the event date".into(),
            ));
        }
        let banner_image = match params.banner.filter(|b| !b.is_empty()) {
            Some(name) => Some(
                upload::stored_name("ev", &name, now)
                    .ok_or_else(|| ServiceError::Invalid("Banner must be an image file".into()))?,
            ),
            None => None,
        };

        let organizer = user::Entity::find_by_id(ctx.user_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;

        let event = event::Model::create(
            db,
            NewEvent {
                title: title.to_string(),
                description: params.description,
                department: params
                    .department
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| DEPARTMENT_ALL.into()),
                event_type: params.event_type,
                venue: params.venue,
                event_date: params.event_date,
                event_time: params.event_time,
                reg_deadline: params.reg_deadline,
                max_participants: params.max_participants,
                organizer_id: organizer.id,
                organizer_name: organizer.full_name,
                banner_image,
                tags: params.tags,
            },
        )
        .await?;

        info!(event_id = event.id, organizer_id = ctx.user_id, "Event created");
        Ok(event)
    }
}

async fn find_event(db: &DatabaseConnection, event_id: i64) -> ServiceResult<Event> {
    event::Entity::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Event not found".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use db::models::user::NewUser;
    use db::test_utils::setup_test_db;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 20, 9, 0, 0).unwrap()
    }

    async fn add_user(db: &DatabaseConnection, username: &str, role: Role) -> AuthContext {
        let u = user::Model::create(
            db,
            NewUser {
                username: username.into(),
                email: format!("{username}@campus.test"),
                password: "secret123".into(),
                full_name: format!("{username} full"),
                role,
                department: Some("Computer Engineering".into()),
                year: Some("SE".into()),
                semester: None,
                roll_number: None,
                phone: None,
            },
        )
        .await
        .unwrap();
        AuthContext::new(u.id, role)
    }

    fn hackathon(max: Option<i32>) -> CreateEvent {
        CreateEvent {
            title: "Hackathon".into(),
            event_type: "technical".into(),
            event_date: NaiveDate::from_ymd_opt(2025, 10, 4).unwrap(),
            max_participants: max,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_applies_defaults_and_permissions() {
        let db = setup_test_db().await;
        let org = add_user(&db, "org", Role::Organizer).await;
        let teacher = add_user(&db, "prof", Role::Teacher).await;

        let mut params = hackathon(None);
        params.banner = Some("Poster Final.PNG".into());
        let ev = EventService::create(&db, org, params, now()).await.unwrap();
        assert_eq!(ev.department, "All");
        assert_eq!(ev.status, EventStatus::Upcoming);
        assert_eq!(ev.organizer_name, "org full");
        assert!(ev.banner_image.unwrap().ends_with("_Poster_Final.PNG"));

        assert!(matches!(
            EventService::create(&db, teacher, hackathon(None), now()).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            EventService::create(&db, org, hackathon(Some(0)), now()).await,
            Err(ServiceError::Invalid(_))
        ));
        let mut pdf = hackathon(None);
        pdf.banner = Some("poster.pdf".into());
        assert!(matches!(
            EventService::create(&db, org, pdf, now()).await,
            Err(ServiceError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn registration_lifecycle() {
        let db = setup_test_db().await;
        let org = add_user(&db, "org", Role::Organizer).await;
        let a = add_user(&db, "a", Role::Student).await;
        let b = add_user(&db, "b", Role::Student).await;
        let ev = EventService::create(&db, org, hackathon(Some(1)), now()).await.unwrap();

        assert_eq!(
            EventService::register(&db, a, ev.id, now()).await.unwrap(),
            Registration::Registered
        );
        assert_eq!(
            EventService::register(&db, a, ev.id, now()).await.unwrap(),
            Registration::AlreadyRegistered
        );
        assert!(matches!(
            EventService::register(&db, b, ev.id, now()).await,
            Err(ServiceError::Conflict(msg)) if msg == "Event is full"
        ));

        let detail = EventService::detail(&db, Some(a), ev.id).await.unwrap();
        assert!(detail.is_registered);
        assert_eq!(detail.registrations, 1);
        assert_eq!(detail.attendees[0].full_name, "a full");
        assert!(!EventService::detail(&db, None, ev.id).await.unwrap().is_registered);

        assert!(EventService::unregister(&db, a, ev.id).await.unwrap());
        assert!(!EventService::unregister(&db, a, ev.id).await.unwrap());
        assert_eq!(
            EventService::register(&db, b, ev.id, now()).await.unwrap(),
            Registration::Registered
        );

        let listed = EventService::list(&db, EventFilter::default()).await.unwrap();
        assert_eq!(listed[0].registrations, 1);

        assert!(matches!(
            EventService::register(&db, a, 9999, now()).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn deadline_closes_registration() {
        let db = setup_test_db().await;
        let org = add_user(&db, "org", Role::Organizer).await;
        let a = add_user(&db, "a", Role::Student).await;
        let mut params = hackathon(None);
        params.reg_deadline = NaiveDate::from_ymd_opt(2025, 9, 19);
        let ev = EventService::create(&db, org, params, now()).await.unwrap();

        assert!(matches!(
            EventService::register(&db, a, ev.id, now()).await,
            Err(ServiceError::Invalid(_))
        ));
    }
}
