use crate::context::AuthContext;
use crate::error::{ServiceError, ServiceResult};
use chrono::NaiveTime;
use db::models::timetable_entry::{self, NewEntry, Weekday};
use db::models::user::{self, Role};
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::info;

pub use db::models::timetable_entry::Model as TimetableEntry;

/// Class shown to organizers and admins when none is requested.
pub const DEFAULT_DEPARTMENT: &str = "Computer Engineering";
pub const DEFAULT_YEAR: &str = "SE";

/// Entries of one teaching day, ordered by period.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    pub day: Weekday,
    pub entries: Vec<TimetableEntry>,
}

#[derive(Debug, Clone)]
pub struct Timetable {
    /// Class the schedule belongs to; `None` for a teacher's own schedule.
    pub department: Option<String>,
    pub year: Option<String>,
    /// Always six days, Monday first.
    pub days: Vec<DaySchedule>,
}

#[derive(Debug, Clone)]
pub struct AddEntry {
    pub department: String,
    pub year: String,
    pub semester: String,
    pub day: Weekday,
    pub period: i32,
    pub subject: String,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub room: Option<String>,
    pub time_from: Option<NaiveTime>,
    pub time_to: Option<NaiveTime>,
}

pub struct TimetableService;

impl TimetableService {
    /// Students get their class, teachers the periods they teach, everyone
    /// else the requested class.
    pub async fn view(
        db: &DatabaseConnection,
        ctx: AuthContext,
        department: Option<String>,
        year: Option<String>,
    ) -> ServiceResult<Timetable> {
        match ctx.role {
            Role::Student => {
                let me = user::Entity::find_by_id(ctx.user_id)
                    .one(db)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
                let department = me.department.unwrap_or_default();
                let year = me.year.unwrap_or_default();
                let entries = timetable_entry::Model::for_class(db, &department, &year).await?;
                Ok(Timetable {
                    department: Some(department),
                    year: Some(year),
                    days: group_by_day(entries),
                })
            }
            Role::Teacher => {
                let entries = timetable_entry::Model::for_teacher(db, ctx.user_id).await?;
                Ok(Timetable {
                    department: None,
                    year: None,
                    days: group_by_day(entries),
                })
            }
            Role::Organizer | Role::Admin => {
                let department = department
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| DEFAULT_DEPARTMENT.into());
                let year = year
                    .filter(|y| !y.is_empty())
                    .unwrap_or_else(|| DEFAULT_YEAR.into());
                let entries = timetable_entry::Model::for_class(db, &department, &year).await?;
                Ok(Timetable {
                    department: Some(department),
                    year: Some(year),
                    days: group_by_day(entries),
                })
            }
        }
    }

    pub async fn add(
        db: &DatabaseConnection,
        ctx: AuthContext,
        params: AddEntry,
    ) -> ServiceResult<TimetableEntry> {
        require_staff(&ctx)?;
        if params.period < 1 {
            return Err(ServiceError::Invalid("Period must be at least 1".into()));
        }
        if let (Some(from), Some(to)) = (params.time_from, params.time_to) {
            if to <= from {
                return Err(ServiceError::Invalid(
                    "time_to must be later than time_from".into(),
                ));
            }
        }

        let teacher_name = match (params.teacher_name, params.teacher_id) {
            (Some(name), _) if !name.trim().is_empty() => Some(name),
            (_, Some(teacher_id)) => {
                let teacher = user::Entity::find_by_id(teacher_id)
                    .one(db)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("Teacher not found".into()))?;
                Some(teacher.full_name)
            }
            _ => None,
        };

        let entry = timetable_entry::Model::create(
            db,
            NewEntry {
                department: params.department,
                year: params.year,
                semester: params.semester,
                day: params.day,
                period: params.period,
                subject: params.subject,
                teacher_id: params.teacher_id,
                teacher_name,
                room: params.room,
                time_from: params.time_from,
                time_to: params.time_to,
                created_by: ctx.user_id,
            },
        )
        .await?;

        info!(entry_id = entry.id, created_by = ctx.user_id, "Timetable entry added");
        Ok(entry)
    }

    pub async fn delete(db: &DatabaseConnection, ctx: AuthContext, entry_id: i64) -> ServiceResult<()> {
        require_staff(&ctx)?;
        if !timetable_entry::Model::delete_by_id(db, entry_id).await? {
            return Err(ServiceError::NotFound("Timetable entry not found".into()));
        }
        info!(entry_id, deleted_by = ctx.user_id, "Timetable entry deleted");
        Ok(())
    }
}

fn require_staff(ctx: &AuthContext) -> ServiceResult<()> {
    if ctx.role.is_staff() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "Only teachers and admins can edit the timetable".into(),
        ))
    }
}

/// Buckets entries into Monday..Saturday, each ordered by period.
pub fn group_by_day(entries: Vec<TimetableEntry>) -> Vec<DaySchedule> {
    let mut days: Vec<DaySchedule> = Weekday::ALL
        .iter()
        .map(|&day| DaySchedule {
            day,
            entries: Vec::new(),
        })
        .collect();

    for entry in entries {
        if let Some(slot) = days.iter_mut().find(|d| d.day == entry.day) {
            slot.entries.push(entry);
        }
    }
    for day in &mut days {
        day.entries.sort_by_key(|e| e.period);
    }
    days
}
