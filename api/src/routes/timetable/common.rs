use chrono::NaiveTime;
use db::models::timetable_entry::Weekday;
use serde::{Deserialize, Serialize};
use services::timetable::{DaySchedule, Timetable, TimetableEntry};
use validator::Validate;

#[derive(Debug, Deserialize, Default)]
pub struct TimetableQuery {
    pub department: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddEntryRequest {
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, message = "Year is required"))]
    pub year: String,
    #[validate(length(min = 1, message = "Semester is required"))]
    pub semester: String,
    pub day: Weekday,
    #[validate(range(min = 1, max = 12, message = "Period must be between 1 and 12"))]
    pub period: i32,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub room: Option<String>,
    /// `HH:MM`
    pub time_from: Option<String>,
    /// `HH:MM`
    pub time_to: Option<String>,
}

fn fmt_time(t: Option<NaiveTime>) -> Option<String> {
    t.map(|t| t.format("%H:%M").to_string())
}

#[derive(Debug, Serialize, Default)]
pub struct EntryResponse {
    pub id: i64,
    pub department: String,
    pub year: String,
    pub semester: String,
    pub day: String,
    pub period: i32,
    pub subject: String,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub room: Option<String>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
}

impl From<TimetableEntry> for EntryResponse {
    fn from(e: TimetableEntry) -> Self {
        Self {
            id: e.id,
            department: e.department,
            year: e.year,
            semester: e.semester,
            day: e.day.to_string(),
            period: e.period,
            subject: e.subject,
            teacher_id: e.teacher_id,
            teacher_name: e.teacher_name,
            room: e.room,
            time_from: fmt_time(e.time_from),
            time_to: fmt_time(e.time_to),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct DayResponse {
    pub day: String,
    pub entries: Vec<EntryResponse>,
}

impl From<DaySchedule> for DayResponse {
    fn from(d: DaySchedule) -> Self {
        Self {
            day: d.day.to_string(),
            entries: d.entries.into_iter().map(EntryResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct TimetableResponse {
    pub department: Option<String>,
    pub year: Option<String>,
    pub days: Vec<DayResponse>,
}

impl From<Timetable> for TimetableResponse {
    fn from(t: Timetable) -> Self {
        Self {
            department: t.department,
            year: t.year,
            days: t.days.into_iter().map(DayResponse::from).collect(),
        }
    }
}
