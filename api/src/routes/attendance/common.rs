use crate::routes::common::UserResponse;
use serde::{Deserialize, Serialize};
use services::attendance::{
    AttendanceRecord, AttendanceSession, CreatedSession, HistoryEntry, LiveStatus, RecentMark,
    Roster, RosterEntry, SessionDetail, SessionSummary, StudentHistory,
};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 120, message = "Subject is required"))]
    pub subject: String,
    pub department: Option<String>,
    pub year: Option<String>,
    pub room: Option<String>,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Serialize, Default)]
pub struct SessionResponse {
    pub id: i64,
    pub teacher_id: i64,
    pub department: String,
    pub year: String,
    pub subject: String,
    pub room: String,
    pub token: String,
    pub date: String,
    /// `HH:MM`
    pub time_from: String,
    pub expires_at: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<AttendanceSession> for SessionResponse {
    fn from(s: AttendanceSession) -> Self {
        Self {
            id: s.id,
            teacher_id: s.teacher_id,
            department: s.department,
            year: s.year,
            subject: s.subject,
            room: s.room,
            token: s.token,
            date: s.date.to_string(),
            time_from: s.time_from.format("%H:%M").to_string(),
            expires_at: s.expires_at.to_rfc3339(),
            is_active: s.is_active,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct CreatedSessionResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub qr_data: String,
    pub mark_path: String,
}

impl From<CreatedSession> for CreatedSessionResponse {
    fn from(c: CreatedSession) -> Self {
        Self {
            session: c.session.into(),
            qr_data: c.qr_data,
            mark_path: c.mark_path,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct SessionSummaryResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub present_count: i64,
}

impl From<SessionSummary> for SessionSummaryResponse {
    fn from(s: SessionSummary) -> Self {
        Self {
            session: s.session.into(),
            present_count: s.present_count,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct RecordResponse {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub roll_number: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    pub marked_at: String,
}

impl From<AttendanceRecord> for RecordResponse {
    fn from(r: AttendanceRecord) -> Self {
        Self {
            id: r.id,
            student_id: r.student_id,
            student_name: r.student_name,
            roll_number: r.roll_number,
            department: r.department,
            year: r.year,
            marked_at: r.marked_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct SessionDetailResponse {
    pub session: SessionResponse,
    pub records: Vec<RecordResponse>,
    pub present_count: u64,
    pub total_students: u64,
}

impl From<SessionDetail> for SessionDetailResponse {
    fn from(d: SessionDetail) -> Self {
        Self {
            session: d.session.into(),
            records: d.records.into_iter().map(RecordResponse::from).collect(),
            present_count: d.present_count,
            total_students: d.total_students,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct RecentMarkResponse {
    pub student_name: String,
    pub marked_at: String,
}

impl From<RecentMark> for RecentMarkResponse {
    fn from(m: RecentMark) -> Self {
        Self {
            student_name: m.student_name,
            marked_at: m.marked_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct LiveStatusResponse {
    pub session_id: i64,
    pub subject: String,
    pub count: u64,
    pub is_active: bool,
    pub expires_at: String,
    pub recent: Vec<RecentMarkResponse>,
}

impl From<LiveStatus> for LiveStatusResponse {
    fn from(l: LiveStatus) -> Self {
        Self {
            session_id: l.session_id,
            subject: l.subject,
            count: l.count,
            is_active: l.is_active,
            expires_at: l.expires_at.to_rfc3339(),
            recent: l.recent.into_iter().map(RecentMarkResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct MarkResponse {
    pub already_marked: bool,
    pub subject: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct CloseResponse {
    pub session_id: i64,
    pub closed: bool,
}

#[derive(Debug, Serialize, Default)]
pub struct HistoryEntryResponse {
    pub session_id: i64,
    pub subject: String,
    pub department: String,
    pub date: String,
    pub time_from: String,
    pub marked_at: String,
}

impl From<HistoryEntry> for HistoryEntryResponse {
    fn from(h: HistoryEntry) -> Self {
        Self {
            session_id: h.session_id,
            subject: h.subject,
            department: h.department,
            date: h.date.to_string(),
            time_from: h.time_from.format("%H:%M").to_string(),
            marked_at: h.marked_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct MyAttendanceResponse {
    pub records: Vec<HistoryEntryResponse>,
    pub attended: usize,
    pub total_sessions: u64,
}

impl From<StudentHistory> for MyAttendanceResponse {
    fn from(h: StudentHistory) -> Self {
        Self {
            attended: h.records.len(),
            records: h.records.into_iter().map(HistoryEntryResponse::from).collect(),
            total_sessions: h.total_sessions,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct RosterEntryResponse {
    pub student: UserResponse,
    pub attended: i64,
}

impl From<RosterEntry> for RosterEntryResponse {
    fn from(e: RosterEntry) -> Self {
        Self {
            student: e.student.into(),
            attended: e.attended,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct RosterResponse {
    pub department: String,
    pub students: Vec<RosterEntryResponse>,
}

impl From<Roster> for RosterResponse {
    fn from(r: Roster) -> Self {
        Self {
            department: r.department,
            students: r.students.into_iter().map(RosterEntryResponse::from).collect(),
        }
    }
}
