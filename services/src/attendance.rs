//! Attendance sessions: creation, marking, live status and closing.
//!
//! A session is `Active` until it is closed by its owner or observed past its
//! `expires_at`. Both terminal states are stored as `is_active = false`.
//! Expiry is lazy: there is no timer, the first call that sees an overdue
//! session flips the flag with a conditional update.

use crate::context::AuthContext;
use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use db::models::attendance_record::{self, NewRecord};
use db::models::attendance_session::{self, NewSession};
use db::models::user::{self, Role};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use tracing::{info, warn};
use util::config;

pub use db::models::attendance_record::Model as AttendanceRecord;
pub use db::models::attendance_session::Model as AttendanceSession;

/// Students shown in a live status feed.
pub const RECENT_MARKS: u64 = 5;

/// Sessions returned by `list_for_teacher`.
pub const TEACHER_SESSION_LIMIT: u64 = 20;

#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("Attendance session is expired or invalid")]
    SessionNotFound,

    #[error("This attendance session has expired")]
    SessionExpired,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type AttendanceResult<T> = Result<T, AttendanceError>;

#[derive(Debug, Clone, Default)]
pub struct CreateSession {
    pub subject: String,
    /// Defaults to the caller's department.
    pub department: Option<String>,
    pub year: Option<String>,
    pub room: Option<String>,
    /// Defaults to `ATTENDANCE_DEFAULT_DURATION_MINUTES`.
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub session: AttendanceSession,
    /// Payload a client renders as a QR code, `<app-id>:<token>`.
    pub qr_data: String,
    pub mark_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked { subject: String },
    AlreadyMarked,
}

#[derive(Debug, Clone)]
pub struct RecentMark {
    pub student_name: String,
    pub marked_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LiveStatus {
    pub session_id: i64,
    pub subject: String,
    pub count: u64,
    pub is_active: bool,
    pub expires_at: DateTime<Utc>,
    pub recent: Vec<RecentMark>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseOutcome {
    pub session_id: i64,
    /// False when the session was already inactive or not the caller's.
    pub closed: bool,
}

#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub session: AttendanceSession,
    pub present_count: i64,
}

#[derive(Debug, Clone)]
pub struct SessionDetail {
    pub session: AttendanceSession,
    pub records: Vec<AttendanceRecord>,
    pub present_count: u64,
    pub total_students: u64,
}

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub session_id: i64,
    pub subject: String,
    pub department: String,
    pub date: NaiveDate,
    pub time_from: NaiveTime,
    pub marked_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StudentHistory {
    pub records: Vec<HistoryEntry>,
    /// Finished sessions held for the student's class.
    pub total_sessions: u64,
}

#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub student: user::Model,
    /// Records in sessions run by the caller.
    pub attended: i64,
}

/// Students of the caller's department with their attendance in the caller's sessions.
#[derive(Debug, Clone)]
pub struct Roster {
    pub department: String,
    pub students: Vec<RosterEntry>,
}

pub fn mark_path(token: &str) -> String {
    format!("/api/attendance/mark/{token}")
}

pub fn qr_data(token: &str) -> String {
    format!("{}:{}", config::attendance_app_id(), token)
}

pub struct AttendanceService;

impl AttendanceService {
    /// Opens a session owned by the caller.
    pub async fn create_session(
        db: &DatabaseConnection,
        ctx: AuthContext,
        params: CreateSession,
        now: DateTime<Utc>,
    ) -> AttendanceResult<CreatedSession> {
        if !ctx.role.is_staff() {
            return Err(AttendanceError::Forbidden(
                "Only teachers and admins can open attendance sessions",
            ));
        }

        let subject = params.subject.trim();
        if subject.is_empty() {
            return Err(AttendanceError::Invalid("Subject is required".into()));
        }

        let max = config::attendance_max_duration_minutes();
        let duration = params
            .duration_minutes
            .unwrap_or_else(config::attendance_default_duration_minutes);
        if !(1..=max).contains(&duration) {
            return Err(AttendanceError::Invalid(format!(
                "Duration must be between 1 and {max} minutes"
            )));
        }

        let expires_at = chrono::Duration::try_minutes(duration)
            .and_then(|d| now.checked_add_signed(d))
            .ok_or_else(|| AttendanceError::Invalid("Duration is out of range".into()))?;

        let owner = user::Entity::find_by_id(ctx.user_id)
            .one(db)
            .await?
            .ok_or(AttendanceError::Forbidden("Account not found"))?;
        if !owner.is_active {
            return Err(AttendanceError::Forbidden("Account is deactivated"));
        }

        let department = params
            .department
            .filter(|d| !d.trim().is_empty())
            .or(owner.department)
            .unwrap_or_default();

        let time_from = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now.time());

        let session = attendance_session::Model::create(
            db,
            NewSession {
                teacher_id: ctx.user_id,
                department,
                year: params.year.unwrap_or_default(),
                subject: subject.to_string(),
                room: params.room.unwrap_or_default(),
                date: now.date_naive(),
                time_from,
                expires_at,
                created_at: now,
            },
        )
        .await?;

        info!(
            session_id = session.id,
            teacher_id = ctx.user_id,
            subject = %session.subject,
            duration,
            "Attendance session opened"
        );

        Ok(CreatedSession {
            qr_data: qr_data(&session.token),
            mark_path: mark_path(&session.token),
            session,
        })
    }

    /// Records the caller as present in the session behind `token`.
    ///
    /// Order of checks: unknown token, inactive, overdue (flips the flag),
    /// existing record, non-student or deactivated caller, insert.
    pub async fn mark(
        db: &DatabaseConnection,
        ctx: AuthContext,
        token: &str,
        now: DateTime<Utc>,
    ) -> AttendanceResult<MarkOutcome> {
        let session = attendance_session::Model::find_by_token(db, token)
            .await?
            .ok_or(AttendanceError::SessionNotFound)?;

        if !session.is_active {
            return Err(AttendanceError::SessionExpired);
        }

        if session.is_expired_at(now) {
            if attendance_session::Model::deactivate_if_expired(db, session.id, now).await? {
                info!(session_id = session.id, "Attendance session expired");
            }
            return Err(AttendanceError::SessionExpired);
        }

        if attendance_record::Model::find_for(db, session.id, ctx.user_id)
            .await?
            .is_some()
        {
            return Ok(MarkOutcome::AlreadyMarked);
        }

        if ctx.role != Role::Student {
            return Err(AttendanceError::Forbidden("Only students can mark attendance"));
        }

        let student = user::Entity::find_by_id(ctx.user_id)
            .one(db)
            .await?
            .ok_or(AttendanceError::Forbidden("Account not found"))?;
        if !student.is_active {
            return Err(AttendanceError::Forbidden("Account is deactivated"));
        }

        let inserted = attendance_record::Model::insert_once(
            db,
            NewRecord {
                session_id: session.id,
                student_id: student.id,
                student_name: student.full_name,
                roll_number: student.roll_number,
                department: student.department,
                year: student.year,
                marked_at: now,
            },
        )
        .await?;

        if !inserted {
            return Ok(MarkOutcome::AlreadyMarked);
        }

        info!(
            session_id = session.id,
            student_id = ctx.user_id,
            "Attendance marked"
        );
        Ok(MarkOutcome::Marked {
            subject: session.subject,
        })
    }

    /// Present count and latest marks. Applies lazy expiry first.
    pub async fn live_status(
        db: &DatabaseConnection,
        ctx: AuthContext,
        token: &str,
        now: DateTime<Utc>,
    ) -> AttendanceResult<LiveStatus> {
        let mut session = attendance_session::Model::find_by_token(db, token)
            .await?
            .ok_or(AttendanceError::SessionNotFound)?;
        ensure_owner(&ctx, &session)?;

        if session.is_active && session.is_expired_at(now) {
            attendance_session::Model::deactivate_if_expired(db, session.id, now).await?;
            session.is_active = false;
        }

        let count = attendance_record::Model::count_for_session(db, session.id).await?;
        let recent = attendance_record::Model::recent_for_session(db, session.id, RECENT_MARKS)
            .await?
            .into_iter()
            .map(|r| RecentMark {
                student_name: r.student_name,
                marked_at: r.marked_at,
            })
            .collect();

        Ok(LiveStatus {
            session_id: session.id,
            subject: session.subject,
            count,
            is_active: session.is_active,
            expires_at: session.expires_at,
            recent,
        })
    }

    /// Closes a session. Admins may close any session, teachers only their
    /// own; anything else is a no-op reported as `closed: false`.
    pub async fn close(
        db: &DatabaseConnection,
        ctx: AuthContext,
        session_id: i64,
    ) -> AttendanceResult<CloseOutcome> {
        if !ctx.role.is_staff() {
            return Err(AttendanceError::Forbidden(
                "Only teachers and admins can close attendance sessions",
            ));
        }

        let owner = if ctx.is_admin() { None } else { Some(ctx.user_id) };
        let closed = attendance_session::Model::close(db, session_id, owner).await?;

        if closed {
            info!(session_id, closed_by = ctx.user_id, "Attendance session closed");
        } else {
            warn!(session_id, user_id = ctx.user_id, "Close request changed nothing");
        }
        Ok(CloseOutcome { session_id, closed })
    }

    /// The caller's most recent sessions with their present counts.
    pub async fn list_for_teacher(
        db: &DatabaseConnection,
        ctx: AuthContext,
        now: DateTime<Utc>,
    ) -> AttendanceResult<Vec<SessionSummary>> {
        attendance_session::Model::expire_overdue_for_teacher(db, ctx.user_id, now).await?;

        let sessions =
            attendance_session::Model::recent_for_teacher(db, ctx.user_id, TEACHER_SESSION_LIMIT)
                .await?;
        let ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
        let counts = attendance_record::Model::counts_for_sessions(db, &ids).await?;

        Ok(sessions
            .into_iter()
            .map(|session| SessionSummary {
                present_count: counts.get(&session.id).copied().unwrap_or(0),
                session,
            })
            .collect())
    }

    /// Full roll of a session with the size of its class.
    pub async fn session_detail(
        db: &DatabaseConnection,
        ctx: AuthContext,
        session_id: i64,
        now: DateTime<Utc>,
    ) -> AttendanceResult<SessionDetail> {
        let mut session = attendance_session::Entity::find_by_id(session_id)
            .one(db)
            .await?
            .ok_or(AttendanceError::SessionNotFound)?;
        ensure_owner(&ctx, &session)?;

        if session.is_active && session.is_expired_at(now) {
            attendance_session::Model::deactivate_if_expired(db, session.id, now).await?;
            session.is_active = false;
        }

        let records = attendance_record::Model::for_session(db, session.id).await?;
        let total_students =
            user::Model::count_students_in(db, &session.department, &session.year).await?;

        Ok(SessionDetail {
            present_count: records.len() as u64,
            records,
            total_students,
            session,
        })
    }

    /// The caller's own attendance with the number of finished sessions for
    /// their class.
    pub async fn student_history(
        db: &DatabaseConnection,
        ctx: AuthContext,
        now: DateTime<Utc>,
    ) -> AttendanceResult<StudentHistory> {
        let me = user::Entity::find_by_id(ctx.user_id)
            .one(db)
            .await?
            .ok_or(AttendanceError::Forbidden("Account not found"))?;
        let department = me.department.unwrap_or_default();
        let year = me.year.unwrap_or_default();

        attendance_session::Model::expire_overdue_for_class(db, &department, &year, now).await?;

        let records = attendance_record::Model::history_for_student(db, ctx.user_id)
            .await?
            .into_iter()
            .filter_map(|(record, session)| {
                session.map(|s| HistoryEntry {
                    session_id: s.id,
                    subject: s.subject,
                    department: s.department,
                    date: s.date,
                    time_from: s.time_from,
                    marked_at: record.marked_at,
                })
            })
            .collect();
        let total_sessions =
            attendance_session::Model::count_inactive_for_class(db, &department, &year).await?;

        Ok(StudentHistory {
            records,
            total_sessions,
        })
    }

    pub async fn roster(db: &DatabaseConnection, ctx: AuthContext) -> AttendanceResult<Roster> {
        if !ctx.role.is_staff() {
            return Err(AttendanceError::Forbidden(
                "Only teachers and admins can view the roster",
            ));
        }
        let me = user::Entity::find_by_id(ctx.user_id)
            .one(db)
            .await?
            .ok_or(AttendanceError::Forbidden("Account not found"))?;
        let Some(department) = me.department.filter(|d| !d.is_empty()) else {
            return Ok(Roster {
                department: String::new(),
                students: Vec::new(),
            });
        };

        let counts = attendance_record::Model::counts_for_teacher_by_student(db, ctx.user_id).await?;
        let students = user::Model::students_in_department(db, &department)
            .await?
            .into_iter()
            .map(|student| RosterEntry {
                attended: counts.get(&student.id).copied().unwrap_or(0),
                student,
            })
            .collect();

        Ok(Roster {
            department,
            students,
        })
    }
}

fn ensure_owner(ctx: &AuthContext, session: &AttendanceSession) -> AttendanceResult<()> {
    if ctx.is_admin() || session.teacher_id == ctx.user_id {
        Ok(())
    } else {
        Err(AttendanceError::Forbidden(
            "Only the session owner or an admin can view this session",
        ))
    }
}
