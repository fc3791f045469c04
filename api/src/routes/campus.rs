//! Public campus directory: departments and headline numbers.

use crate::response::{Reply, from_service_error, ok};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use services::campus::{CampusService, CampusStats, DepartmentOverview};
use util::state::AppState;

/// - `GET /departments` → `list_departments`
/// - `GET /stats` → `campus_stats`
pub fn campus_routes() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list_departments))
        .route("/stats", get(campus_stats))
}

#[derive(Debug, Serialize, Default)]
pub struct DepartmentResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub hod: Option<String>,
    pub intake: i32,
    pub established: Option<i32>,
    pub description: Option<String>,
    pub student_count: u64,
    pub event_count: u64,
}

impl From<DepartmentOverview> for DepartmentResponse {
    fn from(o: DepartmentOverview) -> Self {
        let d = o.department;
        Self {
            id: d.id,
            name: d.name,
            code: d.code,
            hod: d.hod,
            intake: d.intake,
            established: d.established,
            description: d.description,
            student_count: o.students,
            event_count: o.events,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct StatsResponse {
    pub students: u64,
    pub events: u64,
    pub memories: u64,
    pub departments: u64,
}

impl From<CampusStats> for StatsResponse {
    fn from(s: CampusStats) -> Self {
        Self {
            students: s.students,
            events: s.events,
            memories: s.memories,
            departments: s.departments,
        }
    }
}

/// GET /api/departments
///
/// Every department with its student count and the events open to it.
async fn list_departments(State(app_state): State<AppState>) -> Reply<Vec<DepartmentResponse>> {
    match CampusService::departments(app_state.db()).await {
        Ok(list) => ok(
            StatusCode::OK,
            list.into_iter().map(DepartmentResponse::from).collect(),
            "Departments retrieved successfully",
        ),
        Err(e) => from_service_error(e),
    }
}

/// GET /api/stats
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": { "students": 120, "events": 8, "memories": 40, "departments": 6 },
///   "message": "Stats retrieved successfully"
/// }
/// ```
async fn campus_stats(State(app_state): State<AppState>) -> Reply<StatsResponse> {
    match CampusService::stats(app_state.db()).await {
        Ok(stats) => ok(StatusCode::OK, stats.into(), "Stats retrieved successfully"),
        Err(e) => from_service_error(e),
    }
}
