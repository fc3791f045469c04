mod achievements_test;
mod attendance_test;
mod auth_test;
mod campus_test;
mod events_test;
mod health_test;
mod memories_test;
mod notices_test;
mod profile_test;
mod timetable_test;
mod users_test;
