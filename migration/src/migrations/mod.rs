pub mod m202510010001_create_users;
pub mod m202510010002_create_attendance;
pub mod m202510010003_create_timetable;
pub mod m202510010004_create_notices;
pub mod m202510010005_add_user_profile;
pub mod m202510010006_create_departments;
pub mod m202510010007_create_events;
pub mod m202510010008_create_memories;
pub mod m202510010009_create_achievements;
