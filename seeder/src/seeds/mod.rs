pub mod achievement;
pub mod attendance;
pub mod event;
pub mod memory;
pub mod notice;
pub mod timetable;
pub mod user;
