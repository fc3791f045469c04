pub mod achievement;
pub mod attendance_record;
pub mod attendance_session;
pub mod department;
pub mod event;
pub mod event_registration;
pub mod memory;
pub mod memory_like;
pub mod notice;
pub mod timetable_entry;
pub mod user;

pub use achievement::Entity as Achievement;
pub use attendance_record::Entity as AttendanceRecord;
pub use attendance_session::Entity as AttendanceSession;
pub use department::Entity as Department;
pub use event::Entity as Event;
pub use event_registration::Entity as EventRegistration;
pub use memory::Entity as Memory;
pub use memory_like::Entity as MemoryLike;
pub use notice::Entity as Notice;
pub use timetable_entry::Entity as TimetableEntry;
pub use user::Entity as User;
