pub mod achievement;
pub mod attendance;
pub mod campus;
pub mod context;
pub mod error;
pub mod event;
pub mod memory;
pub mod notice;
pub mod timetable;
pub mod upload;
pub mod user;

pub use context::AuthContext;
pub use error::{ServiceError, ServiceResult};
