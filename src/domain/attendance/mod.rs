//! Attendance module - per-user session attendance.

mod record;
mod status;

pub use record::{AttendanceUpdate, SessionAttendance};
pub use status::AttendanceStatus;
