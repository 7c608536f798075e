//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AttendanceResponse, AttendanceUpdateItem, AttendeeResponse, CreateSessionResponse,
    SessionDetailResponse, SessionListResponse, SessionRequest, SessionResponse,
    StudentSessionResponse, UpdateAttendanceRequest,
};
pub use handlers::{ListSessionsParams, SessionHandlers};
pub use routes::session_routes;
