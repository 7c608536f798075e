//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - Accounts and calendar tokens
//! - `GroupRepository` - Groups and mentee membership
//! - `SessionRepository` - Sessions with auto-enrollment and cascade delete
//! - `AttendanceRepository` - Capacity-checked joins and status upserts
//!
//! ## Auth Ports
//!
//! - `SessionValidator` - Credential validation

mod attendance_repository;
mod group_repository;
mod session_repository;
mod session_validator;
mod user_repository;

pub use attendance_repository::{AttendanceRepository, AttendanceSummary};
pub use group_repository::GroupRepository;
pub use session_repository::{SessionRepository, VisibleSessions};
pub use session_validator::SessionValidator;
pub use user_repository::UserRepository;
