//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth types)
//! - `access` - Roles, permissions, and role allow-lists
//! - `user` - Accounts as seen by the booking engine
//! - `group` - Mentor groups and membership rules
//! - `session` - Mentoring sessions, eligibility, and extra capacity
//! - `attendance` - Attendance records and statuses
//! - `calendar` - Feed tokens and iCalendar rendering

pub mod access;
pub mod attendance;
pub mod calendar;
pub mod foundation;
pub mod group;
pub mod session;
pub mod user;
