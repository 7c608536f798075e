//! MentorHub - Mentoring session booking backend.
//!
//! Students, mentors and administrators share one API. Roles decide who may
//! create and manage sessions, mentor groups decide who is enrolled
//! automatically, and per-session capacity limits how many attendees from
//! outside the group may join.
//!
//! Layout follows ports and adapters:
//!
//! - [`domain`] - Pure types and rules (roles, groups, sessions, attendance)
//! - [`ports`] - Storage and credential traits
//! - [`application`] - Access gates and command/query handlers
//! - [`adapters`] - PostgreSQL, in-memory, JWT and HTTP implementations
//! - [`config`] - Environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
