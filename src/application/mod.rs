//! Application layer - access gates, membership resolution, and handlers.
//!
//! Handlers orchestrate domain operations and coordinate between ports.
//! Commands (writes) and queries (reads) get separate handler types.

pub mod access;
pub mod handlers;
mod membership_resolver;

pub use membership_resolver::MembershipResolver;
