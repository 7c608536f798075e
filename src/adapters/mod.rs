//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Access token validation (JWT, mock)
//! - `http` - Axum REST API
//! - `memory` - In-process store for tests and `memory://` deployments
//! - `postgres` - PostgreSQL repositories

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
