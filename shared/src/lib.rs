//! Shared data model for the LAN club server.
//!
//! Plain entities, status enums, and client-facing DTOs used by the server
//! and its desktop/web clients. Database derives are feature-gated behind
//! `db` so client builds stay lean.

pub mod client;
pub mod models;
pub mod util;
