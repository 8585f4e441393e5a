//! Core server infrastructure: configuration, shared state, background
//! task registry, and the HTTP server itself.

pub mod config;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
pub use tasks::{BackgroundTasks, TaskKind};
