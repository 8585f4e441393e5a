//! LAN Club Server - computer rental and cafe ordering service
//!
//! # Module structure
//!
//! ```text
//! club-server/src/
//! ├── core/          # config, state, background tasks, HTTP server
//! ├── auth/          # JWT, argon2 passwords, role policy gate
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── rentals/       # lease engine + expiration sweeper
//! ├── orders/        # cafe order ledger and status graph
//! └── utils/         # errors, logging
//! ```
//!
//! The two stateful engines are `rentals` (time-boxed exclusive station
//! leases, reclaimed by a periodic sweep) and `orders` (forward-only
//! status machine). Everything else is conventional CRUD around them.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod rentals;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::OrderLedger;
pub use rentals::RentalService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
