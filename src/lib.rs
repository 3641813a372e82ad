//! Speed Infraction Registry Library
//!
//! Records traffic-speed infractions in a local SQLite file and serves them
//! over a small JSON HTTP API.
//!
//! ```text
//!   client ──▶ http::server (CORS, request ID, trace)
//!                 │
//!                 ▼
//!           http::handlers ──▶ http::request (presence checks)
//!                 │
//!                 ▼
//!           storage::Gateway ──▶ infractions table
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storage;

pub use config::schema::RegistryConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use storage::{Gateway, Infraction, NewInfraction};
