//! Storage subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → spawn_blocking
//!     → gateway.rs (open connection, run one statement, close)
//!     → infractions table (SQLite file)
//! ```
//!
//! # Design Decisions
//! - One connection per operation, no pool
//! - Every operation is a single statement, so it either fully applies or not at all
//! - Errors carry the raw SQLite message

pub mod error;
pub mod gateway;
pub mod model;

pub use error::StorageError;
pub use gateway::Gateway;
pub use model::{Infraction, NewInfraction};
