//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, tracing, CORS)
//!     → handlers.rs (one handler per endpoint)
//!     → request.rs (body and path validation)
//!     → storage::Gateway (on the blocking pool)
//!     → response.rs (status codes and JSON bodies)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use response::ApiError;
pub use server::{AppState, HttpServer};
