//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers, gateway calls, tower-http TraceLayer
//!     → tracing events (request ID attached as span field)
//!     → logging.rs subscriber (stdout)
//! ```

pub mod logging;

pub use logging::init_logging;
