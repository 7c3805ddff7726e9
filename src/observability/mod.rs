//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! gateway / retry executor / facade produce:
//!     → logging.rs (structured log events on stderr)
//!     → metrics.rs (counters, optional Prometheus endpoint)
//! ```

pub mod logging;
pub mod metrics;
