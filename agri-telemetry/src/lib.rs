//! # agri-telemetry
//!
//! Structured logging and distributed tracing for the agri-mesh agents.
//!
//! ```rust
//! use agri_telemetry::{init_telemetry, info};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_telemetry("agri-orchestrator")?;
//!     info!("ready");
//!     Ok(())
//! }
//! ```

pub mod init;
pub mod spans;

pub use tracing::{debug, error, info, instrument, trace, warn, Instrument, Span};

pub use init::{
    init_telemetry, init_telemetry_with_format, init_with_otlp, shutdown_telemetry, LogFormat,
};
pub use spans::*;
