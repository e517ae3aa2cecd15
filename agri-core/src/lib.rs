//! # agri-core
//!
//! Shared error and tool types for the agri-mesh crates.
//!
//! - [`AgriError`] / [`Result`] - unified error handling
//! - [`Tool`] - a named, schema-described async function the orchestrator exposes

pub mod error;
pub mod tool;

pub use error::{AgriError, Result};
pub use tool::{required_str, required_str_list, Tool};
