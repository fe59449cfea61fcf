//! # rigpill - Rig status pill for a glucose monitoring dashboard
//!
//! Summarizes the health of an automated insulin delivery rig from recent
//! device status uploads: connectivity, system load, last ping and pump
//! telemetry. The result is a short pill text, a detail list, a style class
//! and, when enabled, an alert notification.
//!
//! ## Architecture
//!
//! - `sandbox`: the host capabilities passed to every hook call
//! - `devicestatus`: report model as uploaded by the rig
//! - `rig`: the plugin (preferences, selection, derived data, notify, render)
//! - `levels`: ordered alert severity
//! - `timeago`: relative time formatting
//! - `config`: YAML configuration for the command line runner
//! - `logging`: structured logging and tracing
//! - `error`: error types for the ambient layer

pub mod config;
pub mod devicestatus;
pub mod error;
pub mod levels;
pub mod logging;
pub mod rig;
pub mod sandbox;
pub mod timeago;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, RigPillError};
pub use levels::Level;
pub use rig::{RigPlugin, RigStatus};
pub use sandbox::{MemorySandbox, Sandbox};
