//! Utility functions and helpers for the grievance relay.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and API key redaction.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
