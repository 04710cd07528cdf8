//! Utility modules
//!
//! Currently only the log file setup.

pub mod logging;

pub use logging::{LogRotation, init_logging};
