//! Infrastructure shared by the workspace binaries: command line and environment
//! configuration, and console logging.

pub mod config;
pub mod logging;
