//! Core application functionality
//!
//! This module contains the application shell around the anchor engine:
//! - CLI parsing and validation
//! - Settings and rule table persistence
//! - Error types and process-level error handling
//! - The command runner

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use errors::EngineError;
pub use runner::run;
