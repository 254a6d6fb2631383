//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments plus [`crate::config::AppConfig`] into
//! core calls and print the results. No business logic lives here.

pub mod arch;
pub mod completions;
pub mod config;
pub mod init;
pub mod repository;
