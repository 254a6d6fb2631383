//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world.
//! Adapters in `stratum-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the application, implemented by infrastructure
//!   - `Filesystem`: file operations
//!   - `TemplateSourceFetcher`: content behind a path or URL
//!
//! - **Driving (Input) Ports**: the CLI calls the services directly

pub mod output;

pub use output::{Filesystem, TemplateSourceFetcher};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateSourceFetcher};
