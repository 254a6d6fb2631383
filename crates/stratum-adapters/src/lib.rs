//! Infrastructure adapters for Stratum.
//!
//! This crate implements the ports defined in `stratum_core::application::ports`
//! and holds everything that touches the outside world: the disk, HTTP,
//! template description files and build metadata.

pub mod fetcher;
pub mod filesystem;
pub mod pom;
pub mod project_layout;
pub mod template_loader;

// Re-export commonly used adapters
pub use fetcher::{LocatorFetcher, MemoryFetcher};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use pom::PomMetadata;
pub use project_layout::ProjectLayout;
pub use template_loader::{DescriptionFormat, TemplateDescriptionLoader};
