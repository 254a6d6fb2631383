//! Application layer for Stratum.
//!
//! This layer contains:
//! - **Services**: use case orchestration (TemplateTreeRenderer, RepositorySourceSynthesizer)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! Text-level rules (parsing, emission, detection) live in `crate::domain`;
//! this layer sequences them around filesystem effects.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    CustomCodeExtractor, RegenerationReport, RegenerationRequest, RegenerationStatus,
    RenderAction, RenderReport, RepositorySourceSynthesizer, Retirement, TemplateTreeRenderer,
};

pub use ports::{Filesystem, TemplateSourceFetcher};

pub use error::ApplicationError;
