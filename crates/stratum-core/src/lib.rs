//! Stratum Core - scaffolding and source regeneration.
//!
//! This crate provides the domain and application layers of Stratum,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stratum-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  TemplateTreeRenderer                   │
//! │  RepositorySourceSynthesizer            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  Filesystem, TemplateSourceFetcher      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stratum-adapters (Infrastructure)    │
//! │  LocalFilesystem, LocatorFetcher, ...   │
//! └─────────────────────────────────────────┘
//!
//!   Domain (pure): TokenContext, TemplateNode, ExtractedFileSections,
//!                  RepositoryConfig, AggregateRootDetector
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use stratum_core::prelude::*;
//!
//! # fn run(fs: Arc<dyn Filesystem>) -> StratumResult<()> {
//! let detector = AggregateRootDetector::new("AggregateRoot")?;
//! let synthesizer = RepositorySourceSynthesizer::new(fs, RepositoryConfig::default(), detector);
//!
//! let report = synthesizer.regenerate_all(&RegenerationRequest {
//!     domain_root: PathBuf::from("shop-domain"),
//!     search_root: PathBuf::from("shop-adapter"),
//!     base_package: "com.acme.shop".into(),
//! })?;
//! println!("{} files, {} failed", report.outcomes.len(), report.failed());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, CustomCodeExtractor, RegenerationReport, RegenerationRequest,
        RegenerationStatus, RenderAction, RenderReport, RepositorySourceSynthesizer, Retirement,
        TemplateTreeRenderer,
        ports::{Filesystem, TemplateSourceFetcher},
    };
    pub use crate::domain::{
        AggregateRootDetector, ConflictPolicy, ContentSource, DomainError, ExtractedFileSections,
        NodeKind, RepositoryConfig, RepositoryTarget, TemplateNode, TokenContext,
    };
    pub use crate::error::{StratumError, StratumResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
