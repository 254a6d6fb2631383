//! Domain layer for Stratum.
//!
//! Pure logic only: token expansion, the template tree model, the
//! line-level section parser, repository emission, aggregate-root detection
//! and path-to-name resolution. Nothing in here touches the filesystem; I/O
//! goes through the ports defined in `crate::application`.
//!
//! - **No I/O**: every function is over strings and paths
//! - **Immutable inputs**: parsed trees and sections are never mutated
//! - **Small dependency surface**: std, thiserror, regex, serde, tracing

pub mod detection;
pub mod entities;
pub mod error;
pub mod source_layout;
pub mod tokens;

pub use detection::{AggregateRootDetector, DEFAULT_AGGREGATE_ROOT_MARKER};
pub use entities::{
    repository::{
        CUSTOM_CODE_BEGIN, CUSTOM_CODE_END, REPOSITORY_SUFFIX, RepositoryConfig, RepositoryTarget,
        filter_imports, render_repository_source,
    },
    sections::ExtractedFileSections,
    template_tree::{ConflictPolicy, ContentSource, NodeKind, TemplateNode},
};
pub use error::{DomainError, ErrorCategory};
pub use tokens::TokenContext;
