//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! use cases: "render a template tree" and "regenerate repositories".

pub mod extractor;
pub mod renderer;
pub mod retirement;
pub mod source_scan;
pub mod synthesizer;

pub use extractor::{CustomCodeExtractor, Extraction};
pub use renderer::{NodeOutcome, RenderAction, RenderReport, TemplateTreeRenderer};
pub use retirement::{RETIRED_SUFFIX, RecoveryAction, Retirement, retired_path};
pub use synthesizer::{
    FileOutcome, RegenerationReport, RegenerationRequest, RegenerationStatus,
    RepositorySourceSynthesizer, SynthesisOutcome,
};
