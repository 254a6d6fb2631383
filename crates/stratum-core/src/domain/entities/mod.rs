pub mod repository;
pub mod sections;
pub mod template_tree;

pub use crate::domain::DomainError;
pub use repository::{RepositoryConfig, RepositoryTarget};
pub use sections::ExtractedFileSections;
pub use template_tree::TemplateNode;
