//! Template source fetchers.

mod locator;
mod memory;

pub use locator::{LocatorFetcher, is_remote};
pub use memory::MemoryFetcher;
