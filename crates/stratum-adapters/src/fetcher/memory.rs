//! In-memory fetcher for testing.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use stratum_core::{
    application::{ApplicationError, ports::TemplateSourceFetcher},
    error::StratumResult,
};

/// Serves fixed content per locator. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    sources: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(self, locator: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(locator, content);
        self
    }

    pub fn insert(&self, locator: impl Into<String>, content: impl Into<String>) {
        if let Ok(mut sources) = self.sources.write() {
            sources.insert(locator.into(), content.into());
        }
    }
}

impl TemplateSourceFetcher for MemoryFetcher {
    fn fetch(&self, locator: &str) -> StratumResult<String> {
        let found = self
            .sources
            .read()
            .ok()
            .and_then(|sources| sources.get(locator).cloned());
        found.ok_or_else(|| {
            ApplicationError::TemplateSourceFetch {
                locator: locator.to_string(),
                reason: "not found".into(),
            }
            .into()
        })
    }
}
