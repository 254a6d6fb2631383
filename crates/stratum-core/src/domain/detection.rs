//! Aggregate-root detection.
//!
//! A source file is an aggregate root when any of its lines is either
//!
//! - an annotation made only of a (possibly qualified) name whose last
//!   segment is the marker: `@AggregateRoot`, `@com.acme.ddd.AggregateRoot`
//! - a block comment holding only the marker: `/* @AggregateRoot */`
//!
//! Annotations with arguments or trailing code on the same line do not
//! count.

use regex::Regex;

use crate::domain::error::DomainError;

pub const DEFAULT_AGGREGATE_ROOT_MARKER: &str = "AggregateRoot";

#[derive(Debug, Clone)]
pub struct AggregateRootDetector {
    marker: String,
    annotation: Regex,
    comment: Regex,
}

impl AggregateRootDetector {
    /// Build a detector for `marker`, a bare identifier.
    pub fn new(marker: &str) -> Result<Self, DomainError> {
        let marker = marker.trim();
        let leading = |c: char| c.is_ascii_alphabetic() || c == '_';
        let trailing = |c: char| c.is_ascii_alphanumeric() || c == '_';
        let mut chars = marker.chars();
        let is_identifier = chars.next().is_some_and(leading) && chars.all(trailing);
        if !is_identifier {
            return Err(DomainError::InvalidConfiguration(format!(
                "aggregate root marker '{}' is not an identifier",
                marker
            )));
        }

        let escaped = regex::escape(marker);
        let annotation = Regex::new(&format!(
            r"^\s*@\s*(?:[A-Za-z_][A-Za-z0-9_]*\s*\.\s*)*{}\s*$",
            escaped
        ))
        .map_err(|e| DomainError::InvalidConfiguration(e.to_string()))?;
        let comment = Regex::new(&format!(r"^\s*/\*\s*@{}\s*\*/\s*$", escaped))
            .map_err(|e| DomainError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            marker: marker.to_string(),
            annotation,
            comment,
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn is_aggregate_root(&self, content: &str) -> bool {
        content
            .lines()
            .any(|line| self.annotation.is_match(line) || self.comment.is_match(line))
    }
}
