//! Line-level split of a previously generated source file.
//!
//! There is no syntax tree here: a generated companion file is cut into
//! three line groups using nothing but line-initial cues.
//!
//! ```text
//! package com.acme.shop.adapter.domain.repositories;   <- line 0, skipped
//!                                                      <- import line
//! import com.acme.shop.domain.Order;                   <- import line
//! import java.util.List;                               <- import line
//! @Deprecated                                          <- annotation line
//! public interface OrderRepository extends ... {       <- declaration (dropped)
//!     List<Order> findOverdue();                       <- custom line
//! }                                                    <- closing brace (dropped)
//! ```
//!
//! The scan is a three-state machine. Once an annotation has been seen,
//! every following header line counts as an annotation, blank lines and
//! comments included; this order sensitivity is intentional and tested.

use tracing::trace;

/// A trimmed line starting with this keyword opens the declaration.
pub const DECLARATION_KEYWORD: &str = "public";

/// A trimmed line starting with this marker is an annotation.
pub const ANNOTATION_MARKER: &str = "@";

/// The result of splitting one existing file.
///
/// Invariant: when `found_declaration` is false every line group is empty
/// and the file is treated as fresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFileSections {
    /// Header lines before the first annotation or the declaration.
    pub import_lines: Vec<String>,
    /// Lines from the first annotation up to the declaration.
    pub annotation_lines: Vec<String>,
    /// Lines strictly inside the declaration body.
    pub custom_lines: Vec<String>,
    pub found_declaration: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeDeclaration,
    InAnnotationRun,
    InBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    Import,
    Annotation,
    Declaration,
    Body,
}

impl ScanState {
    fn advance(self, line: &str) -> (ScanState, LineClass) {
        let trimmed = line.trim();
        match self {
            ScanState::InBody => (ScanState::InBody, LineClass::Body),
            _ if trimmed.starts_with(DECLARATION_KEYWORD) => {
                (ScanState::InBody, LineClass::Declaration)
            }
            ScanState::InAnnotationRun => (ScanState::InAnnotationRun, LineClass::Annotation),
            ScanState::BeforeDeclaration if trimmed.starts_with(ANNOTATION_MARKER) => {
                (ScanState::InAnnotationRun, LineClass::Annotation)
            }
            ScanState::BeforeDeclaration => (ScanState::BeforeDeclaration, LineClass::Import),
        }
    }
}

impl ExtractedFileSections {
    /// Sections of a file that does not exist (or has nothing to keep).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Split `content` into import, annotation and custom lines.
    pub fn parse(content: &str) -> Self {
        let normalized = content.replace("\r\n", "\n");
        let mut lines: Vec<&str> = normalized.split('\n').collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let mut sections = Self::default();
        let mut state = ScanState::BeforeDeclaration;

        for line in lines.iter().skip(1) {
            let (next, class) = state.advance(line);
            state = next;
            match class {
                LineClass::Import => {
                    trace!(line = %line, "import");
                    sections.import_lines.push(line.to_string());
                }
                LineClass::Annotation => {
                    trace!(line = %line, "annotation");
                    sections.annotation_lines.push(line.to_string());
                }
                LineClass::Declaration => sections.found_declaration = true,
                LineClass::Body => sections.custom_lines.push(line.to_string()),
            }
        }

        if !sections.found_declaration {
            return Self::empty();
        }

        trim_closing_brace(&mut sections.custom_lines);
        for line in &sections.custom_lines {
            trace!(line = %line, "custom");
        }

        sections
    }

    /// `true` when the body holds developer code worth carrying over.
    pub fn has_custom_code(&self) -> bool {
        !self.custom_lines.is_empty()
    }

    /// `true` when nothing was recognised and the file counts as fresh.
    pub fn is_fresh(&self) -> bool {
        !self.found_declaration
    }
}

/// Remove the declaration's closing brace and anything after it.
///
/// Walks backward; lines without `}` are dropped. The first line holding a
/// `}` closes the declaration: a bare `}` disappears, otherwise the text
/// before its last `}` survives when non-empty.
fn trim_closing_brace(lines: &mut Vec<String>) {
    while let Some(line) = lines.pop() {
        if let Some(idx) = line.rfind('}') {
            if line != "}" {
                let kept = &line[..idx];
                if !kept.is_empty() {
                    lines.push(kept.to_string());
                }
            }
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    const GENERATED: &str = "package com.acme.shop.adapter.domain.repositories;

import com.acme.shop.domain.Order;

/**
 * Generated by stratum
 */
public interface OrderRepository extends Repository<Order, Long> {
    List<Order> findOverdue();

    default int answer() {
        return 42;
    }
}
";

    #[test]
    fn splits_generated_file() {
        let s = ExtractedFileSections::parse(GENERATED);

        assert!(s.found_declaration);
        assert_eq!(
            s.import_lines,
            lines(&[
                "",
                "import com.acme.shop.domain.Order;",
                "",
                "/**",
                " * Generated by stratum",
                " */",
            ])
        );
        assert!(s.annotation_lines.is_empty());
        assert_eq!(
            s.custom_lines,
            lines(&[
                "    List<Order> findOverdue();",
                "",
                "    default int answer() {",
                "        return 42;",
                "    }",
            ])
        );
    }

    #[test]
    fn first_line_is_never_classified() {
        let content = "public class Wrong {\npublic interface A {\n  x();\n}";
        let s = ExtractedFileSections::parse(content);
        assert_eq!(s.custom_lines, lines(&["  x();"]));
        assert!(s.import_lines.is_empty());
    }

    #[test]
    fn annotation_run_absorbs_following_header_lines() {
        let content = "package p;\nimport a.B;\n@Deprecated\n\n// note\n\
                       @SuppressWarnings(\"x\")\npublic interface A {\n}";
        let s = ExtractedFileSections::parse(content);

        assert_eq!(s.import_lines, lines(&["import a.B;"]));
        assert_eq!(
            s.annotation_lines,
            lines(&["@Deprecated", "", "// note", "@SuppressWarnings(\"x\")"])
        );
        assert!(s.custom_lines.is_empty());
        assert!(s.found_declaration);
    }

    #[test]
    fn only_first_declaration_opens_the_body() {
        let content = "package p;\npublic interface A {\n    public static class B {\n    }\n}";
        let s = ExtractedFileSections::parse(content);

        assert_eq!(
            s.custom_lines,
            lines(&["    public static class B {", "    }"])
        );
    }

    #[test]
    fn missing_declaration_yields_fresh_sections() {
        let s = ExtractedFileSections::parse("package p;\nimport a.B;\n// nothing else\n");
        assert_eq!(s, ExtractedFileSections::empty());
        assert!(s.is_fresh());
    }

    #[test]
    fn empty_body_has_no_custom_code() {
        let s = ExtractedFileSections::parse("package p;\n\npublic interface A {\n}\n");
        assert!(s.found_declaration);
        assert!(!s.has_custom_code());
    }

    #[test]
    fn crlf_is_normalized() {
        let content = "package p;\r\nimport a.B;\r\npublic interface A {\r\n  x();\r\n}\r\n";
        let s = ExtractedFileSections::parse(content);
        assert_eq!(s.import_lines, lines(&["import a.B;"]));
        assert_eq!(s.custom_lines, lines(&["  x();"]));
    }

    #[test]
    fn closing_brace_sharing_a_line_keeps_the_prefix() {
        let s = ExtractedFileSections::parse("package p;\npublic interface A {\n  x();\n  y(); }");
        assert_eq!(s.custom_lines, lines(&["  x();", "  y(); "]));
    }

    #[test]
    fn lines_after_closing_brace_are_dropped() {
        let content = "package p;\npublic interface A {\n  x();\n}\n// trailing\n\n";
        let s = ExtractedFileSections::parse(content);
        assert_eq!(s.custom_lines, lines(&["  x();"]));
    }

    #[test]
    fn body_without_closing_brace_keeps_nothing() {
        let s = ExtractedFileSections::parse("package p;\npublic interface A {\n  x();\n  y();");
        assert!(s.found_declaration);
        assert!(s.custom_lines.is_empty());
    }

    #[test]
    fn whitespace_in_body_lines_is_preserved() {
        let content = "package p;\npublic interface A {\n\t  List<Order> findOverdue();  \n}";
        let s = ExtractedFileSections::parse(content);
        assert_eq!(s.custom_lines, lines(&["\t  List<Order> findOverdue();  "]));
    }
}
