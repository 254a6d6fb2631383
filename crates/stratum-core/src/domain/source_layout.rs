//! Class and package names derived from source paths.
//!
//! Sources live under `<module>/src/main/java/<package as dirs>/<Simple>.java`.
//! Everything here is a pure function over paths and strings; walking the
//! tree goes through the `Filesystem` port in the application layer.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::DomainError;

/// Source root segments below a module directory.
pub const SOURCE_ROOT: [&str; 3] = ["src", "main", "java"];
pub const SOURCE_EXTENSION: &str = "java";

static PACKAGE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*package\s+([A-Za-z_]\w*(?:\s*\.\s*[A-Za-z_]\w*)*)\s*;")
        .expect("package declaration regex is valid")
});

fn invalid(path: &Path) -> DomainError {
    DomainError::InvalidSourcePath {
        path: path.display().to_string(),
    }
}

/// `…/Order.java` → `Order`.
pub fn resolve_simple_class_name(path: &Path) -> Result<String, DomainError> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| invalid(path))
}

/// `…/src/main/java/com/acme/Order.java` → `com.acme`.
///
/// The last `src/main/java` run in the path wins. A file directly under the
/// source root has the empty (default) package.
pub fn resolve_package(path: &Path) -> Result<String, DomainError> {
    let segments: Vec<&str> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();

    let start = segments
        .windows(SOURCE_ROOT.len())
        .rposition(|w| w == SOURCE_ROOT)
        .ok_or_else(|| invalid(path))?;

    let package_start = start + SOURCE_ROOT.len();
    if package_start >= segments.len() {
        return Err(invalid(path));
    }
    Ok(segments[package_start..segments.len() - 1].join("."))
}

/// `…/src/main/java/com/acme/Order.java` → `com.acme.Order`.
pub fn resolve_class_name(path: &Path) -> Result<String, DomainError> {
    let simple = resolve_simple_class_name(path)?;
    let package = resolve_package(path)?;
    Ok(if package.is_empty() {
        simple
    } else {
        format!("{}.{}", package, simple)
    })
}

/// Directory holding `package` below the module at `base_dir`.
pub fn resolve_directory(base_dir: &Path, package: &str) -> PathBuf {
    let mut dir = base_dir.join(SOURCE_ROOT.iter().collect::<PathBuf>());
    for segment in package.split('.').filter(|s| !s.is_empty()) {
        dir.push(segment);
    }
    dir
}

/// Path of the source file for `simple_name` in `package`.
pub fn resolve_source_file(base_dir: &Path, package: &str, simple_name: &str) -> PathBuf {
    resolve_directory(base_dir, package).join(format!("{}.{}", simple_name, SOURCE_EXTENSION))
}

/// Package named by the first `package …;` line of `content`.
pub fn parse_package_declaration(content: &str) -> Option<String> {
    PACKAGE_DECLARATION
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().split_whitespace().collect::<String>())
}

/// `true` for paths ending in `.java`.
pub fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
}
