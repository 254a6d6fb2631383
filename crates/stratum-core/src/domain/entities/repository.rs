//! Companion repository interfaces: configuration, target, and emission.
//!
//! Emission is a pure function of the target, the configuration record and
//! whatever sections survived from a previous generation. The output always
//! re-parses into the same custom lines, so regenerating twice is a no-op.

use std::path::PathBuf;

use crate::domain::entities::sections::ExtractedFileSections;

pub const REPOSITORY_SUFFIX: &str = "Repository";
pub const ENTITY_TYPE_PLACEHOLDER: &str = "${EntityType}";
pub const IDENTITY_TYPE_PLACEHOLDER: &str = "${IdentityType}";

pub const DEFAULT_BASE_INTERFACE: &str =
    "org.springframework.data.jpa.repository.JpaRepository<${EntityType}, ${IdentityType}>";
pub const DEFAULT_IDENTITY_TYPE: &str = "Long";
pub const DEFAULT_PACKAGE_SUFFIX: &str = ".adapter.domain.repositories";
pub const DEFAULT_GENERATOR_NAME: &str = "stratum";

pub const DEFAULT_CUSTOM_CODE: &str = "@org.springframework.stereotype.Component
    public static class ${EntityType}JpaRepositoryAdapter {
        private final org.springframework.data.jpa.repository.JpaRepository<${EntityType}, ${IdentityType}> jpaRepository;

        public ${EntityType}JpaRepositoryAdapter(org.springframework.data.jpa.repository.JpaRepository<${EntityType}, ${IdentityType}> jpaRepository) {
            this.jpaRepository = jpaRepository;
        }
    }";

/// Opens the generated custom-code block.
pub const CUSTOM_CODE_BEGIN: &str =
    "    // [BEGIN CUSTOM CODE] code outside this block is regenerated, do not edit it by hand";
/// Closes the generated custom-code block.
pub const CUSTOM_CODE_END: &str =
    "    // [END CUSTOM CODE] code outside this block is regenerated, do not edit it by hand";

/// Explicit configuration for repository synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Supertype template, `${EntityType}` / `${IdentityType}` substituted.
    pub base_interface: String,
    pub identity_type: String,
    /// Body emitted for a fresh companion, same placeholders.
    pub custom_code: String,
    /// Appended to the base package for fresh companions.
    pub package_suffix: String,
    /// Simple class names never regenerated (case-insensitive).
    pub ignored: Vec<String>,
    pub generator_name: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            base_interface: DEFAULT_BASE_INTERFACE.into(),
            identity_type: DEFAULT_IDENTITY_TYPE.into(),
            custom_code: DEFAULT_CUSTOM_CODE.into(),
            package_suffix: DEFAULT_PACKAGE_SUFFIX.into(),
            ignored: Vec::new(),
            generator_name: DEFAULT_GENERATOR_NAME.into(),
        }
    }
}

impl RepositoryConfig {
    pub fn with_base_interface(mut self, base_interface: impl Into<String>) -> Self {
        self.base_interface = base_interface.into();
        self
    }

    pub fn with_identity_type(mut self, identity_type: impl Into<String>) -> Self {
        self.identity_type = identity_type.into();
        self
    }

    pub fn with_custom_code(mut self, custom_code: impl Into<String>) -> Self {
        self.custom_code = custom_code.into();
        self
    }

    pub fn with_package_suffix(mut self, package_suffix: impl Into<String>) -> Self {
        self.package_suffix = package_suffix.into();
        self
    }

    pub fn with_ignored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored = names
            .into_iter()
            .map(Into::into)
            .map(|n: String| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        self
    }

    /// Name of the first required field left blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.base_interface.trim().is_empty() {
            Some("base_interface")
        } else if self.identity_type.trim().is_empty() {
            Some("identity_type")
        } else {
            None
        }
    }

    pub fn is_ignored(&self, simple_name: &str) -> bool {
        self.ignored
            .iter()
            .any(|i| i.eq_ignore_ascii_case(simple_name))
    }

    /// Substitute the entity and identity placeholders in `template`.
    pub fn substitute(&self, template: &str, entity_simple_name: &str) -> String {
        template
            .replace(ENTITY_TYPE_PLACEHOLDER, entity_simple_name)
            .replace(IDENTITY_TYPE_PLACEHOLDER, &self.identity_type)
    }
}

/// Where a companion interface lives and what it is generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    /// Fully-qualified entity class name, e.g. `com.acme.domain.Order`.
    pub entity_class_name: String,
    pub entity_simple_name: String,
    pub package_name: String,
    pub file_path: PathBuf,
    /// An existing companion was found away from the default location.
    pub relocated: bool,
}

impl RepositoryTarget {
    pub fn repository_simple_name(&self) -> String {
        format!("{}{}", self.entity_simple_name, REPOSITORY_SUFFIX)
    }
}

/// Drop own-class imports and stale self-imports of `{simple}`.
pub fn filter_imports(import_lines: &[String], entity_simple_name: &str) -> Vec<String> {
    let needle = format!(".{};", entity_simple_name);
    import_lines
        .iter()
        .filter(|line| !line.contains(&needle))
        .cloned()
        .collect()
}

/// Build the full source text of a companion interface.
///
/// `sections` should already have its imports filtered. Annotation lines are
/// machine-owned and never carried over.
pub fn render_repository_source(
    target: &RepositoryTarget,
    sections: &ExtractedFileSections,
    config: &RepositoryConfig,
) -> String {
    let simple = target.entity_simple_name.as_str();
    let mut out: Vec<String> = vec![
        format!("package {};", target.package_name),
        String::new(),
        format!("import {};", target.entity_class_name),
    ];

    if sections.import_lines.is_empty() {
        out.push(String::new());
        out.push("/**".into());
        out.push(format!(" * Generated by {}", config.generator_name));
        out.push(" */".into());
    } else {
        let skip = usize::from(sections.import_lines[0].is_empty());
        out.extend(sections.import_lines.iter().skip(skip).cloned());
    }

    out.push(format!(
        "public interface {} extends {} {{",
        target.repository_simple_name(),
        config.substitute(&config.base_interface, simple)
    ));

    if sections.custom_lines.is_empty() {
        out.push(CUSTOM_CODE_BEGIN.into());
        out.push(String::new());
        out.push(format!("    {}", config.substitute(&config.custom_code, simple)));
        out.push(String::new());
        out.push(CUSTOM_CODE_END.into());
    } else {
        out.extend(sections.custom_lines.iter().cloned());
    }

    out.push("}".into());

    let mut source = out.join("\n");
    source.push('\n');
    source
}
