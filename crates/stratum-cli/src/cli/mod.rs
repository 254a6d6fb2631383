//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stratum",
    bin_name = "stratum",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered-architecture scaffolding and repository regeneration",
    long_about = "Stratum renders project skeletons from declarative template trees \
                  and keeps aggregate-root repository interfaces in sync with the \
                  domain model, without touching hand-written code.",
    after_help = "EXAMPLES:\n\
        \x20 stratum arch --template arch.json --base-package com.acme.shop\n\
        \x20 stratum repository --multi-module --ignore AuditLog\n\
        \x20 stratum init\n\
        \x20 stratum completions bash > /usr/share/bash-completion/completions/stratum",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a project skeleton from a template description.
    #[command(
        visible_alias = "a",
        about = "Render an architecture template",
        after_help = "EXAMPLES:\n\
            \x20 stratum arch --template arch.json --base-package com.acme.shop\n\
            \x20 stratum arch --template https://example.com/arch.toml --output ./shop"
    )]
    Arch(ArchArgs),

    /// Regenerate repository interfaces for every aggregate root.
    #[command(
        visible_alias = "repo",
        about = "Regenerate aggregate-root repositories",
        after_help = "EXAMPLES:\n\
            \x20 stratum repository --base-package com.acme.shop\n\
            \x20 stratum repository --multi-module --project-dir ./shop\n\
            \x20 stratum repository --ignore AuditLog,Outbox --identity-type UUID"
    )]
    Repository(RepositoryArgs),

    /// Initialise a Stratum configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stratum init           # ./stratum.toml\n\
            \x20 stratum init --global  # user configuration directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stratum completions bash > ~/.local/share/bash-completion/completions/stratum\n\
            \x20 stratum completions zsh  > ~/.zfunc/_stratum\n\
            \x20 stratum completions fish > ~/.config/fish/completions/stratum.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stratum config get repository.identity_type\n\
            \x20 stratum config list\n\
            \x20 stratum config path"
    )]
    Config(ConfigCommands),
}

// ── arch ──────────────────────────────────────────────────────────────────────

/// Arguments for `stratum arch`.
#[derive(Debug, Args)]
pub struct ArchArgs {
    /// Template description locator (path, `file://` or `http(s)://`).
    #[arg(
        short = 't',
        long = "template",
        value_name = "LOCATOR",
        help = "Template description (JSON or TOML), path or URL"
    )]
    pub template: Option<String>,

    #[arg(
        short = 'p',
        long = "base-package",
        value_name = "PACKAGE",
        help = "Base package, e.g. com.acme.shop"
    )]
    pub base_package: Option<String>,

    #[arg(long = "group-id", value_name = "GROUP", help = "Group id (default: from pom.xml)")]
    pub group_id: Option<String>,

    #[arg(
        long = "artifact-id",
        value_name = "ARTIFACT",
        help = "Artifact id (default: from pom.xml)"
    )]
    pub artifact_id: Option<String>,

    #[arg(
        long = "project-version",
        value_name = "VERSION",
        help = "Project version (default: from pom.xml)"
    )]
    pub version: Option<String>,

    /// Directory the template tree is rendered into.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,
}

// ── repository ────────────────────────────────────────────────────────────────

/// Arguments for `stratum repository`.
#[derive(Debug, Args)]
pub struct RepositoryArgs {
    #[arg(
        short = 'p',
        long = "base-package",
        value_name = "PACKAGE",
        help = "Base package (default: inferred from the domain sources)"
    )]
    pub base_package: Option<String>,

    #[arg(
        short = 'd',
        long = "project-dir",
        value_name = "DIR",
        help = "Project directory (default: current directory)"
    )]
    pub project_dir: Option<PathBuf>,

    /// Scan `*-domain` and write into `*-adapter` sibling modules.
    #[arg(long = "multi-module", help = "Project is split into domain/adapter modules")]
    pub multi_module: bool,

    /// Comma-separated aggregate names to leave alone (case-insensitive).
    #[arg(
        long = "ignore",
        value_name = "NAMES",
        value_delimiter = ',',
        help = "Aggregate roots to skip, comma separated"
    )]
    pub ignore: Vec<String>,

    #[arg(
        long = "base-interface",
        value_name = "TYPE",
        help = "Supertype template, e.g. 'JpaRepository<${EntityType}, ${IdentityType}>'"
    )]
    pub base_interface: Option<String>,

    #[arg(long = "identity-type", value_name = "TYPE", help = "Identity type, e.g. Long")]
    pub identity_type: Option<String>,

    #[arg(
        long = "custom-code",
        value_name = "TEMPLATE",
        help = "Initial body of freshly generated repositories"
    )]
    pub custom_code: Option<String>,

    #[arg(
        long = "marker",
        value_name = "ANNOTATION",
        help = "Aggregate-root annotation name (default: AggregateRoot)"
    )]
    pub marker: Option<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stratum init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the user configuration directory instead of `./stratum.toml`.
    #[arg(long = "global", help = "Create global configuration")]
    pub global: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stratum completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stratum config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `repository.identity_type`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
