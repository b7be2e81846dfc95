//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use sprig_core::domain::{BuildSystem, LanguageId, Packaging};

pub mod global;
pub use global::{GlobalArgs, LogFormat, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "sprig",
    bin_name = "sprig",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate JVM service projects",
    long_about = "Sprig generates ready-to-build Spring Boot projects for Java, \
                  Kotlin, Groovy and Scala, with Maven or Gradle builds.",
    after_help = "EXAMPLES:\n\
        \x20 sprig new demo --facet web,data-jpa,h2\n\
        \x20 sprig new shop --lang kotlin --build gradle --packaging war\n\
        \x20 sprig facets --lang scala --platform 2.7.18\n\
        \x20 sprig completions bash > /usr/share/bash-completion/completions/sprig",
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

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 sprig new demo\n\
            \x20 sprig new api --facet web --facet actuator --java-version 21\n\
            \x20 sprig new legacy --packaging war --platform 2.7.18 --dry-run"
    )]
    New(NewArgs),

    /// List catalog facets.
    #[command(
        visible_alias = "ls",
        about = "List available facets",
        after_help = "EXAMPLES:\n\
            \x20 sprig facets\n\
            \x20 sprig facets --lang kotlin --platform 1.5.22.RELEASE --available\n\
            \x20 sprig facets --format json"
    )]
    Facets(FacetsArgs),

    /// Initialise a Sprig configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 sprig init           # user config location\n\
            \x20 sprig init --local   # .sprig.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sprig completions bash > ~/.local/share/bash-completion/completions/sprig\n\
            \x20 sprig completions zsh  > ~/.zfunc/_sprig\n\
            \x20 sprig completions fish > ~/.config/fish/completions/sprig.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Sprig configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 sprig config get defaults.language\n\
            \x20 sprig config list\n\
            \x20 sprig config path"
    )]
    Config(ConfigCommands),
}

// ── descriptor flags ──────────────────────────────────────────────────────────

/// Descriptor flags shared by `new` and `facets`.
///
/// Every flag is optional; unset values fall back to the configuration
/// defaults and then to the engine defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct DescriptorArgs {
    /// Source language.
    #[arg(short = 'l', long = "lang", value_name = "LANGUAGE", value_enum)]
    pub language: Option<Language>,

    /// JVM release the project targets.
    #[arg(long = "java-version", value_name = "VERSION")]
    pub java_version: Option<String>,

    /// Build system.
    #[arg(short = 'b', long = "build", value_name = "BUILD", value_enum)]
    pub build: Option<Build>,

    /// Artifact packaging.
    #[arg(short = 'p', long = "packaging", value_name = "PACKAGING", value_enum)]
    pub packaging: Option<PackagingArg>,

    /// Platform (Spring Boot) version, e.g. `3.2.0` or `2.7.18.RELEASE`.
    #[arg(long = "platform", value_name = "VERSION")]
    pub platform: Option<String>,
}

impl DescriptorArgs {
    /// Whether any descriptor flag was given.
    pub fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.java_version.is_none()
            && self.build.is_none()
            && self.packaging.is_none()
            && self.platform.is_none()
    }
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `sprig new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    #[command(flatten)]
    pub descriptor: DescriptorArgs,

    /// Maven group id.
    #[arg(short = 'g', long = "group", value_name = "GROUP")]
    pub group: Option<String>,

    /// Maven artifact id (defaults to the project name).
    #[arg(short = 'a', long = "artifact", value_name = "ARTIFACT")]
    pub artifact: Option<String>,

    /// Root package of the generated sources.
    #[arg(long = "package", value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Name of the main application class.
    #[arg(long = "app-name", value_name = "CLASS")]
    pub app_name: Option<String>,

    /// Project description.
    #[arg(short = 'd', long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    /// Facets to include; repeatable and comma separated.
    #[arg(
        short = 'f',
        long = "facet",
        value_name = "FACET",
        value_delimiter = ',',
        action = clap::ArgAction::Append
    )]
    pub facets: Vec<String>,

    /// Extra catalog directories layered over the built-in catalog.
    #[arg(long = "catalog", value_name = "DIR")]
    pub catalog: Vec<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── facets ────────────────────────────────────────────────────────────────────

/// Arguments for `sprig facets`.
#[derive(Debug, Args)]
pub struct FacetsArgs {
    #[command(flatten)]
    pub descriptor: DescriptorArgs,

    /// Only show facets usable with the given descriptor flags.
    #[arg(long = "available", help = "Hide facets unavailable for the descriptor")]
    pub available: bool,

    /// Extra catalog directories layered over the built-in catalog.
    #[arg(long = "catalog", value_name = "DIR")]
    pub catalog: Vec<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `facets` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `sprig init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.sprig.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `sprig completions`.
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

/// Subcommands for `sprig config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.language`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported source languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Language {
    Java,
    /// Also accepted as `kt`.
    #[value(alias = "kt")]
    Kotlin,
    Groovy,
    Scala,
}

impl From<Language> for LanguageId {
    fn from(language: Language) -> Self {
        match language {
            Language::Java => LanguageId::Java,
            Language::Kotlin => LanguageId::Kotlin,
            Language::Groovy => LanguageId::Groovy,
            Language::Scala => LanguageId::Scala,
        }
    }
}

/// Supported build systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Build {
    /// Also accepted as `mvn`.
    #[value(alias = "mvn")]
    Maven,
    Gradle,
}

impl From<Build> for BuildSystem {
    fn from(build: Build) -> Self {
        match build {
            Build::Maven => BuildSystem::Maven,
            Build::Gradle => BuildSystem::Gradle,
        }
    }
}

/// Supported packagings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PackagingArg {
    Jar,
    War,
}

impl From<PackagingArg> for Packaging {
    fn from(packaging: PackagingArg) -> Self {
        match packaging {
            PackagingArg::Jar => Packaging::Jar,
            PackagingArg::War => Packaging::War,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from([
            "sprig", "new", "demo", "--lang", "kotlin", "--build", "gradle", "--packaging",
            "war",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.descriptor.language, Some(Language::Kotlin));
        assert_eq!(args.descriptor.build, Some(Build::Gradle));
        assert_eq!(args.descriptor.packaging, Some(PackagingArg::War));
    }

    #[test]
    fn facets_are_repeatable_and_comma_separated() {
        let cli = Cli::parse_from([
            "sprig", "new", "demo", "--facet", "web,json", "-f", "h2",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.facets, ["web", "json", "h2"]);
    }

    #[test]
    fn kotlin_alias() {
        let cli = Cli::parse_from(["sprig", "new", "demo", "-l", "kt"]);
        if let Commands::New(args) = cli.command {
            assert_eq!(LanguageId::from(args.descriptor.language.unwrap()), LanguageId::Kotlin);
        } else {
            panic!("expected New command");
        }
    }

    #[test]
    fn descriptor_args_emptiness() {
        assert!(DescriptorArgs::default().is_empty());
        let args = DescriptorArgs {
            platform: Some("2.7.18".into()),
            ..DescriptorArgs::default()
        };
        assert!(!args.is_empty());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["sprig", "--quiet", "--verbose", "facets"]);
        assert!(result.is_err());
    }
}
