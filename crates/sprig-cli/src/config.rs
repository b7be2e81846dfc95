//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `SPRIG_*` environment variables, e.g. `SPRIG_DEFAULTS__LANGUAGE=kotlin`
//! 3. The file given with `--config`
//! 4. `.sprig.toml` in the current directory
//! 5. The user config file ([`AppConfig::user_config_path`])
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// File name of the per-directory configuration.
pub const LOCAL_CONFIG_FILE: &str = ".sprig.toml";

const ENV_PREFIX: &str = "SPRIG";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Catalog settings.
    pub catalog: CatalogConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Descriptor defaults applied when the matching flag is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub language: String,
    pub java_version: String,
    pub build: String,
    pub packaging: String,
    pub group: String,
    pub platform: String,
    pub facets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog directories layered over the built-in catalog, in order.
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            language: "java".into(),
            java_version: sprig_core::domain::DEFAULT_JVM_VERSION.into(),
            build: "maven".into(),
            packaging: "jar".into(),
            group: "com.example".into(),
            platform: sprig_core::domain::ProjectDescriptor::DEFAULT_PLATFORM_VERSION.to_string(),
            facets: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering defaults, files and environment.
    ///
    /// `config_file` is the path the user passed via `--config`.  When
    /// `require_file` is set, a missing explicit file is an error.
    pub fn load(config_file: Option<&Path>, require_file: bool) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some(user) = Self::user_config_path() {
            builder = builder.add_source(File::from(user).format(FileFormat::Toml).required(false));
        }
        builder = builder.add_source(
            File::from(PathBuf::from(LOCAL_CONFIG_FILE))
                .format(FileFormat::Toml)
                .required(false),
        );
        if let Some(path) = config_file {
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(require_file),
            );
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("defaults.facets")
                .with_list_parse_key("catalog.paths"),
        );

        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path `init` and `config path` report: `--config` if given, else the
    /// user config file.
    pub fn config_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(Self::user_config_path)
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("rs", "sprig", "sprig")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Look up a dotted key, rendered as text.
    pub fn get(&self, key: &str) -> Option<String> {
        let d = &self.defaults;
        let value = match key {
            "defaults.language" => d.language.clone(),
            "defaults.java_version" => d.java_version.clone(),
            "defaults.build" => d.build.clone(),
            "defaults.packaging" => d.packaging.clone(),
            "defaults.group" => d.group.clone(),
            "defaults.platform" => d.platform.clone(),
            "defaults.facets" => d.facets.join(","),
            "catalog.paths" => self
                .catalog
                .paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(","),
            "output.no_color" => self.output.no_color.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_engine() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.language, "java");
        assert_eq!(cfg.defaults.java_version, "17");
        assert_eq!(cfg.defaults.platform, "3.2.0");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprig.toml");
        std::fs::write(
            &path,
            "[defaults]\nlanguage = \"kotlin\"\nfacets = [\"web\", \"actuator\"]\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path), true).unwrap();
        assert_eq!(cfg.defaults.language, "kotlin");
        assert_eq!(cfg.defaults.facets, ["web", "actuator"]);
        assert_eq!(cfg.defaults.build, "maven");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path), true).is_err());
        assert!(AppConfig::load(Some(&path), false).is_ok());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[defaults\nlanguage = ").unwrap();
        assert!(AppConfig::load(Some(&path), true).is_err());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("defaults.group").as_deref(), Some("com.example"));
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("does.not.exist"), None);
    }

    #[test]
    fn config_path_prefers_explicit() {
        let p = AppConfig::config_path(Some(Path::new("/tmp/x.toml")));
        assert_eq!(p, PathBuf::from("/tmp/x.toml"));
        assert!(!AppConfig::config_path(None).as_os_str().is_empty());
    }
}
