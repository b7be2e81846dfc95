//! Command handlers, one module per subcommand.
//!
//! Helpers here turn flags plus configuration defaults into core values.

pub mod completions;
pub mod config;
pub mod facets;
pub mod init;
pub mod new;

use std::path::PathBuf;
use std::str::FromStr;

use tracing::debug;

use sprig_adapters::{BuiltinCatalog, DirectoryCatalog};
use sprig_core::{
    application::{CatalogService, ports::CatalogSource},
    domain::{
        BuildSystem, DependencyCatalog, HasLanguage, Language, LanguageId, Packaging,
        PlatformVersion, ProjectDescriptor, ProjectDescriptorBuilder,
    },
    error::SprigError,
};

use crate::{
    cli::DescriptorArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Built-in catalog overlaid with the configured and the given directories.
pub(crate) fn load_catalog(extra: &[PathBuf], config: &AppConfig) -> CliResult<DependencyCatalog> {
    let mut sources: Vec<Box<dyn CatalogSource>> = vec![Box::new(BuiltinCatalog)];
    for dir in config.catalog.paths.iter().chain(extra) {
        if !dir.is_dir() {
            return Err(CliError::CatalogNotFound { path: dir.clone() });
        }
        sources.push(Box::new(DirectoryCatalog::new(dir.clone())));
    }

    debug!(sources = sources.len(), "Loading catalog");
    Ok(CatalogService::new(sources).load()?)
}

/// Descriptor builder seeded from flags, falling back to config defaults.
pub(crate) fn descriptor_builder(
    args: &DescriptorArgs,
    config: &AppConfig,
) -> CliResult<ProjectDescriptorBuilder<HasLanguage>> {
    let defaults = &config.defaults;

    let language_id = match args.language {
        Some(language) => LanguageId::from(language),
        None => parse_default::<LanguageId>("defaults.language", &defaults.language)?,
    };
    let java_version = args
        .java_version
        .clone()
        .unwrap_or_else(|| defaults.java_version.clone());
    let build_system = match args.build {
        Some(build) => BuildSystem::from(build),
        None => parse_default::<BuildSystem>("defaults.build", &defaults.build)?,
    };
    let packaging = match args.packaging {
        Some(packaging) => Packaging::from(packaging),
        None => parse_default::<Packaging>("defaults.packaging", &defaults.packaging)?,
    };
    let platform = match &args.platform {
        Some(text) => PlatformVersion::parse(text).map_err(SprigError::from)?,
        None => parse_default::<PlatformVersion>("defaults.platform", &defaults.platform)?,
    };

    Ok(ProjectDescriptor::builder()
        .language(Language::new(language_id, java_version))
        .build_system(build_system)
        .packaging(packaging)
        .platform_version(platform)
        .group_id(defaults.group.clone()))
}

fn parse_default<T>(key: &str, value: &str) -> CliResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse().map_err(|e: T::Err| CliError::ConfigError {
        message: format!("{key} = '{value}' is invalid: {e}"),
        source: Some(Box::new(e)),
    })
}
