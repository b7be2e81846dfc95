//! `sprig init`: create a default configuration file.

use std::path::{Path, PathBuf};

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Create a default Sprig configuration file.
pub fn execute(args: InitArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let config_path = target_path(&args, global.config.as_deref());

    // Bail early if the file already exists and --force was not given.
    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    write_default(&config_path)?;
    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;
    Ok(())
}

fn target_path(args: &InitArgs, explicit: Option<&Path>) -> PathBuf {
    if args.local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        AppConfig::config_path(explicit)
    }
}

fn write_default(path: &Path) -> CliResult<()> {
    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create config directory '{}'", parent.display()))?;
    }
    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_default_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        write_default(&path).unwrap();

        let loaded = AppConfig::load(Some(&path), true).unwrap();
        assert_eq!(loaded.defaults, AppConfig::default().defaults);
    }

    #[test]
    fn local_flag_targets_the_working_directory() {
        let args = InitArgs {
            local: true,
            force: false,
        };
        assert_eq!(
            target_path(&args, Some(Path::new("/tmp/ignored.toml"))),
            PathBuf::from(LOCAL_CONFIG_FILE)
        );
    }
}
