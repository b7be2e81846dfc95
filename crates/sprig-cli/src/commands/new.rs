//! Implementation of the `sprig new` command.
//!
//! Responsibility: translate CLI arguments into a `ProjectDescriptor`, call
//! the scaffold service, and display results. No business logic lives here.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use sprig_adapters::{LocalFilesystem, default_scaffold_service};
use sprig_core::{
    application::GeneratedProject,
    domain::{BuildSystem, ProjectDescriptor},
    error::SprigError,
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    commands::{descriptor_builder, load_catalog},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `sprig new` command.
///
/// Dispatch sequence:
/// 1. Parse and validate the project name / output path
/// 2. Build the descriptor from flags and configuration defaults
/// 3. Early-exit with a preview if `--dry-run`
/// 4. Confirm with user unless `--yes`, `--quiet` or non-interactive
/// 5. Scaffold via `ScaffoldService`
/// 6. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    let (project_name, project_path) = resolve_project_path(&args.name)?;
    validate_project_name(&project_name)?;

    // 2. Descriptor and catalog
    let descriptor = build_descriptor(&args, &project_name, &config)?;
    debug!(descriptor = %descriptor, facets = ?descriptor.facets(), "Descriptor resolved");

    let catalog = load_catalog(&args.catalog, &config)?;
    let service = default_scaffold_service(catalog, Box::new(LocalFilesystem::new()));

    // 3. Dry run: generate in memory, describe, write nothing.
    if args.dry_run {
        let project = service.generate(&descriptor)?;
        if output.is_json() {
            return output.json(&project.summary());
        }
        output.info(&format!(
            "Dry run: would create '{}' at {}",
            project_name,
            project_path.display(),
        ))?;
        show_project(&project, &output)?;
        return Ok(());
    }

    if project_path.exists() {
        return Err(CliError::ProjectExists { path: project_path });
    }

    // 4. Show configuration and confirm
    let interactive = std::io::stdin().is_terminal() && !output.is_json();
    if !global.quiet && !args.yes && interactive {
        show_configuration(&descriptor, &project_path, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 5. Scaffold
    info!(project = %project_name, path = %project_path.display(), "Scaffold started");
    let spinner = output.spinner(&format!("Creating '{project_name}'..."));
    let result = service.scaffold(&descriptor, &project_path);
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let project = result?;
    info!(project = %project_name, files = project.files.len(), "Scaffold completed");

    // 6. Success + next steps
    if output.is_json() {
        return output.json(&project.summary());
    }
    output.success(&format!(
        "Project '{project_name}' created with {} files",
        project.files.len()
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", project_path.display()))?;
        output.print(&format!("  {}", run_command(descriptor.build_system())))?;
    }

    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Split the argument into the project name (last segment) and the full
/// project directory.
pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract valid project name".into(),
        })?
        .to_string();

    Ok((project_name, path.to_path_buf()))
}

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.starts_with('.') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot contain path separators".into(),
        });
    }
    Ok(())
}

// ── Descriptor construction ───────────────────────────────────────────────────

fn build_descriptor(
    args: &NewArgs,
    project_name: &str,
    config: &AppConfig,
) -> CliResult<ProjectDescriptor> {
    let mut builder = descriptor_builder(&args.descriptor, config)?
        .name(project_name)
        .artifact_id(args.artifact.as_deref().unwrap_or(project_name));

    if let Some(group) = &args.group {
        builder = builder.group_id(group.as_str());
    }
    if let Some(package) = &args.package {
        builder = builder.package_name(package.as_str());
    }
    if let Some(app_name) = &args.app_name {
        builder = builder.application_name(app_name.as_str());
    }
    if let Some(description) = &args.description {
        builder = builder.description(description.as_str());
    }

    let facets = if args.facets.is_empty() {
        &config.defaults.facets
    } else {
        &args.facets
    };
    builder = builder.facets(facets.iter().map(|f| f.trim()).filter(|f| !f.is_empty()));

    builder.build().map_err(|e| CliError::Core(SprigError::from(e)))
}

fn run_command(build_system: BuildSystem) -> &'static str {
    match build_system {
        BuildSystem::Maven => "mvn spring-boot:run",
        BuildSystem::Gradle => "gradle bootRun",
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    descriptor: &ProjectDescriptor,
    location: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:      {}", descriptor.name()))?;
    out.print(&format!(
        "  Coordinates:  {}:{}:{}",
        descriptor.group_id(),
        descriptor.artifact_id(),
        descriptor.version()
    ))?;
    out.print(&format!("  Language:     {}", descriptor.language()))?;
    out.print(&format!("  Build:        {}", descriptor.build_system()))?;
    out.print(&format!("  Packaging:    {}", descriptor.packaging()))?;
    out.print(&format!("  Platform:     {}", descriptor.platform_version()))?;
    out.print(&format!("  Package:      {}", descriptor.package_name()))?;
    if !descriptor.facets().is_empty() {
        out.print(&format!("  Facets:       {}", descriptor.facets().join(", ")))?;
    }
    out.print(&format!("  Location:     {}", location.display()))?;
    out.print("")?;
    Ok(())
}

fn show_project(project: &GeneratedProject, out: &OutputManager) -> CliResult<()> {
    out.header("Files")?;
    for path in project.files.paths() {
        out.print(&format!("  {path}"))?;
    }
    out.header("Dependencies")?;
    for dependency in &project.build.dependencies {
        out.print(&format!("  {} ({})", dependency.id(), dependency.scope()))?;
    }
    if !project.build.repositories.is_empty() {
        out.header("Repositories")?;
        for repository in &project.build.repositories {
            out.print(&format!("  {} {}", repository.id(), repository.url()))?;
        }
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::Prompt {
            message: e.to_string(),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    use crate::error::IntoCli;

    print!("Continue? [Y/n] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
