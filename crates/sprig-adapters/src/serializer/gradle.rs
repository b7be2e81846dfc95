//! Gradle `build.gradle` (Groovy DSL) serializer.

use sprig_core::{
    application::ports::BuildSerializer,
    domain::{BuildSystem, Dependency, DependencyScope, EffectiveBuild, ProjectDescriptor, Repository},
    error::SprigResult,
};
use tracing::instrument;

use super::Writer;

/// Configuration order in the `dependencies` block.
const SCOPES: [DependencyScope; 7] = [
    DependencyScope::Compile,
    DependencyScope::CompileOnly,
    DependencyScope::Runtime,
    DependencyScope::ProvidedRuntime,
    DependencyScope::AnnotationProcessor,
    DependencyScope::TestCompile,
    DependencyScope::TestRuntime,
];

const PLUGIN_MARKER_SUFFIX: &str = ".gradle.plugin";

/// Writes a `build.gradle`.
///
/// Plugins are expected as marker artifacts (`<id>:<id>.gradle.plugin`).
/// `java.version` becomes the source compatibility; other properties land
/// in `ext`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradleBuildSerializer;

pub const fn configuration(scope: DependencyScope) -> &'static str {
    match scope {
        DependencyScope::Compile => "implementation",
        DependencyScope::CompileOnly => "compileOnly",
        DependencyScope::Runtime => "runtimeOnly",
        DependencyScope::ProvidedRuntime => "providedRuntime",
        DependencyScope::AnnotationProcessor => "annotationProcessor",
        DependencyScope::TestCompile => "testImplementation",
        DependencyScope::TestRuntime => "testRuntimeOnly",
    }
}

impl BuildSerializer for GradleBuildSerializer {
    fn build_system(&self) -> BuildSystem {
        BuildSystem::Gradle
    }

    #[instrument(skip_all, fields(project = %descriptor.artifact_id()))]
    fn serialize(&self, descriptor: &ProjectDescriptor, build: &EffectiveBuild) -> SprigResult<String> {
        let mut w = Writer::default();

        if !build.plugins.is_empty() {
            w.line(0, "plugins {");
            for plugin in &build.plugins {
                let id = plugin
                    .id()
                    .artifact_id
                    .strip_suffix(PLUGIN_MARKER_SUFFIX)
                    .unwrap_or(&plugin.id().group_id);
                match plugin.version() {
                    Some(version) => w.line(1, format!("id '{id}' version '{version}'")),
                    None => w.line(1, format!("id '{id}'")),
                }
            }
            w.line(0, "}");
            w.blank();
        }

        w.line(0, format!("group = '{}'", descriptor.group_id()));
        w.line(0, format!("version = '{}'", descriptor.version()));
        if let Some(description) = descriptor.description() {
            w.line(0, format!("description = '{}'", quote(description)));
        }
        w.blank();

        let java_version = build
            .properties
            .get("java.version")
            .map(String::as_str)
            .unwrap_or(descriptor.language().jvm_version());
        w.line(0, "java {");
        w.line(1, format!("sourceCompatibility = '{java_version}'"));
        w.line(0, "}");
        w.blank();

        if !build.repositories.is_empty() {
            w.line(0, "repositories {");
            for repository in &build.repositories {
                if repository.id() == Repository::MAVEN_CENTRAL_ID {
                    w.line(1, "mavenCentral()");
                } else {
                    w.line(1, format!("maven {{ url '{}' }}", repository.url()));
                }
            }
            w.line(0, "}");
            w.blank();
        }

        let extra: Vec<(&String, &String)> = build
            .properties
            .iter()
            .filter(|(k, _)| k.as_str() != "java.version")
            .collect();
        if !extra.is_empty() {
            w.line(0, "ext {");
            for (key, value) in extra {
                w.line(1, format!("set('{key}', \"{}\")", quote(value)));
            }
            w.line(0, "}");
            w.blank();
        }

        if !build.dependencies.is_empty() {
            w.line(0, "dependencies {");
            for scope in SCOPES {
                for dependency in build.dependencies.iter().filter(|d| d.scope() == scope) {
                    write_dependency(&mut w, dependency);
                }
            }
            w.line(0, "}");
            w.blank();
        }

        w.line(0, "tasks.named('test') {");
        w.line(1, "useJUnitPlatform()");
        w.line(0, "}");
        Ok(w.finish())
    }
}

fn write_dependency(w: &mut Writer, dependency: &Dependency) {
    let config = configuration(dependency.scope());
    let notation = match dependency.version() {
        Some(version) => format!("{}:{}:{version}", dependency.group_id(), dependency.artifact_id()),
        None => format!("{}:{}", dependency.group_id(), dependency.artifact_id()),
    };

    if dependency.exclusions().is_empty() {
        w.line(1, format!("{config} '{notation}'"));
        return;
    }
    w.line(1, format!("{config}('{notation}') {{"));
    for exclusion in dependency.exclusions() {
        w.line(
            2,
            format!(
                "exclude group: '{}', module: '{}'",
                exclusion.group_id, exclusion.artifact_id
            ),
        );
    }
    w.line(1, "}");
}

/// Escape for a Groovy string literal.
fn quote(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('"', "\\\"")
        .replace('$', "\\$")
}
