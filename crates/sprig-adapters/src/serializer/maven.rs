//! Maven `pom.xml` serializer.

use sprig_core::{
    application::ports::BuildSerializer,
    domain::{
        BuildSystem, Dependency, DependencyScope, EffectiveBuild, Packaging, Plugin,
        PluginSetting, ProjectDescriptor, Repository,
    },
    error::SprigResult,
};
use tracing::instrument;

use super::Writer;

const PARENT_GROUP: &str = "org.springframework.boot";
const PARENT_ARTIFACT: &str = "spring-boot-starter-parent";

/// Writes a `pom.xml` inheriting from the Spring Boot parent.
///
/// Maven Central is implicit and never listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MavenPomSerializer;

impl BuildSerializer for MavenPomSerializer {
    fn build_system(&self) -> BuildSystem {
        BuildSystem::Maven
    }

    #[instrument(skip_all, fields(project = %descriptor.artifact_id()))]
    fn serialize(&self, descriptor: &ProjectDescriptor, build: &EffectiveBuild) -> SprigResult<String> {
        let mut w = Writer::default();
        w.line(0, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        w.line(
            0,
            r#"<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#,
        );
        w.line(
            1,
            r#"xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">"#,
        );
        w.line(1, "<modelVersion>4.0.0</modelVersion>");

        w.line(1, "<parent>");
        element(&mut w, 2, "groupId", PARENT_GROUP);
        element(&mut w, 2, "artifactId", PARENT_ARTIFACT);
        element(&mut w, 2, "version", &descriptor.platform_version().as_declared());
        w.line(2, "<relativePath/> <!-- lookup parent from repository -->");
        w.line(1, "</parent>");

        element(&mut w, 1, "groupId", descriptor.group_id());
        element(&mut w, 1, "artifactId", descriptor.artifact_id());
        element(&mut w, 1, "version", descriptor.version());
        if descriptor.packaging() == Packaging::War {
            element(&mut w, 1, "packaging", "war");
        }
        element(&mut w, 1, "name", descriptor.name());
        if let Some(description) = descriptor.description() {
            element(&mut w, 1, "description", description);
        }

        if !build.properties.is_empty() {
            w.line(1, "<properties>");
            for (key, value) in &build.properties {
                element(&mut w, 2, key, value);
            }
            w.line(1, "</properties>");
        }

        if !build.dependencies.is_empty() {
            w.line(1, "<dependencies>");
            for dependency in build.main_dependencies().chain(build.test_dependencies()) {
                write_dependency(&mut w, dependency);
            }
            w.line(1, "</dependencies>");
        }

        if !build.plugins.is_empty() {
            w.line(1, "<build>");
            w.line(2, "<plugins>");
            for plugin in &build.plugins {
                write_plugin(&mut w, plugin);
            }
            w.line(2, "</plugins>");
            w.line(1, "</build>");
        }

        let listed: Vec<&Repository> = build
            .repositories
            .iter()
            .filter(|r| r.id() != Repository::MAVEN_CENTRAL_ID)
            .collect();
        if !listed.is_empty() {
            write_repositories(&mut w, "repositories", "repository", &listed);
            write_repositories(&mut w, "pluginRepositories", "pluginRepository", &listed);
        }

        w.blank();
        w.line(0, "</project>");
        Ok(w.finish())
    }
}

fn element(w: &mut Writer, depth: usize, name: &str, value: &str) {
    w.line(depth, format!("<{name}>{}</{name}>", escape(value)));
}

fn write_dependency(w: &mut Writer, dependency: &Dependency) {
    w.line(2, "<dependency>");
    element(w, 3, "groupId", dependency.group_id());
    element(w, 3, "artifactId", dependency.artifact_id());
    if let Some(version) = dependency.version() {
        element(w, 3, "version", version);
    }
    match dependency.scope() {
        DependencyScope::Compile => {}
        DependencyScope::CompileOnly | DependencyScope::AnnotationProcessor => {
            element(w, 3, "optional", "true");
        }
        DependencyScope::Runtime => element(w, 3, "scope", "runtime"),
        DependencyScope::ProvidedRuntime => element(w, 3, "scope", "provided"),
        DependencyScope::TestCompile | DependencyScope::TestRuntime => {
            element(w, 3, "scope", "test");
        }
    }
    if !dependency.exclusions().is_empty() {
        w.line(3, "<exclusions>");
        for exclusion in dependency.exclusions() {
            w.line(4, "<exclusion>");
            element(w, 5, "groupId", &exclusion.group_id);
            element(w, 5, "artifactId", &exclusion.artifact_id);
            w.line(4, "</exclusion>");
        }
        w.line(3, "</exclusions>");
    }
    w.line(2, "</dependency>");
}

fn write_plugin(w: &mut Writer, plugin: &Plugin) {
    w.line(3, "<plugin>");
    element(w, 4, "groupId", &plugin.id().group_id);
    element(w, 4, "artifactId", &plugin.id().artifact_id);
    if let Some(version) = plugin.version() {
        element(w, 4, "version", version);
    }
    if !plugin.configuration().is_empty() {
        w.line(4, "<configuration>");
        for (key, setting) in plugin.configuration() {
            match setting {
                PluginSetting::Value(value) => element(w, 5, key, value),
                PluginSetting::List { item, values } => {
                    w.line(5, format!("<{key}>"));
                    for value in values {
                        element(w, 6, item, value);
                    }
                    w.line(5, format!("</{key}>"));
                }
            }
        }
        w.line(4, "</configuration>");
    }
    w.line(3, "</plugin>");
}

fn write_repositories(w: &mut Writer, outer: &str, inner: &str, repositories: &[&Repository]) {
    w.line(1, format!("<{outer}>"));
    for repository in repositories {
        w.line(2, format!("<{inner}>"));
        element(w, 3, "id", repository.id());
        element(w, 3, "name", repository.name());
        element(w, 3, "url", repository.url());
        w.line(3, "<snapshots>");
        element(w, 4, "enabled", if repository.snapshots_enabled() { "true" } else { "false" });
        w.line(3, "</snapshots>");
        w.line(2, format!("</{inner}>"));
    }
    w.line(1, format!("</{outer}>"));
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
