//! Build-model contributors.
//!
//! These only touch the [`BuildModel`](sprig_core::domain::BuildModel); the
//! build file itself is written by a serializer once every contributor ran.

use sprig_core::{
    application::{ProjectContributor, ProjectScope, category},
    domain::{
        BuildSystem, Dependency, DependencyScope, LanguageId, Packaging, Plugin,
        ProjectDescriptor, Repository,
    },
    error::SprigResult,
};

pub const SPRING_BOOT_GROUP: &str = "org.springframework.boot";
pub const KOTLIN_VERSION: &str = "1.9.22";
pub const SCALA_VERSION: &str = "2.13.12";
pub const DEPENDENCY_MANAGEMENT_VERSION: &str = "1.1.4";

/// `spring-boot-starter` unless a facet already brings a starter, and
/// `spring-boot-starter-test` in test scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineStartersContributor;

impl ProjectContributor for BaselineStartersContributor {
    fn name(&self) -> &str {
        "baseline-starters"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::BUILD)
    }

    fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()> {
        let has_starter = scope.dependencies().dependencies().any(|d| {
            d.group_id() == SPRING_BOOT_GROUP
                && d.artifact_id().starts_with("spring-boot-starter")
                && !d.scope().is_test()
        });

        let mut build = scope.build();
        if !has_starter {
            build.add_dependency(Dependency::new(SPRING_BOOT_GROUP, "spring-boot-starter"))?;
        }
        build.add_dependency(
            Dependency::new(SPRING_BOOT_GROUP, "spring-boot-starter-test")
                .with_scope(DependencyScope::TestCompile),
        )?;
        Ok(())
    }
}

/// Copies the resolved dependencies into the build.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacetDependenciesContributor;

impl ProjectContributor for FacetDependenciesContributor {
    fn name(&self) -> &str {
        "facet-dependencies"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::BUILD)
    }

    fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()> {
        let dependencies: Vec<Dependency> = scope.dependencies().dependencies().cloned().collect();
        let mut build = scope.build();
        for dependency in dependencies {
            build.add_dependency(dependency)?;
        }
        Ok(())
    }
}

/// Maven Central plus every repository a resolved catalog entry needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepositoriesContributor;

impl ProjectContributor for RepositoriesContributor {
    fn name(&self) -> &str {
        "repositories"
    }

    fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()> {
        let required: Vec<Repository> = scope
            .dependencies()
            .repositories()
            .map(|(repository, _)| repository.clone())
            .collect();
        let mut build = scope.build();
        build.add_repository(Repository::maven_central())?;
        for repository in required {
            build.add_repository(repository)?;
        }
        Ok(())
    }
}

/// Spring milestone and snapshot repositories for pre-release platforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct MilestoneRepositoriesContributor;

impl MilestoneRepositoriesContributor {
    pub const MILESTONES_ID: &'static str = "spring-milestones";
    pub const SNAPSHOTS_ID: &'static str = "spring-snapshots";

    /// Activation predicate.
    pub fn applies_to(descriptor: &ProjectDescriptor) -> bool {
        descriptor.platform_version().is_prerelease()
    }
}

impl ProjectContributor for MilestoneRepositoriesContributor {
    fn name(&self) -> &str {
        "milestone-repositories"
    }

    fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()> {
        let snapshot = scope
            .descriptor()
            .platform_version()
            .as_semver()
            .pre
            .as_str()
            .contains("SNAPSHOT");

        let milestones =
            Repository::with_id_and_url(Self::MILESTONES_ID, "https://repo.spring.io/milestone")
                .name("Spring Milestones")
                .build()?;
        let mut build = scope.build();
        build.add_repository(milestones)?;
        if snapshot {
            let snapshots =
                Repository::with_id_and_url(Self::SNAPSHOTS_ID, "https://repo.spring.io/snapshot")
                    .name("Spring Snapshots")
                    .snapshots_enabled(true)
                    .build()?;
            build.add_repository(snapshots)?;
        }
        Ok(())
    }
}

/// Language runtime dependencies and version properties.
#[derive(Debug, Clone)]
pub struct LanguageBuildContributor {
    name: String,
    language: LanguageId,
}

impl LanguageBuildContributor {
    pub fn new(language: LanguageId) -> Self {
        Self {
            name: format!("{language}-build"),
            language,
        }
    }
}

impl ProjectContributor for LanguageBuildContributor {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::BUILD)
    }

    fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()> {
        let jvm_version = scope.descriptor().language().jvm_version().to_string();
        let mut build = scope.build();
        build.set_property("java.version", jvm_version);

        match self.language {
            LanguageId::Java => {}
            LanguageId::Kotlin => {
                build.set_property("kotlin.version", KOTLIN_VERSION);
                build.add_dependency(Dependency::new("org.jetbrains.kotlin", "kotlin-reflect"))?;
                build.add_dependency(Dependency::new("org.jetbrains.kotlin", "kotlin-stdlib-jdk8"))?;
            }
            LanguageId::Groovy => {
                build.add_dependency(Dependency::new("org.apache.groovy", "groovy"))?;
            }
            LanguageId::Scala => {
                build.add_dependency(
                    Dependency::new("org.scala-lang", "scala-library").with_version(SCALA_VERSION),
                )?;
            }
        }
        Ok(())
    }
}

/// Maven plugins: Spring Boot plus the language compiler plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct MavenPluginsContributor;

impl ProjectContributor for MavenPluginsContributor {
    fn name(&self) -> &str {
        "maven-plugins"
    }

    fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()> {
        let language = scope.descriptor().language().id();
        let mut build = scope.build();
        build.add_plugin(Plugin::new(SPRING_BOOT_GROUP, "spring-boot-maven-plugin"))?;

        match language {
            LanguageId::Java => {}
            LanguageId::Kotlin => {
                build.add_plugin(
                    Plugin::new("org.jetbrains.kotlin", "kotlin-maven-plugin")
                        .with_list_configuration("args", "arg", ["-Xjsr305=strict"])
                        .with_list_configuration("compilerPlugins", "plugin", ["spring"]),
                )?;
            }
            LanguageId::Groovy => {
                build.add_plugin(
                    Plugin::new("org.codehaus.gmavenplus", "gmavenplus-plugin")
                        .with_version("3.0.2"),
                )?;
            }
            LanguageId::Scala => {
                build.add_plugin(
                    Plugin::new("net.alchim31.maven", "scala-maven-plugin").with_version("4.8.1"),
                )?;
            }
        }
        Ok(())
    }
}

/// A Gradle plugin, addressed through its marker artifact.
pub fn gradle_plugin(id: &str) -> Plugin {
    Plugin::new(id, format!("{id}.gradle.plugin"))
}

/// Gradle plugins: language, Spring Boot and dependency management.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradlePluginsContributor;

impl ProjectContributor for GradlePluginsContributor {
    fn name(&self) -> &str {
        "gradle-plugins"
    }

    fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()> {
        let language = scope.descriptor().language().id();
        let platform = scope.descriptor().platform_version().as_declared().into_owned();
        let mut build = scope.build();

        build.add_plugin(gradle_plugin("java"))?;
        build.add_plugin(gradle_plugin("org.springframework.boot").with_version(platform))?;
        build.add_plugin(
            gradle_plugin("io.spring.dependency-management")
                .with_version(DEPENDENCY_MANAGEMENT_VERSION),
        )?;
        match language {
            LanguageId::Java => {}
            LanguageId::Kotlin => {
                build.add_plugin(gradle_plugin("org.jetbrains.kotlin.jvm").with_version(KOTLIN_VERSION))?;
                build.add_plugin(
                    gradle_plugin("org.jetbrains.kotlin.plugin.spring").with_version(KOTLIN_VERSION),
                )?;
            }
            LanguageId::Groovy => {
                build.add_plugin(gradle_plugin("groovy"))?;
            }
            LanguageId::Scala => {
                build.add_plugin(gradle_plugin("scala"))?;
            }
        }
        Ok(())
    }
}

/// War packaging: the servlet container is provided at runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarPackagingContributor;

impl ProjectContributor for WarPackagingContributor {
    fn name(&self) -> &str {
        "war-packaging"
    }

    fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()> {
        debug_assert_eq!(scope.descriptor().packaging(), Packaging::War);
        let gradle = scope.descriptor().build_system() == BuildSystem::Gradle;
        let mut build = scope.build();
        build.add_dependency(
            Dependency::new(SPRING_BOOT_GROUP, "spring-boot-starter-tomcat")
                .with_scope(DependencyScope::ProvidedRuntime),
        )?;
        if gradle {
            build.add_plugin(gradle_plugin("war"))?;
        }
        Ok(())
    }
}
