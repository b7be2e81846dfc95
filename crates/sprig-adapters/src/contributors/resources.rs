//! Resource and project-root files.

use sprig_core::{
    application::{ProjectContributor, ProjectScope, category},
    domain::BuildSystem,
    error::SprigResult,
};

/// Writes an empty `src/main/resources/application.properties`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicationPropertiesContributor;

impl ProjectContributor for ApplicationPropertiesContributor {
    fn name(&self) -> &str {
        "application-properties"
    }

    fn category(&self) -> Option<&'static str> {
        Some(category::RESOURCES)
    }

    fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()> {
        scope.write_file("src/main/resources/application.properties", "")
    }
}

/// Writes a `.gitignore` suited to the build system.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitIgnoreContributor;

const MAVEN_IGNORES: &str = "\
HELP.md
target/
!.mvn/wrapper/maven-wrapper.jar
!**/src/main/**/target/
!**/src/test/**/target/
";

const GRADLE_IGNORES: &str = "\
HELP.md
.gradle
build/
!gradle/wrapper/gradle-wrapper.jar
!**/src/main/**/build/
!**/src/test/**/build/
";

const IDE_IGNORES: &str = "
### STS ###
.apt_generated
.classpath
.factorypath
.project
.settings
.springBeans
.sts4-cache

### IntelliJ IDEA ###
.idea
*.iws
*.iml
*.ipr
out/

### NetBeans ###
/nbproject/private/
/nbbuild/
/dist/
/nbdist/
/.nb-gradle/

### VS Code ###
.vscode/
";

impl GitIgnoreContributor {
    pub fn content(build_system: BuildSystem) -> String {
        let head = match build_system {
            BuildSystem::Maven => MAVEN_IGNORES,
            BuildSystem::Gradle => GRADLE_IGNORES,
        };
        format!("{head}{IDE_IGNORES}")
    }
}

impl ProjectContributor for GitIgnoreContributor {
    fn name(&self) -> &str {
        "gitignore"
    }

    fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()> {
        let content = Self::content(scope.descriptor().build_system());
        scope.write_file(".gitignore", content)
    }
}
