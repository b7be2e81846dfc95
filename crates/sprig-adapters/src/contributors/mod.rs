//! Built-in project contributors and the default registry.
//!
//! Execution order (lower priority first):
//!
//! | Priority | Contributors |
//! |----------|--------------|
//! | 0        | facet dependencies, baseline starters |
//! | 10       | language runtime, war packaging |
//! | 20       | repositories |
//! | 30       | build plugins |
//! | 100      | main class, test class, servlet initializer |
//! | 200      | `application.properties`, `.gitignore` |

pub mod build;
pub mod resources;
pub mod source;
pub mod templates;

pub use build::{
    BaselineStartersContributor, FacetDependenciesContributor, GradlePluginsContributor,
    LanguageBuildContributor, MavenPluginsContributor, MilestoneRepositoriesContributor,
    RepositoriesContributor, WarPackagingContributor,
};
pub use resources::{ApplicationPropertiesContributor, GitIgnoreContributor};
pub use source::SourceFileContributor;
pub use templates::SourceKind;

use sprig_core::{
    application::{ContributionRegistry, category, services::ContributionRegistryBuilder},
    domain::{BuildSystem, Condition, LanguageId, Packaging},
};

/// Register the built-in contributors on `builder`.
///
/// Callers can keep registering their own contributors afterwards.
pub fn register_builtin(builder: ContributionRegistryBuilder) -> ContributionRegistryBuilder {
    let mut builder = builder
        .register(Condition::always(), FacetDependenciesContributor, 0)
        .register(Condition::always(), BaselineStartersContributor, 0)
        .register(
            Condition::builder().packaging(Packaging::War).build(),
            WarPackagingContributor,
            10,
        )
        .register(Condition::always(), RepositoriesContributor, 20)
        .register(
            MilestoneRepositoriesContributor::applies_to,
            MilestoneRepositoriesContributor,
            20,
        )
        .register(
            Condition::builder().build_system(BuildSystem::Maven).build(),
            MavenPluginsContributor,
            30,
        )
        .register(
            Condition::builder().build_system(BuildSystem::Gradle).build(),
            GradlePluginsContributor,
            30,
        );

    for language in LanguageId::ALL {
        let only = || Condition::builder().language(language);
        builder = builder
            .register(only().build(), LanguageBuildContributor::new(language), 10)
            .register(
                only().build(),
                SourceFileContributor::new(language, SourceKind::MainClass),
                100,
            )
            .register(
                only().build(),
                SourceFileContributor::new(language, SourceKind::TestClass),
                100,
            )
            .register(
                only().packaging(Packaging::War).build(),
                SourceFileContributor::new(language, SourceKind::ServletInitializer),
                100,
            );
    }

    builder
        .register(Condition::always(), ApplicationPropertiesContributor, 200)
        .register(Condition::always(), GitIgnoreContributor, 200)
        .require(category::MAIN_CLASS)
        .require(category::TEST_CLASS)
}

/// Registry holding only the built-in contributors.
pub fn default_registry() -> ContributionRegistry {
    register_builtin(ContributionRegistry::builder()).build()
}
