//! Built-in dependency post-processors.

use sprig_core::{
    application::{DependencyPostProcessor, DependencyResolver, PostProcessScope},
    domain::{Dependency, DependencyScope, LanguageId, ProjectDescriptor},
    error::SprigResult,
};

const JACKSON_MODULE_GROUP: &str = "com.fasterxml.jackson.module";

/// Scala binary version used for cross-built artifacts.
pub const SCALA_BINARY_VERSION: &str = "2.13";

/// Adds a Jackson language module when JSON support meets a JVM language
/// Jackson does not handle out of the box.
#[derive(Debug, Clone)]
pub struct JacksonModulePostProcessor {
    name: &'static str,
    language: LanguageId,
    artifact: String,
}

impl JacksonModulePostProcessor {
    pub fn scala() -> Self {
        Self {
            name: "jackson-scala",
            language: LanguageId::Scala,
            artifact: format!("jackson-module-scala_{SCALA_BINARY_VERSION}"),
        }
    }

    pub fn kotlin() -> Self {
        Self {
            name: "jackson-kotlin",
            language: LanguageId::Kotlin,
            artifact: "jackson-module-kotlin".to_string(),
        }
    }
}

impl DependencyPostProcessor for JacksonModulePostProcessor {
    fn name(&self) -> &str {
        self.name
    }

    fn applies_to(&self, descriptor: &ProjectDescriptor) -> bool {
        descriptor.language().id() == self.language
    }

    fn post_process(
        &self,
        _descriptor: &ProjectDescriptor,
        scope: &mut PostProcessScope<'_>,
    ) -> SprigResult<()> {
        if scope.has_facet("json") {
            scope.add(Dependency::new(JACKSON_MODULE_GROUP, self.artifact.as_str()))?;
        }
        Ok(())
    }
}

/// Adds `reactor-test` to reactive projects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactorTestPostProcessor;

impl DependencyPostProcessor for ReactorTestPostProcessor {
    fn name(&self) -> &str {
        "reactor-test"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn post_process(
        &self,
        _descriptor: &ProjectDescriptor,
        scope: &mut PostProcessScope<'_>,
    ) -> SprigResult<()> {
        if scope.has_facet("webflux") || scope.has_facet("reactive") {
            scope.add(
                Dependency::new("io.projectreactor", "reactor-test")
                    .with_scope(DependencyScope::TestCompile),
            )?;
        }
        Ok(())
    }
}

/// Resolver carrying every built-in post-processor.
pub fn default_resolver() -> DependencyResolver {
    DependencyResolver::builder()
        .post_processor(JacksonModulePostProcessor::scala())
        .post_processor(JacksonModulePostProcessor::kotlin())
        .post_processor(ReactorTestPostProcessor)
        .build()
}
