//! Main class, test class and servlet initializer contributors.

use sprig_core::{
    application::{ProjectContributor, ProjectScope, category},
    domain::LanguageId,
    error::SprigResult,
};

use super::templates::{SourceKind, template};
use crate::render::RenderContext;

/// Writes one source file of `kind` for `language`.
///
/// Register it behind a condition on the same language.
#[derive(Debug, Clone)]
pub struct SourceFileContributor {
    name: String,
    language: LanguageId,
    kind: SourceKind,
}

impl SourceFileContributor {
    pub fn new(language: LanguageId, kind: SourceKind) -> Self {
        Self {
            name: format!("{}-{}", language, kind.as_str()),
            language,
            kind,
        }
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }
}

impl ProjectContributor for SourceFileContributor {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&'static str> {
        Some(match self.kind {
            SourceKind::MainClass => category::MAIN_CLASS,
            SourceKind::TestClass => category::TEST_CLASS,
            SourceKind::ServletInitializer => category::SERVLET_INITIALIZER,
        })
    }

    fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()> {
        let descriptor = scope.descriptor();
        let ctx = RenderContext::for_descriptor(descriptor);
        let path = format!(
            "src/{}/{}/{}/{}.{}",
            self.kind.source_set(),
            self.language.source_dir(),
            descriptor.package_path(),
            ctx.render(self.kind.file_stem()),
            self.language.file_extension()
        );
        let content = ctx.render(template(self.language, self.kind));
        scope.write_file(path, content)
    }
}
