//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Generate the project (resolve, contribute, snapshot)
//! 2. Serialize the build descriptor for the descriptor's build system
//! 3. Write the tree to the filesystem, rolling back on failure

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{BuildSerializer, Filesystem},
        services::generation::{GeneratedProject, ProjectGenerator},
    },
    domain::{BuildSystem, FileTree, ProjectDescriptor, RelativePath},
    error::SprigResult,
};

/// Main scaffolding service.
pub struct ScaffoldService {
    generator: ProjectGenerator,
    serializers: BTreeMap<BuildSystem, Arc<dyn BuildSerializer>>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service.
    ///
    /// A later serializer for the same build system replaces an earlier one.
    pub fn new(
        generator: ProjectGenerator,
        serializers: Vec<Arc<dyn BuildSerializer>>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        let serializers = serializers
            .into_iter()
            .map(|s| (s.build_system(), s))
            .collect();
        Self {
            generator,
            serializers,
            filesystem,
        }
    }

    pub fn generator(&self) -> &ProjectGenerator {
        &self.generator
    }

    /// Generate the project in memory, build descriptor included.
    #[instrument(skip_all, fields(project = %descriptor.artifact_id()))]
    pub fn generate(&self, descriptor: &ProjectDescriptor) -> SprigResult<GeneratedProject> {
        let mut project = self.generator.generate(descriptor)?;

        let build_system = descriptor.build_system();
        let serializer = self
            .serializers
            .get(&build_system)
            .ok_or(ApplicationError::SerializerMissing { build_system })?;
        let text = serializer.serialize(&project.descriptor, &project.build)?;

        let path = RelativePath::try_new(build_system.build_file_name())?;
        project
            .files
            .insert(path, text, &format!("{build_system}-build-file"))?;

        Ok(project)
    }

    /// Generate the project and write it under `project_dir`.
    ///
    /// Refuses to write into an existing directory.
    #[instrument(
        skip_all,
        fields(
            project = %descriptor.artifact_id(),
            output_path = %project_dir.display()
        )
    )]
    pub fn scaffold(
        &self,
        descriptor: &ProjectDescriptor,
        project_dir: &Path,
    ) -> SprigResult<GeneratedProject> {
        info!("Scaffolding {}", descriptor);

        if self.filesystem.exists(project_dir) {
            return Err(ApplicationError::ProjectExists {
                path: project_dir.to_path_buf(),
            }
            .into());
        }

        let project = self.generate(descriptor)?;
        self.write_tree(&project.files, project_dir)?;

        info!(files = project.files.len(), "Scaffold completed successfully");
        Ok(project)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write the tree with rollback on failure.
    fn write_tree(&self, files: &FileTree, root: &Path) -> SprigResult<()> {
        match self.write_all(files, root) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("Write failed, attempting rollback");
                self.rollback(root);
                Err(e)
            }
        }
    }

    fn write_all(&self, files: &FileTree, root: &Path) -> SprigResult<()> {
        self.filesystem.create_dir_all(root)?;

        for (path, file) in files.iter() {
            let target = path.to_path_under(root);
            if let Some(parent) = target.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&target, &file.content)?;
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{MockBuildSerializer, MockFilesystem};
    use crate::application::services::{
        contributor::{ProjectContributor, ProjectScope},
        registry::ContributionRegistry,
        resolver::DependencyResolver,
    };
    use crate::domain::{Condition, DependencyCatalog, Language, LanguageId};
    use crate::error::{ErrorCategory, SprigError};
    use mockall::predicate::eq;
    use std::path::PathBuf;

    struct MainClass;

    impl ProjectContributor for MainClass {
        fn name(&self) -> &str {
            "main"
        }
        fn contribute(&self, scope: &mut ProjectScope<'_>) -> SprigResult<()> {
            scope.write_file("src/Main.java", "class Main {}")
        }
    }

    fn generator() -> ProjectGenerator {
        ProjectGenerator::new(
            Arc::new(
                ContributionRegistry::builder()
                    .register(Condition::always(), MainClass, 0)
                    .build(),
            ),
            Arc::new(DependencyResolver::plain()),
            Arc::new(DependencyCatalog::new()),
        )
    }

    fn maven_serializer() -> Arc<dyn BuildSerializer> {
        let mut serializer = MockBuildSerializer::new();
        serializer
            .expect_build_system()
            .return_const(BuildSystem::Maven);
        serializer
            .expect_serialize()
            .returning(|_, _| Ok("<project/>".to_string()));
        Arc::new(serializer)
    }

    fn descriptor() -> ProjectDescriptor {
        ProjectDescriptor::builder()
            .language(Language::of(LanguageId::Java))
            .build()
            .unwrap()
    }

    #[test]
    fn generate_adds_the_build_file() {
        let service = ScaffoldService::new(
            generator(),
            vec![maven_serializer()],
            Box::new(MockFilesystem::new()),
        );
        let project = service.generate(&descriptor()).unwrap();
        assert_eq!(project.files.content("pom.xml"), Some("<project/>"));
        assert!(project.files.contains("src/Main.java"));
    }

    #[test]
    fn missing_serializer_is_a_configuration_error() {
        let service = ScaffoldService::new(generator(), vec![], Box::new(MockFilesystem::new()));
        let err = service.generate(&descriptor()).unwrap_err();
        assert!(matches!(
            err,
            SprigError::Application(ApplicationError::SerializerMissing { .. })
        ));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn refuses_existing_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_write_file().never();

        let service = ScaffoldService::new(generator(), vec![maven_serializer()], Box::new(fs));
        let err = service.scaffold(&descriptor(), Path::new("/out/demo")).unwrap_err();
        assert!(matches!(
            err,
            SprigError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn failed_write_rolls_back() {
        let root = PathBuf::from("/out/demo");
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .with(eq(root.clone()))
            .times(1)
            .returning(|_| Ok(()));

        let service = ScaffoldService::new(generator(), vec![maven_serializer()], Box::new(fs));
        let err = service.scaffold(&descriptor(), &root).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn writes_every_file_under_the_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, _| path.starts_with("/out/demo"))
            .times(2)
            .returning(|_, _| Ok(()));

        let service = ScaffoldService::new(generator(), vec![maven_serializer()], Box::new(fs));
        let project = service
            .scaffold(&descriptor(), Path::new("/out/demo"))
            .unwrap();
        assert_eq!(project.files.len(), 2);
    }
}
