//! End-to-end generation with the built-in catalog, contributors and
//! serializers.

use std::path::Path;

use sprig_adapters::{
    LocalFilesystem, MemoryFilesystem, builtin_catalog, default_generator,
    default_scaffold_service,
};
use sprig_core::{
    application::ApplicationError,
    domain::{DomainError, HasLanguage, PlatformVersion, ProjectDescriptorBuilder},
    error::{ErrorCategory, SprigError},
    prelude::*,
};

fn descriptor(language: LanguageId) -> ProjectDescriptorBuilder<HasLanguage> {
    ProjectDescriptor::builder()
        .language(Language::of(language))
        .group_id("com.example")
        .artifact_id("demo")
}

fn service() -> ScaffoldService {
    default_scaffold_service(builtin_catalog().unwrap(), Box::new(MemoryFilesystem::new()))
}

fn paths(project: &GeneratedProject) -> Vec<&str> {
    project.files.paths().map(|p| p.as_str()).collect()
}

#[test]
fn java_maven_jar_project() {
    let project = service()
        .generate(&descriptor(LanguageId::Java).build().unwrap())
        .unwrap();

    assert_eq!(
        paths(&project),
        [
            ".gitignore",
            "pom.xml",
            "src/main/java/com/example/demo/DemoApplication.java",
            "src/main/resources/application.properties",
            "src/test/java/com/example/demo/DemoApplicationTests.java",
        ]
    );

    let ids: Vec<String> = project
        .build
        .dependencies
        .iter()
        .map(|d| d.id().to_string())
        .collect();
    assert_eq!(
        ids,
        [
            "org.springframework.boot:spring-boot-starter",
            "org.springframework.boot:spring-boot-starter-test",
        ]
    );
    assert_eq!(project.build.properties.get("java.version").map(String::as_str), Some("17"));
    assert!(project.build.repository(Repository::MAVEN_CENTRAL_ID).is_some());

    let test_class = project
        .files
        .content("src/test/java/com/example/demo/DemoApplicationTests.java")
        .unwrap();
    let lines: Vec<&str> = test_class.lines().collect();
    assert_eq!(
        lines,
        [
            "package com.example.demo;",
            "",
            "import org.junit.Test;",
            "import org.junit.runner.RunWith;",
            "import org.springframework.boot.test.context.SpringBootTest;",
            "import org.springframework.test.context.junit4.SpringRunner;",
            "",
            "@RunWith(SpringRunner.class)",
            "@SpringBootTest",
            "public class DemoApplicationTests {",
            "",
            "    @Test",
            "    public void contextLoads() {",
            "    }",
            "",
            "}",
        ]
    );
}

#[test]
fn war_adds_exactly_one_servlet_initializer() {
    let service = service();
    let jar = service.generate(&descriptor(LanguageId::Java).build().unwrap()).unwrap();
    let war = service
        .generate(
            &descriptor(LanguageId::Java)
                .packaging(Packaging::War)
                .application_name("MyDemoApplication")
                .build()
                .unwrap(),
        )
        .unwrap();

    assert_eq!(war.files.len(), jar.files.len() + 1);
    let initializer = war
        .files
        .content("src/main/java/com/example/demo/ServletInitializer.java")
        .unwrap();
    assert!(initializer.contains("return application.sources(MyDemoApplication.class);"));
    assert!(war.files.contains("src/main/java/com/example/demo/MyDemoApplication.java"));

    let tomcat = war
        .build
        .dependency("org.springframework.boot", "spring-boot-starter-tomcat")
        .unwrap();
    assert_eq!(tomcat.scope(), DependencyScope::ProvidedRuntime);
    assert!(war.files.content("pom.xml").unwrap().contains("<packaging>war</packaging>"));
}

#[test]
fn kotlin_gradle_project() {
    let project = service()
        .generate(
            &descriptor(LanguageId::Kotlin)
                .build_system(BuildSystem::Gradle)
                .packaging(Packaging::War)
                .facet("web")
                .build()
                .unwrap(),
        )
        .unwrap();

    assert!(project.files.contains("build.gradle"));
    assert!(!project.files.contains("pom.xml"));

    let test_class = project
        .files
        .content("src/test/kotlin/com/example/demo/DemoApplicationTests.kt")
        .unwrap();
    assert!(test_class.starts_with("package com.example.demo\n\n"));
    assert!(test_class.contains("@RunWith(SpringRunner::class)"));

    let initializer = project
        .files
        .content("src/main/kotlin/com/example/demo/ServletInitializer.kt")
        .unwrap();
    assert!(initializer.contains("class ServletInitializer : SpringBootServletInitializer() {"));
    assert!(initializer.contains("return application.sources(DemoApplication::class.java)"));

    // web implies json, which pulls in the Kotlin Jackson module.
    assert!(project.build.has_dependency("com.fasterxml.jackson.module", "jackson-module-kotlin"));
    assert!(!project.build.has_dependency("org.springframework.boot", "spring-boot-starter"));

    let gradle = project.files.content("build.gradle").unwrap();
    assert!(gradle.contains("id 'org.jetbrains.kotlin.jvm' version '1.9.22'"));
    assert!(gradle.contains("id 'war'"));
    assert!(gradle.contains("providedRuntime 'org.springframework.boot:spring-boot-starter-tomcat'"));
}

#[test]
fn scala_json_project_gets_scala_module() {
    let project = service()
        .generate(&descriptor(LanguageId::Scala).facet("json").build().unwrap())
        .unwrap();
    assert!(project.build.has_dependency("com.fasterxml.jackson.module", "jackson-module-scala_2.13"));
    assert!(project.files.contains("src/main/scala/com/example/demo/DemoApplication.scala"));
}

#[test]
fn custom_package_and_application_name() {
    let project = service()
        .generate(
            &descriptor(LanguageId::Groovy)
                .package_name("com.example.foo")
                .application_name("MyApplication")
                .build()
                .unwrap(),
        )
        .unwrap();
    assert!(project.files.contains("src/main/groovy/com/example/foo/MyApplication.groovy"));
    assert!(project.files.contains("src/test/groovy/com/example/foo/MyApplicationTests.groovy"));
}

#[test]
fn prerelease_platform_adds_milestone_repository() {
    let project = service()
        .generate(
            &descriptor(LanguageId::Java)
                .platform_version(PlatformVersion::parse("3.3.0-M1").unwrap())
                .build()
                .unwrap(),
        )
        .unwrap();
    assert!(project.build.repository("spring-milestones").is_some());
    assert!(project.build.repository("spring-snapshots").is_none());
    assert!(project
        .files
        .content("pom.xml")
        .unwrap()
        .contains("<url>https://repo.spring.io/milestone</url>"));
}

#[test]
fn webflux_is_unknown_before_platform_two() {
    let err = service()
        .generate(
            &descriptor(LanguageId::Java)
                .platform_version(PlatformVersion::parse("1.5.22.RELEASE").unwrap())
                .facet("webflux")
                .build()
                .unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::UnknownFacet { .. })));
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn output_is_reproducible() {
    let generator = default_generator(builtin_catalog().unwrap());
    let d = descriptor(LanguageId::Java)
        .facets(["web", "data-jpa", "h2", "security", "lombok"])
        .build()
        .unwrap();
    let a = generator.generate(&d).unwrap();
    let b = generator.generate(&d).unwrap();
    assert_eq!(a.files, b.files);
    assert_eq!(a.build, b.build);

    let service = service();
    let pom_a = service.generate(&d).unwrap();
    let pom_b = service.generate(&d).unwrap();
    assert_eq!(pom_a.files.content("pom.xml"), pom_b.files.content("pom.xml"));
}

#[test]
fn scaffold_writes_to_disk_and_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("demo");
    let service = default_scaffold_service(builtin_catalog().unwrap(), Box::new(LocalFilesystem::new()));
    let d = descriptor(LanguageId::Java).facet("web").build().unwrap();

    service.scaffold(&d, &root).unwrap();
    let pom = std::fs::read_to_string(root.join("pom.xml")).unwrap();
    assert!(pom.contains("<artifactId>spring-boot-starter-web</artifactId>"));
    assert!(root
        .join("src/main/java/com/example/demo/DemoApplication.java")
        .is_file());

    let err = service.scaffold(&d, &root).unwrap_err();
    assert!(matches!(
        err,
        SprigError::Application(ApplicationError::ProjectExists { .. })
    ));
}

#[test]
fn memory_scaffold_lands_under_the_root() {
    let fs = MemoryFilesystem::new();
    let service = default_scaffold_service(builtin_catalog().unwrap(), Box::new(fs.clone()));
    service
        .scaffold(&descriptor(LanguageId::Java).build().unwrap(), Path::new("/out/demo"))
        .unwrap();

    assert_eq!(fs.list_files().len(), 5);
    assert!(fs.read_file(Path::new("/out/demo/.gitignore")).is_some());
}

#[test]
fn maven_parent_keeps_the_release_qualifier() {
    let project = service()
        .generate(
            &descriptor(LanguageId::Java)
                .platform_version(PlatformVersion::parse("2.1.0.RELEASE").unwrap())
                .build()
                .unwrap(),
        )
        .unwrap();

    let pom = project.files.content("pom.xml").unwrap();
    assert!(pom.contains("\t\t<version>2.1.0.RELEASE</version>\n"));
}

#[test]
fn gradle_boot_plugin_keeps_the_milestone_qualifier() {
    let project = service()
        .generate(
            &descriptor(LanguageId::Java)
                .build_system(BuildSystem::Gradle)
                .platform_version(PlatformVersion::parse("2.2.0.M1").unwrap())
                .build()
                .unwrap(),
        )
        .unwrap();

    let gradle = project.files.content("build.gradle").unwrap();
    assert!(gradle.contains("\tid 'org.springframework.boot' version '2.2.0.M1'\n"));
    assert!(!gradle.contains("2.2.0-M1"));
    assert!(project.build.repository("spring-milestones").is_some());
}

#[test]
fn kotlin_maven_plugin_settings_are_lists() {
    let project = service()
        .generate(&descriptor(LanguageId::Kotlin).build().unwrap())
        .unwrap();

    let pom = project.files.content("pom.xml").unwrap();
    let expected = [
        "\t\t\t\t<configuration>",
        "\t\t\t\t\t<args>",
        "\t\t\t\t\t\t<arg>-Xjsr305=strict</arg>",
        "\t\t\t\t\t</args>",
        "\t\t\t\t\t<compilerPlugins>",
        "\t\t\t\t\t\t<plugin>spring</plugin>",
        "\t\t\t\t\t</compilerPlugins>",
        "\t\t\t\t</configuration>",
    ]
    .join("\n");
    assert!(pom.contains(&expected), "{pom}");
}
