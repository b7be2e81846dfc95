//! Facets shipped with the binary.

use sprig_core::{
    application::ports::CatalogSource,
    domain::{
        CatalogEntry, Condition, Dependency, DependencyCatalog, DependencyScope, FacetDefinition,
        PlatformVersion, VersionRange,
    },
    error::SprigResult,
};

const BOOT: &str = "org.springframework.boot";

fn starter(name: &str) -> Dependency {
    Dependency::new(BOOT, format!("spring-boot-starter-{name}"))
}

/// The built-in dependency catalog.
pub fn builtin_catalog() -> SprigResult<DependencyCatalog> {
    let catalog = DependencyCatalog::new()
        .with_facet(
            FacetDefinition::new("web")
                .named("Spring Web")
                .described("Build web applications, including RESTful ones, with Spring MVC")
                .in_group("Web")
                .entry(CatalogEntry::always(vec![starter("web")]).with_tag("json")),
        )?
        .with_facet(
            FacetDefinition::new("webflux")
                .named("Spring Reactive Web")
                .described("Build reactive web applications with Spring WebFlux")
                .in_group("Web")
                .entry(
                    CatalogEntry::new(
                        Condition::builder()
                            .platform(VersionRange::at_least(PlatformVersion::new(2, 0, 0)))
                            .build(),
                        vec![starter("webflux")],
                    )
                    .with_tag("json")
                    .with_tag("reactive"),
                ),
        )?
        .with_facet(
            FacetDefinition::new("json")
                .named("Jackson JSON")
                .in_group("Core")
                .entry(CatalogEntry::always(vec![starter("json")])),
        )?
        .with_facet(
            FacetDefinition::new("data-jpa")
                .named("Spring Data JPA")
                .described("Persist data in SQL stores with the Java Persistence API")
                .in_group("SQL")
                .entry(CatalogEntry::always(vec![starter("data-jpa")])),
        )?
        .with_facet(
            FacetDefinition::new("h2")
                .named("H2 Database")
                .in_group("SQL")
                .entry(CatalogEntry::always(vec![
                    Dependency::new("com.h2database", "h2").with_scope(DependencyScope::Runtime),
                ])),
        )?
        .with_facet(
            FacetDefinition::new("postgresql")
                .named("PostgreSQL Driver")
                .in_group("SQL")
                .entry(CatalogEntry::always(vec![
                    Dependency::new("org.postgresql", "postgresql")
                        .with_scope(DependencyScope::Runtime),
                ])),
        )?
        .with_facet(
            FacetDefinition::new("lombok")
                .named("Lombok")
                .described("Annotation library that reduces boilerplate code")
                .in_group("Developer Tools")
                .entry(CatalogEntry::always(vec![
                    Dependency::new("org.projectlombok", "lombok")
                        .with_scope(DependencyScope::CompileOnly),
                ])),
        )?
        .with_facet(
            FacetDefinition::new("validation")
                .named("Validation")
                .in_group("I/O")
                .entry(CatalogEntry::always(vec![starter("validation")])),
        )?
        .with_facet(
            FacetDefinition::new("actuator")
                .named("Spring Boot Actuator")
                .described("Health checks, metrics and monitoring endpoints")
                .in_group("Ops")
                .entry(CatalogEntry::always(vec![starter("actuator")])),
        )?
        .with_facet(
            FacetDefinition::new("security")
                .named("Spring Security")
                .in_group("Security")
                .entry(CatalogEntry::always(vec![
                    starter("security"),
                    Dependency::new("org.springframework.security", "spring-security-test")
                        .with_scope(DependencyScope::TestCompile),
                ])),
        )?
        .with_facet(
            FacetDefinition::new("devtools")
                .named("Spring Boot DevTools")
                .in_group("Developer Tools")
                .entry(CatalogEntry::always(vec![
                    Dependency::new(BOOT, "spring-boot-devtools")
                        .with_scope(DependencyScope::Runtime),
                ])),
        )?
        .with_facet(
            FacetDefinition::new("thymeleaf")
                .named("Thymeleaf")
                .in_group("Template Engines")
                .entry(CatalogEntry::always(vec![starter("thymeleaf")])),
        )?;
    Ok(catalog)
}

/// [`CatalogSource`] over [`builtin_catalog`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn describe(&self) -> String {
        "built-in catalog".to_string()
    }

    fn load(&self) -> SprigResult<DependencyCatalog> {
        builtin_catalog()
    }
}
