//! Dependency resolution and post-processing.
//!
//! Resolution turns the requested facets into concrete dependencies by
//! looking each facet up in the catalog and picking the entry that fits the
//! descriptor. The post-processor chain then runs over the result.
//!
//! ## Entry selection
//!
//! 1. Keep the facet's entries whose condition holds for the descriptor
//! 2. None left → `UnknownFacet`
//! 3. Keep the entries with the highest specificity
//! 4. More than one left → `AmbiguousFacet`
//!
//! ## Post-processor contract
//!
//! Processors run in ascending priority, ties in registration order. A
//! processor may add dependencies, replace declarations, and remove what it
//! added itself during its own run. Removing anything else is reported as
//! `PostProcessorViolation`.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::{
    application::ApplicationError,
    domain::{
        CatalogEntry, Dependency, DependencyCatalog, DependencyId, DomainError, FacetDefinition,
        ProjectDescriptor, Repository,
    },
    error::SprigResult,
};

// ── Resolved dependencies ────────────────────────────────────────────────────

/// Where a resolved dependency came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencySource {
    /// Requested through a facet.
    Facet(String),
    /// Added by the named post-processor.
    PostProcessor(String),
}

impl fmt::Display for DependencySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Facet(id) => write!(f, "facet '{id}'"),
            Self::PostProcessor(name) => write!(f, "post-processor '{name}'"),
        }
    }
}

/// A dependency together with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    pub dependency: Dependency,
    pub source: DependencySource,
}

/// Output of [`DependencyResolver::resolve`].
///
/// Dependencies are kept in resolution order: facets in request order, then
/// post-processor additions in chain order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDependencies {
    entries: Vec<ResolvedDependency>,
    facets: BTreeSet<String>,
    repositories: Vec<(Repository, String)>,
}

impl ResolvedDependencies {
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedDependency> {
        self.entries.iter()
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.entries.iter().map(|e| &e.dependency)
    }

    pub fn get(&self, id: &DependencyId) -> Option<&ResolvedDependency> {
        self.entries.iter().find(|e| e.dependency.id() == id)
    }

    pub fn contains(&self, id: &DependencyId) -> bool {
        self.get(id).is_some()
    }

    /// Whether a facet was requested or implied by a resolved entry's tags.
    pub fn has_facet(&self, facet: &str) -> bool {
        self.facets.contains(facet)
    }

    /// Requested and implied facets, sorted.
    pub fn facets(&self) -> impl Iterator<Item = &str> {
        self.facets.iter().map(String::as_str)
    }

    /// Repositories required by the resolved entries, with the facet that needs them.
    pub fn repositories(&self) -> impl Iterator<Item = (&Repository, &str)> {
        self.repositories.iter().map(|(r, f)| (r, f.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add under the strict policy: identical re-adds are ignored, diverging
    /// declarations of the same identity conflict.
    fn push(&mut self, dependency: Dependency, source: DependencySource) -> SprigResult<bool> {
        dependency.validate()?;
        let dependency = dependency.normalised();
        if let Some(existing) = self.get(dependency.id()) {
            if existing.dependency == dependency {
                return Ok(false);
            }
            return Err(DomainError::DependencyConflict {
                identity: dependency.id().to_string(),
                existing: existing.dependency.to_string(),
                incoming: dependency.to_string(),
                existing_origin: existing.source.to_string(),
                incoming_origin: source.to_string(),
            }
            .into());
        }
        self.entries.push(ResolvedDependency { dependency, source });
        Ok(true)
    }

    fn absorb_entry(&mut self, facet: &str, entry: &CatalogEntry) -> SprigResult<()> {
        self.facets.insert(facet.to_string());
        self.facets.extend(entry.tags.iter().cloned());
        for dependency in &entry.dependencies {
            self.push(dependency.clone(), DependencySource::Facet(facet.to_string()))?;
        }
        for repository in &entry.repositories {
            if !self.repositories.iter().any(|(r, _)| r == repository) {
                self.repositories.push((repository.clone(), facet.to_string()));
            }
        }
        Ok(())
    }
}

// ── Post-processing ──────────────────────────────────────────────────────────

/// A hook run after facet resolution.
pub trait DependencyPostProcessor: Send + Sync {
    /// Name recorded as the source of added dependencies.
    fn name(&self) -> &str;

    /// Lower runs first. Ties keep registration order.
    fn priority(&self) -> i32 {
        0
    }

    /// Whether to run for this descriptor.
    fn applies_to(&self, _descriptor: &ProjectDescriptor) -> bool {
        true
    }

    fn post_process(
        &self,
        descriptor: &ProjectDescriptor,
        dependencies: &mut PostProcessScope<'_>,
    ) -> SprigResult<()>;
}

/// Mutable view handed to one post-processor run.
pub struct PostProcessScope<'a> {
    processor: &'a str,
    resolved: &'a mut ResolvedDependencies,
    added: BTreeSet<DependencyId>,
}

impl<'a> PostProcessScope<'a> {
    fn new(processor: &'a str, resolved: &'a mut ResolvedDependencies) -> Self {
        Self {
            processor,
            resolved,
            added: BTreeSet::new(),
        }
    }

    /// Read access to everything resolved so far.
    pub fn resolved(&self) -> &ResolvedDependencies {
        &*self.resolved
    }

    pub fn contains(&self, id: &DependencyId) -> bool {
        self.resolved.contains(id)
    }

    pub fn has_facet(&self, facet: &str) -> bool {
        self.resolved.has_facet(facet)
    }

    /// Add a dependency attributed to this processor.
    pub fn add(&mut self, dependency: Dependency) -> SprigResult<bool> {
        let id = dependency.id().clone();
        let added = self.resolved.push(
            dependency,
            DependencySource::PostProcessor(self.processor.to_string()),
        )?;
        if added {
            self.added.insert(id);
        }
        Ok(added)
    }

    /// Replace the declaration of an already resolved dependency.
    ///
    /// The entry keeps its original source. Returns `false` when absent.
    pub fn replace(&mut self, dependency: Dependency) -> SprigResult<bool> {
        dependency.validate()?;
        let dependency = dependency.normalised();
        match self
            .resolved
            .entries
            .iter_mut()
            .find(|e| e.dependency.id() == dependency.id())
        {
            Some(entry) => {
                entry.dependency = dependency;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a dependency this processor added during this run.
    pub fn remove(&mut self, id: &DependencyId) -> SprigResult<Dependency> {
        if !self.added.contains(id) {
            return Err(ApplicationError::PostProcessorViolation {
                processor: self.processor.to_string(),
                dependency: id.to_string(),
            }
            .into());
        }
        self.added.remove(id);
        let position = self
            .resolved
            .entries
            .iter()
            .position(|e| e.dependency.id() == id)
            .ok_or_else(|| ApplicationError::PostProcessorViolation {
                processor: self.processor.to_string(),
                dependency: id.to_string(),
            })?;
        Ok(self.resolved.entries.remove(position).dependency)
    }
}

// ── Resolver ─────────────────────────────────────────────────────────────────

/// Resolves facets and runs the post-processor chain.
///
/// Immutable after construction; share it behind an `Arc`.
pub struct DependencyResolver {
    post_processors: Vec<Arc<dyn DependencyPostProcessor>>,
}

impl DependencyResolver {
    pub fn builder() -> DependencyResolverBuilder {
        DependencyResolverBuilder::default()
    }

    /// A resolver with no post-processors.
    pub fn plain() -> Self {
        Self {
            post_processors: Vec::new(),
        }
    }

    /// Names of the post-processors in execution order.
    pub fn post_processor_names(&self) -> Vec<&str> {
        self.post_processors.iter().map(|p| p.name()).collect()
    }

    #[instrument(skip_all, fields(descriptor = %descriptor))]
    pub fn resolve(
        &self,
        descriptor: &ProjectDescriptor,
        catalog: &DependencyCatalog,
    ) -> SprigResult<ResolvedDependencies> {
        let mut resolved = ResolvedDependencies::default();

        for facet_id in descriptor.facets() {
            let facet = catalog
                .get(facet_id)
                .ok_or_else(|| unknown_facet(facet_id, descriptor))?;
            let entry = select_entry(facet, descriptor)?;
            debug!(facet = %facet_id, dependencies = entry.dependencies.len(), "Facet resolved");
            resolved.absorb_entry(facet_id, entry)?;
        }

        for processor in &self.post_processors {
            if !processor.applies_to(descriptor) {
                trace!(processor = processor.name(), "Post-processor skipped");
                continue;
            }
            let before = resolved.len();
            let mut scope = PostProcessScope::new(processor.name(), &mut resolved);
            processor.post_process(descriptor, &mut scope)?;
            debug!(
                processor = processor.name(),
                added = resolved.len().saturating_sub(before),
                "Post-processor ran"
            );
        }

        Ok(resolved)
    }
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::plain()
    }
}

/// Pick the unique most specific valid entry of a facet.
fn select_entry<'a>(
    facet: &'a FacetDefinition,
    descriptor: &ProjectDescriptor,
) -> SprigResult<&'a CatalogEntry> {
    let valid: Vec<(usize, &CatalogEntry)> = facet.valid_entries(descriptor).collect();
    let Some(best) = valid.iter().map(|(_, e)| e.specificity()).max() else {
        return Err(unknown_facet(&facet.id, descriptor));
    };

    let top: Vec<(usize, &CatalogEntry)> = valid
        .into_iter()
        .filter(|(_, e)| e.specificity() == best)
        .collect();

    match top.as_slice() {
        [(_, entry)] => Ok(*entry),
        _ => Err(DomainError::AmbiguousFacet {
            facet: facet.id.clone(),
            descriptor: descriptor.to_string(),
            candidates: top.iter().map(|(i, _)| facet.entry_label(*i)).collect(),
        }
        .into()),
    }
}

fn unknown_facet(facet: &str, descriptor: &ProjectDescriptor) -> crate::error::SprigError {
    DomainError::UnknownFacet {
        facet: facet.to_string(),
        descriptor: descriptor.to_string(),
    }
    .into()
}

/// Builder for [`DependencyResolver`].
#[derive(Default)]
pub struct DependencyResolverBuilder {
    post_processors: Vec<Arc<dyn DependencyPostProcessor>>,
}

impl DependencyResolverBuilder {
    pub fn post_processor(mut self, processor: impl DependencyPostProcessor + 'static) -> Self {
        self.post_processors.push(Arc::new(processor));
        self
    }

    pub fn post_processor_arc(mut self, processor: Arc<dyn DependencyPostProcessor>) -> Self {
        self.post_processors.push(processor);
        self
    }

    /// Freeze the chain, ordering it by priority then registration order.
    pub fn build(mut self) -> DependencyResolver {
        // `sort_by_key` is stable, so equal priorities keep registration order.
        self.post_processors.sort_by_key(|p| p.priority());
        DependencyResolver {
            post_processors: self.post_processors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CatalogEntry, Condition, Exclusion, FacetDefinition, Language, LanguageId, VersionRange,
    };
    use crate::error::SprigError;

    fn descriptor(language: LanguageId, facets: &[&str]) -> ProjectDescriptor {
        ProjectDescriptor::builder()
            .language(Language::of(language))
            .facets(facets.iter().copied())
            .build()
            .unwrap()
    }

    fn catalog() -> DependencyCatalog {
        DependencyCatalog::new()
            .with_facet(FacetDefinition::new("json").entry(CatalogEntry::always(vec![
                Dependency::new("org.springframework.boot", "spring-boot-starter-json"),
            ])))
            .unwrap()
            .with_facet(
                FacetDefinition::new("web").entry(
                    CatalogEntry::always(vec![Dependency::new(
                        "org.springframework.boot",
                        "spring-boot-starter-web",
                    )])
                    .with_tag("json"),
                ),
            )
            .unwrap()
    }

    struct AddWhen {
        name: &'static str,
        priority: i32,
        when: &'static str,
        add: &'static str,
    }

    impl DependencyPostProcessor for AddWhen {
        fn name(&self) -> &str {
            self.name
        }
        fn priority(&self) -> i32 {
            self.priority
        }
        fn post_process(
            &self,
            _descriptor: &ProjectDescriptor,
            deps: &mut PostProcessScope<'_>,
        ) -> SprigResult<()> {
            let present = deps.has_facet(self.when)
                || deps
                    .resolved()
                    .dependencies()
                    .any(|d| d.artifact_id() == self.when);
            if present {
                deps.add(Dependency::new("test", self.add))?;
            }
            Ok(())
        }
    }

    #[test]
    fn unknown_facet_is_reported() {
        let err = DependencyResolver::plain()
            .resolve(&descriptor(LanguageId::Java, &["nope"]), &catalog())
            .unwrap_err();
        assert!(matches!(
            err,
            SprigError::Domain(DomainError::UnknownFacet { ref facet, .. }) if facet == "nope"
        ));
    }

    #[test]
    fn facet_without_valid_entry_is_unknown() {
        let catalog = DependencyCatalog::new()
            .with_facet(FacetDefinition::new("webflux").entry(CatalogEntry::new(
                Condition::builder()
                    .platform(VersionRange::parse("9.0.0").unwrap())
                    .build(),
                vec![Dependency::new("g", "webflux")],
            )))
            .unwrap();
        let err = DependencyResolver::plain()
            .resolve(&descriptor(LanguageId::Java, &["webflux"]), &catalog)
            .unwrap_err();
        assert!(matches!(err, SprigError::Domain(DomainError::UnknownFacet { .. })));
    }

    #[test]
    fn most_specific_entry_wins() {
        let catalog = DependencyCatalog::new()
            .with_facet(
                FacetDefinition::new("json")
                    .entry(CatalogEntry::always(vec![Dependency::new("g", "generic")]))
                    .entry(CatalogEntry::new(
                        Condition::builder().language(LanguageId::Kotlin).build(),
                        vec![Dependency::new("g", "kotlin")],
                    )),
            )
            .unwrap();
        let resolver = DependencyResolver::plain();

        let kotlin = resolver
            .resolve(&descriptor(LanguageId::Kotlin, &["json"]), &catalog)
            .unwrap();
        assert!(kotlin.contains(&DependencyId::new("g", "kotlin")));
        assert_eq!(kotlin.len(), 1);

        let java = resolver
            .resolve(&descriptor(LanguageId::Java, &["json"]), &catalog)
            .unwrap();
        assert!(java.contains(&DependencyId::new("g", "generic")));
    }

    #[test]
    fn equally_specific_entries_are_ambiguous() {
        let catalog = DependencyCatalog::new()
            .with_facet(
                FacetDefinition::new("db")
                    .entry(CatalogEntry::new(
                        Condition::builder().language(LanguageId::Java).build(),
                        vec![Dependency::new("g", "a")],
                    ))
                    .entry(CatalogEntry::new(
                        Condition::builder()
                            .platform(VersionRange::parse("1.0.0").unwrap())
                            .build(),
                        vec![Dependency::new("g", "b")],
                    )),
            )
            .unwrap();
        let err = DependencyResolver::plain()
            .resolve(&descriptor(LanguageId::Java, &["db"]), &catalog)
            .unwrap_err();
        match err {
            SprigError::Domain(DomainError::AmbiguousFacet { candidates, .. }) => {
                assert_eq!(candidates, ["db#0", "db#1"]);
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn tags_are_visible_as_facets() {
        let resolved = DependencyResolver::plain()
            .resolve(&descriptor(LanguageId::Java, &["web"]), &catalog())
            .unwrap();
        assert!(resolved.has_facet("web"));
        assert!(resolved.has_facet("json"));
        assert_eq!(
            resolved.iter().next().unwrap().source,
            DependencySource::Facet("web".into())
        );
    }

    #[test]
    fn chained_post_processors_see_earlier_additions() {
        // Registered out of order; priority decides.
        let resolver = DependencyResolver::builder()
            .post_processor(AddWhen { name: "p2", priority: 20, when: "x", add: "y" })
            .post_processor(AddWhen { name: "p1", priority: 10, when: "json", add: "x" })
            .build();
        assert_eq!(resolver.post_processor_names(), ["p1", "p2"]);

        let with_json = resolver
            .resolve(&descriptor(LanguageId::Java, &["json"]), &catalog())
            .unwrap();
        assert!(with_json.contains(&DependencyId::new("test", "x")));
        assert!(with_json.contains(&DependencyId::new("test", "y")));
        assert_eq!(
            with_json.get(&DependencyId::new("test", "y")).unwrap().source,
            DependencySource::PostProcessor("p2".into())
        );

        let without = resolver
            .resolve(&descriptor(LanguageId::Java, &[]), &catalog())
            .unwrap();
        assert!(without.is_empty());
    }

    struct Greedy;

    impl DependencyPostProcessor for Greedy {
        fn name(&self) -> &str {
            "greedy"
        }
        fn post_process(
            &self,
            _descriptor: &ProjectDescriptor,
            deps: &mut PostProcessScope<'_>,
        ) -> SprigResult<()> {
            deps.add(Dependency::new("own", "dep"))?;
            deps.remove(&DependencyId::new("own", "dep"))?;
            deps.remove(&DependencyId::new("org.springframework.boot", "spring-boot-starter-json"))?;
            Ok(())
        }
    }

    #[test]
    fn removing_foreign_dependency_is_a_violation() {
        let resolver = DependencyResolver::builder().post_processor(Greedy).build();
        let err = resolver
            .resolve(&descriptor(LanguageId::Java, &["json"]), &catalog())
            .unwrap_err();
        match err {
            SprigError::Application(ApplicationError::PostProcessorViolation {
                processor,
                dependency,
            }) => {
                assert_eq!(processor, "greedy");
                assert!(dependency.ends_with("spring-boot-starter-json"));
            }
            other => panic!("unexpected: {other}"),
        }
    }

    struct OnlyForScala;

    impl DependencyPostProcessor for OnlyForScala {
        fn name(&self) -> &str {
            "scala-only"
        }
        fn applies_to(&self, descriptor: &ProjectDescriptor) -> bool {
            descriptor.language().id() == LanguageId::Scala
        }
        fn post_process(
            &self,
            _descriptor: &ProjectDescriptor,
            deps: &mut PostProcessScope<'_>,
        ) -> SprigResult<()> {
            deps.add(Dependency::new("scala", "extra")).map(|_| ())
        }
    }

    #[test]
    fn skipped_post_processor_does_nothing() {
        let resolver = DependencyResolver::builder().post_processor(OnlyForScala).build();
        let java = resolver
            .resolve(&descriptor(LanguageId::Java, &[]), &catalog())
            .unwrap();
        assert!(java.is_empty());
        let scala = resolver
            .resolve(&descriptor(LanguageId::Scala, &[]), &catalog())
            .unwrap();
        assert_eq!(scala.len(), 1);
    }

    struct ExcludeLogging;

    const JSON_WITH_UNSORTED_EXCLUSIONS: &str = r#"{
        "group_id": "org.springframework.boot",
        "artifact_id": "spring-boot-starter-json",
        "exclusions": [
            { "group_id": "x", "artifact_id": "b" },
            { "group_id": "x", "artifact_id": "a" }
        ]
    }"#;

    impl DependencyPostProcessor for ExcludeLogging {
        fn name(&self) -> &str {
            "exclude-logging"
        }
        fn post_process(
            &self,
            _descriptor: &ProjectDescriptor,
            deps: &mut PostProcessScope<'_>,
        ) -> SprigResult<()> {
            let replacement: Dependency = serde_json::from_str(JSON_WITH_UNSORTED_EXCLUSIONS).unwrap();
            assert!(deps.replace(replacement)?);

            let same = Dependency::new("org.springframework.boot", "spring-boot-starter-json")
                .with_exclusion(Exclusion::new("x", "a"))
                .with_exclusion(Exclusion::new("x", "b"));
            assert!(!deps.add(same)?);
            Ok(())
        }
    }

    #[test]
    fn replaced_dependency_compares_by_content() {
        let resolver = DependencyResolver::builder().post_processor(ExcludeLogging).build();
        let resolved = resolver
            .resolve(&descriptor(LanguageId::Java, &["json"]), &catalog())
            .unwrap();

        let json = resolved
            .get(&DependencyId::new("org.springframework.boot", "spring-boot-starter-json"))
            .unwrap();
        assert_eq!(
            json.dependency.exclusions(),
            [Exclusion::new("x", "a"), Exclusion::new("x", "b")]
        );
        assert_eq!(json.source, DependencySource::Facet("json".into()));
    }

    #[test]
    fn same_dependency_from_two_facets_is_kept_once() {
        let catalog = catalog()
            .with_facet(FacetDefinition::new("rest").entry(CatalogEntry::always(vec![
                Dependency::new("org.springframework.boot", "spring-boot-starter-web"),
            ])))
            .unwrap();
        let resolved = DependencyResolver::plain()
            .resolve(&descriptor(LanguageId::Java, &["web", "rest"]), &catalog)
            .unwrap();
        assert_eq!(resolved.len(), 1);
    }
}
