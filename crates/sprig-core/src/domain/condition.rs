//! Activation conditions over a [`ProjectDescriptor`].
//!
//! A `Condition` is the declarative form: every `Option` field is a wildcard
//! when `None` and a constraint when `Some`; all constraints are combined
//! with AND. Required facets must all be present on the descriptor.
//!
//! `Predicate` is the seam used by the registry and post-processor chain.
//! `Condition` implements it, and so does any `Fn(&ProjectDescriptor) -> bool`
//! closure for activation rules that do not fit the declarative shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    descriptor::ProjectDescriptor,
    value_objects::{BuildSystem, LanguageId, Packaging},
    version::VersionRange,
};

/// A pure predicate over the descriptor.
pub trait Predicate: Send + Sync {
    fn test(&self, descriptor: &ProjectDescriptor) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&ProjectDescriptor) -> bool + Send + Sync,
{
    fn test(&self, descriptor: &ProjectDescriptor) -> bool {
        self(descriptor)
    }
}

/// Declarative activation condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Condition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_system: Option<BuildSystem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub packaging: Option<Packaging>,

    /// Platform versions the condition holds for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<VersionRange>,

    /// Facets that must all be requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<String>,
}

impl Condition {
    /// The condition that holds for every descriptor.
    pub fn always() -> Self {
        Self::default()
    }

    pub fn builder() -> ConditionBuilder {
        ConditionBuilder::default()
    }

    /// Check whether this condition holds for a descriptor.
    pub fn matches(&self, descriptor: &ProjectDescriptor) -> bool {
        self.language
            .is_none_or(|l| l == descriptor.language().id())
            && self
                .build_system
                .is_none_or(|b| b == descriptor.build_system())
            && self.packaging.is_none_or(|p| p == descriptor.packaging())
            && self
                .platform
                .as_ref()
                .is_none_or(|r| r.contains(descriptor.platform_version()))
            && self.facets.iter().all(|f| descriptor.has_facet(f))
    }

    /// Number of constraints. Higher is more specific.
    ///
    /// An unbounded platform range does not count.
    pub fn specificity(&self) -> usize {
        [
            self.language.is_some(),
            self.build_system.is_some(),
            self.packaging.is_some(),
            self.platform.as_ref().is_some_and(|r| !r.is_unbounded()),
        ]
        .into_iter()
        .filter(|b| *b)
        .count()
            + self.facets.len()
    }
}

impl Predicate for Condition {
    fn test(&self, descriptor: &ProjectDescriptor) -> bool {
        self.matches(descriptor)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(l) = self.language {
            parts.push(format!("language={l}"));
        }
        if let Some(b) = self.build_system {
            parts.push(format!("build={b}"));
        }
        if let Some(p) = self.packaging {
            parts.push(format!("packaging={p}"));
        }
        if let Some(r) = &self.platform {
            parts.push(format!("platform={r}"));
        }
        if !self.facets.is_empty() {
            parts.push(format!("facets={}", self.facets.join("+")));
        }
        if parts.is_empty() {
            f.write_str("always")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

/// Builder for [`Condition`].
#[derive(Default)]
pub struct ConditionBuilder {
    inner: Condition,
}

impl ConditionBuilder {
    pub fn language(mut self, language: LanguageId) -> Self {
        self.inner.language = Some(language);
        self
    }

    pub fn build_system(mut self, build_system: BuildSystem) -> Self {
        self.inner.build_system = Some(build_system);
        self
    }

    pub fn packaging(mut self, packaging: Packaging) -> Self {
        self.inner.packaging = Some(packaging);
        self
    }

    pub fn platform(mut self, range: VersionRange) -> Self {
        self.inner.platform = Some(range);
        self
    }

    pub fn facet(mut self, facet: impl Into<String>) -> Self {
        let facet = facet.into();
        if !self.inner.facets.contains(&facet) {
            self.inner.facets.push(facet);
        }
        self
    }

    pub fn build(self) -> Condition {
        self.inner
    }
}
