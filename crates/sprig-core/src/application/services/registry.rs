//! Conditional contribution registry.
//!
//! Built once at startup through [`ContributionRegistry::builder`] and shared
//! read-only (behind an `Arc`) by every generation.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::services::contributor::ProjectContributor,
    domain::{DomainError, Predicate, ProjectDescriptor},
    error::SprigResult,
};

struct Registration {
    predicate: Box<dyn Predicate>,
    contributor: Arc<dyn ProjectContributor>,
    priority: i32,
}

/// Contributors, each guarded by an activation predicate.
pub struct ContributionRegistry {
    /// Sorted by priority, ties in registration order.
    registrations: Vec<Registration>,
    required: Vec<&'static str>,
}

impl ContributionRegistry {
    pub fn builder() -> ContributionRegistryBuilder {
        ContributionRegistryBuilder::default()
    }

    /// Active contributors for a descriptor, in execution order.
    ///
    /// Fails with `UnsupportedConfiguration` when a required category has no
    /// active contributor.
    #[instrument(skip_all, fields(descriptor = %descriptor))]
    pub fn resolve(
        &self,
        descriptor: &ProjectDescriptor,
    ) -> SprigResult<Vec<Arc<dyn ProjectContributor>>> {
        let active: Vec<Arc<dyn ProjectContributor>> = self
            .registrations
            .iter()
            .filter(|r| r.predicate.test(descriptor))
            .map(|r| Arc::clone(&r.contributor))
            .collect();

        for category in &self.required {
            if !active.iter().any(|c| c.category() == Some(*category)) {
                return Err(DomainError::UnsupportedConfiguration {
                    category: (*category).to_string(),
                    descriptor: descriptor.to_string(),
                }
                .into());
            }
        }

        debug!(active = active.len(), total = self.registrations.len(), "Contributors resolved");
        Ok(active)
    }

    /// All registered contributor names with their priority, in execution order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, i32)> {
        self.registrations
            .iter()
            .map(|r| (r.contributor.name(), r.priority))
    }

    pub fn required_categories(&self) -> &[&'static str] {
        &self.required
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

/// Builder for [`ContributionRegistry`].
#[derive(Default)]
pub struct ContributionRegistryBuilder {
    registrations: Vec<Registration>,
    required: Vec<&'static str>,
}

impl ContributionRegistryBuilder {
    /// Register a contributor guarded by `predicate`. Lower priority runs first.
    pub fn register(
        self,
        predicate: impl Predicate + 'static,
        contributor: impl ProjectContributor + 'static,
        priority: i32,
    ) -> Self {
        self.register_arc(predicate, Arc::new(contributor), priority)
    }

    pub fn register_arc(
        mut self,
        predicate: impl Predicate + 'static,
        contributor: Arc<dyn ProjectContributor>,
        priority: i32,
    ) -> Self {
        self.registrations.push(Registration {
            predicate: Box::new(predicate),
            contributor,
            priority,
        });
        self
    }

    /// Require at least one active contributor of `category` per generation.
    pub fn require(mut self, category: &'static str) -> Self {
        if !self.required.contains(&category) {
            self.required.push(category);
        }
        self
    }

    pub fn build(mut self) -> ContributionRegistry {
        // Stable sort: equal priorities keep registration order.
        self.registrations.sort_by_key(|r| r.priority);
        ContributionRegistry {
            registrations: self.registrations,
            required: self.required,
        }
    }
}
