use crate::domain::{
    build::{Dependency, Repository},
    catalog::{DependencyCatalog, FacetDefinition},
    descriptor::ProjectDescriptor,
    error::DomainError,
};

/// Centralized domain validation.
///
/// Values built through the builders are already valid; these entry points
/// re-check values that arrived another way (deserialization, adapters).
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_descriptor(descriptor: &ProjectDescriptor) -> Result<(), DomainError> {
        descriptor.validate()
    }

    pub fn validate_dependency(dependency: &Dependency) -> Result<(), DomainError> {
        dependency.validate()
    }

    pub fn validate_repository(repository: &Repository) -> Result<(), DomainError> {
        repository.validate()
    }

    pub fn validate_facet(facet: &FacetDefinition) -> Result<(), DomainError> {
        facet.validate()
    }

    pub fn validate_catalog(catalog: &DependencyCatalog) -> Result<(), DomainError> {
        catalog.facets().try_for_each(FacetDefinition::validate)
    }
}
