//! Catalog Service - assembling and querying the dependency catalog.
//!
//! Catalog sources are layered in order: a later source's facet replaces an
//! earlier facet with the same id.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::CatalogSource},
    domain::{DependencyCatalog, DomainValidator, FacetDefinition, ProjectDescriptor},
    error::{SprigError, SprigResult},
};

/// Information about a facet for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetInfo {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub group: Option<String>,
    /// Conditions of the facet's entries, one per entry.
    pub conditions: Vec<String>,
    /// Whether an entry applies; `None` when no descriptor was given.
    pub available: Option<bool>,
}

impl FacetInfo {
    fn from_definition(facet: &FacetDefinition, descriptor: Option<&ProjectDescriptor>) -> Self {
        Self {
            id: facet.id.clone(),
            name: facet.display_name().to_string(),
            description: facet.description.clone(),
            group: facet.group.clone(),
            conditions: facet
                .entries
                .iter()
                .map(|e| e.condition.to_string())
                .collect(),
            available: descriptor.map(|d| facet.is_available_for(d)),
        }
    }
}

/// Service for catalog operations.
pub struct CatalogService {
    sources: Vec<Box<dyn CatalogSource>>,
}

impl CatalogService {
    pub fn new(sources: Vec<Box<dyn CatalogSource>>) -> Self {
        Self { sources }
    }

    /// Load and layer every source.
    #[instrument(skip_all, fields(sources = self.sources.len()))]
    pub fn load(&self) -> SprigResult<DependencyCatalog> {
        let mut catalog = DependencyCatalog::new();
        for source in &self.sources {
            let layer = source.load().map_err(|e| match e {
                SprigError::Application(_) => e,
                other => ApplicationError::CatalogLoad {
                    source_name: source.describe(),
                    reason: other.to_string(),
                }
                .into(),
            })?;
            DomainValidator::validate_catalog(&layer)?;
            debug!(source = %source.describe(), facets = layer.len(), "Catalog layer loaded");
            catalog.overlay(layer);
        }
        Ok(catalog)
    }

    /// Describe every facet, optionally checked against a descriptor.
    pub fn list(
        catalog: &DependencyCatalog,
        descriptor: Option<&ProjectDescriptor>,
    ) -> Vec<FacetInfo> {
        catalog
            .facets()
            .map(|f| FacetInfo::from_definition(f, descriptor))
            .collect()
    }

    /// Facets usable with the descriptor.
    pub fn available(catalog: &DependencyCatalog, descriptor: &ProjectDescriptor) -> Vec<FacetInfo> {
        catalog
            .available_for(descriptor)
            .map(|f| FacetInfo::from_definition(f, Some(descriptor)))
            .collect()
    }
}
