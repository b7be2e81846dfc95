//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `sprig-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `BuildSerializer`: Build descriptor rendering
//!   - `CatalogSource`: Dependency catalog loading
//!
//! - **Extension points**: `ProjectContributor` and `DependencyPostProcessor`
//!   live next to the services that drive them.

pub mod output;

pub use output::{BuildSerializer, CatalogSource, Filesystem};
