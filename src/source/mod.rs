//! Catalog sources — where tool records come from.
//!
//! Two implementations sit behind [`CatalogSource`]: the built-in catalog
//! ([`StaticSource`]) and a PostgREST table ([`RemoteSource`]).
//! [`CatalogService`] combines an optional remote source with the built-in
//! fallback and is what the web layer and the exporter talk to.

mod remote;
mod service;

pub use remote::RemoteSource;
pub use service::CatalogService;

use crate::catalog::{Catalog, CatalogQuery, ToolRecord};
use crate::types::Result;
use async_trait::async_trait;

/// Read-only access to a catalog of tools.
#[async_trait]
pub trait CatalogSource: Send + Sync + std::fmt::Debug {
    /// Every tool, in the source's default order.
    async fn all_tools(&self) -> Result<Vec<ToolRecord>>;

    /// A single tool, or `None` when the id is unknown.
    async fn tool_by_id(&self, id: &str) -> Result<Option<ToolRecord>>;

    /// Tools matching `query`, in the source's default order.
    async fn search(&self, query: &CatalogQuery) -> Result<Vec<ToolRecord>>;

    /// Distinct category labels, sorted.
    async fn categories(&self) -> Result<Vec<String>>;
}

/// Source backed by an in-memory catalog. Never fails.
#[derive(Debug, Clone)]
pub struct StaticSource {
    catalog: Catalog,
}

impl StaticSource {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new(Catalog::sample())
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn all_tools(&self) -> Result<Vec<ToolRecord>> {
        Ok(self.catalog.tools().to_vec())
    }

    async fn tool_by_id(&self, id: &str) -> Result<Option<ToolRecord>> {
        Ok(self.catalog.get(id).cloned())
    }

    async fn search(&self, query: &CatalogQuery) -> Result<Vec<ToolRecord>> {
        Ok(self.catalog.search(query).into_iter().cloned().collect())
    }

    async fn categories(&self) -> Result<Vec<String>> {
        Ok(self.catalog.categories())
    }
}
