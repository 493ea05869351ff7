//! Catalog service — optional remote source with built-in fallback.

use super::{CatalogSource, RemoteSource, StaticSource};
use crate::catalog::{Catalog, CatalogQuery, ToolRecord};
use crate::types::{Config, Result};
use std::sync::Arc;

/// Answers catalog reads for the web layer and the exporter.
///
/// When a remote source is configured every read goes there first; any
/// failure is logged and answered from the fallback catalog instead. Callers
/// never see a data-source error.
#[derive(Debug, Clone)]
pub struct CatalogService {
    fallback: Arc<StaticSource>,
    remote: Option<Arc<dyn CatalogSource>>,
}

impl CatalogService {
    pub fn new(fallback: Catalog, remote: Option<Arc<dyn CatalogSource>>) -> Self {
        Self {
            fallback: Arc::new(StaticSource::new(fallback)),
            remote,
        }
    }

    /// Built-in catalog only.
    pub fn offline(fallback: Catalog) -> Self {
        Self::new(fallback, None)
    }

    /// Sample catalog as fallback plus the remote table when configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let remote = RemoteSource::from_config(&config.source)?;
        match &remote {
            Some(source) => tracing::info!("Catalog source: {}", source.endpoint()),
            None => tracing::info!("Catalog source: built-in sample catalog"),
        }
        Ok(Self::new(
            Catalog::sample(),
            remote.map(|r| Arc::new(r) as Arc<dyn CatalogSource>),
        ))
    }

    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn fallback(&self) -> &Catalog {
        self.fallback.catalog()
    }

    /// Every tool in default order.
    pub async fn all_tools(&self) -> Vec<ToolRecord> {
        if let Some(remote) = &self.remote {
            match remote.all_tools().await {
                Ok(tools) if !tools.is_empty() => return tools,
                Ok(_) => tracing::warn!("Remote catalog is empty, using built-in catalog"),
                Err(e) => warn_fallback("all_tools", &e),
            }
        }
        self.fallback.catalog().tools().to_vec()
    }

    /// A tool by id; `None` means "not found".
    pub async fn tool_by_id(&self, id: &str) -> Option<ToolRecord> {
        if let Some(remote) = &self.remote {
            match remote.tool_by_id(id).await {
                Ok(found) => return found,
                Err(e) => warn_fallback("tool_by_id", &e),
            }
        }
        self.fallback.catalog().get(id).cloned()
    }

    /// Tools matching `query`.
    pub async fn search(&self, query: &CatalogQuery) -> Vec<ToolRecord> {
        if let Some(remote) = &self.remote {
            match remote.search(query).await {
                Ok(tools) => return tools,
                Err(e) => warn_fallback("search", &e),
            }
        }
        self.fallback
            .catalog()
            .search(query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Distinct category labels, sorted.
    pub async fn categories(&self) -> Vec<String> {
        if let Some(remote) = &self.remote {
            match remote.categories().await {
                Ok(categories) => return categories,
                Err(e) => warn_fallback("categories", &e),
            }
        }
        self.fallback.catalog().categories()
    }
}

fn warn_fallback(operation: &str, err: &crate::types::Error) {
    tracing::warn!(
        "Remote catalog {} failed, using built-in catalog: {}",
        operation,
        err
    );
}
