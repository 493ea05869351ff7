//! HTTP layer — axum router over the catalog service and renderer.

pub mod handlers;
pub mod server;

pub use server::WebServer;

use crate::render::Renderer;
use crate::source::CatalogService;
use crate::types::{Config, Result};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared, immutable request state.
#[derive(Debug)]
pub struct AppState {
    pub catalog: CatalogService,
    pub renderer: Renderer,
    pub config: Config,
}

impl AppState {
    pub fn new(catalog: CatalogService, renderer: Renderer, config: Config) -> Self {
        Self {
            catalog,
            renderer,
            config,
        }
    }

    /// Catalog service and renderer built from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let catalog = CatalogService::from_config(&config)?;
        let renderer = Renderer::new(config.site.clone())?;
        Ok(Self::new(catalog, renderer, config))
    }
}

/// All routes; unknown paths render the not-found page.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/tools/{id}", get(handlers::tool))
        .route("/api/tools", get(handlers::api_tools))
        .route("/api/categories", get(handlers::api_categories))
        .route("/sitemap.xml", get(handlers::sitemap_xml))
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
