//! Request handlers.

use super::AppState;
use crate::catalog::{CatalogQuery, SearchParams};
use crate::render::{HomePage, LinkStyle};
use crate::sitemap;
use crate::types::Result;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use std::sync::Arc;

type SharedState = Arc<AppState>;

/// `GET /`: listing page with optional `q`, `cat`, `pricing` filters.
pub async fn home(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>> {
    let query = CatalogQuery::from(&params);
    let (tools, categories) = tokio::join!(
        state.catalog.search(&query),
        state.catalog.categories()
    );
    tracing::debug!(
        "home: query={:?} category={:?} pricing={:?} -> {} tools",
        query.query,
        query.category,
        query.pricing,
        tools.len()
    );

    let html = state.renderer.render_home(&HomePage {
        query: &query,
        tools: &tools,
        categories: &categories,
        heading: None,
        links: LinkStyle::Server,
    })?;
    Ok(Html(html))
}

/// `GET /tools/{id}`: detail page, or the not-found page with 404.
pub async fn tool(State(state): State<SharedState>, Path(id): Path<String>) -> Result<Response> {
    match state.catalog.tool_by_id(&id).await {
        Some(tool) => {
            let html = state.renderer.render_tool(&tool, LinkStyle::Server)?;
            Ok(Html(html).into_response())
        }
        None => {
            tracing::debug!("tool {} not found", id);
            not_found_page(&state)
        }
    }
}

/// Fallback for unknown routes.
pub async fn not_found(State(state): State<SharedState>) -> Result<Response> {
    not_found_page(&state)
}

fn not_found_page(state: &AppState) -> Result<Response> {
    let html = state.renderer.render_not_found(LinkStyle::Server)?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}

/// `GET /api/tools`: filtered tools as JSON.
pub async fn api_tools(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Json<serde_json::Value> {
    let tools = state.catalog.search(&CatalogQuery::from(&params)).await;
    Json(serde_json::json!({
        "count": tools.len(),
        "tools": tools,
    }))
}

/// `GET /api/categories`: distinct category labels as JSON.
pub async fn api_categories(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let categories = state.catalog.categories().await;
    Json(serde_json::json!({
        "categories": categories,
    }))
}

/// `GET /sitemap.xml`: home page plus every tool page.
pub async fn sitemap_xml(State(state): State<SharedState>) -> Response {
    let tools = state.catalog.all_tools().await;
    let entries = sitemap::catalog_entries(&tools, Utc::now().date_naive());
    let xml = sitemap::render_xml(&state.config.site.origin, &entries);
    ([(header::CONTENT_TYPE, "application/xml")], xml).into_response()
}

/// `GET /healthz`
pub async fn healthz() -> &'static str {
    "ok"
}
