//! PostgREST-backed catalog source (Supabase REST API).

use super::CatalogSource;
use crate::catalog::{CatalogQuery, ToolRecord};
use crate::types::{Error, Result, SourceConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;

/// Default ordering of the table: newest first.
const ORDER_NEWEST: (&str, &str) = ("order", "created_at.desc");

/// Reads tool rows from `{base_url}/rest/v1/{table}`.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RemoteSource {
    /// Create a source for an explicit project URL and key.
    pub fn new(base_url: &str, api_key: &str, table: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            api_key: api_key.to_string(),
        })
    }

    /// Build from configuration. `Ok(None)` when the remote is not configured.
    pub fn from_config(config: &SourceConfig) -> Result<Option<Self>> {
        match config.remote_credentials() {
            Some((url, key)) => Self::new(url, key, &config.table, config.timeout).map(Some),
            None => Ok(None),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the table with PostgREST query parameters and decode the rows.
    async fn fetch<T>(&self, params: &[(&str, String)]) -> Result<Vec<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        tracing::debug!("GET {} {:?}", self.endpoint, params);
        let response = self
            .client
            .get(&self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(format!(
                "{} returned {}: {}",
                self.endpoint, status, body
            )));
        }

        Ok(response.json::<Vec<T>>().await?)
    }
}

/// PostgREST array literal holding a single label: `{"AI Art"}`.
fn array_literal(label: &str) -> String {
    let escaped = label.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{{\"{}\"}}", escaped)
}

/// Literal text for an `ilike` filter.
///
/// `\`, `%` and `_` are backslash-escaped. PostgREST turns every `*` into
/// `%`, so a literal `*` becomes the single-character wildcard `_`; rows are
/// re-checked with [`CatalogQuery::matches`] afterwards.
fn like_pattern(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            '*' => out.push('_'),
            _ => out.push(c),
        }
    }
    out
}

/// Only the `categories` column, for category enumeration.
#[derive(Debug, Deserialize)]
struct CategoriesRow {
    #[serde(default)]
    categories: Vec<String>,
}

#[async_trait]
impl CatalogSource for RemoteSource {
    async fn all_tools(&self) -> Result<Vec<ToolRecord>> {
        self.fetch(&[
            ("select", "*".to_string()),
            (ORDER_NEWEST.0, ORDER_NEWEST.1.to_string()),
        ])
        .await
    }

    async fn tool_by_id(&self, id: &str) -> Result<Option<ToolRecord>> {
        let rows: Vec<ToolRecord> = self
            .fetch(&[("select", "*".to_string()), ("id", format!("eq.{}", id))])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn search(&self, query: &CatalogQuery) -> Result<Vec<ToolRecord>> {
        let mut params = vec![("select", "*".to_string())];
        if let Some(q) = &query.query {
            params.push(("title", format!("ilike.*{}*", like_pattern(q))));
        }
        if let Some(cat) = &query.category {
            params.push(("categories", format!("cs.{}", array_literal(cat))));
        }
        if let Some(pricing) = query.pricing {
            params.push(("pricing", format!("eq.{}", pricing)));
        }
        params.push((ORDER_NEWEST.0, ORDER_NEWEST.1.to_string()));
        let rows: Vec<ToolRecord> = self.fetch(&params).await?;
        Ok(rows.into_iter().filter(|t| query.matches(t)).collect())
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let rows: Vec<CategoriesRow> = self
            .fetch(&[("select", "categories".to_string())])
            .await?;
        let labels: BTreeSet<String> = rows.into_iter().flat_map(|r| r.categories).collect();
        Ok(labels.into_iter().collect())
    }
}
