//! Tool catalog: typed records and the ordered read-only collection.
//!
//! The catalog is built once (from the built-in sample set or from rows of the
//! remote table) and never mutated afterwards. Order is significant: every
//! query returns an order-preserving subsequence.

pub mod query;
mod sample;

pub use query::{CatalogQuery, SearchParams};

use crate::types::{Error, Result, ToolId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Pricing tier
// =============================================================================

/// Pricing model of a tool. Serialized as its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingTier {
    Free,
    Freemium,
    Paid,
    Lifetime,
}

impl PricingTier {
    /// All tiers, in dropdown order.
    pub const ALL: [PricingTier; 4] = [
        PricingTier::Free,
        PricingTier::Freemium,
        PricingTier::Paid,
        PricingTier::Lifetime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PricingTier::Free => "Free",
            PricingTier::Freemium => "Freemium",
            PricingTier::Paid => "Paid",
            PricingTier::Lifetime => "Lifetime",
        }
    }

    /// Badge colour classes used by the pages.
    pub fn badge_class(self) -> &'static str {
        match self {
            PricingTier::Free => "bg-green-100 text-green-800",
            PricingTier::Freemium => "bg-blue-100 text-blue-800",
            PricingTier::Paid => "bg-purple-100 text-purple-800",
            PricingTier::Lifetime => "bg-orange-100 text-orange-800",
        }
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PricingTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| {
                Error::validation(format!(
                    "invalid pricing '{}', expected one of: Free, Freemium, Paid, Lifetime",
                    s
                ))
            })
    }
}

// =============================================================================
// Tool record
// =============================================================================

/// One catalog entry. Field names match the columns of the remote table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub id: ToolId,
    pub title: String,
    pub affiliate_link: String,
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub highlights: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: String,
    pub pricing: PricingTier,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub note: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// Optional text columns come back as `null` from the table.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ToolRecord {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered, immutable collection of tool records.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tools: Vec<ToolRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and records without categories.
    pub fn new(tools: Vec<ToolRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tools.len());
        for tool in &tools {
            if !seen.insert(tool.id.as_str()) {
                return Err(Error::validation(format!("Duplicate tool id: {}", tool.id)));
            }
            if tool.categories.is_empty() {
                return Err(Error::validation(format!(
                    "Tool {} has no categories",
                    tool.id
                )));
            }
        }
        Ok(Self { tools })
    }

    /// The built-in sample catalog used when no remote source is available.
    pub fn sample() -> Self {
        Self {
            tools: sample::tools(),
        }
    }

    pub fn tools(&self) -> &[ToolRecord] {
        &self.tools
    }

    /// Get a tool by id.
    pub fn get(&self, id: &str) -> Option<&ToolRecord> {
        self.tools.iter().find(|t| t.id.as_str() == id)
    }

    /// Records matching every criterion of `query`, in catalog order.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&ToolRecord> {
        query.apply(&self.tools)
    }

    /// Distinct category labels, sorted.
    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.tools)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Deduplicate and sort the category labels of `tools`.
pub fn distinct_categories<'a, I>(tools: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ToolRecord>,
{
    tools
        .into_iter()
        .flat_map(|t| t.categories.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
