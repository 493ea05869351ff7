//! Query/filter engine.
//!
//! A query is up to three criteria (title text, category label, pricing tier)
//! combined with logical AND. Absent criteria impose no constraint, and the
//! result is always an order-preserving subsequence of the input.

use super::{PricingTier, ToolRecord};
use serde::{Deserialize, Serialize};

/// Raw URL parameters as they arrive from a request (`?q=&cat=&pricing=`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub cat: Option<String>,
    #[serde(default)]
    pub pricing: Option<String>,
}

/// Normalized filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub pricing: Option<PricingTier>,
}

impl CatalogQuery {
    /// Query matching everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build from raw parameters. Empty values and unknown pricing tiers are
    /// treated as "no constraint", never as an error.
    pub fn from_params(q: Option<&str>, cat: Option<&str>, pricing: Option<&str>) -> Self {
        Self {
            query: q.filter(|s| !s.trim().is_empty()).map(str::to_string),
            category: cat.filter(|s| !s.is_empty()).map(str::to_string),
            pricing: pricing.and_then(|p| p.parse().ok()),
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_pricing(mut self, pricing: PricingTier) -> Self {
        self.pricing = Some(pricing);
        self
    }

    /// True when at least one criterion is set.
    pub fn is_active(&self) -> bool {
        self.query.is_some() || self.category.is_some() || self.pricing.is_some()
    }

    /// Whether `tool` satisfies every supplied criterion.
    pub fn matches(&self, tool: &ToolRecord) -> bool {
        if let Some(query) = &self.query {
            if !tool.title.to_lowercase().contains(&query.to_lowercase()) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !tool.has_category(category) {
                return false;
            }
        }
        if let Some(pricing) = self.pricing {
            if tool.pricing != pricing {
                return false;
            }
        }
        true
    }

    /// Filter `tools`, preserving their order.
    pub fn apply<'a, I>(&self, tools: I) -> Vec<&'a ToolRecord>
    where
        I: IntoIterator<Item = &'a ToolRecord>,
    {
        tools.into_iter().filter(|t| self.matches(t)).collect()
    }

    /// Active criteria as `q=..&cat=..&pricing=..`; empty when inactive.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(q) = &self.query {
            serializer.append_pair("q", q);
        }
        if let Some(cat) = &self.category {
            serializer.append_pair("cat", cat);
        }
        if let Some(pricing) = self.pricing {
            serializer.append_pair("pricing", pricing.as_str());
        }
        serializer.finish()
    }
}

impl From<&SearchParams> for CatalogQuery {
    fn from(params: &SearchParams) -> Self {
        Self::from_params(
            params.q.as_deref(),
            params.cat.as_deref(),
            params.pricing.as_deref(),
        )
    }
}

impl From<SearchParams> for CatalogQuery {
    fn from(params: SearchParams) -> Self {
        Self::from(&params)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::ToolId;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn titles(tools: &[&ToolRecord]) -> Vec<String> {
        tools.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_query_chat_matches_chatgpt_only() {
        let catalog = Catalog::sample();
        let result = catalog.search(&CatalogQuery::all().with_query("chat"));
        assert_eq!(titles(&result), vec!["ChatGPT"]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let catalog = Catalog::sample();
        let result = catalog.search(&CatalogQuery::all().with_query("STABLE"));
        assert_eq!(titles(&result), vec!["Stable Diffusion"]);
    }

    #[test]
    fn test_free_pricing_matches_stable_diffusion() {
        let catalog = Catalog::sample();
        let result = catalog.search(&CatalogQuery::from_params(None, None, Some("Free")));
        assert_eq!(titles(&result), vec!["Stable Diffusion"]);
    }

    #[test]
    fn test_writing_category_preserves_order() {
        let catalog = Catalog::sample();
        let result = catalog.search(&CatalogQuery::all().with_category("Writing"));
        assert_eq!(titles(&result), vec!["ChatGPT", "Notion AI", "Grammarly"]);
    }

    #[test]
    fn test_category_match_is_exact() {
        let catalog = Catalog::sample();
        // "AI Writing" is a different label from "Writing"
        let result = catalog.search(&CatalogQuery::all().with_category("AI Writing"));
        assert_eq!(titles(&result), vec!["Copy.ai", "Jasper"]);
        assert!(catalog
            .search(&CatalogQuery::all().with_category("writing"))
            .is_empty());
    }

    #[test]
    fn test_unmatched_query_is_empty() {
        let catalog = Catalog::sample();
        assert!(catalog
            .search(&CatalogQuery::all().with_query("doesnotexist"))
            .is_empty());
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let catalog = Catalog::sample();
        let query = CatalogQuery::all()
            .with_category("Marketing")
            .with_pricing(PricingTier::Paid);
        assert_eq!(titles(&catalog.search(&query)), vec!["Jasper"]);

        let query = CatalogQuery::all()
            .with_query("ai")
            .with_category("Writing");
        assert_eq!(titles(&catalog.search(&query)), vec!["Notion AI"]);
    }

    #[test]
    fn test_from_params_treats_blank_and_unknown_as_absent() {
        let query = CatalogQuery::from_params(Some("   "), Some(""), Some("Gratis"));
        assert_eq!(query, CatalogQuery::all());
        assert!(!query.is_active());

        let query = CatalogQuery::from_params(Some("chat"), None, Some("Paid"));
        assert_eq!(query.query.as_deref(), Some("chat"));
        assert_eq!(query.pricing, Some(PricingTier::Paid));
        assert!(query.is_active());
    }

    #[test]
    fn test_search_params_deserialize_partial() {
        let params: SearchParams = serde_json::from_value(serde_json::json!({"cat": "Design"})).unwrap();
        let query = CatalogQuery::from(params);
        assert_eq!(query.category.as_deref(), Some("Design"));
        assert!(query.query.is_none());
    }

    #[test]
    fn test_to_query_string() {
        assert_eq!(CatalogQuery::all().to_query_string(), "");
        let query = CatalogQuery::all()
            .with_query("ai art")
            .with_category("Image & Video")
            .with_pricing(PricingTier::Lifetime);
        assert_eq!(
            query.to_query_string(),
            "q=ai+art&cat=Image+%26+Video&pricing=Lifetime"
        );
    }

    // =========================================================================
    // Properties
    // =========================================================================

    const LABELS: &[&str] = &["Writing", "AI Art", "Design", "Marketing", "Productivity"];

    fn arb_pricing() -> impl Strategy<Value = PricingTier> {
        prop_oneof![
            Just(PricingTier::Free),
            Just(PricingTier::Freemium),
            Just(PricingTier::Paid),
            Just(PricingTier::Lifetime),
        ]
    }

    fn arb_catalog() -> impl Strategy<Value = Vec<ToolRecord>> {
        let record = (
            "[a-zA-Z ]{0,10}",
            prop::sample::subsequence(LABELS.to_vec(), 1..=3),
            arb_pricing(),
        );
        prop::collection::vec(record, 0..20).prop_map(|rows| {
            let template = Catalog::sample().tools()[0].clone();
            rows.into_iter()
                .enumerate()
                .map(|(i, (title, categories, pricing))| ToolRecord {
                    id: ToolId::from_string(format!("t{}", i)).unwrap(),
                    title,
                    categories: categories.into_iter().map(str::to_string).collect(),
                    pricing,
                    ..template.clone()
                })
                .collect()
        })
    }

    fn arb_query() -> impl Strategy<Value = CatalogQuery> {
        (
            prop::option::of("[a-cA-C]{1,2}"),
            prop::option::of(prop::sample::select(LABELS.to_vec())),
            prop::option::of(arb_pricing()),
        )
            .prop_map(|(query, category, pricing)| CatalogQuery {
                query,
                category: category.map(str::to_string),
                pricing,
            })
    }

    proptest! {
        #[test]
        fn prop_no_criteria_returns_catalog_unchanged(tools in arb_catalog()) {
            let result = CatalogQuery::all().apply(&tools);
            let expected: Vec<&ToolRecord> = tools.iter().collect();
            prop_assert_eq!(result, expected);
        }

        #[test]
        fn prop_every_result_satisfies_criteria(tools in arb_catalog(), query in arb_query()) {
            for tool in query.apply(&tools) {
                if let Some(q) = &query.query {
                    prop_assert!(tool.title.to_lowercase().contains(&q.to_lowercase()));
                }
                if let Some(cat) = &query.category {
                    prop_assert!(tool.categories.contains(cat));
                }
                if let Some(pricing) = query.pricing {
                    prop_assert_eq!(tool.pricing, pricing);
                }
            }
        }

        #[test]
        fn prop_result_is_ordered_subsequence(tools in arb_catalog(), query in arb_query()) {
            let result = query.apply(&tools);
            let positions: Vec<usize> = result
                .iter()
                .map(|r| tools.iter().position(|t| t.id == r.id).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_filtering_is_idempotent(tools in arb_catalog(), query in arb_query()) {
            let once = query.apply(&tools);
            let twice = query.apply(once.iter().copied());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_categories_sorted_and_unique(tools in arb_catalog()) {
            let categories = crate::catalog::distinct_categories(&tools);
            prop_assert!(categories.windows(2).all(|w| w[0] < w[1]));
            for tool in &tools {
                for cat in &tool.categories {
                    prop_assert!(categories.contains(cat));
                }
            }
        }
    }
}
