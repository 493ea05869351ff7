//! HTML rendering — Handlebars templates compiled into the binary.
//!
//! One [`Renderer`] serves both the live server and the static exporter; the
//! only difference between the two is how links are spelled ([`LinkStyle`]).

pub mod affiliate;

use crate::catalog::{CatalogQuery, PricingTier, ToolRecord};
use crate::types::{Result, SiteConfig};
use handlebars::{handlebars_helper, Handlebars};
use std::collections::{BTreeMap, BTreeSet};
use url::Url;
use serde::Serialize;

/// Shown when a tool has no image.
const PLACEHOLDER_IMAGE: &str = "placeholder-tool.jpg";

/// Categories shown on a card before collapsing into a "+N" chip.
const CARD_CATEGORY_LIMIT: usize = 3;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("templates/layout.hbs")),
    ("tool_card", include_str!("templates/tool_card.hbs")),
    ("home", include_str!("templates/home.hbs")),
    ("tool", include_str!("templates/tool.hbs")),
    ("not_found", include_str!("templates/not_found.hbs")),
];

handlebars_helper!(pricing_class: |tier: str| {
    tier.parse::<PricingTier>()
        .map(PricingTier::badge_class)
        .unwrap_or("bg-gray-100 text-gray-800")
});

/// Escapes `& < > " '` only; `=` passes through.
fn escape_html(raw: &str) -> String {
    html_escape::encode_quoted_attribute(raw).into_owned()
}

handlebars_helper!(plural: |count: u64| if count == 1 { "" } else { "s" });

// =============================================================================
// Link style
// =============================================================================

/// How page links are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle<'a> {
    /// Absolute paths served by the web server (`/tools/1`).
    Server,
    /// Relative `.html` files; `depth` is the page's directory depth.
    Static {
        depth: usize,
        slugs: &'a CategorySlugs,
    },
}

impl LinkStyle<'_> {
    fn root(self) -> String {
        match self {
            LinkStyle::Server => "/".to_string(),
            LinkStyle::Static { depth, .. } => "../".repeat(depth),
        }
    }

    pub fn home(self) -> String {
        match self {
            LinkStyle::Server => "/".to_string(),
            LinkStyle::Static { .. } => format!("{}index.html", self.root()),
        }
    }

    /// The id is percent-encoded as a single path segment.
    pub fn tool(self, id: &str) -> String {
        let segment = path_segment(id);
        match self {
            LinkStyle::Server => format!("/tools/{}", segment),
            LinkStyle::Static { .. } => format!("{}tools/{}.html", self.root(), segment),
        }
    }

    pub fn category(self, label: &str) -> String {
        match self {
            LinkStyle::Server => format!("/?{}", CatalogQuery::all().with_category(label).to_query_string()),
            LinkStyle::Static { slugs, .. } => {
                format!("{}category/{}.html", self.root(), slugs.slug(label))
            }
        }
    }

    pub fn pricing(self, tier: PricingTier) -> String {
        match self {
            LinkStyle::Server => format!("/?{}", CatalogQuery::all().with_pricing(tier).to_query_string()),
            LinkStyle::Static { .. } => {
                format!("{}pricing/{}.html", self.root(), tier.as_str().to_lowercase())
            }
        }
    }

    pub fn asset(self, name: &str) -> String {
        format!("{}{}", self.root(), name)
    }
}

fn path_segment(raw: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return raw.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(raw);
    }
    url.path().trim_start_matches('/').to_string()
}

/// Lowercase ASCII slug: alphanumerics kept, every other run becomes `-`.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Slug used when a label has no ASCII alphanumerics at all.
const FALLBACK_SLUG: &str = "category";

/// One distinct file slug per category label.
///
/// Labels are assigned in byte order; a slug already taken gets `-2`, `-3`, ...
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySlugs {
    by_label: BTreeMap<String, String>,
}

impl CategorySlugs {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        let mut taken = BTreeSet::new();
        let mut by_label = BTreeMap::new();
        for label in labels {
            let base = match slugify(&label) {
                slug if slug.is_empty() => FALLBACK_SLUG.to_string(),
                slug => slug,
            };
            let mut slug = base.clone();
            let mut n = 2;
            while !taken.insert(slug.clone()) {
                slug = format!("{}-{}", base, n);
                n += 1;
            }
            by_label.insert(label, slug);
        }
        Self { by_label }
    }

    /// Slug for `label`; labels not registered fall back to [`slugify`].
    pub fn slug(&self, label: &str) -> String {
        self.by_label
            .get(label)
            .cloned()
            .unwrap_or_else(|| slugify(label))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_label.iter().map(|(l, s)| (l.as_str(), s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}

// =============================================================================
// View models
// =============================================================================

#[derive(Debug, Serialize)]
struct CardView {
    id: String,
    title: String,
    href: String,
    affiliate_href: String,
    pricing: &'static str,
    highlights: String,
    image: String,
    categories: Vec<String>,
    extra_categories: usize,
}

#[derive(Debug, Serialize)]
struct OptionView {
    value: String,
    href: String,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct HomeView {
    site_name: String,
    tagline: String,
    page_title: String,
    heading: Option<String>,
    home_href: String,
    filter_form: bool,
    query: String,
    active: bool,
    categories: Vec<OptionView>,
    pricing_options: Vec<OptionView>,
    count: usize,
    tools: Vec<CardView>,
}

#[derive(Debug, Serialize)]
struct ToolView {
    site_name: String,
    page_title: String,
    home_href: String,
    title: String,
    pricing: &'static str,
    highlights: String,
    image: String,
    categories: Vec<String>,
    features: String,
    note: String,
    affiliate_href: String,
}

#[derive(Debug, Serialize)]
struct NotFoundView {
    site_name: String,
    page_title: String,
    home_href: String,
}

/// Inputs for a listing page.
#[derive(Debug)]
pub struct HomePage<'a> {
    pub query: &'a CatalogQuery,
    pub tools: &'a [ToolRecord],
    pub categories: &'a [String],
    /// Replaces the results heading on static category/pricing pages.
    pub heading: Option<String>,
    pub links: LinkStyle<'a>,
}

// =============================================================================
// Renderer
// =============================================================================

/// Handlebars registry plus site settings.
#[derive(Debug)]
pub struct Renderer {
    hb: Handlebars<'static>,
    site: SiteConfig,
}

impl Renderer {
    pub fn new(site: SiteConfig) -> Result<Self> {
        let mut hb = Handlebars::new();
        hb.register_escape_fn(escape_html);
        hb.register_helper("pricing_class", Box::new(pricing_class));
        hb.register_helper("plural", Box::new(plural));
        for (name, source) in TEMPLATES {
            hb.register_template_string(name, *source)
                .map_err(|e| crate::types::Error::internal(format!("template {}: {}", name, e)))?;
        }
        Ok(Self { hb, site })
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Outbound link for a tool, with UTM parameters when configured.
    pub fn affiliate_href(&self, tool: &ToolRecord) -> String {
        match &self.site.utm_source {
            Some(source) => affiliate::with_utm(
                &tool.affiliate_link,
                source,
                affiliate::DEFAULT_MEDIUM,
                affiliate::DEFAULT_CAMPAIGN,
            ),
            None if tool.affiliate_link.trim().is_empty() => "#".to_string(),
            None => tool.affiliate_link.clone(),
        }
    }

    fn image(&self, tool: &ToolRecord, links: LinkStyle<'_>) -> String {
        if tool.image_url.trim().is_empty() {
            links.asset(PLACEHOLDER_IMAGE)
        } else {
            tool.image_url.clone()
        }
    }

    fn card(&self, tool: &ToolRecord, links: LinkStyle<'_>) -> CardView {
        CardView {
            id: tool.id.to_string(),
            title: tool.title.clone(),
            href: links.tool(tool.id.as_str()),
            affiliate_href: self.affiliate_href(tool),
            pricing: tool.pricing.as_str(),
            highlights: tool.highlights.clone(),
            image: self.image(tool, links),
            categories: tool
                .categories
                .iter()
                .take(CARD_CATEGORY_LIMIT)
                .cloned()
                .collect(),
            extra_categories: tool.categories.len().saturating_sub(CARD_CATEGORY_LIMIT),
        }
    }

    /// Listing page: filters, result count, card grid.
    pub fn render_home(&self, page: &HomePage<'_>) -> Result<String> {
        let links = page.links;
        let query = page.query;
        let view = HomeView {
            site_name: self.site.name.clone(),
            tagline: self.site.tagline.clone(),
            page_title: page
                .heading
                .clone()
                .unwrap_or_else(|| self.site.name.clone()),
            heading: page.heading.clone(),
            home_href: links.home(),
            filter_form: matches!(links, LinkStyle::Server),
            query: query.query.clone().unwrap_or_default(),
            active: query.is_active(),
            categories: page
                .categories
                .iter()
                .map(|c| OptionView {
                    value: c.clone(),
                    href: links.category(c),
                    selected: query.category.as_deref() == Some(c.as_str()),
                })
                .collect(),
            pricing_options: PricingTier::ALL
                .into_iter()
                .map(|tier| OptionView {
                    value: tier.as_str().to_string(),
                    href: links.pricing(tier),
                    selected: query.pricing == Some(tier),
                })
                .collect(),
            count: page.tools.len(),
            tools: page.tools.iter().map(|t| self.card(t, links)).collect(),
        };
        Ok(self.hb.render("home", &view)?)
    }

    /// Detail page for one tool.
    pub fn render_tool(&self, tool: &ToolRecord, links: LinkStyle<'_>) -> Result<String> {
        let view = ToolView {
            site_name: self.site.name.clone(),
            page_title: format!("{} | {}", tool.title, self.site.name),
            home_href: links.home(),
            title: tool.title.clone(),
            pricing: tool.pricing.as_str(),
            highlights: tool.highlights.clone(),
            image: self.image(tool, links),
            categories: tool.categories.clone(),
            features: tool.features.clone(),
            note: tool.note.clone(),
            affiliate_href: self.affiliate_href(tool),
        };
        Ok(self.hb.render("tool", &view)?)
    }

    pub fn render_not_found(&self, links: LinkStyle<'_>) -> Result<String> {
        let view = NotFoundView {
            site_name: self.site.name.clone(),
            page_title: format!("Page Not Found | {}", self.site.name),
            home_href: links.home(),
        };
        Ok(self.hb.render("not_found", &view)?)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use pretty_assertions::assert_eq;

    fn renderer() -> Renderer {
        Renderer::new(SiteConfig::default()).unwrap()
    }

    fn home(renderer: &Renderer, query: &CatalogQuery, links: LinkStyle<'_>) -> String {
        let catalog = Catalog::sample();
        let tools: Vec<ToolRecord> = catalog.search(query).into_iter().cloned().collect();
        let categories = catalog.categories();
        renderer
            .render_home(&HomePage {
                query,
                tools: &tools,
                categories: &categories,
                heading: None,
                links,
            })
            .unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x?a=1&b='2'\">"),
            "&lt;a href=&quot;x?a=1&amp;b=&#x27;2&#x27;&quot;&gt;"
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("AI Art"), "ai-art");
        assert_eq!(slugify("  Image / Video  "), "image-video");
        assert_eq!(slugify("Copy.ai"), "copy-ai");
        assert_eq!(slugify("Écriture"), "criture");
    }

    #[test]
    fn test_link_styles() {
        assert_eq!(LinkStyle::Server.tool("3"), "/tools/3");
        assert_eq!(LinkStyle::Server.home(), "/");
        assert_eq!(LinkStyle::Server.category("AI Art"), "/?cat=AI+Art");
        assert_eq!(LinkStyle::Server.pricing(PricingTier::Paid), "/?pricing=Paid");

        let slugs = CategorySlugs::new(["AI Art"]);
        let nested = LinkStyle::Static {
            depth: 1,
            slugs: &slugs,
        };
        assert_eq!(nested.tool("3"), "../tools/3.html");
        assert_eq!(nested.home(), "../index.html");
        assert_eq!(nested.category("AI Art"), "../category/ai-art.html");
        assert_eq!(
            LinkStyle::Static {
                depth: 0,
                slugs: &slugs
            }
            .pricing(PricingTier::Lifetime),
            "pricing/lifetime.html"
        );
    }

    #[test]
    fn test_tool_links_encode_id_segment() {
        assert_eq!(LinkStyle::Server.tool("a b/c?d"), "/tools/a%20b%2Fc%3Fd");
        assert_eq!(LinkStyle::Server.tool("../x"), "/tools/..%2Fx");
        let slugs = CategorySlugs::default();
        assert_eq!(
            LinkStyle::Static { depth: 1, slugs: &slugs }.tool("a/b"),
            "../tools/a%2Fb.html"
        );
    }

    #[test]
    fn test_category_slugs_are_unique() {
        let slugs = CategorySlugs::new(["Video/Animation", "Video Animation", "Đa", "中文", "日本"]);
        assert_eq!(slugs.len(), 5);
        assert_eq!(slugs.slug("Video Animation"), "video-animation");
        assert_eq!(slugs.slug("Video/Animation"), "video-animation-2");
        assert_eq!(slugs.slug("Đa"), "a");
        assert_eq!(slugs.slug("中文"), "category");
        assert_eq!(slugs.slug("日本"), "category-2");
        assert_eq!(slugs.slug("Not Registered"), "not-registered");
    }

    #[test]
    fn test_home_lists_all_tools_without_filters() {
        let html = home(&renderer(), &CatalogQuery::all(), LinkStyle::Server);
        assert!(html.contains("AI Affiliate Tools"));
        assert!(html.contains("8 tools found"));
        assert!(!html.contains("matching your criteria"));
        assert!(!html.contains("Clear all filters"));
        assert!(!html.contains("tool-search"));
        assert!(html.contains("href=\"/tools/1\""));
        assert!(html.contains("rel=\"nofollow noopener noreferrer\""));
    }

    #[test]
    fn test_home_with_active_filter() {
        let query = CatalogQuery::all().with_pricing(PricingTier::Free);
        let html = home(&renderer(), &query, LinkStyle::Server);
        assert!(html.contains("1 tool found"));
        assert!(html.contains("matching your criteria"));
        assert!(html.contains("Clear all filters"));
        assert!(html.contains("<option value=\"Free\" selected>"));
        assert!(html.contains("bg-green-100 text-green-800"));
    }

    #[test]
    fn test_home_without_results() {
        let query = CatalogQuery::all().with_query("doesnotexist");
        let html = home(&renderer(), &query, LinkStyle::Server);
        assert!(html.contains("0 tools found"));
        assert!(html.contains("No tools found"));
        assert!(html.contains("value=\"doesnotexist\""));
    }

    #[test]
    fn test_card_collapses_extra_categories() {
        let renderer = renderer();
        let mut tool = Catalog::sample().tools()[0].clone();
        tool.categories.push("Extra One".into());
        tool.categories.push("Extra Two".into());
        let card = renderer.card(&tool, LinkStyle::Server);
        assert_eq!(card.categories.len(), 3);
        assert_eq!(card.extra_categories, 2);
    }

    #[test]
    fn test_static_home_links_to_pages() {
        let slugs = CategorySlugs::new(Catalog::sample().categories());
        let links = LinkStyle::Static {
            depth: 0,
            slugs: &slugs,
        };
        let html = home(&renderer(), &CatalogQuery::all(), links);
        assert!(html.contains("href=\"tools/1.html\""));
        assert!(html.contains("href=\"category/ai-art.html\""));
        assert!(html.contains("href=\"pricing/freemium.html\""));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn test_tool_page_escapes_and_shows_note() {
        let renderer = renderer();
        let mut tool = Catalog::sample().get("4").unwrap().clone();
        tool.note = "<b>bold</b> take".into();
        let html = renderer.render_tool(&tool, LinkStyle::Server).unwrap();
        assert!(html.contains("Visit Canva"));
        assert!(html.contains("Our Take"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; take"));
        assert!(html.contains("We may earn a commission"));

        tool.note.clear();
        let html = renderer.render_tool(&tool, LinkStyle::Server).unwrap();
        assert!(!html.contains("Our Take"));
    }

    #[test]
    fn test_missing_image_uses_placeholder() {
        let renderer = renderer();
        let mut tool = Catalog::sample().tools()[0].clone();
        tool.image_url.clear();
        let html = renderer
            .render_tool(
                &tool,
                LinkStyle::Static {
                    depth: 1,
                    slugs: &CategorySlugs::default(),
                },
            )
            .unwrap();
        assert!(html.contains("src=\"../placeholder-tool.jpg\""));
    }

    #[test]
    fn test_affiliate_href_with_utm() {
        let site = SiteConfig {
            utm_source: Some("catalog".into()),
            ..SiteConfig::default()
        };
        let renderer = Renderer::new(site).unwrap();
        let tool = Catalog::sample().get("8").unwrap().clone();
        assert_eq!(
            renderer.affiliate_href(&tool),
            "https://stability.ai/?ref=affiliate&utm_source=catalog&utm_medium=affiliate&utm_campaign=ref"
        );
    }

    #[test]
    fn test_not_found_page() {
        let html = renderer().render_not_found(LinkStyle::Server).unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("Page Not Found"));
        assert!(html.contains("Back to Home"));
    }
}
