//! Static export — pre-render every page into a directory of plain HTML.
//!
//! Layout under the output directory:
//!
//! ```text
//! index.html                 full catalog with in-page title search
//! tools/<id>.html            one page per tool
//! category/<slug>.html       one listing per category (slugs made unique)
//! pricing/<tier>.html        one listing per pricing tier
//! catalog.json               the records as JSON
//! sitemap.xml                generated by scanning the above
//! ```

use crate::catalog::{CatalogQuery, PricingTier, ToolRecord};
use crate::render::{CategorySlugs, HomePage, LinkStyle, Renderer};
use crate::sitemap::{self, ScanOptions};
use crate::source::CatalogService;
use crate::types::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Counts of what an export wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub tool_pages: usize,
    pub category_pages: usize,
    pub pricing_pages: usize,
    pub sitemap_urls: usize,
}

impl ExportReport {
    /// HTML pages written, index included.
    pub fn total_pages(&self) -> usize {
        1 + self.tool_pages + self.category_pages + self.pricing_pages
    }
}

/// Render the whole site into `out_dir`, creating it if needed.
///
/// Tools whose id is not a plain file name (ASCII alphanumerics, `-`, `_`)
/// are left out with a warning.
pub async fn export_site(
    service: &CatalogService,
    renderer: &Renderer,
    out_dir: &Path,
) -> Result<ExportReport> {
    let (tools, categories) = tokio::join!(service.all_tools(), service.categories());
    let tools: Vec<ToolRecord> = tools
        .into_iter()
        .filter(|tool| {
            let usable = is_file_stem(tool.id.as_str());
            if !usable {
                tracing::warn!("Skipping tool {:?}: id is not a usable file name", tool.id.as_str());
            }
            usable
        })
        .collect();
    let slugs = CategorySlugs::new(categories.iter().cloned());
    let mut report = ExportReport::default();

    fs::create_dir_all(out_dir)?;
    let index = renderer.render_home(&HomePage {
        query: &CatalogQuery::all(),
        tools: &tools,
        categories: &categories,
        heading: None,
        links: LinkStyle::Static {
            depth: 0,
            slugs: &slugs,
        },
    })?;
    write_page(out_dir.join("index.html"), &index)?;

    let nested = LinkStyle::Static {
        depth: 1,
        slugs: &slugs,
    };
    for tool in &tools {
        let html = renderer.render_tool(tool, nested)?;
        write_page(out_dir.join("tools").join(format!("{}.html", tool.id)), &html)?;
        report.tool_pages += 1;
    }

    for (category, slug) in slugs.iter() {
        let query = CatalogQuery::all().with_category(category);
        let html = listing(
            renderer,
            &query,
            &tools,
            &categories,
            format!("Category: {}", category),
            nested,
        )?;
        write_page(out_dir.join("category").join(format!("{}.html", slug)), &html)?;
        report.category_pages += 1;
    }

    for tier in PricingTier::ALL {
        let query = CatalogQuery::all().with_pricing(tier);
        let html = listing(
            renderer,
            &query,
            &tools,
            &categories,
            format!("Pricing: {}", tier),
            nested,
        )?;
        write_page(
            out_dir
                .join("pricing")
                .join(format!("{}.html", tier.as_str().to_lowercase())),
            &html,
        )?;
        report.pricing_pages += 1;
    }

    fs::write(out_dir.join("catalog.json"), serde_json::to_string_pretty(&tools)?)?;

    report.sitemap_urls = sitemap::write_sitemap(
        out_dir,
        &out_dir.join("sitemap.xml"),
        &renderer.site().origin,
        &ScanOptions::default(),
    )?;

    tracing::info!(
        "Exported {} pages to {}",
        report.total_pages(),
        out_dir.display()
    );
    Ok(report)
}

fn is_file_stem(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn listing(
    renderer: &Renderer,
    query: &CatalogQuery,
    tools: &[ToolRecord],
    categories: &[String],
    heading: String,
    links: LinkStyle<'_>,
) -> Result<String> {
    let matching: Vec<ToolRecord> = query.apply(tools).into_iter().cloned().collect();
    renderer.render_home(&HomePage {
        query,
        tools: &matching,
        categories,
        heading: Some(heading),
        links,
    })
}

fn write_page(path: PathBuf, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, html)?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
