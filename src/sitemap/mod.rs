//! sitemap.xml generation.
//!
//! Entries come either from a directory of exported `.html` files
//! ([`scan_html`]) or straight from the catalog ([`catalog_entries`]).

use crate::catalog::ToolRecord;
use crate::types::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Component, Path};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// `<changefreq>` values used by the heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
        }
    }
}

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub path: String,
    pub lastmod: NaiveDate,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

impl SitemapEntry {
    /// Entry for `path` with heuristic change frequency and priority.
    pub fn new(path: impl Into<String>, lastmod: NaiveDate) -> Self {
        let path = path.into();
        let (changefreq, priority) = meta_for(&path);
        Self {
            path,
            lastmod,
            changefreq,
            priority,
        }
    }
}

/// Change frequency and priority for a URL path.
pub fn meta_for(path: &str) -> (ChangeFreq, f32) {
    if path == "/" {
        (ChangeFreq::Daily, 1.0)
    } else if path.starts_with("/blog/") && !path.ends_with("/blog/index.html") {
        (ChangeFreq::Monthly, 0.8)
    } else if path.ends_with("/categories.html") || path.ends_with("/blog/index.html") {
        (ChangeFreq::Weekly, 0.8)
    } else {
        (ChangeFreq::Yearly, 0.4)
    }
}

/// What to skip and how to rename while scanning a site directory.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Directory names never descended into.
    pub ignore_dirs: Vec<String>,
    /// File names never listed.
    pub ignore_files: Vec<String>,
    /// Relative file path (`blog/post.html`) to clean URL path (`/blog/post`).
    pub clean_urls: BTreeMap<String, String>,
    /// URL paths added with today's date when the scan did not find them.
    pub required: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ignore_dirs: ["assets", ".git", "node_modules", ".vercel", "scripts"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignore_files: Vec::new(),
            clean_urls: BTreeMap::new(),
            required: vec!["/".to_string()],
        }
    }
}

/// Every `.html` file under `root`, as sitemap entries (unsorted).
pub fn scan_html(root: &Path, options: &ScanOptions) -> Result<Vec<SitemapEntry>> {
    let pattern = format!(
        "{}/**/*.html",
        glob::Pattern::escape(&root.to_string_lossy())
    );

    let mut entries = Vec::new();
    for item in glob::glob(&pattern)? {
        let path = item.map_err(|e| Error::Io(e.into()))?;
        if !path.is_file() {
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };

        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let Some((file_name, dirs)) = parts.split_last() else {
            continue;
        };
        if parts.iter().any(|p| p.starts_with('.'))
            || dirs.iter().any(|d| options.ignore_dirs.contains(d))
            || options.ignore_files.contains(file_name)
        {
            continue;
        }

        let relative = parts.join("/");
        let lastmod = std::fs::metadata(&path)?
            .modified()
            .map(|t| DateTime::<Utc>::from(t).date_naive())
            .unwrap_or_else(|_| Utc::now().date_naive());
        entries.push(SitemapEntry::new(url_path(&relative, options), lastmod));
    }
    Ok(entries)
}

fn url_path(relative: &str, options: &ScanOptions) -> String {
    if relative == "index.html" {
        return "/".to_string();
    }
    if let Some(clean) = options.clean_urls.get(relative) {
        return clean.clone();
    }
    format!("/{}", relative)
}

/// Add an entry dated `today` for each required path that is missing.
pub fn ensure(entries: &mut Vec<SitemapEntry>, required: &[String], today: NaiveDate) {
    for path in required {
        if !entries.iter().any(|e| &e.path == path) {
            entries.push(SitemapEntry::new(path.clone(), today));
        }
    }
}

/// Home first, then by path.
pub fn sort_entries(entries: &mut [SitemapEntry]) {
    entries.sort_by(|a, b| {
        (a.path != "/", a.path.as_str()).cmp(&(b.path != "/", b.path.as_str()))
    });
}

/// Home page plus one page per tool, dated by the tool's last update.
pub fn catalog_entries(tools: &[ToolRecord], today: NaiveDate) -> Vec<SitemapEntry> {
    let mut entries = vec![SitemapEntry::new("/", today)];
    entries.extend(
        tools
            .iter()
            .map(|t| SitemapEntry::new(format!("/tools/{}", t.id), t.updated_at.date_naive())),
    );
    sort_entries(&mut entries);
    entries
}

/// Serialize entries as a sitemap document.
pub fn render_xml(origin: &str, entries: &[SitemapEntry]) -> String {
    let origin = origin.trim_end_matches('/');
    let mut xml = String::new();
    let _ = writeln!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    let _ = writeln!(xml, "<urlset xmlns=\"{}\">", SITEMAP_NS);
    for entry in entries {
        let url = format!("{}{}", origin, entry.path);
        let loc = html_escape::encode_quoted_attribute(&url);
        let _ = writeln!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>",
            loc,
            entry.lastmod.format("%Y-%m-%d"),
            entry.changefreq.as_str(),
            entry.priority
        );
    }
    let _ = writeln!(xml, "</urlset>");
    xml
}

/// Scan `root`, fill in required paths, sort, and write the document to `out`.
///
/// Returns the number of URLs written. A missing `root` is [`Error::NotFound`].
pub fn write_sitemap(root: &Path, out: &Path, origin: &str, options: &ScanOptions) -> Result<usize> {
    if !root.is_dir() {
        return Err(Error::not_found(format!("{} is not a directory", root.display())));
    }
    let mut entries = scan_html(root, options)?;
    ensure(&mut entries, &options.required, Utc::now().date_naive());
    sort_entries(&mut entries);
    std::fs::write(out, render_xml(origin, &entries))?;
    tracing::info!("Generated {} with {} URLs", out.display(), entries.len());
    Ok(entries.len())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<html></html>").unwrap();
    }

    fn paths(entries: &[SitemapEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_meta_heuristics() {
        assert_eq!(meta_for("/"), (ChangeFreq::Daily, 1.0));
        assert_eq!(meta_for("/blog/notion-ai"), (ChangeFreq::Monthly, 0.8));
        assert_eq!(meta_for("/blog/index.html"), (ChangeFreq::Weekly, 0.8));
        assert_eq!(meta_for("/categories.html"), (ChangeFreq::Weekly, 0.8));
        assert_eq!(meta_for("/about.html"), (ChangeFreq::Yearly, 0.4));
    }

    #[test]
    fn test_scan_skips_ignored_and_hidden() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "index.html");
        touch(root, "about.html");
        touch(root, "blog/notion-ai.html");
        touch(root, "assets/demo.html");
        touch(root, ".vercel/output.html");
        touch(root, "drafts/.hidden.html");
        touch(root, "test3.html");
        touch(root, "readme.txt");

        let mut options = ScanOptions::default();
        options.ignore_files.push("test3.html".into());
        options
            .clean_urls
            .insert("blog/notion-ai.html".into(), "/blog/notion-ai".into());

        let mut entries = scan_html(root, &options).unwrap();
        sort_entries(&mut entries);
        assert_eq!(paths(&entries), vec!["/", "/about.html", "/blog/notion-ai"]);
        assert_eq!(entries[2].changefreq, ChangeFreq::Monthly);
    }

    #[test]
    fn test_ensure_adds_missing_required_paths() {
        let mut entries = vec![SitemapEntry::new("/about.html", date(2024, 5, 1))];
        ensure(
            &mut entries,
            &["/".to_string(), "/about.html".to_string()],
            date(2025, 1, 2),
        );
        sort_entries(&mut entries);
        assert_eq!(paths(&entries), vec!["/", "/about.html"]);
        assert_eq!(entries[0].lastmod, date(2025, 1, 2));
        assert_eq!(entries[1].lastmod, date(2024, 5, 1));
    }

    #[test]
    fn test_sort_puts_home_first() {
        let mut entries = vec![
            SitemapEntry::new("/b.html", date(2024, 1, 1)),
            SitemapEntry::new("/", date(2024, 1, 1)),
            SitemapEntry::new("/a.html", date(2024, 1, 1)),
        ];
        sort_entries(&mut entries);
        assert_eq!(paths(&entries), vec!["/", "/a.html", "/b.html"]);
    }

    #[test]
    fn test_render_xml() {
        let entries = vec![
            SitemapEntry::new("/", date(2024, 1, 1)),
            SitemapEntry::new("/tools/a&b", date(2024, 2, 3)),
        ];
        let xml = render_xml("https://tools.example/", &entries);
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">
  <url>
    <loc>https://tools.example/</loc>
    <lastmod>2024-01-01</lastmod>
    <changefreq>daily</changefreq>
    <priority>1.0</priority>
  </url>
  <url>
    <loc>https://tools.example/tools/a&amp;b</loc>
    <lastmod>2024-02-03</lastmod>
    <changefreq>yearly</changefreq>
    <priority>0.4</priority>
  </url>
</urlset>
";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_catalog_entries() {
        let catalog = crate::catalog::Catalog::sample();
        let entries = catalog_entries(catalog.tools(), date(2025, 6, 1));
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[0].path, "/");
        assert_eq!(entries[1].path, "/tools/1");
        assert_eq!(entries[1].lastmod, date(2024, 1, 1));
    }

    #[test]
    fn test_write_sitemap() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "index.html");
        touch(dir.path(), "tools/1.html");
        let out = dir.path().join("sitemap.xml");

        let count = write_sitemap(dir.path(), &out, "https://x.test", &ScanOptions::default()).unwrap();
        assert_eq!(count, 2);
        let xml = fs::read_to_string(out).unwrap();
        assert!(xml.contains("<loc>https://x.test/</loc>"));
        assert!(xml.contains("<loc>https://x.test/tools/1.html</loc>"));
    }

    #[test]
    fn test_write_sitemap_requires_existing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = write_sitemap(
            &missing,
            &dir.path().join("sitemap.xml"),
            "https://x.test",
            &ScanOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
        assert!(!dir.path().join("sitemap.xml").exists());
    }
}
