//! Affiliate catalog - command-line entry point.
//!
//! Subcommands:
//! - `serve`: run the web server until ctrl-c
//! - `export`: write the static site to a directory
//! - `sitemap`: generate sitemap.xml for an existing directory of HTML files

use affiliate_catalog::export::export_site;
use affiliate_catalog::sitemap::{self, ScanOptions};
use affiliate_catalog::web::{AppState, WebServer};
use affiliate_catalog::Config;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "affiliate-catalog", version, about = "AI tool catalog with affiliate links")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the catalog over HTTP.
    Serve {
        /// Bind address, overrides CATALOG_LISTEN_ADDR.
        #[arg(long)]
        listen: Option<String>,
    },
    /// Pre-render every page into a directory.
    Export {
        #[arg(long)]
        out: PathBuf,
    },
    /// Generate sitemap.xml from the HTML files under a directory.
    Sitemap {
        #[arg(long)]
        root: PathBuf,
        /// Defaults to `<root>/sitemap.xml`.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Defaults to SITE_ORIGIN.
        #[arg(long)]
        origin: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = Config::from_env();
    affiliate_catalog::observability::init_tracing(&config.observability);

    match cli.command {
        Command::Serve { listen } => {
            if let Some(listen) = listen {
                config.server.listen_addr = listen;
            }
            let addr: SocketAddr = config.server.listen_addr.parse()?;
            let state = Arc::new(AppState::from_config(config)?);
            let server = Arc::new(WebServer::new(state, addr));

            let signal_server = server.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Received ctrl-c");
                    signal_server.shutdown();
                }
            });

            server.serve().await?;
        }
        Command::Export { out } => {
            let state = AppState::from_config(config)?;
            let report = export_site(&state.catalog, &state.renderer, &out).await?;
            println!(
                "Exported {} pages ({} tools, {} categories, {} pricing tiers) to {}",
                report.total_pages(),
                report.tool_pages,
                report.category_pages,
                report.pricing_pages,
                out.display()
            );
        }
        Command::Sitemap { root, out, origin } => {
            let out = out.unwrap_or_else(|| root.join("sitemap.xml"));
            let origin = origin.unwrap_or(config.site.origin);
            let count = sitemap::write_sitemap(&root, &out, &origin, &ScanOptions::default())?;
            println!("Generated {} with {} URLs", out.display(), count);
        }
    }

    Ok(())
}
