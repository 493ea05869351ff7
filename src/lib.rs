//! # Affiliate Catalog - AI tool directory
//!
//! A small catalog of AI tools with outbound affiliate links, served two ways:
//! - a live web server with search, category and pricing filters
//! - a static export of the same pages as plain HTML
//!
//! ## Architecture
//!
//! ```text
//!   remote table ──┐
//!                  ├─→ CatalogService ─→ CatalogQuery ─→ Renderer ─┬─→ web (axum)
//!   sample data ───┘    (fallback)        (filter)     (handlebars)└─→ export (files)
//! ```
//!
//! Every read is answered: when the remote table fails, the built-in sample
//! catalog is used instead.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod catalog;
pub mod export;
pub mod render;
pub mod sitemap;
pub mod source;
pub mod types;
pub mod web;

// Internal utilities
pub mod observability;

pub use types::{Config, Error, Result};
