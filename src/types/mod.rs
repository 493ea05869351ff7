//! Core types for the catalog.
//!
//! This module provides foundational types used throughout the system:
//! - **IDs**: Strongly-typed identifiers (ToolId)
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures for server, source, and site

mod config;
mod errors;
mod ids;

pub use config::{Config, ObservabilityConfig, ServerConfig, SiteConfig, SourceConfig};
pub use errors::{Error, Result};
pub use ids::ToolId;
