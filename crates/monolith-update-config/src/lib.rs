// monolith-update-config/src/lib.rs
// ============================================================================
// Module: Monolith Update Config Library
// Description: Configuration model for the update service.
// Purpose: Expose config loading and validation to the API and CLI crates.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Strict TOML configuration for the update service: server bind and public
//! origin, artifact storage root, and catalog snapshot path. Invalid
//! configuration fails before anything binds or reads the catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::CatalogConfig;
pub use config::ConfigError;
pub use config::ServerConfig;
pub use config::StorageConfig;
pub use config::UpdateSiteConfig;
