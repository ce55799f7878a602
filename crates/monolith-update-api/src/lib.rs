// monolith-update-api/src/lib.rs
// ============================================================================
// Module: Monolith Update API Library
// Description: HTTP surface for the update distribution service.
// Purpose: Expose the API server, error taxonomy, and catalog source.
// Dependencies: axum, monolith-update-core, monolith-update-store-fs
// ============================================================================

//! ## Overview
//! This crate serves the six client-facing endpoints of the update service:
//! firewall and package update checks, the package feed and listing, and
//! binary artifact downloads. Requests are unauthenticated by contract; the
//! admin surface that writes the catalog and uploads artifacts lives behind
//! an external access-control layer.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod access_log;
pub mod catalog_source;
pub mod error;
pub mod origin;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use access_log::AccessSink;
pub use access_log::ApiRoute;
pub use access_log::RequestOutcome;
pub use access_log::StderrAccessSink;
pub use catalog_source::CatalogSourceError;
pub use catalog_source::load_catalog;
pub use error::ApiError;
pub use origin::request_origin;
pub use server::ApiServer;
pub use server::ApiServerError;
pub use server::AppState;
pub use server::router;
