// monolith-update-core/src/runtime/mod.rs
// ============================================================================
// Module: Monolith Update Runtime
// Description: Comparator, resolver, feed generation, and in-memory catalog.
// Purpose: Group the per-request evaluation logic of the update engine.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Runtime components evaluate one request at a time over a borrowed
//! catalog: version comparison, update resolution with gate checks, and the
//! client-facing feed projections. Nothing here holds mutable state between
//! requests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod comparator;
pub mod feed;
pub mod resolver;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use comparator::VersionOrdering;
pub use comparator::compare_versions;
pub use comparator::is_strictly_newer;
pub use comparator::satisfies_floor;
pub use feed::FeedEntry;
pub use feed::PackageFeed;
pub use feed::PackageInfo;
pub use feed::PackageListResponse;
pub use feed::generate_feed;
pub use feed::list_available_packages;
pub use resolver::DownloadOrigin;
pub use resolver::FirewallDownloadLookup;
pub use resolver::FirewallResolution;
pub use resolver::FirewallUpdateResponse;
pub use resolver::PackageDownloadLookup;
pub use resolver::PackageResolution;
pub use resolver::PackageUpdateResponse;
pub use resolver::check_firewall_update;
pub use resolver::check_package_update;
pub use resolver::lookup_firewall_download;
pub use resolver::lookup_package_download;
pub use resolver::resolve_firewall_update;
pub use resolver::resolve_package_update;
pub use resolver::select_latest_firewall;
pub use resolver::select_latest_package;
pub use store::InMemoryCatalog;
