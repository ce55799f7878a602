// monolith-update-core/src/core/catalog.rs
// ============================================================================
// Module: Monolith Update Catalog Model
// Description: Catalog record types and joined views consumed by the runtime.
// Purpose: Model the admin-owned update catalog the engine reads per request.
// Dependencies: crate::core::{identifiers, time}, serde
// ============================================================================

//! ## Overview
//! The catalog is owned and mutated by the admin collaborator; the engine
//! borrows read access per request and never writes it. Gate fields are
//! optional record references; absence means "no gate", not a gate of zero.
//! A [`CatalogSnapshot`] is the serialized form of the four record tables;
//! the view types join record references for the resolver and feed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::CoreVersion;
use crate::core::identifiers::PackageCode;
use crate::core::identifiers::PackageVersion;
use crate::core::identifiers::RecordId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Record Types
// ============================================================================

/// Firewall core release registered by the admin collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Record identifier.
    pub id: RecordId,
    /// Unique firewall core version string.
    pub version: CoreVersion,
    /// Human-readable release name.
    pub display_name: String,
    /// Release date of the version itself.
    pub release_date: Timestamp,
    /// Whether the version is visible to clients.
    pub is_active: bool,
}

/// Downloadable firewall artifact upgrading clients to one target version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallArtifact {
    /// Record identifier.
    pub id: RecordId,
    /// Target version this artifact upgrades to.
    pub firewall_version_id: RecordId,
    /// Release date of the artifact.
    pub release_date: Timestamp,
    /// Stored file name.
    pub file_name: String,
    /// File size in bytes.
    pub file_size: u64,
    /// Lowercase hex SHA-256 of the stored file.
    pub file_hash: String,
    /// Operator-authored release notes.
    pub release_notes: String,
    /// Whether the artifact is offered to clients.
    pub is_active: bool,
    /// Whether the artifact is flagged critical.
    pub is_critical: bool,
    /// Lowest version the artifact may be applied from, when gated.
    pub minimum_firewall_version_id: Option<RecordId>,
}

/// Dependent package registered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Record identifier.
    pub id: RecordId,
    /// Unique package code.
    pub package_code: PackageCode,
    /// Human-readable package name.
    pub package_name: String,
    /// Package description shown in feeds.
    pub description: String,
    /// Grouping category; `None` while the column is mid-migration.
    #[serde(default)]
    pub category: Option<String>,
    /// Whether the package is visible to clients.
    pub is_active: bool,
}

impl PackageRecord {
    /// Default category label applied when the column is absent or blank.
    pub const DEFAULT_CATEGORY: &str = "Other";

    /// Returns the category label, defaulting when absent or blank.
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .filter(|category| !category.trim().is_empty())
            .unwrap_or(Self::DEFAULT_CATEGORY)
    }
}

/// Downloadable package artifact owned by one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageArtifact {
    /// Record identifier.
    pub id: RecordId,
    /// Owning package record.
    pub package_id: RecordId,
    /// Package version, unique only within the owning package.
    pub version: PackageVersion,
    /// Release date of the artifact.
    pub release_date: Timestamp,
    /// Stored file name.
    pub file_name: String,
    /// File size in bytes.
    pub file_size: u64,
    /// Lowercase hex SHA-256 of the stored file.
    pub file_hash: String,
    /// Operator-authored release notes.
    pub release_notes: String,
    /// Whether the artifact is offered to clients.
    pub is_active: bool,
    /// Whether the artifact is flagged critical.
    pub is_critical: bool,
    /// Informational package-lineage floor; never enforced by the resolver.
    #[serde(default)]
    pub minimum_package_version: Option<PackageVersion>,
    /// Cross-lineage gate into the firewall version table, when gated.
    #[serde(default)]
    pub required_firewall_version_id: Option<RecordId>,
}

// ============================================================================
// SECTION: Catalog Snapshot
// ============================================================================

/// Serialized catalog tables produced by the admin collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Firewall core version table.
    #[serde(default)]
    pub firewall_versions: Vec<VersionRecord>,
    /// Firewall artifact table.
    #[serde(default)]
    pub firewall_artifacts: Vec<FirewallArtifact>,
    /// Package table.
    #[serde(default)]
    pub packages: Vec<PackageRecord>,
    /// Package artifact table.
    #[serde(default)]
    pub package_artifacts: Vec<PackageArtifact>,
}

// ============================================================================
// SECTION: Joined Views
// ============================================================================

/// Firewall artifact joined with its target and optional minimum version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirewallArtifactView {
    /// The artifact record.
    pub artifact: FirewallArtifact,
    /// The version the artifact upgrades to.
    pub target: VersionRecord,
    /// The gate floor version, when the artifact declares one.
    pub minimum: Option<VersionRecord>,
}

/// Package artifact joined with its optional required firewall version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageArtifactView {
    /// The artifact record.
    pub artifact: PackageArtifact,
    /// The cross-lineage gate target, when the artifact declares one.
    pub required_core: Option<VersionRecord>,
}

/// Package record joined with its artifact collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageView {
    /// The package record.
    pub record: PackageRecord,
    /// Artifacts owned by the package, in catalog storage order.
    pub artifacts: Vec<PackageArtifactView>,
}
