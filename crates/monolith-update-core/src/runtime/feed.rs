// monolith-update-core/src/runtime/feed.rs
// ============================================================================
// Module: Monolith Update Feed Generator
// Description: Client-facing catalog projections for unauthenticated discovery.
// Purpose: Build the package feed and the simplified availability list.
// Dependencies: crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! The feed projects the catalog into one entry per active package with an
//! active artifact, filtered by an optional firewall-version compatibility
//! parameter. The feed boundary is deliberately tolerant: a row with a blank
//! package code or artifact version is skipped rather than failing the whole
//! response, and a package whose category column has not been migrated yet
//! reads as the default category. Identical catalog input always yields
//! identical output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::CoreVersion;
use crate::core::PackageArtifactView;
use crate::core::PackageView;
use crate::core::Timestamp;
use crate::interfaces::CatalogError;
use crate::interfaces::CatalogReader;
use crate::runtime::comparator::satisfies_floor;
use crate::runtime::resolver::DownloadOrigin;
use crate::runtime::resolver::select_latest_package;

// ============================================================================
// SECTION: Feed Types
// ============================================================================

/// One feed entry describing the latest artifact of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    /// Package code used as the feed identifier.
    pub id: String,
    /// Package display name.
    pub name: String,
    /// Latest artifact version.
    pub version: String,
    /// Package description.
    pub description: String,
    /// Package category label.
    pub category: String,
    /// Download URL of the latest artifact.
    pub download_url: String,
    /// SHA-256 of the latest artifact; `null` when the catalog row is blank.
    pub sha256: Option<String>,
    /// Release notes; `null` when the catalog row is blank.
    pub release_notes: Option<String>,
    /// Required firewall version, when the artifact declares one.
    pub min_core_version: Option<String>,
    /// Whether applying the update requires a restart; always false today.
    pub requires_restart: bool,
}

/// Full package feed response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFeed {
    /// Feed entries for every surviving package.
    pub packages: Vec<FeedEntry>,
}

/// One simplified listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    /// Package code.
    pub package_code: String,
    /// Package display name.
    pub package_name: String,
    /// Package description.
    pub description: String,
    /// Latest artifact version.
    pub latest_version: String,
    /// Release date of the latest artifact.
    pub release_date: Timestamp,
}

/// Simplified package listing response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageListResponse {
    /// Listing entries for every surviving package.
    pub packages: Vec<PackageInfo>,
}

// ============================================================================
// SECTION: Feed Generation
// ============================================================================

/// Builds the full package feed, optionally filtered by firewall version.
///
/// # Errors
///
/// Returns [`CatalogError`] when the catalog cannot be read.
pub fn generate_feed(
    catalog: &dyn CatalogReader,
    firewall: Option<&CoreVersion>,
    origin: &DownloadOrigin,
) -> Result<PackageFeed, CatalogError> {
    let mut entries = Vec::new();
    for package in catalog.packages()? {
        let Some(latest) = surviving_latest(&package, firewall) else {
            continue;
        };
        entries.push(FeedEntry {
            id: package.record.package_code.to_string(),
            name: package.record.package_name.clone(),
            version: latest.artifact.version.to_string(),
            description: package.record.description.clone(),
            category: package.record.category_label().to_string(),
            download_url: origin
                .package_download_url(&package.record.package_code, &latest.artifact.version),
            sha256: non_blank(&latest.artifact.file_hash),
            release_notes: non_blank(&latest.artifact.release_notes),
            min_core_version: latest
                .required_core
                .as_ref()
                .map(|required| required.version.to_string()),
            requires_restart: false,
        });
    }
    Ok(PackageFeed {
        packages: entries,
    })
}

/// Builds the simplified availability listing.
///
/// # Errors
///
/// Returns [`CatalogError`] when the catalog cannot be read.
pub fn list_available_packages(
    catalog: &dyn CatalogReader,
    firewall: Option<&CoreVersion>,
) -> Result<PackageListResponse, CatalogError> {
    let mut entries = Vec::new();
    for package in catalog.packages()? {
        let Some(latest) = surviving_latest(&package, firewall) else {
            continue;
        };
        entries.push(PackageInfo {
            package_code: package.record.package_code.to_string(),
            package_name: package.record.package_name.clone(),
            description: package.record.description.clone(),
            latest_version: latest.artifact.version.to_string(),
            release_date: latest.artifact.release_date,
        });
    }
    Ok(PackageListResponse {
        packages: entries,
    })
}

// ============================================================================
// SECTION: Row Selection
// ============================================================================

/// Selects the package's latest artifact if the row survives all filters.
///
/// Skips inactive packages, rows with a blank code or version, packages with
/// no active artifact, and entries whose required-firewall gate fails when a
/// firewall version filter is supplied.
fn surviving_latest<'a>(
    package: &'a PackageView,
    firewall: Option<&CoreVersion>,
) -> Option<&'a PackageArtifactView> {
    if !package.record.is_active {
        return None;
    }
    if package.record.package_code.as_str().trim().is_empty() {
        return None;
    }
    let latest = select_latest_package(&package.artifacts)?;
    if latest.artifact.version.as_str().trim().is_empty() {
        return None;
    }
    if let Some(firewall) = firewall
        && let Some(required) = &latest.required_core
        && !satisfies_floor(firewall.as_str(), required.version.as_str())
    {
        return None;
    }
    Some(latest)
}

/// Maps a blank catalog string to `None`.
fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value.to_string()) }
}
