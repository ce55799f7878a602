// monolith-update-core/tests/common/mod.rs
// ============================================================================
// Module: Catalog Test Fixtures
// Description: Shared builders for catalog records used across test files.
// Purpose: Keep resolver and feed tests focused on behavior, not setup.
// ============================================================================

//! Shared catalog fixtures for integration tests.

#![allow(dead_code, reason = "Each test file uses a subset of the fixtures.")]

use monolith_update_core::CatalogSnapshot;
use monolith_update_core::FirewallArtifact;
use monolith_update_core::InMemoryCatalog;
use monolith_update_core::PackageArtifact;
use monolith_update_core::PackageRecord;
use monolith_update_core::RecordId;
use monolith_update_core::Timestamp;
use monolith_update_core::VersionRecord;

/// Builds an active firewall version record.
pub fn version_record(id: i64, version: &str, release_millis: i64) -> VersionRecord {
    VersionRecord {
        id: RecordId::new(id),
        version: version.into(),
        display_name: format!("Monolith FireWall {version}"),
        release_date: Timestamp::from_unix_millis(release_millis),
        is_active: true,
    }
}

/// Builds an active firewall artifact targeting a version record.
pub fn firewall_artifact(id: i64, target_id: i64, release_millis: i64) -> FirewallArtifact {
    FirewallArtifact {
        id: RecordId::new(id),
        firewall_version_id: RecordId::new(target_id),
        release_date: Timestamp::from_unix_millis(release_millis),
        file_name: format!("firewall-update-{id}.bin"),
        file_size: 4096,
        file_hash: "aa".repeat(32),
        release_notes: "Routine maintenance release.".to_string(),
        is_active: true,
        is_critical: false,
        minimum_firewall_version_id: None,
    }
}

/// Builds an active package record.
pub fn package_record(id: i64, code: &str, name: &str) -> PackageRecord {
    PackageRecord {
        id: RecordId::new(id),
        package_code: code.into(),
        package_name: name.to_string(),
        description: format!("{name} component for Monolith FireWall."),
        category: Some("Network".to_string()),
        is_active: true,
    }
}

/// Builds an active package artifact owned by a package record.
pub fn package_artifact(
    id: i64,
    package_id: i64,
    version: &str,
    release_millis: i64,
) -> PackageArtifact {
    PackageArtifact {
        id: RecordId::new(id),
        package_id: RecordId::new(package_id),
        version: version.into(),
        release_date: Timestamp::from_unix_millis(release_millis),
        file_name: format!("package-update-{id}.bin"),
        file_size: 2048,
        file_hash: "bb".repeat(32),
        release_notes: "Component fixes.".to_string(),
        is_active: true,
        is_critical: false,
        minimum_package_version: None,
        required_firewall_version_id: None,
    }
}

/// Wraps catalog tables into an in-memory reader.
pub fn catalog(
    firewall_versions: Vec<VersionRecord>,
    firewall_artifacts: Vec<FirewallArtifact>,
    packages: Vec<PackageRecord>,
    package_artifacts: Vec<PackageArtifact>,
) -> InMemoryCatalog {
    InMemoryCatalog::new(CatalogSnapshot {
        firewall_versions,
        firewall_artifacts,
        packages,
        package_artifacts,
    })
}
