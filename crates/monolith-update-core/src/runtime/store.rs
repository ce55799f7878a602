// monolith-update-core/src/runtime/store.rs
// ============================================================================
// Module: Monolith Update In-Memory Catalog
// Description: In-memory catalog reader over a deserialized snapshot.
// Purpose: Provide a deterministic catalog implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides an in-memory [`CatalogReader`] over a
//! [`CatalogSnapshot`]. Id references are joined into views at read time; a
//! dangling reference drops the gate rather than failing the request, and a
//! firewall artifact whose target version is missing is dropped entirely.
//! Rows keep snapshot storage order so selection tie-breaks stay stable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::CatalogSnapshot;
use crate::core::CoreVersion;
use crate::core::FirewallArtifactView;
use crate::core::PackageArtifactView;
use crate::core::PackageCode;
use crate::core::PackageRecord;
use crate::core::PackageView;
use crate::core::RecordId;
use crate::core::VersionRecord;
use crate::interfaces::CatalogError;
use crate::interfaces::CatalogReader;

// ============================================================================
// SECTION: In-Memory Catalog
// ============================================================================

/// In-memory catalog reader backed by a snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    /// The deserialized catalog tables.
    snapshot: CatalogSnapshot,
}

impl InMemoryCatalog {
    /// Creates a catalog reader over a snapshot.
    #[must_use]
    pub const fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot,
        }
    }

    /// Returns the underlying snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    /// Looks up a firewall version record by id.
    fn version_record(&self, id: RecordId) -> Option<&VersionRecord> {
        self.snapshot.firewall_versions.iter().find(|record| record.id == id)
    }

    /// Joins one package record with its artifacts.
    fn join_package(&self, record: &PackageRecord) -> PackageView {
        let artifacts = self
            .snapshot
            .package_artifacts
            .iter()
            .filter(|artifact| artifact.package_id == record.id)
            .map(|artifact| PackageArtifactView {
                artifact: artifact.clone(),
                required_core: artifact
                    .required_firewall_version_id
                    .and_then(|id| self.version_record(id))
                    .cloned(),
            })
            .collect();
        PackageView {
            record: record.clone(),
            artifacts,
        }
    }
}

impl CatalogReader for InMemoryCatalog {
    fn firewall_artifacts(&self) -> Result<Vec<FirewallArtifactView>, CatalogError> {
        let views = self
            .snapshot
            .firewall_artifacts
            .iter()
            .filter_map(|artifact| {
                let target = self.version_record(artifact.firewall_version_id)?.clone();
                Some(FirewallArtifactView {
                    artifact: artifact.clone(),
                    target,
                    minimum: artifact
                        .minimum_firewall_version_id
                        .and_then(|id| self.version_record(id))
                        .cloned(),
                })
            })
            .collect();
        Ok(views)
    }

    fn firewall_version(
        &self,
        version: &CoreVersion,
    ) -> Result<Option<VersionRecord>, CatalogError> {
        Ok(self
            .snapshot
            .firewall_versions
            .iter()
            .find(|record| record.version == *version)
            .cloned())
    }

    fn package_by_code(&self, code: &PackageCode) -> Result<Option<PackageView>, CatalogError> {
        let package = self
            .snapshot
            .packages
            .iter()
            .find(|record| record.package_code == *code)
            .map(|record| self.join_package(record));
        Ok(package)
    }

    fn packages(&self) -> Result<Vec<PackageView>, CatalogError> {
        Ok(self.snapshot.packages.iter().map(|record| self.join_package(record)).collect())
    }
}
