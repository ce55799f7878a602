// monolith-update-core/src/interfaces/mod.rs
// ============================================================================
// Module: Monolith Update Interfaces
// Description: Backend-agnostic interfaces for catalog access and artifact storage.
// Purpose: Define the contract surfaces used by the update runtime.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the update engine integrates with the admin-owned
//! catalog and the artifact filesystem without embedding backend details.
//! Implementations must be deterministic and fail closed on missing or
//! invalid data: a dangling gate reference degrades to "no gate", never to
//! an offered update.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::CoreVersion;
use crate::core::FirewallArtifactView;
use crate::core::PackageCode;
use crate::core::PackageVersion;
use crate::core::PackageView;
use crate::core::VersionRecord;

// ============================================================================
// SECTION: Catalog Reader
// ============================================================================

/// Catalog access errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog backend reported an error.
    #[error("catalog error: {0}")]
    Backend(String),
}

/// Read-only view of the admin-owned update catalog.
///
/// Implementations return rows in catalog storage order; active filtering
/// and latest-artifact selection are runtime concerns, not reader concerns.
pub trait CatalogReader {
    /// Returns every firewall artifact joined with its version references.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog cannot be read.
    fn firewall_artifacts(&self) -> Result<Vec<FirewallArtifactView>, CatalogError>;

    /// Returns the firewall version record with the exact version string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog cannot be read.
    fn firewall_version(&self, version: &CoreVersion)
    -> Result<Option<VersionRecord>, CatalogError>;

    /// Returns the package with the given code, joined with its artifacts.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog cannot be read.
    fn package_by_code(&self, code: &PackageCode) -> Result<Option<PackageView>, CatalogError>;

    /// Returns every package joined with its artifacts.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog cannot be read.
    fn packages(&self) -> Result<Vec<PackageView>, CatalogError>;
}

// ============================================================================
// SECTION: Artifact Store
// ============================================================================

/// Result of persisting an artifact: the values the catalog records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArtifact {
    /// Stored file name.
    pub file_name: String,
    /// Size in bytes of the written file.
    pub file_size: u64,
    /// Lowercase hex SHA-256 of the bytes read back from disk.
    pub file_hash: String,
}

/// Artifact store errors.
#[derive(Debug, Error)]
pub enum ArtifactStoreError {
    /// A path segment failed validation before touching the filesystem.
    #[error("artifact store invalid path segment: {0}")]
    InvalidSegment(String),
    /// Filesystem I/O failed during a save.
    #[error("artifact store io error: {0}")]
    Io(String),
}

/// Content-hashed storage for the two artifact namespaces.
///
/// Saves are the only mutation in the engine and carry a single-writer
/// assumption: admin uploads are operator-serialized, and no lock or atomic
/// rename protects concurrent writers of the same file.
pub trait ArtifactStore {
    /// Saves a firewall artifact under its target version folder.
    ///
    /// Overwrites any same-named file in that folder and hashes the bytes
    /// read back from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactStoreError`] when validation or I/O fails.
    fn save_firewall_artifact(
        &self,
        version: &CoreVersion,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredArtifact, ArtifactStoreError>;

    /// Saves a package artifact under its package and version folders.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactStoreError`] when validation or I/O fails.
    fn save_package_artifact(
        &self,
        code: &PackageCode,
        version: &PackageVersion,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredArtifact, ArtifactStoreError>;

    /// Locates a firewall artifact by file name, searching all version folders.
    ///
    /// Returns the first match in directory enumeration order; same-named
    /// files in different version folders are ambiguous by contract.
    fn resolve_firewall_artifact(&self, file_name: &str) -> Option<PathBuf>;

    /// Locates a package artifact by file name under the package folder.
    fn resolve_package_artifact(&self, code: &PackageCode, file_name: &str) -> Option<PathBuf>;

    /// Removes a firewall artifact by file name; best-effort.
    fn delete_firewall_artifact(&self, file_name: &str) -> bool;

    /// Removes a package artifact by file name; best-effort.
    fn delete_package_artifact(&self, code: &PackageCode, file_name: &str) -> bool;
}
