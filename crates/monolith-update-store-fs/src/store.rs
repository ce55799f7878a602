// monolith-update-store-fs/src/store.rs
// ============================================================================
// Module: Filesystem Artifact Store
// Description: Content-hashed artifact persistence under a local updates root.
// Purpose: Persist uploaded update files and resolve them back by name.
// Dependencies: monolith-update-core, std::fs
// ============================================================================

//! ## Overview
//! Artifacts live under `{root}/updates/firewall/{version}/{file}` and
//! `{root}/updates/packages/{code_lower}/{version}/{file}`. Saves overwrite
//! same-named files in the same folder and hash the bytes read back from
//! disk, so the recorded digest always matches what is servable. Resolution
//! searches recursively by file name under the namespace root and returns
//! the first enumerated match; a same-named file in two version folders of
//! one namespace is ambiguous by contract. Saves carry a single-writer
//! assumption: admin uploads are operator-serialized and no lock or atomic
//! rename protects concurrent writers of the same path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use monolith_update_core::ArtifactStore;
use monolith_update_core::ArtifactStoreError;
use monolith_update_core::CoreVersion;
use monolith_update_core::PackageCode;
use monolith_update_core::PackageVersion;
use monolith_update_core::StoredArtifact;
use monolith_update_core::sha256_hex;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Directory under the store root holding every artifact namespace.
const UPDATES_DIR: &str = "updates";
/// Namespace directory for firewall core artifacts.
const FIREWALL_DIR: &str = "firewall";
/// Namespace directory for package artifacts.
const PACKAGES_DIR: &str = "packages";
/// Maximum length of a single path segment.
const MAX_SEGMENT_LENGTH: usize = 255;

// ============================================================================
// SECTION: Setup Errors
// ============================================================================

/// Errors raised while preparing the store root directories.
#[derive(Debug, Error)]
pub enum FsStoreSetupError {
    /// The store root could not be created.
    #[error("artifact store setup failed for {path}: {message}")]
    RootUnavailable {
        /// Root path that failed.
        path: String,
        /// Underlying failure description.
        message: String,
    },
}

// ============================================================================
// SECTION: Filesystem Store
// ============================================================================

/// Filesystem-backed artifact store for both update namespaces.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    /// Root folder for firewall artifacts.
    firewall_root: PathBuf,
    /// Root folder for package artifacts.
    packages_root: PathBuf,
}

impl FsArtifactStore {
    /// Creates a store rooted at `root`, creating both namespace roots.
    ///
    /// # Errors
    ///
    /// Returns [`FsStoreSetupError`] when a namespace root cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, FsStoreSetupError> {
        let root = root.into();
        let firewall_root = root.join(UPDATES_DIR).join(FIREWALL_DIR);
        let packages_root = root.join(UPDATES_DIR).join(PACKAGES_DIR);
        create_root(&firewall_root)?;
        create_root(&packages_root)?;
        Ok(Self {
            firewall_root,
            packages_root,
        })
    }

    /// Returns the firewall namespace root.
    #[must_use]
    pub fn firewall_root(&self) -> &Path {
        &self.firewall_root
    }

    /// Returns the packages namespace root.
    #[must_use]
    pub fn packages_root(&self) -> &Path {
        &self.packages_root
    }

    /// Writes bytes into a version folder and hashes the readback.
    fn save_into(
        folder: PathBuf,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredArtifact, ArtifactStoreError> {
        fs::create_dir_all(&folder)
            .map_err(|err| ArtifactStoreError::Io(format!("create {}: {err}", folder.display())))?;
        let path = folder.join(file_name);
        fs::write(&path, bytes)
            .map_err(|err| ArtifactStoreError::Io(format!("write {}: {err}", path.display())))?;
        let written = fs::read(&path)
            .map_err(|err| ArtifactStoreError::Io(format!("readback {}: {err}", path.display())))?;
        Ok(StoredArtifact {
            file_name: file_name.to_string(),
            file_size: written.len() as u64,
            file_hash: sha256_hex(&written),
        })
    }
}

impl ArtifactStore for FsArtifactStore {
    fn save_firewall_artifact(
        &self,
        version: &CoreVersion,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredArtifact, ArtifactStoreError> {
        validate_segment(version.as_str())?;
        validate_segment(file_name)?;
        Self::save_into(self.firewall_root.join(version.as_str()), file_name, bytes)
    }

    fn save_package_artifact(
        &self,
        code: &PackageCode,
        version: &PackageVersion,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredArtifact, ArtifactStoreError> {
        let folder_name = code.folder_name();
        validate_segment(&folder_name)?;
        validate_segment(version.as_str())?;
        validate_segment(file_name)?;
        let folder = self.packages_root.join(folder_name).join(version.as_str());
        Self::save_into(folder, file_name, bytes)
    }

    fn resolve_firewall_artifact(&self, file_name: &str) -> Option<PathBuf> {
        if validate_segment(file_name).is_err() {
            return None;
        }
        find_by_name(&self.firewall_root, file_name)
    }

    fn resolve_package_artifact(&self, code: &PackageCode, file_name: &str) -> Option<PathBuf> {
        let folder_name = code.folder_name();
        if validate_segment(&folder_name).is_err() || validate_segment(file_name).is_err() {
            return None;
        }
        let folder = self.packages_root.join(folder_name);
        if !folder.is_dir() {
            return None;
        }
        find_by_name(&folder, file_name)
    }

    fn delete_firewall_artifact(&self, file_name: &str) -> bool {
        self.resolve_firewall_artifact(file_name)
            .is_some_and(|path| fs::remove_file(path).is_ok())
    }

    fn delete_package_artifact(&self, code: &PackageCode, file_name: &str) -> bool {
        self.resolve_package_artifact(code, file_name)
            .is_some_and(|path| fs::remove_file(path).is_ok())
    }
}

// ============================================================================
// SECTION: Path Helpers
// ============================================================================

/// Creates one namespace root directory.
fn create_root(path: &Path) -> Result<(), FsStoreSetupError> {
    fs::create_dir_all(path).map_err(|err| FsStoreSetupError::RootUnavailable {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// Validates a single path segment before it touches the filesystem.
///
/// Rejects empty and over-long segments, separators, traversal components,
/// and NUL bytes.
fn validate_segment(segment: &str) -> Result<(), ArtifactStoreError> {
    if segment.is_empty() || segment.len() > MAX_SEGMENT_LENGTH {
        return Err(ArtifactStoreError::InvalidSegment(segment.to_string()));
    }
    if segment == "." || segment == ".." {
        return Err(ArtifactStoreError::InvalidSegment(segment.to_string()));
    }
    if segment.contains(['/', '\\', '\u{0}']) {
        return Err(ArtifactStoreError::InvalidSegment(segment.to_string()));
    }
    Ok(())
}

/// Recursively searches a namespace root for a file with the given name.
///
/// Returns the first match in directory enumeration order; enumeration
/// failures read as not found.
fn find_by_name(root: &Path, file_name: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(root).ok()?;
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if entry.file_name().to_str() == Some(file_name) {
            return Some(path);
        }
    }
    for subdir in subdirs {
        if let Some(found) = find_by_name(&subdir, file_name) {
            return Some(found);
        }
    }
    None
}
