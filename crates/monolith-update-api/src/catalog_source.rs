// monolith-update-api/src/catalog_source.rs
// ============================================================================
// Module: Catalog Snapshot Source
// Description: JSON catalog snapshot loading for the serving path.
// Purpose: Materialize the admin-produced catalog into an in-memory reader.
// Dependencies: monolith-update-core, serde_json
// ============================================================================

//! ## Overview
//! The admin collaborator exports the catalog tables as a JSON snapshot;
//! this module reads that file into an [`InMemoryCatalog`] at startup. An
//! unreadable or oversized snapshot is a hard startup failure, never a
//! silently empty catalog.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use monolith_update_core::CatalogSnapshot;
use monolith_update_core::InMemoryCatalog;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum catalog snapshot size in bytes.
const MAX_SNAPSHOT_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog snapshot loading errors.
#[derive(Debug, Error)]
pub enum CatalogSourceError {
    /// The snapshot file could not be read.
    #[error("catalog snapshot read failed for {path}: {message}")]
    Read {
        /// Path that failed to read.
        path: String,
        /// Underlying failure description.
        message: String,
    },
    /// The snapshot file exceeds the size limit.
    #[error("catalog snapshot too large: {actual} bytes (max {max})")]
    TooLarge {
        /// Actual file size in bytes.
        actual: usize,
        /// Maximum allowed size in bytes.
        max: usize,
    },
    /// The snapshot file is not a valid catalog document.
    #[error("catalog snapshot parse failed: {0}")]
    Parse(String),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads a catalog snapshot file into an in-memory reader.
///
/// # Errors
///
/// Returns [`CatalogSourceError`] when reading or parsing fails.
pub fn load_catalog(path: &Path) -> Result<InMemoryCatalog, CatalogSourceError> {
    let bytes = fs::read(path).map_err(|err| CatalogSourceError::Read {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    if bytes.len() > MAX_SNAPSHOT_BYTES {
        return Err(CatalogSourceError::TooLarge {
            actual: bytes.len(),
            max: MAX_SNAPSHOT_BYTES,
        });
    }
    let snapshot: CatalogSnapshot =
        serde_json::from_slice(&bytes).map_err(|err| CatalogSourceError::Parse(err.to_string()))?;
    Ok(InMemoryCatalog::new(snapshot))
}
