// monolith-update-core/src/runtime/resolver.rs
// ============================================================================
// Module: Monolith Update Compatibility Resolver
// Description: Update-availability decisions and minimum-version gate checks.
// Purpose: Decide per request whether a client is offered an update.
// Dependencies: crate::core, crate::interfaces, crate::runtime::comparator
// ============================================================================

//! ## Overview
//! The resolver is stateless across requests: each call borrows the catalog,
//! selects the latest active artifact for the subject, and applies the gate
//! rules. Latest means maximum release date among active artifacts (for
//! firewall artifacts, the **target version's** release date), with ties
//! keeping the earliest catalog row. Malformed version strings degrade every
//! comparison to "not greater", so compatibility checks fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::CoreVersion;
use crate::core::FirewallArtifactView;
use crate::core::PackageArtifactView;
use crate::core::PackageCode;
use crate::core::PackageRecord;
use crate::core::PackageVersion;
use crate::core::Timestamp;
use crate::core::VersionRecord;
use crate::interfaces::CatalogError;
use crate::interfaces::CatalogReader;
use crate::runtime::comparator::is_strictly_newer;
use crate::runtime::comparator::satisfies_floor;

// ============================================================================
// SECTION: Download Origin
// ============================================================================

/// Scheme and host used to synthesize download URLs for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOrigin {
    /// URL scheme, typically `http` or `https`.
    pub scheme: String,
    /// Host (and optional port) the client reached.
    pub host: String,
}

impl DownloadOrigin {
    /// Creates a download origin from a scheme and host.
    #[must_use]
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Returns the firewall artifact download URL for a target version.
    #[must_use]
    pub fn firewall_download_url(&self, version: &CoreVersion) -> String {
        format!("{}://{}/api/v1/firewall/download/{}", self.scheme, self.host, version)
    }

    /// Returns the package artifact download URL for a package and version.
    #[must_use]
    pub fn package_download_url(&self, code: &PackageCode, version: &PackageVersion) -> String {
        format!("{}://{}/api/v1/packages/download/{}/{}", self.scheme, self.host, code, version)
    }
}

// ============================================================================
// SECTION: Resolutions
// ============================================================================

/// Outcome of a firewall update check before wire formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirewallResolution {
    /// No active firewall artifact exists at all.
    NoUpdate,
    /// The latest artifact's target is not strictly newer than the client.
    UpToDate {
        /// The selected latest artifact.
        latest: FirewallArtifactView,
    },
    /// A newer artifact exists but the client is below its minimum version.
    GateBlocked {
        /// The selected latest artifact.
        latest: FirewallArtifactView,
        /// The gate floor the client failed.
        minimum: VersionRecord,
    },
    /// A newer artifact exists and all gates pass.
    Available {
        /// The selected latest artifact.
        latest: FirewallArtifactView,
    },
}

/// Outcome of a package update check before wire formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageResolution {
    /// No active package carries the requested code.
    PackageNotFound,
    /// The package exists but owns no active artifact.
    NoUpdate {
        /// The matched package record.
        record: PackageRecord,
    },
    /// The latest artifact is not strictly newer than the client.
    UpToDate {
        /// The matched package record.
        record: PackageRecord,
        /// The selected latest artifact.
        latest: PackageArtifactView,
    },
    /// A newer artifact exists but the caller's firewall version fails its gate.
    GateBlocked {
        /// The matched package record.
        record: PackageRecord,
        /// The selected latest artifact.
        latest: PackageArtifactView,
        /// The required firewall version the caller failed.
        required: VersionRecord,
    },
    /// A newer artifact exists and all gates pass.
    Available {
        /// The matched package record.
        record: PackageRecord,
        /// The selected latest artifact.
        latest: PackageArtifactView,
    },
}

// ============================================================================
// SECTION: Latest Selection
// ============================================================================

/// Selects the latest active firewall artifact by target release date.
///
/// Ties keep the earliest catalog row, matching stable descending order.
#[must_use]
pub fn select_latest_firewall(views: Vec<FirewallArtifactView>) -> Option<FirewallArtifactView> {
    let mut best: Option<FirewallArtifactView> = None;
    for view in views {
        if !view.artifact.is_active {
            continue;
        }
        match &best {
            Some(current) if view.target.release_date <= current.target.release_date => {}
            _ => best = Some(view),
        }
    }
    best
}

/// Selects the latest active package artifact by artifact release date.
#[must_use]
pub fn select_latest_package(views: &[PackageArtifactView]) -> Option<&PackageArtifactView> {
    let mut best: Option<&PackageArtifactView> = None;
    for view in views {
        if !view.artifact.is_active {
            continue;
        }
        match best {
            Some(current) if view.artifact.release_date <= current.artifact.release_date => {}
            _ => best = Some(view),
        }
    }
    best
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves a firewall update check against the catalog.
///
/// # Errors
///
/// Returns [`CatalogError`] when the catalog cannot be read.
pub fn resolve_firewall_update(
    catalog: &dyn CatalogReader,
    current: &CoreVersion,
) -> Result<FirewallResolution, CatalogError> {
    let Some(latest) = select_latest_firewall(catalog.firewall_artifacts()?) else {
        return Ok(FirewallResolution::NoUpdate);
    };

    if !is_strictly_newer(latest.target.version.as_str(), current.as_str()) {
        return Ok(FirewallResolution::UpToDate {
            latest,
        });
    }

    if let Some(minimum) = latest.minimum.clone()
        && !satisfies_floor(current.as_str(), minimum.version.as_str())
    {
        return Ok(FirewallResolution::GateBlocked {
            latest,
            minimum,
        });
    }

    Ok(FirewallResolution::Available {
        latest,
    })
}

/// Resolves a package update check against the catalog.
///
/// The cross-lineage gate applies only when the artifact declares a required
/// firewall version and the caller supplied one.
///
/// # Errors
///
/// Returns [`CatalogError`] when the catalog cannot be read.
pub fn resolve_package_update(
    catalog: &dyn CatalogReader,
    code: &PackageCode,
    current: &PackageVersion,
    firewall: Option<&CoreVersion>,
) -> Result<PackageResolution, CatalogError> {
    let Some(package) = catalog.package_by_code(code)?.filter(|view| view.record.is_active) else {
        return Ok(PackageResolution::PackageNotFound);
    };

    let Some(latest) = select_latest_package(&package.artifacts).cloned() else {
        return Ok(PackageResolution::NoUpdate {
            record: package.record,
        });
    };

    if !is_strictly_newer(latest.artifact.version.as_str(), current.as_str()) {
        return Ok(PackageResolution::UpToDate {
            record: package.record,
            latest,
        });
    }

    if let Some(required) = latest.required_core.clone()
        && let Some(firewall) = firewall
        && !satisfies_floor(firewall.as_str(), required.version.as_str())
    {
        return Ok(PackageResolution::GateBlocked {
            record: package.record,
            latest,
            required,
        });
    }

    Ok(PackageResolution::Available {
        record: package.record,
        latest,
    })
}

// ============================================================================
// SECTION: Download Lookups
// ============================================================================

/// Outcome of resolving a firewall download target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirewallDownloadLookup {
    /// No version record carries the requested version string.
    VersionNotFound,
    /// The version exists but has no active artifact.
    ArtifactNotFound {
        /// The matched version record.
        version: VersionRecord,
    },
    /// An active artifact is registered against the version.
    Found {
        /// The matched artifact view.
        view: FirewallArtifactView,
    },
}

/// Outcome of resolving a package download target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageDownloadLookup {
    /// No package carries the requested code.
    PackageNotFound,
    /// The package exists but has no active artifact at that version.
    ArtifactNotFound {
        /// The matched package record.
        record: PackageRecord,
    },
    /// An active artifact matches the code and version exactly.
    Found {
        /// The matched package record.
        record: PackageRecord,
        /// The matched artifact view.
        view: PackageArtifactView,
    },
}

/// Resolves the download target for an exact firewall version string.
///
/// The version record is matched by exact string, active or not; the
/// artifact itself must be active.
///
/// # Errors
///
/// Returns [`CatalogError`] when the catalog cannot be read.
pub fn lookup_firewall_download(
    catalog: &dyn CatalogReader,
    version: &CoreVersion,
) -> Result<FirewallDownloadLookup, CatalogError> {
    let Some(record) = catalog.firewall_version(version)? else {
        return Ok(FirewallDownloadLookup::VersionNotFound);
    };
    let views = catalog.firewall_artifacts()?;
    let found = views
        .into_iter()
        .find(|view| view.artifact.firewall_version_id == record.id && view.artifact.is_active);
    Ok(found.map_or(
        FirewallDownloadLookup::ArtifactNotFound {
            version: record,
        },
        |view| FirewallDownloadLookup::Found {
            view,
        },
    ))
}

/// Resolves the download target for an exact package code and version.
///
/// The package is matched by code without an active filter; the artifact
/// must be active and version-exact.
///
/// # Errors
///
/// Returns [`CatalogError`] when the catalog cannot be read.
pub fn lookup_package_download(
    catalog: &dyn CatalogReader,
    code: &PackageCode,
    version: &PackageVersion,
) -> Result<PackageDownloadLookup, CatalogError> {
    let Some(package) = catalog.package_by_code(code)? else {
        return Ok(PackageDownloadLookup::PackageNotFound);
    };
    let found = package
        .artifacts
        .into_iter()
        .find(|view| view.artifact.version == *version && view.artifact.is_active);
    Ok(found.map_or(
        PackageDownloadLookup::ArtifactNotFound {
            record: package.record.clone(),
        },
        |view| PackageDownloadLookup::Found {
            record: package.record,
            view,
        },
    ))
}

// ============================================================================
// SECTION: Wire Responses
// ============================================================================

/// Firewall update check response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallUpdateResponse {
    /// Whether an update is offered.
    pub update_available: bool,
    /// Latest known version, when one exists.
    pub latest_version: Option<String>,
    /// Version the client reported.
    pub current_version: String,
    /// Release date of the offered artifact.
    pub release_date: Option<Timestamp>,
    /// Download URL of the offered artifact.
    pub download_url: Option<String>,
    /// Size in bytes of the offered artifact.
    pub file_size: Option<u64>,
    /// SHA-256 of the offered artifact.
    pub file_hash: Option<String>,
    /// Whether the offered artifact is critical.
    pub is_critical: bool,
    /// Release notes of the offered artifact.
    pub release_notes: Option<String>,
    /// Minimum version the client must run before updating.
    pub minimum_current_version: Option<String>,
    /// Human-readable outcome message.
    pub message: String,
}

impl FirewallUpdateResponse {
    /// Builds an unavailable response with a message.
    fn unavailable(current: &CoreVersion, latest: Option<String>, message: &str) -> Self {
        Self {
            update_available: false,
            latest_version: latest,
            current_version: current.to_string(),
            release_date: None,
            download_url: None,
            file_size: None,
            file_hash: None,
            is_critical: false,
            release_notes: None,
            minimum_current_version: None,
            message: message.to_string(),
        }
    }
}

/// Package update check response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageUpdateResponse {
    /// Whether an update is offered.
    pub update_available: bool,
    /// Package code the client asked about.
    pub package_code: String,
    /// Package display name, or `Unknown` for missing packages.
    pub package_name: String,
    /// Latest known version, when one exists.
    pub latest_version: Option<String>,
    /// Version the client reported.
    pub current_version: String,
    /// Release date of the offered artifact.
    pub release_date: Option<Timestamp>,
    /// Download URL of the offered artifact.
    pub download_url: Option<String>,
    /// Size in bytes of the offered artifact.
    pub file_size: Option<u64>,
    /// SHA-256 of the offered artifact.
    pub file_hash: Option<String>,
    /// Whether the offered artifact is critical.
    pub is_critical: bool,
    /// Release notes of the offered artifact.
    pub release_notes: Option<String>,
    /// Firewall version the caller must satisfy before updating.
    pub required_firewall_version: Option<String>,
    /// Human-readable outcome message.
    pub message: String,
}

impl PackageUpdateResponse {
    /// Builds an unavailable response with a message.
    fn unavailable(
        code: &PackageCode,
        name: &str,
        current: &PackageVersion,
        latest: Option<String>,
        message: &str,
    ) -> Self {
        Self {
            update_available: false,
            package_code: code.to_string(),
            package_name: name.to_string(),
            latest_version: latest,
            current_version: current.to_string(),
            release_date: None,
            download_url: None,
            file_size: None,
            file_hash: None,
            is_critical: false,
            release_notes: None,
            required_firewall_version: None,
            message: message.to_string(),
        }
    }
}

/// Message returned when the offered artifact is critical.
const MSG_CRITICAL: &str = "Critical update available!";
/// Message returned when the offered artifact is not critical.
const MSG_AVAILABLE: &str = "New update available.";
/// Message returned when the client already runs the latest version.
const MSG_UP_TO_DATE: &str = "You are running the latest version.";

/// Runs a firewall update check and formats the wire response.
///
/// # Errors
///
/// Returns [`CatalogError`] when the catalog cannot be read.
pub fn check_firewall_update(
    catalog: &dyn CatalogReader,
    current: &CoreVersion,
    origin: &DownloadOrigin,
) -> Result<FirewallUpdateResponse, CatalogError> {
    let resolution = resolve_firewall_update(catalog, current)?;
    Ok(match resolution {
        FirewallResolution::NoUpdate => FirewallUpdateResponse::unavailable(
            current,
            None,
            "No updates available at this time.",
        ),
        FirewallResolution::UpToDate {
            latest,
        } => FirewallUpdateResponse::unavailable(
            current,
            Some(latest.target.version.to_string()),
            MSG_UP_TO_DATE,
        ),
        FirewallResolution::GateBlocked {
            latest,
            minimum,
        } => FirewallUpdateResponse::unavailable(
            current,
            Some(latest.target.version.to_string()),
            &format!("Update requires minimum version {}.", minimum.version),
        ),
        FirewallResolution::Available {
            latest,
        } => FirewallUpdateResponse {
            update_available: true,
            latest_version: Some(latest.target.version.to_string()),
            current_version: current.to_string(),
            release_date: Some(latest.artifact.release_date),
            download_url: Some(origin.firewall_download_url(&latest.target.version)),
            file_size: Some(latest.artifact.file_size),
            file_hash: Some(latest.artifact.file_hash.clone()),
            is_critical: latest.artifact.is_critical,
            release_notes: Some(latest.artifact.release_notes.clone()),
            minimum_current_version: latest.minimum.map(|minimum| minimum.version.to_string()),
            message: if latest.artifact.is_critical {
                MSG_CRITICAL.to_string()
            } else {
                MSG_AVAILABLE.to_string()
            },
        },
    })
}

/// Runs a package update check and formats the wire response.
///
/// # Errors
///
/// Returns [`CatalogError`] when the catalog cannot be read.
pub fn check_package_update(
    catalog: &dyn CatalogReader,
    code: &PackageCode,
    current: &PackageVersion,
    firewall: Option<&CoreVersion>,
    origin: &DownloadOrigin,
) -> Result<PackageUpdateResponse, CatalogError> {
    let resolution = resolve_package_update(catalog, code, current, firewall)?;
    Ok(match resolution {
        PackageResolution::PackageNotFound => PackageUpdateResponse::unavailable(
            code,
            "Unknown",
            current,
            None,
            "Package not found.",
        ),
        PackageResolution::NoUpdate {
            record,
        } => PackageUpdateResponse::unavailable(
            code,
            &record.package_name,
            current,
            None,
            "No updates available for this package.",
        ),
        PackageResolution::UpToDate {
            record,
            latest,
        } => PackageUpdateResponse::unavailable(
            code,
            &record.package_name,
            current,
            Some(latest.artifact.version.to_string()),
            MSG_UP_TO_DATE,
        ),
        PackageResolution::GateBlocked {
            record,
            latest,
            required,
        } => PackageUpdateResponse::unavailable(
            code,
            &record.package_name,
            current,
            Some(latest.artifact.version.to_string()),
            &format!("Update requires firewall version {} or higher.", required.version),
        ),
        PackageResolution::Available {
            record,
            latest,
        } => PackageUpdateResponse {
            update_available: true,
            package_code: code.to_string(),
            package_name: record.package_name,
            latest_version: Some(latest.artifact.version.to_string()),
            current_version: current.to_string(),
            release_date: Some(latest.artifact.release_date),
            download_url: Some(origin.package_download_url(code, &latest.artifact.version)),
            file_size: Some(latest.artifact.file_size),
            file_hash: Some(latest.artifact.file_hash.clone()),
            is_critical: latest.artifact.is_critical,
            release_notes: Some(latest.artifact.release_notes.clone()),
            required_firewall_version: latest
                .required_core
                .map(|required| required.version.to_string()),
            message: if latest.artifact.is_critical {
                MSG_CRITICAL.to_string()
            } else {
                MSG_AVAILABLE.to_string()
            },
        },
    })
}
