// monolith-update-core/src/core/identifiers.rs
// ============================================================================
// Module: Monolith Update Identifiers
// Description: Canonical identifiers for catalog records and version lineages.
// Purpose: Provide strongly typed, serializable keys with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the identifiers used throughout the update engine.
//! The firewall core and each package carry independent version lineages;
//! [`CoreVersion`] and [`PackageVersion`] are deliberately distinct types so
//! the two lineages can only meet through explicit gate fields. Version
//! strings are opaque here; ordering lives in the comparator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Record Identifier
// ============================================================================

/// Catalog record identifier mirroring the admin database key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Creates a new record identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Version Lineages
// ============================================================================

/// Firewall core version string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoreVersion(String);

impl CoreVersion {
    /// Creates a new firewall core version.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Returns the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CoreVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CoreVersion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CoreVersion {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Package version string, unique only within its owning package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageVersion(String);

impl PackageVersion {
    /// Creates a new package version.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Returns the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PackageVersion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PackageVersion {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Package Code
// ============================================================================

/// Unique package code identifying a dependent package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageCode(String);

impl PackageCode {
    /// Creates a new package code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lowercased folder name used by the artifact store layout.
    #[must_use]
    pub fn folder_name(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for PackageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PackageCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PackageCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
