// monolith-update-core/src/core/time.rs
// ============================================================================
// Module: Monolith Update Time Model
// Description: Canonical timestamp representation for catalog release dates.
// Purpose: Provide deterministic time values supplied by the catalog owner.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Release dates are explicit values recorded by the admin collaborator; the
//! core never reads wall-clock time. Timestamps are unix epoch milliseconds
//! and order exactly as their integer values do, which keeps latest-artifact
//! selection replayable for identical catalog input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Release date in unix epoch milliseconds.
///
/// # Invariants
/// - Values are provided by the catalog; no validation is performed here.
/// - Ordering is the integer ordering of the millisecond value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix epoch milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as unix epoch milliseconds.
    #[must_use]
    pub const fn as_unix_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self::from_unix_millis(value)
    }
}
