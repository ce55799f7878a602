// monolith-update-core/src/runtime/comparator.rs
// ============================================================================
// Module: Monolith Update Version Comparator
// Description: Total-order comparison of dotted numeric version strings.
// Purpose: Decide strict newness and gate floors for both version lineages.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The comparator parses dotted numeric versions (`"2.10.3"`) into unsigned
//! segments compared left-to-right, with missing trailing segments treated
//! as zero. Malformed input on either side yields
//! [`VersionOrdering::Uncomparable`], which every caller folds into "not
//! greater" so a broken version string can never trigger an update. The
//! functions here are pure and safe to call from any thread.

// ============================================================================
// SECTION: Ordering Outcome
// ============================================================================

/// Tri-state outcome of a version comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOrdering {
    /// Left is strictly greater than right.
    Greater,
    /// Left is less than or numerically equal to right.
    NotGreater,
    /// One side failed to parse; callers treat this as not greater.
    Uncomparable,
}

// ============================================================================
// SECTION: Comparison
// ============================================================================

/// Compares two dotted numeric version strings.
#[must_use]
pub fn compare_versions(left: &str, right: &str) -> VersionOrdering {
    let Some(left_segments) = parse_segments(left) else {
        return VersionOrdering::Uncomparable;
    };
    let Some(right_segments) = parse_segments(right) else {
        return VersionOrdering::Uncomparable;
    };

    let width = left_segments.len().max(right_segments.len());
    for index in 0..width {
        let left_value = left_segments.get(index).copied().unwrap_or(0);
        let right_value = right_segments.get(index).copied().unwrap_or(0);
        if left_value > right_value {
            return VersionOrdering::Greater;
        }
        if left_value < right_value {
            return VersionOrdering::NotGreater;
        }
    }
    VersionOrdering::NotGreater
}

/// Returns true when `candidate` is strictly newer than `current`.
#[must_use]
pub fn is_strictly_newer(candidate: &str, current: &str) -> bool {
    compare_versions(candidate, current) == VersionOrdering::Greater
}

/// Returns true when `version` satisfies the gate floor `floor`.
///
/// Exact string equality passes first, then strict numeric greatness. A
/// version that merely normalizes to the floor's numeric value (`"1.0"`
/// against `"1.0.0"`) passes neither path. The string check also lets an
/// exact match pass when numeric parsing of either side fails.
#[must_use]
pub fn satisfies_floor(version: &str, floor: &str) -> bool {
    version == floor || is_strictly_newer(version, floor)
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses a dotted numeric version into unsigned segments.
///
/// Returns `None` for empty input or any segment that is not an unsigned
/// decimal integer.
fn parse_segments(version: &str) -> Option<Vec<u64>> {
    if version.is_empty() {
        return None;
    }
    version.split('.').map(|segment| segment.parse::<u64>().ok()).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
