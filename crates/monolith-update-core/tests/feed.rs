// monolith-update-core/tests/feed.rs
// ============================================================================
// Module: Feed Generator Tests
// Description: Catalog projection coverage for the feed and listing shapes.
// Purpose: Ensure feed filtering, defaults, and degraded-row tolerance hold.
// Dependencies: monolith-update-core, serde_json
// ============================================================================

//! ## Overview
//! Validates the unauthenticated feed: entry shape, compatibility filtering,
//! blank-field defaults, degraded-row skipping, and idempotence over an
//! unchanged catalog.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use monolith_update_core::CoreVersion;
use monolith_update_core::DownloadOrigin;
use monolith_update_core::RecordId;
use monolith_update_core::generate_feed;
use monolith_update_core::list_available_packages;

use common::catalog;
use common::package_artifact;
use common::package_record;
use common::version_record;

/// Download origin used across tests.
fn origin() -> DownloadOrigin {
    DownloadOrigin::new("https", "updates.example.net")
}

// ============================================================================
// SECTION: Entry Shape
// ============================================================================

/// Verifies the feed entry carries the full projection for a package.
#[test]
fn feed_entry_projects_package_and_latest_artifact() {
    let mut artifact = package_artifact(20, 5, "3.1.0", 3_000);
    artifact.required_firewall_version_id = Some(RecordId::new(2));
    let catalog = catalog(
        vec![version_record(2, "2.0.0", 2_000)],
        vec![],
        vec![package_record(5, "vpn-client", "VPN Client")],
        vec![artifact],
    );

    let feed = generate_feed(&catalog, None, &origin()).unwrap();
    assert_eq!(feed.packages.len(), 1);
    let entry = &feed.packages[0];
    assert_eq!(entry.id, "vpn-client");
    assert_eq!(entry.name, "VPN Client");
    assert_eq!(entry.version, "3.1.0");
    assert_eq!(entry.category, "Network");
    assert_eq!(
        entry.download_url,
        "https://updates.example.net/api/v1/packages/download/vpn-client/3.1.0"
    );
    assert_eq!(entry.sha256.as_deref(), Some("bb".repeat(32).as_str()));
    assert_eq!(entry.min_core_version.as_deref(), Some("2.0.0"));
    assert!(!entry.requires_restart);
}

/// Verifies blank hash and notes become nulls and category falls back.
#[test]
fn feed_entry_defaults_blank_fields() {
    let mut artifact = package_artifact(20, 5, "1.0.1", 1_000);
    artifact.file_hash = String::new();
    artifact.release_notes = "   ".to_string();
    let mut record = package_record(5, "dns-filter", "DNS Filter");
    record.category = None;
    let catalog = catalog(vec![], vec![], vec![record], vec![artifact]);

    let feed = generate_feed(&catalog, None, &origin()).unwrap();
    let entry = &feed.packages[0];
    assert!(entry.sha256.is_none());
    assert!(entry.release_notes.is_none());
    assert_eq!(entry.category, "Other");
}

/// Verifies the wire field names follow the feed contract.
#[test]
fn feed_entry_serializes_with_camel_case_names() {
    let catalog = catalog(
        vec![],
        vec![],
        vec![package_record(5, "dns-filter", "DNS Filter")],
        vec![package_artifact(20, 5, "1.0.1", 1_000)],
    );

    let feed = generate_feed(&catalog, None, &origin()).unwrap();
    let value = serde_json::to_value(&feed).unwrap();
    let entry = &value["packages"][0];
    assert!(entry.get("downloadUrl").is_some());
    assert!(entry.get("releaseNotes").is_some());
    assert!(entry.get("minCoreVersion").is_some());
    assert!(entry.get("requiresRestart").is_some());
}

// ============================================================================
// SECTION: Filtering
// ============================================================================

/// Verifies the compatibility filter drops gated entries and keeps exact matches.
#[test]
fn feed_filters_by_firewall_version_with_exact_match_escape() {
    let mut gated = package_artifact(20, 5, "3.1.0", 3_000);
    gated.required_firewall_version_id = Some(RecordId::new(2));
    let mut open = package_artifact(21, 6, "1.2.0", 1_000);
    open.required_firewall_version_id = None;
    let catalog = catalog(
        vec![version_record(2, "2.0.0", 2_000)],
        vec![],
        vec![
            package_record(5, "vpn-client", "VPN Client"),
            package_record(6, "dns-filter", "DNS Filter"),
        ],
        vec![gated, open],
    );

    let blocked = generate_feed(&catalog, Some(&CoreVersion::from("1.5.0")), &origin()).unwrap();
    assert_eq!(blocked.packages.len(), 1);
    assert_eq!(blocked.packages[0].id, "dns-filter");

    let exact = generate_feed(&catalog, Some(&CoreVersion::from("2.0.0")), &origin()).unwrap();
    assert_eq!(exact.packages.len(), 2);

    let unfiltered = generate_feed(&catalog, None, &origin()).unwrap();
    assert_eq!(unfiltered.packages.len(), 2);
}

/// Verifies packages without an active artifact are omitted entirely.
#[test]
fn feed_omits_package_without_active_artifact() {
    let mut inactive = package_artifact(20, 5, "1.1.0", 1_000);
    inactive.is_active = false;
    let catalog = catalog(
        vec![],
        vec![],
        vec![
            package_record(5, "vpn-client", "VPN Client"),
            package_record(6, "dns-filter", "DNS Filter"),
        ],
        vec![inactive, package_artifact(21, 6, "1.2.0", 1_000)],
    );

    let feed = generate_feed(&catalog, None, &origin()).unwrap();
    assert_eq!(feed.packages.len(), 1);
    assert_eq!(feed.packages[0].id, "dns-filter");
}

// ============================================================================
// SECTION: Degraded Rows
// ============================================================================

/// Verifies malformed rows are skipped instead of failing the feed.
#[test]
fn feed_skips_rows_with_blank_code_or_version() {
    let blank_version = package_artifact(20, 5, "  ", 1_000);
    let mut blank_code = package_record(6, "", "Nameless");
    blank_code.category = None;
    let catalog = catalog(
        vec![],
        vec![],
        vec![
            package_record(5, "vpn-client", "VPN Client"),
            blank_code,
            package_record(7, "dns-filter", "DNS Filter"),
        ],
        vec![blank_version, package_artifact(21, 6, "1.0.0", 1_000), package_artifact(22, 7, "1.2.0", 1_000)],
    );

    let feed = generate_feed(&catalog, None, &origin()).unwrap();
    assert_eq!(feed.packages.len(), 1);
    assert_eq!(feed.packages[0].id, "dns-filter");
}

// ============================================================================
// SECTION: Idempotence
// ============================================================================

/// Verifies two generations over the same catalog are byte-identical.
#[test]
fn feed_is_idempotent_over_unchanged_catalog() {
    let catalog = catalog(
        vec![version_record(2, "2.0.0", 2_000)],
        vec![],
        vec![
            package_record(5, "vpn-client", "VPN Client"),
            package_record(6, "dns-filter", "DNS Filter"),
        ],
        vec![package_artifact(20, 5, "3.1.0", 3_000), package_artifact(21, 6, "1.2.0", 1_000)],
    );

    let first = generate_feed(&catalog, Some(&CoreVersion::from("2.0.0")), &origin()).unwrap();
    let second = generate_feed(&catalog, Some(&CoreVersion::from("2.0.0")), &origin()).unwrap();
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );

    let first_list = list_available_packages(&catalog, None).unwrap();
    let second_list = list_available_packages(&catalog, None).unwrap();
    assert_eq!(first_list, second_list);
}

// ============================================================================
// SECTION: Listing
// ============================================================================

/// Verifies the simplified listing shape and selection rules.
#[test]
fn listing_projects_latest_by_release_date() {
    let catalog = catalog(
        vec![],
        vec![],
        vec![package_record(5, "ids-engine", "IDS Engine")],
        vec![
            package_artifact(20, 5, "4.0.0", 1_000),
            package_artifact(21, 5, "3.9.0", 2_000),
        ],
    );

    let listing = list_available_packages(&catalog, None).unwrap();
    assert_eq!(listing.packages.len(), 1);
    let info = &listing.packages[0];
    assert_eq!(info.package_code, "ids-engine");
    assert_eq!(info.package_name, "IDS Engine");
    assert_eq!(info.latest_version, "3.9.0");
    assert_eq!(info.release_date.as_unix_millis(), 2_000);
}
