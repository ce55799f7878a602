// monolith-update-core/tests/resolver.rs
// ============================================================================
// Module: Compatibility Resolver Tests
// Description: Update-availability and gate coverage for both lineages.
// Purpose: Ensure resolution follows the catalog selection and gate rules.
// Dependencies: monolith-update-core
// ============================================================================

//! ## Overview
//! Validates firewall and package update resolution: latest-by-release-date
//! selection, minimum-version gates, the exact-match escape hatch, and the
//! fail-closed handling of malformed client versions.

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
use monolith_update_core::FirewallResolution;
use monolith_update_core::PackageCode;
use monolith_update_core::PackageResolution;
use monolith_update_core::PackageVersion;
use monolith_update_core::RecordId;
use monolith_update_core::FirewallDownloadLookup;
use monolith_update_core::PackageDownloadLookup;
use monolith_update_core::check_firewall_update;
use monolith_update_core::check_package_update;
use monolith_update_core::is_strictly_newer;
use monolith_update_core::lookup_firewall_download;
use monolith_update_core::lookup_package_download;
use monolith_update_core::resolve_firewall_update;
use monolith_update_core::resolve_package_update;

use common::catalog;
use common::firewall_artifact;
use common::package_artifact;
use common::package_record;
use common::version_record;

/// Download origin used across tests.
fn origin() -> DownloadOrigin {
    DownloadOrigin::new("https", "updates.example.net")
}

// ============================================================================
// SECTION: Firewall Resolution
// ============================================================================

/// Verifies a newer release is offered to an older client.
#[test]
fn firewall_update_available_for_older_client() {
    let catalog = catalog(
        vec![version_record(1, "1.5.0", 1_000), version_record(2, "2.0.0", 2_000)],
        vec![firewall_artifact(10, 1, 1_000), firewall_artifact(11, 2, 2_000)],
        vec![],
        vec![],
    );

    let response =
        check_firewall_update(&catalog, &CoreVersion::from("1.5.0"), &origin()).unwrap();
    assert!(response.update_available);
    assert_eq!(response.latest_version.as_deref(), Some("2.0.0"));
    assert_eq!(response.current_version, "1.5.0");
    assert_eq!(
        response.download_url.as_deref(),
        Some("https://updates.example.net/api/v1/firewall/download/2.0.0")
    );
    assert_eq!(response.message, "New update available.");
}

/// Verifies the minimum-version gate blocks and names the floor.
#[test]
fn firewall_gate_blocks_below_minimum_and_names_it() {
    let mut artifact = firewall_artifact(11, 2, 2_000);
    artifact.minimum_firewall_version_id = Some(RecordId::new(3));
    let catalog = catalog(
        vec![
            version_record(2, "2.0.0", 2_000),
            version_record(3, "1.8.0", 1_500),
        ],
        vec![artifact],
        vec![],
        vec![],
    );

    let response =
        check_firewall_update(&catalog, &CoreVersion::from("1.0.0"), &origin()).unwrap();
    assert!(!response.update_available);
    assert_eq!(response.latest_version.as_deref(), Some("2.0.0"));
    assert_eq!(response.message, "Update requires minimum version 1.8.0.");
    assert!(response.download_url.is_none());
}

/// Verifies a client exactly at the minimum passes the gate.
#[test]
fn firewall_gate_passes_at_exact_minimum() {
    let mut artifact = firewall_artifact(11, 2, 2_000);
    artifact.minimum_firewall_version_id = Some(RecordId::new(3));
    let catalog = catalog(
        vec![
            version_record(2, "2.0.0", 2_000),
            version_record(3, "1.8.0", 1_500),
        ],
        vec![artifact],
        vec![],
        vec![],
    );

    let resolution = resolve_firewall_update(&catalog, &CoreVersion::from("1.8.0")).unwrap();
    assert!(matches!(resolution, FirewallResolution::Available { .. }));
}

/// Verifies selection orders by the target version's release date.
#[test]
fn firewall_latest_follows_target_release_date_not_artifact_date() {
    // The artifact rows carry misleading dates; the 2.0.0 version record is
    // the most recently released target and must win.
    let catalog = catalog(
        vec![version_record(1, "3.0.0", 1_000), version_record(2, "2.0.0", 5_000)],
        vec![firewall_artifact(10, 1, 9_000), firewall_artifact(11, 2, 100)],
        vec![],
        vec![],
    );

    let response =
        check_firewall_update(&catalog, &CoreVersion::from("1.0.0"), &origin()).unwrap();
    assert_eq!(response.latest_version.as_deref(), Some("2.0.0"));
}

/// Verifies an empty catalog reports no updates.
#[test]
fn firewall_no_update_when_catalog_has_no_active_artifact() {
    let mut inactive = firewall_artifact(10, 1, 1_000);
    inactive.is_active = false;
    let catalog = catalog(vec![version_record(1, "2.0.0", 1_000)], vec![inactive], vec![], vec![]);

    let response =
        check_firewall_update(&catalog, &CoreVersion::from("1.0.0"), &origin()).unwrap();
    assert!(!response.update_available);
    assert!(response.latest_version.is_none());
    assert_eq!(response.message, "No updates available at this time.");
}

/// Verifies a malformed client version degrades to up-to-date, never an offer.
#[test]
fn firewall_malformed_client_version_fails_closed() {
    let catalog = catalog(
        vec![version_record(2, "2.0.0", 2_000)],
        vec![firewall_artifact(11, 2, 2_000)],
        vec![],
        vec![],
    );

    let response =
        check_firewall_update(&catalog, &CoreVersion::from("not-a-version"), &origin()).unwrap();
    assert!(!response.update_available);
    assert_eq!(response.message, "You are running the latest version.");
}

/// Verifies availability is monotone: once false, it stays false for newer clients.
#[test]
fn firewall_availability_is_monotone_in_client_version() {
    let catalog = catalog(
        vec![version_record(2, "2.0.0", 2_000)],
        vec![firewall_artifact(11, 2, 2_000)],
        vec![],
        vec![],
    );

    let clients = ["1.0.0", "1.9.9", "2.0.0", "2.0.1", "3.0.0"];
    let mut seen_unavailable_at: Option<&str> = None;
    for client in clients {
        let resolution = resolve_firewall_update(&catalog, &CoreVersion::from(client)).unwrap();
        let available = matches!(resolution, FirewallResolution::Available { .. });
        if let Some(earlier) = seen_unavailable_at {
            assert!(
                !(available && is_strictly_newer(client, earlier)),
                "availability regressed at {client}"
            );
        }
        if !available {
            seen_unavailable_at = Some(client);
        }
    }
}

// ============================================================================
// SECTION: Package Resolution
// ============================================================================

/// Verifies the exact-match escape hatch around the numeric firewall gate.
#[test]
fn package_gate_exact_match_bypasses_numeric_path() {
    let mut artifact = package_artifact(20, 5, "3.1.0", 3_000);
    artifact.required_firewall_version_id = Some(RecordId::new(2));
    let catalog = catalog(
        vec![version_record(2, "2.0.0", 2_000)],
        vec![],
        vec![package_record(5, "vpn-client", "VPN Client")],
        vec![artifact],
    );

    let response = check_package_update(
        &catalog,
        &PackageCode::from("vpn-client"),
        &PackageVersion::from("3.0.0"),
        Some(&CoreVersion::from("2.0.0")),
        &origin(),
    )
    .unwrap();
    assert!(response.update_available);
    assert_eq!(response.latest_version.as_deref(), Some("3.1.0"));
    assert_eq!(response.required_firewall_version.as_deref(), Some("2.0.0"));
    assert_eq!(
        response.download_url.as_deref(),
        Some("https://updates.example.net/api/v1/packages/download/vpn-client/3.1.0")
    );
}

/// Verifies the firewall gate blocks a caller below the requirement.
#[test]
fn package_gate_blocks_below_required_firewall_version() {
    let mut artifact = package_artifact(20, 5, "3.1.0", 3_000);
    artifact.required_firewall_version_id = Some(RecordId::new(2));
    let catalog = catalog(
        vec![version_record(2, "2.0.0", 2_000)],
        vec![],
        vec![package_record(5, "vpn-client", "VPN Client")],
        vec![artifact],
    );

    let response = check_package_update(
        &catalog,
        &PackageCode::from("vpn-client"),
        &PackageVersion::from("3.0.0"),
        Some(&CoreVersion::from("1.9.0")),
        &origin(),
    )
    .unwrap();
    assert!(!response.update_available);
    assert_eq!(response.message, "Update requires firewall version 2.0.0 or higher.");
}

/// Verifies the gate is skipped when the caller omits a firewall version.
#[test]
fn package_gate_skipped_without_caller_firewall_version() {
    let mut artifact = package_artifact(20, 5, "3.1.0", 3_000);
    artifact.required_firewall_version_id = Some(RecordId::new(2));
    let catalog = catalog(
        vec![version_record(2, "2.0.0", 2_000)],
        vec![],
        vec![package_record(5, "vpn-client", "VPN Client")],
        vec![artifact],
    );

    let resolution = resolve_package_update(
        &catalog,
        &PackageCode::from("vpn-client"),
        &PackageVersion::from("3.0.0"),
        None,
    )
    .unwrap();
    assert!(matches!(resolution, PackageResolution::Available { .. }));
}

/// Verifies a dangling gate reference degrades to no gate at all.
#[test]
fn package_dangling_gate_reference_means_no_gate() {
    let mut artifact = package_artifact(20, 5, "3.1.0", 3_000);
    artifact.required_firewall_version_id = Some(RecordId::new(999));
    let catalog = catalog(
        vec![],
        vec![],
        vec![package_record(5, "vpn-client", "VPN Client")],
        vec![artifact],
    );

    let resolution = resolve_package_update(
        &catalog,
        &PackageCode::from("vpn-client"),
        &PackageVersion::from("3.0.0"),
        Some(&CoreVersion::from("1.0.0")),
    )
    .unwrap();
    assert!(matches!(resolution, PackageResolution::Available { .. }));
}

/// Verifies latest selection uses release date, not parsed version.
#[test]
fn package_latest_follows_release_date_not_version_number() {
    let catalog = catalog(
        vec![],
        vec![],
        vec![package_record(5, "ids-engine", "IDS Engine")],
        vec![
            package_artifact(20, 5, "4.0.0", 1_000),
            package_artifact(21, 5, "3.9.0", 2_000),
        ],
    );

    let response = check_package_update(
        &catalog,
        &PackageCode::from("ids-engine"),
        &PackageVersion::from("1.0.0"),
        None,
        &origin(),
    )
    .unwrap();
    assert_eq!(response.latest_version.as_deref(), Some("3.9.0"));
}

/// Verifies release-date ties keep the earliest catalog row.
#[test]
fn package_latest_tie_keeps_first_catalog_row() {
    let catalog = catalog(
        vec![],
        vec![],
        vec![package_record(5, "ids-engine", "IDS Engine")],
        vec![
            package_artifact(20, 5, "2.0.0", 2_000),
            package_artifact(21, 5, "2.1.0", 2_000),
        ],
    );

    let response = check_package_update(
        &catalog,
        &PackageCode::from("ids-engine"),
        &PackageVersion::from("1.0.0"),
        None,
        &origin(),
    )
    .unwrap();
    assert_eq!(response.latest_version.as_deref(), Some("2.0.0"));
}

/// Verifies unknown and inactive packages report not found.
#[test]
fn package_missing_or_inactive_reports_not_found() {
    let mut retired = package_record(5, "legacy-agent", "Legacy Agent");
    retired.is_active = false;
    let catalog = catalog(vec![], vec![], vec![retired], vec![package_artifact(20, 5, "1.1.0", 1_000)]);

    for code in ["legacy-agent", "no-such-package"] {
        let response = check_package_update(
            &catalog,
            &PackageCode::from(code),
            &PackageVersion::from("1.0.0"),
            None,
            &origin(),
        )
        .unwrap();
        assert!(!response.update_available);
        assert_eq!(response.package_name, "Unknown");
        assert_eq!(response.message, "Package not found.");
    }
}

/// Verifies a package without active artifacts reports no updates.
#[test]
fn package_without_active_artifact_reports_no_updates() {
    let mut inactive = package_artifact(20, 5, "1.1.0", 1_000);
    inactive.is_active = false;
    let catalog = catalog(
        vec![],
        vec![],
        vec![package_record(5, "vpn-client", "VPN Client")],
        vec![inactive],
    );

    let response = check_package_update(
        &catalog,
        &PackageCode::from("vpn-client"),
        &PackageVersion::from("1.0.0"),
        None,
        &origin(),
    )
    .unwrap();
    assert!(!response.update_available);
    assert_eq!(response.package_name, "VPN Client");
    assert_eq!(response.message, "No updates available for this package.");
}

// ============================================================================
// SECTION: Download Lookups
// ============================================================================

/// Verifies firewall download lookup distinguishes its three outcomes.
#[test]
fn firewall_download_lookup_is_version_exact() {
    let mut bare = version_record(2, "3.0.0", 2_000);
    bare.is_active = false;
    let catalog = catalog(
        vec![version_record(1, "2.0.0", 1_000), bare],
        vec![firewall_artifact(10, 1, 1_000)],
        vec![],
        vec![],
    );

    let found = lookup_firewall_download(&catalog, &CoreVersion::from("2.0.0")).unwrap();
    assert!(matches!(found, FirewallDownloadLookup::Found { .. }));

    // Spelling variants of a registered version do not match.
    let missing = lookup_firewall_download(&catalog, &CoreVersion::from("2.0")).unwrap();
    assert!(matches!(missing, FirewallDownloadLookup::VersionNotFound));

    // A version record without an active artifact is a distinct outcome,
    // regardless of the record's own active flag.
    let bare = lookup_firewall_download(&catalog, &CoreVersion::from("3.0.0")).unwrap();
    assert!(matches!(bare, FirewallDownloadLookup::ArtifactNotFound { .. }));
}

/// Verifies package download lookup ignores the package active flag.
#[test]
fn package_download_lookup_allows_inactive_package() {
    let mut retired = package_record(5, "legacy-agent", "Legacy Agent");
    retired.is_active = false;
    let catalog =
        catalog(vec![], vec![], vec![retired], vec![package_artifact(20, 5, "1.1.0", 1_000)]);

    let found = lookup_package_download(
        &catalog,
        &PackageCode::from("legacy-agent"),
        &PackageVersion::from("1.1.0"),
    )
    .unwrap();
    assert!(matches!(found, PackageDownloadLookup::Found { .. }));
}

/// Verifies inactive artifacts are never handed out.
#[test]
fn package_download_lookup_skips_inactive_artifact() {
    let mut inactive = package_artifact(20, 5, "1.1.0", 1_000);
    inactive.is_active = false;
    let catalog = catalog(
        vec![],
        vec![],
        vec![package_record(5, "vpn-client", "VPN Client")],
        vec![inactive],
    );

    let found = lookup_package_download(
        &catalog,
        &PackageCode::from("vpn-client"),
        &PackageVersion::from("1.1.0"),
    )
    .unwrap();
    assert!(matches!(found, PackageDownloadLookup::ArtifactNotFound { .. }));

    let missing = lookup_package_download(
        &catalog,
        &PackageCode::from("no-such-package"),
        &PackageVersion::from("1.1.0"),
    )
    .unwrap();
    assert!(matches!(missing, PackageDownloadLookup::PackageNotFound));
}
