// monolith-update-api/src/origin.rs
// ============================================================================
// Module: Request Origin Resolution
// Description: Scheme and host selection for synthesized download URLs.
// Purpose: Reproduce request-derived URLs with an optional fixed override.
// Dependencies: axum, monolith-update-config, monolith-update-core
// ============================================================================

//! ## Overview
//! Download URLs embed the scheme and host the client reached. The host
//! comes from the request `Host` header unless the configuration pins a
//! public host; the scheme always comes from configuration because the
//! service itself terminates plain HTTP.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::HeaderMap;
use axum::http::header::HOST;
use monolith_update_config::ServerConfig;
use monolith_update_core::DownloadOrigin;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host used when neither configuration nor the request supplies one.
const FALLBACK_HOST: &str = "localhost";

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves the download origin for one request.
#[must_use]
pub fn request_origin(server: &ServerConfig, headers: &HeaderMap) -> DownloadOrigin {
    let host = if server.public_host.is_empty() {
        headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .unwrap_or(FALLBACK_HOST)
            .to_string()
    } else {
        server.public_host.clone()
    };
    DownloadOrigin::new(server.public_scheme.clone(), host)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use axum::http::HeaderMap;
    use axum::http::header::HOST;
    use monolith_update_config::ServerConfig;

    use super::request_origin;

    #[test]
    fn host_header_wins_when_no_override() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, "updates.example.net:8080".parse().unwrap());
        let origin = request_origin(&ServerConfig::default(), &headers);
        assert_eq!(origin.scheme, "http");
        assert_eq!(origin.host, "updates.example.net:8080");
    }

    #[test]
    fn configured_public_host_overrides_header() {
        let server = ServerConfig {
            public_scheme: "https".to_string(),
            public_host: "cdn.example.net".to_string(),
            ..ServerConfig::default()
        };
        let mut headers = HeaderMap::new();
        headers.insert(HOST, "internal:9999".parse().unwrap());
        let origin = request_origin(&server, &headers);
        assert_eq!(origin.scheme, "https");
        assert_eq!(origin.host, "cdn.example.net");
    }

    #[test]
    fn missing_host_header_falls_back() {
        let origin = request_origin(&ServerConfig::default(), &HeaderMap::new());
        assert_eq!(origin.host, "localhost");
    }
}
