// monolith-update-api/src/server.rs
// ============================================================================
// Module: Update API Server
// Description: Axum HTTP surface for update checks, feeds, and downloads.
// Purpose: Expose the six client-facing endpoints of the update service.
// Dependencies: axum, monolith-update-core, monolith-update-store-fs, tokio
// ============================================================================

//! ## Overview
//! The API server wires the compatibility resolver, feed generator, and
//! artifact store behind the six unauthenticated GET endpoints. Handlers
//! validate query parameters before touching the catalog, record one
//! access-log label pair per request, and never write anything: the catalog
//! is read-only here and the store is only resolved, never saved to.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use monolith_update_config::ServerConfig;
use monolith_update_config::UpdateSiteConfig;
use monolith_update_core::ArtifactStore;
use monolith_update_core::CatalogReader;
use monolith_update_core::CoreVersion;
use monolith_update_core::FirewallDownloadLookup;
use monolith_update_core::PackageCode;
use monolith_update_core::PackageDownloadLookup;
use monolith_update_core::PackageVersion;
use monolith_update_core::check_firewall_update;
use monolith_update_core::check_package_update;
use monolith_update_core::generate_feed;
use monolith_update_core::list_available_packages;
use monolith_update_core::lookup_firewall_download;
use monolith_update_core::lookup_package_download;
use monolith_update_store_fs::FsArtifactStore;
use serde::Deserialize;
use thiserror::Error;

use crate::access_log::AccessSink;
use crate::access_log::ApiRoute;
use crate::access_log::RequestOutcome;
use crate::access_log::StderrAccessSink;
use crate::catalog_source::load_catalog;
use crate::error::ApiError;
use crate::origin::request_origin;

// ============================================================================
// SECTION: Server State
// ============================================================================

/// Shared state behind every request handler.
pub struct AppState {
    /// Read-only catalog access.
    catalog: Arc<dyn CatalogReader + Send + Sync>,
    /// Artifact store used to resolve files for download.
    store: Arc<dyn ArtifactStore + Send + Sync>,
    /// Server configuration for origin and limits.
    server: ServerConfig,
    /// Access-log sink.
    access: Arc<dyn AccessSink>,
}

impl AppState {
    /// Creates handler state from its collaborators.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogReader + Send + Sync>,
        store: Arc<dyn ArtifactStore + Send + Sync>,
        server: ServerConfig,
        access: Arc<dyn AccessSink>,
    ) -> Self {
        Self {
            catalog,
            store,
            server,
            access,
        }
    }
}

// ============================================================================
// SECTION: API Server
// ============================================================================

/// Update API server instance.
pub struct ApiServer {
    /// Bind address for the listener.
    bind: SocketAddr,
    /// Shared handler state.
    state: Arc<AppState>,
}

impl ApiServer {
    /// Builds a server from validated configuration.
    ///
    /// Loads the catalog snapshot and prepares the artifact store roots.
    ///
    /// # Errors
    ///
    /// Returns [`ApiServerError`] when initialization fails.
    pub fn from_config(config: &UpdateSiteConfig) -> Result<Self, ApiServerError> {
        config.validate().map_err(|err| ApiServerError::Config(err.to_string()))?;
        let bind = config.bind_addr().map_err(|err| ApiServerError::Config(err.to_string()))?;
        let catalog = load_catalog(&config.catalog.path)
            .map_err(|err| ApiServerError::Init(err.to_string()))?;
        let store = FsArtifactStore::new(config.storage.root.clone())
            .map_err(|err| ApiServerError::Init(err.to_string()))?;
        let state = Arc::new(AppState::new(
            Arc::new(catalog),
            Arc::new(store),
            config.server.clone(),
            Arc::new(StderrAccessSink),
        ));
        Ok(Self {
            bind,
            state,
        })
    }

    /// Serves requests until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`ApiServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ApiServerError> {
        let app = router(self.state);
        let listener = tokio::net::TcpListener::bind(self.bind)
            .await
            .map_err(|err| ApiServerError::Transport(format!("bind {}: {err}", self.bind)))?;
        axum::serve(listener, app)
            .await
            .map_err(|err| ApiServerError::Transport(format!("serve: {err}")))
    }
}

/// Builds the API router over shared state.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.server.max_body_bytes;
    Router::new()
        .route("/api/v1/firewall/check-update", get(firewall_check))
        .route("/api/v1/firewall/download/{version}", get(firewall_download))
        .route("/api/v1/packages", get(package_feed))
        .route("/api/v1/packages/check-update", get(package_check))
        .route("/api/v1/packages/download/{package_code}/{version}", get(package_download))
        .route("/api/v1/packages/list", get(package_list))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

// ============================================================================
// SECTION: Query Shapes
// ============================================================================

/// Query parameters for the firewall update check.
#[derive(Debug, Deserialize)]
struct FirewallCheckQuery {
    /// Version the client currently runs; required.
    #[serde(default, rename = "currentVersion")]
    current_version: Option<String>,
}

/// Query parameters for the package feed.
#[derive(Debug, Deserialize)]
struct FeedQuery {
    /// Firewall core version used as a compatibility filter.
    #[serde(default)]
    version: Option<String>,
}

/// Query parameters for the package update check.
#[derive(Debug, Deserialize)]
struct PackageCheckQuery {
    /// Package code to check; required.
    #[serde(default, rename = "packageCode")]
    package_code: Option<String>,
    /// Version the client currently runs; required.
    #[serde(default, rename = "currentVersion")]
    current_version: Option<String>,
    /// Firewall version for the cross-lineage gate; optional.
    #[serde(default, rename = "firewallVersion")]
    firewall_version: Option<String>,
}

/// Query parameters for the simplified package listing.
#[derive(Debug, Deserialize)]
struct PackageListQuery {
    /// Firewall core version used as a compatibility filter.
    #[serde(default, rename = "firewallVersion")]
    firewall_version: Option<String>,
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Handles `GET /api/v1/firewall/check-update`.
async fn firewall_check(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<FirewallCheckQuery>,
) -> Response {
    let result = firewall_check_inner(&state, &headers, &query);
    finish(&state, ApiRoute::FirewallCheck, result)
}

/// Resolves the firewall update check.
fn firewall_check_inner(
    state: &AppState,
    headers: &HeaderMap,
    query: &FirewallCheckQuery,
) -> Result<Response, ApiError> {
    let current = required(query.current_version.as_deref(), "Current version is required.")?;
    let origin = request_origin(&state.server, headers);
    let response =
        check_firewall_update(state.catalog.as_ref(), &CoreVersion::from(current), &origin)
            .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok(axum::Json(response).into_response())
}

/// Handles `GET /api/v1/firewall/download/{version}`.
async fn firewall_download(
    State(state): State<Arc<AppState>>,
    Path(version): Path<String>,
) -> Response {
    let result = firewall_download_inner(&state, &version).await;
    finish(&state, ApiRoute::FirewallDownload, result)
}

/// Resolves and streams the firewall artifact for an exact version.
async fn firewall_download_inner(state: &AppState, version: &str) -> Result<Response, ApiError> {
    let lookup = lookup_firewall_download(state.catalog.as_ref(), &CoreVersion::from(version))
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    let view = match lookup {
        FirewallDownloadLookup::VersionNotFound => {
            return Err(ApiError::NotFound("Version not found.".to_string()));
        }
        FirewallDownloadLookup::ArtifactNotFound {
            ..
        } => return Err(ApiError::NotFound("Update not found.".to_string())),
        FirewallDownloadLookup::Found {
            view,
        } => view,
    };
    let path = state
        .store
        .resolve_firewall_artifact(&view.artifact.file_name)
        .ok_or_else(|| ApiError::NotFound("Update file not found.".to_string()))?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::NotFound("Update file not found.".to_string()))?;
    Ok(file_response(&view.artifact.file_name, bytes))
}

/// Handles `GET /api/v1/packages`.
async fn package_feed(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<FeedQuery>,
) -> Response {
    let result = package_feed_inner(&state, &headers, &query);
    finish(&state, ApiRoute::PackageFeed, result)
}

/// Builds the package feed response.
fn package_feed_inner(
    state: &AppState,
    headers: &HeaderMap,
    query: &FeedQuery,
) -> Result<Response, ApiError> {
    let firewall = optional_version(query.version.as_deref());
    let origin = request_origin(&state.server, headers);
    let feed = generate_feed(state.catalog.as_ref(), firewall.as_ref(), &origin)
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok(axum::Json(feed).into_response())
}

/// Handles `GET /api/v1/packages/check-update`.
async fn package_check(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PackageCheckQuery>,
) -> Response {
    let result = package_check_inner(&state, &headers, &query);
    finish(&state, ApiRoute::PackageCheck, result)
}

/// Resolves the package update check.
fn package_check_inner(
    state: &AppState,
    headers: &HeaderMap,
    query: &PackageCheckQuery,
) -> Result<Response, ApiError> {
    let code = required(query.package_code.as_deref(), "Package code is required.")?;
    let current = required(query.current_version.as_deref(), "Current version is required.")?;
    let firewall = optional_version(query.firewall_version.as_deref());
    let origin = request_origin(&state.server, headers);
    let response = check_package_update(
        state.catalog.as_ref(),
        &PackageCode::from(code),
        &PackageVersion::from(current),
        firewall.as_ref(),
        &origin,
    )
    .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok(axum::Json(response).into_response())
}

/// Handles `GET /api/v1/packages/download/{package_code}/{version}`.
async fn package_download(
    State(state): State<Arc<AppState>>,
    Path((package_code, version)): Path<(String, String)>,
) -> Response {
    let result = package_download_inner(&state, &package_code, &version).await;
    finish(&state, ApiRoute::PackageDownload, result)
}

/// Resolves and streams the package artifact for an exact code and version.
async fn package_download_inner(
    state: &AppState,
    package_code: &str,
    version: &str,
) -> Result<Response, ApiError> {
    let code = PackageCode::from(package_code);
    let lookup =
        lookup_package_download(state.catalog.as_ref(), &code, &PackageVersion::from(version))
            .map_err(|err| ApiError::Internal(err.to_string()))?;
    let view = match lookup {
        PackageDownloadLookup::PackageNotFound => {
            return Err(ApiError::NotFound("Package not found.".to_string()));
        }
        PackageDownloadLookup::ArtifactNotFound {
            ..
        } => return Err(ApiError::NotFound("Package update not found.".to_string())),
        PackageDownloadLookup::Found {
            view, ..
        } => view,
    };
    let path = state
        .store
        .resolve_package_artifact(&code, &view.artifact.file_name)
        .ok_or_else(|| ApiError::NotFound("Package file not found.".to_string()))?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::NotFound("Package file not found.".to_string()))?;
    Ok(file_response(&view.artifact.file_name, bytes))
}

/// Handles `GET /api/v1/packages/list`.
async fn package_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PackageListQuery>,
) -> Response {
    let result = package_list_inner(&state, &query);
    finish(&state, ApiRoute::PackageList, result)
}

/// Builds the simplified package listing response.
fn package_list_inner(state: &AppState, query: &PackageListQuery) -> Result<Response, ApiError> {
    let firewall = optional_version(query.firewall_version.as_deref());
    let listing = list_available_packages(state.catalog.as_ref(), firewall.as_ref())
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok(axum::Json(listing).into_response())
}

// ============================================================================
// SECTION: Handler Helpers
// ============================================================================

/// Records the access-log outcome and converts the result into a response.
fn finish(state: &AppState, route: ApiRoute, result: Result<Response, ApiError>) -> Response {
    match result {
        Ok(response) => {
            state.access.record(route, RequestOutcome::Ok);
            response
        }
        Err(err) => {
            state.access.record(route, err.outcome());
            err.into_response()
        }
    }
}

/// Requires a non-blank query parameter.
fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, ApiError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(message.to_string()))
}

/// Maps a blank optional parameter to `None`.
fn optional_version(value: Option<&str>) -> Option<CoreVersion> {
    value.filter(|value| !value.trim().is_empty()).map(CoreVersion::from)
}

/// Builds a binary download response with a file name.
fn file_response(file_name: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (CONTENT_TYPE, "application/octet-stream".to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{file_name}\"")),
        ],
        bytes::Bytes::from(bytes),
    )
        .into_response()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// API server errors.
#[derive(Debug, Error)]
pub enum ApiServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
