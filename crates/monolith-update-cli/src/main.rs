// monolith-update-cli/src/main.rs
// ============================================================================
// Module: Monolith Update CLI Entry Point
// Description: Command dispatcher for serving and operator store workflows.
// Purpose: Run the update API server and the operator-side artifact tasks.
// Dependencies: clap, monolith-update-api, monolith-update-store-fs, tokio
// ============================================================================

//! ## Overview
//! The CLI runs the update API server and the operator-side workflows the
//! admin console delegates to: storing uploaded artifacts (printing the
//! name, size, and hash tuple the catalog records), resolving and deleting
//! stored files, and offline compatibility checks against a catalog
//! snapshot.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use monolith_update_api::ApiServer;
use monolith_update_api::load_catalog;
use monolith_update_config::UpdateSiteConfig;
use monolith_update_core::ArtifactStore;
use monolith_update_core::CoreVersion;
use monolith_update_core::DownloadOrigin;
use monolith_update_core::PackageCode;
use monolith_update_core::PackageVersion;
use monolith_update_core::check_firewall_update;
use monolith_update_core::check_package_update;
use monolith_update_store_fs::FsArtifactStore;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Command Tree
// ============================================================================

/// Monolith Update service and operator tooling.
#[derive(Debug, Parser)]
#[command(name = "monolith-update", version, about = "Monolith update distribution service")]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the update API server.
    Serve(ServeArgs),
    /// Operate the artifact store directly.
    Store {
        /// Store subcommand.
        #[command(subcommand)]
        command: StoreCommands,
    },
    /// Run offline compatibility checks against a catalog snapshot.
    Check {
        /// Check subcommand.
        #[command(subcommand)]
        command: CheckCommands,
    },
}

/// Arguments for the serve command.
#[derive(Debug, Args)]
struct ServeArgs {
    /// Configuration file path; defaults to the environment override.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Artifact store subcommands.
#[derive(Debug, Subcommand)]
enum StoreCommands {
    /// Store an uploaded artifact and print its recorded tuple.
    Put(StorePutArgs),
    /// Resolve a stored artifact path by file name.
    Resolve(StoreLookupArgs),
    /// Delete a stored artifact by file name.
    Delete(StoreLookupArgs),
}

/// Arguments for storing an artifact.
#[derive(Debug, Args)]
struct StorePutArgs {
    /// Storage root holding the updates tree.
    #[arg(long)]
    root: PathBuf,
    /// Package code; omit to store a firewall artifact.
    #[arg(long)]
    package: Option<String>,
    /// Version folder the artifact belongs to.
    #[arg(long)]
    version: String,
    /// File to store.
    file: PathBuf,
}

/// Arguments for resolving or deleting an artifact.
#[derive(Debug, Args)]
struct StoreLookupArgs {
    /// Storage root holding the updates tree.
    #[arg(long)]
    root: PathBuf,
    /// Package code; omit for the firewall namespace.
    #[arg(long)]
    package: Option<String>,
    /// Stored file name.
    file_name: String,
}

/// Offline check subcommands.
#[derive(Debug, Subcommand)]
enum CheckCommands {
    /// Check a firewall client version against the catalog.
    Firewall(CheckFirewallArgs),
    /// Check a package client version against the catalog.
    Package(CheckPackageArgs),
}

/// Arguments for the firewall check.
#[derive(Debug, Args)]
struct CheckFirewallArgs {
    /// Catalog snapshot path.
    #[arg(long)]
    catalog: PathBuf,
    /// Version the client currently runs.
    #[arg(long)]
    current: String,
    /// Host used in synthesized download URLs.
    #[arg(long, default_value = "localhost")]
    host: String,
}

/// Arguments for the package check.
#[derive(Debug, Args)]
struct CheckPackageArgs {
    /// Catalog snapshot path.
    #[arg(long)]
    catalog: PathBuf,
    /// Package code to check.
    #[arg(long)]
    code: String,
    /// Version the client currently runs.
    #[arg(long)]
    current: String,
    /// Firewall version for the cross-lineage gate.
    #[arg(long)]
    firewall: Option<String>,
    /// Host used in synthesized download URLs.
    #[arg(long, default_value = "localhost")]
    host: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failure carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Message written to stderr before exiting.
    message: String,
}

impl CliError {
    /// Creates a CLI error from a message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            let _ = write_stderr_line(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => command_serve(args).await,
        Commands::Store {
            command,
        } => command_store(command),
        Commands::Check {
            command,
        } => command_check(command),
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Loads configuration and serves the update API.
async fn command_serve(args: ServeArgs) -> CliResult<ExitCode> {
    let config = match args.config {
        Some(path) => UpdateSiteConfig::load(&path),
        None => UpdateSiteConfig::load_default(),
    }
    .map_err(|err| CliError::new(err.to_string()))?;
    let server = ApiServer::from_config(&config).map_err(|err| CliError::new(err.to_string()))?;
    server.serve().await.map_err(|err| CliError::new(err.to_string()))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Store Commands
// ============================================================================

/// Dispatches artifact store commands.
fn command_store(command: StoreCommands) -> CliResult<ExitCode> {
    match command {
        StoreCommands::Put(args) => store_put(&args),
        StoreCommands::Resolve(args) => store_resolve(&args),
        StoreCommands::Delete(args) => store_delete(&args),
    }
}

/// Opens the store over the given root.
fn open_store(root: &Path) -> CliResult<FsArtifactStore> {
    FsArtifactStore::new(root).map_err(|err| CliError::new(err.to_string()))
}

/// Returns the stored file name for a path.
fn file_name_of(path: &Path) -> CliResult<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| CliError::new(format!("not a storable file name: {}", path.display())))
}

/// Stores an artifact and prints the recorded tuple.
fn store_put(args: &StorePutArgs) -> CliResult<ExitCode> {
    let store = open_store(&args.root)?;
    let bytes = fs::read(&args.file)
        .map_err(|err| CliError::new(format!("read {}: {err}", args.file.display())))?;
    let file_name = file_name_of(&args.file)?;
    let stored = match &args.package {
        Some(code) => store.save_package_artifact(
            &PackageCode::from(code.as_str()),
            &PackageVersion::from(args.version.as_str()),
            &file_name,
            &bytes,
        ),
        None => store.save_firewall_artifact(
            &CoreVersion::from(args.version.as_str()),
            &file_name,
            &bytes,
        ),
    }
    .map_err(|err| CliError::new(err.to_string()))?;
    write_json(&json!({
        "fileName": stored.file_name,
        "fileSize": stored.file_size,
        "sha256": stored.file_hash,
    }))
}

/// Resolves a stored artifact path by name.
fn store_resolve(args: &StoreLookupArgs) -> CliResult<ExitCode> {
    let store = open_store(&args.root)?;
    let path = match &args.package {
        Some(code) => {
            store.resolve_package_artifact(&PackageCode::from(code.as_str()), &args.file_name)
        }
        None => store.resolve_firewall_artifact(&args.file_name),
    };
    match path {
        Some(path) => {
            write_stdout_line(&path.display().to_string())?;
            Ok(ExitCode::SUCCESS)
        }
        None => Err(CliError::new(format!("not found: {}", args.file_name))),
    }
}

/// Deletes a stored artifact by name, best-effort.
fn store_delete(args: &StoreLookupArgs) -> CliResult<ExitCode> {
    let store = open_store(&args.root)?;
    let removed = match &args.package {
        Some(code) => {
            store.delete_package_artifact(&PackageCode::from(code.as_str()), &args.file_name)
        }
        None => store.delete_firewall_artifact(&args.file_name),
    };
    write_json(&json!({ "deleted": removed }))
}

// ============================================================================
// SECTION: Check Commands
// ============================================================================

/// Dispatches offline compatibility checks.
fn command_check(command: CheckCommands) -> CliResult<ExitCode> {
    match command {
        CheckCommands::Firewall(args) => check_firewall(&args),
        CheckCommands::Package(args) => check_package(&args),
    }
}

/// Runs a firewall update check against a snapshot and prints the response.
fn check_firewall(args: &CheckFirewallArgs) -> CliResult<ExitCode> {
    let catalog = load_catalog(&args.catalog).map_err(|err| CliError::new(err.to_string()))?;
    let origin = DownloadOrigin::new("http", args.host.clone());
    let response = check_firewall_update(
        &catalog,
        &CoreVersion::from(args.current.as_str()),
        &origin,
    )
    .map_err(|err| CliError::new(err.to_string()))?;
    let value = serde_json::to_value(&response)
        .map_err(|err| CliError::new(format!("serialize response: {err}")))?;
    write_json(&value)
}

/// Runs a package update check against a snapshot and prints the response.
fn check_package(args: &CheckPackageArgs) -> CliResult<ExitCode> {
    let catalog = load_catalog(&args.catalog).map_err(|err| CliError::new(err.to_string()))?;
    let origin = DownloadOrigin::new("http", args.host.clone());
    let firewall = args.firewall.as_deref().map(CoreVersion::from);
    let response = check_package_update(
        &catalog,
        &PackageCode::from(args.code.as_str()),
        &PackageVersion::from(args.current.as_str()),
        firewall.as_ref(),
        &origin,
    )
    .map_err(|err| CliError::new(err.to_string()))?;
    let value = serde_json::to_value(&response)
        .map_err(|err| CliError::new(format!("serialize response: {err}")))?;
    write_json(&value)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> CliResult<ExitCode> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Writes a pretty-printed JSON value to stdout.
fn write_json(value: &serde_json::Value) -> CliResult<ExitCode> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("serialize output: {err}")))?;
    write_stdout_line(&rendered)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
