//! Binary entry point for geniectl.
//!
//! Provides the CLI for exporting and importing Databricks Genie Spaces
//! between workspace environments.

// Allow print macros in the main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use geniectl::api::HttpConfig;
use geniectl::config::GenieConfig;
use geniectl::models::Environment;
use geniectl::services::{ExportRequest, ExportService, ImportRequest, ImportService};
use geniectl::{Error, GenieClient};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// geniectl - promote Databricks Genie Spaces between environments.
#[derive(Parser)]
#[command(name = "geniectl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Export a space, writing one retargeted JSON file per environment.
    Export {
        /// Source Genie space ID.
        #[arg(long)]
        space_id: String,

        /// Folder name of the Genie space (e.g. 'Pipeline_overview').
        #[arg(long)]
        genie_name: String,

        /// Root directory of the repository.
        #[arg(long)]
        root_dir: PathBuf,

        /// Path to the Genie folder relative to the root.
        #[arg(long, default_value = ".")]
        genie_folder: PathBuf,

        /// Workspace base URL.
        #[arg(long, env = "DATABRICKS_HOST")]
        host: Option<String>,

        /// API bearer token.
        #[arg(long, env = "DATABRICKS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Import a previously exported file, creating or updating a space.
    Import {
        /// Source Genie space ID the file was exported from.
        #[arg(long)]
        space_id: String,

        /// Target environment: dev, tst, stg, or prd.
        #[arg(long)]
        env: String,

        /// Directory containing the exported JSON file.
        #[arg(long)]
        source_dir: PathBuf,

        /// Workspace folder a newly created space lands under.
        #[arg(long)]
        parent_path: String,

        /// SQL warehouse ID used for space creation.
        #[arg(long)]
        warehouse_id: String,

        /// Target space ID; omit (or pass 'none') to create a new space.
        #[arg(long)]
        target_space_id: Option<String>,

        /// Workspace base URL.
        #[arg(long, env = "DATABRICKS_HOST")]
        host: Option<String>,

        /// API bearer token.
        #[arg(long, env = "DATABRICKS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Manage configuration.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    // Load a .env file from the working directory when present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Initializes tracing to stderr, respecting `RUST_LOG` when set.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "geniectl=debug" } else { "geniectl=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<GenieConfig, Box<dyn std::error::Error>> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return GenieConfig::load_from_file(std::path::Path::new(config_path))
            .map_err(std::convert::Into::into);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("GENIECTL_CONFIG_PATH") {
        if !config_path.trim().is_empty() {
            return GenieConfig::load_from_file(std::path::Path::new(&config_path))
                .map_err(std::convert::Into::into);
        }
    }

    // Otherwise, load from default location
    Ok(GenieConfig::load_default())
}

/// Runs the selected command.
fn run_command(cli: Cli, config: GenieConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Export {
            space_id,
            genie_name,
            root_dir,
            genie_folder,
            host,
            token,
        } => cmd_export(
            &config,
            space_id,
            genie_name,
            root_dir,
            genie_folder,
            host,
            token,
        ),

        Commands::Import {
            space_id,
            env,
            source_dir,
            parent_path,
            warehouse_id,
            target_space_id,
            host,
            token,
        } => cmd_import(
            &config,
            space_id,
            env,
            source_dir,
            parent_path,
            warehouse_id,
            target_space_id,
            host,
            token,
        ),

        Commands::Config { show } => cmd_config(&config, show),

        Commands::Completions { shell } => cmd_completions(shell),
    }
}

/// Builds an API client from resolved connection parameters.
fn build_client(
    config: &GenieConfig,
    host: Option<String>,
    token: Option<String>,
) -> Result<GenieClient, Error> {
    let host = config.resolve_host(host)?;
    let token = config.resolve_token(token)?;
    let http = HttpConfig::from_config(&config.http).with_env_overrides();

    Ok(GenieClient::new(host, token).with_http_config(http))
}

/// Export command.
#[allow(clippy::too_many_arguments)]
fn cmd_export(
    config: &GenieConfig,
    space_id: String,
    genie_name: String,
    root_dir: PathBuf,
    genie_folder: PathBuf,
    host: Option<String>,
    token: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client(config, host, token)?;
    let service = ExportService::new(Arc::new(client));

    let outcome = service.export(&ExportRequest {
        source_space_id: space_id.clone(),
        genie_name,
        root_dir,
        genie_folder,
    })?;

    for path in &outcome.written {
        println!("Exported space {space_id} to {}", path.display());
    }

    Ok(())
}

/// Import command.
#[allow(clippy::too_many_arguments)]
fn cmd_import(
    config: &GenieConfig,
    space_id: String,
    env: String,
    source_dir: PathBuf,
    parent_path: String,
    warehouse_id: String,
    target_space_id: Option<String>,
    host: Option<String>,
    token: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let env = parse_environment(&env)?;
    let client = build_client(config, host, token)?;
    let service = ImportService::new(Arc::new(client));

    let outcome = service.import(&ImportRequest {
        source_dir,
        source_space_id: space_id.clone(),
        target_space_id,
        warehouse_id,
        parent_path,
        env,
    })?;

    if outcome.created {
        println!(
            "Successfully created a new Genie Space {} from {space_id}",
            outcome.space_id
        );
    } else {
        println!(
            "Successfully imported a Genie Space {} from {space_id}",
            outcome.space_id
        );
    }

    Ok(())
}

/// Parses an environment name, listing the valid names on failure.
fn parse_environment(s: &str) -> Result<Environment, Error> {
    Environment::parse(s).ok_or_else(|| {
        Error::InvalidInput(format!(
            "unknown environment '{s}': expected one of dev, tst, stg, prd"
        ))
    })
}

/// Config command.
fn cmd_config(config: &GenieConfig, show: bool) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("Current Configuration");
        println!("=====================");
        println!();
        println!("Host: {}", config.host.as_deref().unwrap_or("(not set)"));
        println!(
            "Token: {}",
            if config.token.is_some() {
                "(set, redacted)"
            } else {
                "(not set)"
            }
        );
        println!();
        println!("HTTP:");
        println!(
            "  Timeout: {}",
            config
                .http
                .timeout_ms
                .map_or("(default)".to_string(), |ms| format!("{ms}ms"))
        );
        println!(
            "  Connect Timeout: {}",
            config
                .http
                .connect_timeout_ms
                .map_or("(default)".to_string(), |ms| format!("{ms}ms"))
        );
    } else {
        println!("Use --show to display configuration");
    }

    Ok(())
}

/// Completions command.
fn cmd_completions(shell: Shell) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "geniectl", &mut std::io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_environment_error_lists_valid_names() {
        let err = match parse_environment("prod") {
            Err(e) => e,
            Ok(env) => panic!("expected failure, parsed {env}"),
        };
        let message = err.to_string();
        assert!(message.contains("dev, tst, stg, prd"));
    }
}
