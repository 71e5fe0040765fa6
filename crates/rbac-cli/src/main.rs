//! `rbac` - query a permission cache built from a grants file.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`RBAC_*`)
//! 3. Explicit config file (`--config`)
//! 4. Global config (`~/.rbac/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `RBAC_GRANTS_FILE`: grants file read by `check` and `permissions`
//! - `RBAC_LOG_LEVEL`: log level when neither `-d` nor `-v` is given
//! - `RUST_LOG`: full `EnvFilter` directive, overrides `RBAC_LOG_LEVEL`
//!
//! # Exit Status
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | allowed / valid / success |
//! | 1 | denied / invalid |
//! | 2 | usage, configuration or I/O error |

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rbac_cache::config::{AuthzConfig, ConfigLoader};
use rbac_cache::{Authorizer, FileResolver, PermissionPolicy, SharedCache};
use rbac_validate::{validate_dashboard, Dashboard};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Query and validate role-based access control data
#[derive(Parser, Debug)]
#[command(name = "rbac")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file layered over ~/.rbac/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Grants file (overrides grants_file and RBAC_GRANTS_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    grants: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether a user may perform an action on a scope in a project
    Check {
        user: String,
        /// create, read, update or delete
        action: String,
        /// Project name, or `*` for global resources
        project: String,
        /// Resource kind, e.g. Dashboard or GlobalUser
        scope: String,
    },

    /// Print a user's permissions as JSON
    Permissions { user: String },

    /// Validate variable names and default datasources of a dashboard
    Validate {
        /// Dashboard document (JSON)
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let config = load_config(args)?;
    init_tracing(args, &config);

    match &args.command {
        Command::Check {
            user,
            action,
            project,
            scope,
        } => {
            let authz = build_authorizer(&config)?;
            if authz.check_raw(user, action, project, scope) {
                println!("allowed");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("denied");
                Ok(ExitCode::from(1))
            }
        }
        Command::Permissions { user } => {
            let authz = build_authorizer(&config)?;
            let snapshot = authz.cache().snapshot();
            let projects: BTreeMap<&str, _> = snapshot
                .permissions_for(user)
                .map(|by_project| {
                    by_project
                        .iter()
                        .map(|(project, perms)| (project.as_str(), perms.as_slice()))
                        .collect()
                })
                .unwrap_or_default();

            let report = serde_json::json!({
                "user": user,
                "projects": projects,
                "guest_permissions": authz.guest_permissions(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { file } => {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let result =
                Dashboard::from_json(&content).and_then(|dashboard| validate_dashboard(&dashboard.spec));
            match result {
                Ok(()) => {
                    println!("valid");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    println!("invalid: {e}");
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}

fn load_config(args: &Args) -> Result<AuthzConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(ref path) = args.config {
        loader = loader.with_config_file(path);
    }
    let mut config = loader.load().context("failed to load configuration")?;

    // CLI arguments override all other sources
    if let Some(ref grants) = args.grants {
        config.grants_file = Some(grants.clone());
    }
    Ok(config)
}

/// Initializes stderr logging.
///
/// `-d` ⇒ debug, `-v` ⇒ info, else `RUST_LOG`, else `logging.level`.
fn init_tracing(args: &Args, config: &AuthzConfig) {
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn build_authorizer(config: &AuthzConfig) -> Result<Authorizer> {
    let path = config.grants_file.clone().context(
        "no grants file configured (use --grants, RBAC_GRANTS_FILE or grants_file in config)",
    )?;

    let cache = SharedCache::default();
    let stats = cache
        .refresh(&FileResolver::new(&path))
        .with_context(|| format!("failed to load grants from {}", path.display()))?;
    info!(
        path = %path.display(),
        users = stats.users,
        entries = stats.entries,
        generation = stats.generation,
        "Permission cache ready"
    );

    Ok(Authorizer::from_config(config, cache))
}
