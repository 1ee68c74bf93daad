//! Tally - Personal finance tracking backend
//!
//! Usage:
//!   tally init                  Initialize database
//!   tally user add NAME         Create a user and print their API token
//!   tally user list             List registered users
//!   tally serve --port 3000     Start the REST API server

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tally_core::db::Database;
use tally_server::{serve, ServerConfig};

#[derive(Parser)]
#[command(name = "tally", about = "Personal finance tracking backend", version)]
struct Cli {
    /// Path to the SQLite database (defaults to the platform data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,
    /// Manage users and API tokens
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Start the REST API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Disable authentication (local development only)
        #[arg(long)]
        no_auth: bool,
        /// Allowed CORS origin (repeatable)
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user and print their API token
    Add {
        /// Username for the new account
        username: String,
    },
    /// List registered users
    List,
}

/// Resolve the database path, creating parent directories as needed
fn resolve_db_path(db: Option<PathBuf>) -> Result<PathBuf> {
    let path = match db {
        Some(path) => path,
        None => dirs::data_dir()
            .context("Could not determine platform data directory; pass --db")?
            .join("tally")
            .join("tally.db"),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(path)
}

fn open_db(db: Option<PathBuf>) -> Result<Database> {
    let path = resolve_db_path(db)?;
    let path_str = path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Ok(Database::new(path_str)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => {
            let db = open_db(cli.db)?;
            println!("Database initialized at {}", db.path());
            Ok(())
        }
        Commands::User { action } => {
            let db = open_db(cli.db)?;
            match action {
                UserAction::Add { username } => {
                    let user = db.create_user(&username)?;
                    println!("Created user '{}' (id {})", user.username, user.id);
                    println!("API token: {}", user.token);
                    Ok(())
                }
                UserAction::List => {
                    let users = db.list_users()?;
                    if users.is_empty() {
                        println!("No users registered. Run `tally user add NAME` to create one.");
                    }
                    for user in users {
                        println!("{:>4}  {}", user.id, user.username);
                    }
                    Ok(())
                }
            }
        }
        Commands::Serve {
            host,
            port,
            no_auth,
            cors_origins,
        } => {
            let db = open_db(cli.db)?;
            let config = ServerConfig {
                require_auth: !no_auth,
                allowed_origins: cors_origins,
            };
            serve(db, &host, port, config).await
        }
    }
}
