use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::DatabaseBackend;
use super::constants::{
    ENV_CONFIG, ENV_DATABASE_BACKEND, ENV_DATABASE_HOST, ENV_DATABASE_NAME, ENV_DATABASE_PASSWORD,
    ENV_DATABASE_PORT, ENV_DATABASE_USER, ENV_DEBUG, ENV_HOST, ENV_MCP_ENABLED, ENV_PORT,
    ENV_POSTGRES_URL, ENV_SQLITE_PATH,
};

#[derive(Parser)]
#[command(name = "revenue")]
#[command(version, about = "Payment revenue analytics server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug mode (logs SQL statements)
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Enable or disable MCP server
    #[arg(long, global = true, env = ENV_MCP_ENABLED)]
    pub mcp: Option<bool>,

    // Database options
    /// Database backend (sqlite or postgres)
    #[arg(long, global = true, env = ENV_DATABASE_BACKEND, value_parser = parse_database_backend)]
    pub database_backend: Option<DatabaseBackend>,

    /// SQLite database file (defaults to the data directory)
    #[arg(long, global = true, env = ENV_SQLITE_PATH)]
    pub sqlite_path: Option<PathBuf>,

    /// PostgreSQL connection URL (overrides the individual database settings)
    #[arg(long, global = true, env = ENV_POSTGRES_URL)]
    pub postgres_url: Option<String>,

    /// PostgreSQL host
    #[arg(long, global = true, env = ENV_DATABASE_HOST)]
    pub db_host: Option<String>,

    /// PostgreSQL port
    #[arg(long, global = true, env = ENV_DATABASE_PORT)]
    pub db_port: Option<u16>,

    /// PostgreSQL user
    #[arg(long, global = true, env = ENV_DATABASE_USER)]
    pub db_user: Option<String>,

    /// PostgreSQL password
    #[arg(long, global = true, env = ENV_DATABASE_PASSWORD, hide_env_values = true)]
    pub db_password: Option<String>,

    /// PostgreSQL database name
    #[arg(long, global = true, env = ENV_DATABASE_NAME)]
    pub db_name: Option<String>,
}

/// Parse database backend from CLI/env string
fn parse_database_backend(s: &str) -> Result<DatabaseBackend, String> {
    match s.to_lowercase().as_str() {
        "sqlite" => Ok(DatabaseBackend::Sqlite),
        "postgres" | "postgresql" => Ok(DatabaseBackend::Postgres),
        _ => Err(format!(
            "Invalid database backend '{}'. Valid options: sqlite, postgres",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Print the resolved configuration (secrets masked) and exit
    Config,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub mcp: Option<bool>,
    pub database_backend: Option<DatabaseBackend>,
    pub sqlite_path: Option<PathBuf>,
    pub postgres_url: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        debug: cli.debug,
        config: cli.config,
        mcp: cli.mcp,
        database_backend: cli.database_backend,
        sqlite_path: cli.sqlite_path,
        postgres_url: cli.postgres_url,
        db_host: cli.db_host,
        db_port: cli.db_port,
        db_user: cli.db_user,
        db_password: cli.db_password,
        db_name: cli.db_name,
    };
    (config, cli.command)
}
