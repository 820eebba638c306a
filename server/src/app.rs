//! Core application

use std::sync::Arc;

use anyhow::Result;

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::{AppConfig, DatabaseBackend};
use crate::core::constants::{APP_LOG_TARGET, ENV_LOG, SQLITE_DB_FILENAME};
use crate::core::shutdown::ShutdownService;
use crate::core::storage::{AppStorage, DataSubdir};
use crate::data::PaymentsDatabase;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub storage: AppStorage,
    pub database: Arc<PaymentsDatabase>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::Config) => return Self::print_config(&cli_config),
            Some(Commands::Start) | None => {}
        }

        let app = Self::init(&cli_config).await?;
        Self::start_server(app).await
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let storage = AppStorage::init(&config).await?;

        let database = PaymentsDatabase::init(
            config.database.backend,
            &storage,
            &config.database.sqlite,
            config.database.postgres.as_ref(),
            config.debug,
        )
        .await?;
        let database = Arc::new(database);
        let shutdown = ShutdownService::new(database.clone());

        Ok(Self {
            shutdown,
            config,
            storage,
            database,
        })
    }

    fn print_config(cli: &CliConfig) -> Result<()> {
        let config = AppConfig::load(cli)?;
        println!("{}", serde_json::to_string_pretty(&config.to_display_json())?);
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_LOG_TARGET);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    /// Where the payments live, for the banner
    fn database_label(&self) -> String {
        match self.config.database.backend {
            DatabaseBackend::Sqlite => {
                let path = self.config.database.sqlite.path.clone().unwrap_or_else(|| {
                    self.storage
                        .subdir(DataSubdir::Sqlite)
                        .join(SQLITE_DB_FILENAME)
                });
                format!("sqlite {}", path.display())
            }
            DatabaseBackend::Postgres => match &self.config.database.postgres {
                Some(pg) => format!("postgres {}", pg.display_url()),
                None => "postgres".to_string(),
            },
        }
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        app.shutdown
            .register(
                app.database
                    .start_checkpoint_task(app.shutdown.subscribe()),
            )
            .await;

        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            &app.database_label(),
            app.config.mcp.enabled,
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }
}
