//! Core application infrastructure

pub mod banner;
pub mod cli;
pub mod config;
pub mod constants;
pub mod shutdown;
pub mod storage;

pub use crate::app::CoreApp;
pub use cli::{CliConfig, Commands};
pub use config::{AppConfig, DatabaseBackend, ServerConfig};
pub use storage::{AppStorage, DataSubdir};

pub use crate::data::PaymentsDatabase;
pub use shutdown::ShutdownService;
