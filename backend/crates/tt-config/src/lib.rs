mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod server_config;
mod validation_config;
mod websocket_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use validation_config::ValidationConfig;
pub use websocket_config::WebSocketConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "TT_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".teamtasks";
const CONFIG_FILENAME: &str = "config.toml";
const ENV_FILENAME: &str = ".env";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_MAX_CONNECTIONS: usize = 10000;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 100000;
const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://127.0.0.1:5500",
    "http://localhost:5500",
    "http://127.0.0.1:8000",
    "http://localhost:8000",
];

const DEFAULT_DATABASE_FILENAME: &str = "teamtasks.db";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_TOKEN_TTL_MINUTES: u64 = 60;
const MIN_TOKEN_TTL_MINUTES: u64 = 1;
const MAX_TOKEN_TTL_MINUTES: u64 = 60 * 24 * 30;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
