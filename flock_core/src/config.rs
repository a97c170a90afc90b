use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::ConfigError;

static DATA_DIR_ENV: &str = "FLOCK_DATA_DIR";
static DATA_DIR_NAME: &str = "flock";
static FLOCK_DB_NAME: &str = "flock_db.sqlite";
static CONFIG_FILE_NAME: &str = "config.json";

// For now this directory structure should be like
// data_dir_path
// |- flock
//    |- flock_db.sqlite
//    |- config.json

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    100
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FlockConfig {
    pub database_path: PathBuf,

    /// Address the HTTP server listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Default `EnvFilter` directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,

    /// Page size used when a list request doesn't ask for one.
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    /// Upper bound for a client supplied page size.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl FlockConfig {
    /// Creates a new FlockConfig with default settings and the database inside `data_dir`
    pub fn new(data_dir: PathBuf) -> Self {
        let database_path = data_dir.join(FLOCK_DB_NAME);

        FlockConfig {
            database_path,
            bind_addr: default_bind_addr(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn data_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .ok_or(ConfigError::NoDataDir)
}

/// Gets the existing config or initializes a new one if it doesn't exist
pub async fn get_or_init() -> Result<FlockConfig, ConfigError> {
    let flock_dir = data_dir()?;
    get_or_init_in(flock_dir).await
}

/// Same as [`get_or_init`] but rooted at an explicit directory.
pub async fn get_or_init_in(flock_dir: PathBuf) -> Result<FlockConfig, ConfigError> {
    let config_path = flock_dir.join(CONFIG_FILE_NAME);

    // Create the flock directory if it doesn't exist
    fs::create_dir_all(&flock_dir).await?;

    if fs::try_exists(&config_path).await? {
        let mut file = fs::File::open(&config_path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        let config: FlockConfig = serde_json::from_str(&contents)?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    } else {
        let config = FlockConfig::new(flock_dir.clone());

        let json = serde_json::to_string_pretty(&config)?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(json.as_bytes()).await?;

        tracing::info!(path = %config_path.display(), "wrote default config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flock-config-{name}-{}", uuid::Uuid::now_v7()))
    }

    #[tokio::test]
    async fn writes_defaults_then_reads_them_back() {
        let dir = scratch_dir("defaults");

        let created = get_or_init_in(dir.clone()).await.unwrap();
        assert_eq!(created.bind_addr, "127.0.0.1:8000");
        assert_eq!(created.database_path, dir.join(FLOCK_DB_NAME));
        assert!(dir.join(CONFIG_FILE_NAME).exists());

        let loaded = get_or_init_in(dir.clone()).await.unwrap();
        assert_eq!(loaded.database_path, created.database_path);
        assert_eq!(loaded.page_size, 20);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn missing_fields_fall_back_to_defaults() {
        let dir = scratch_dir("partial");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(CONFIG_FILE_NAME),
            r#"{ "database_path": "/tmp/flock.sqlite", "log_format": "json" }"#,
        )
        .unwrap();

        let config = get_or_init_in(dir.clone()).await.unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.max_page_size, 100);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn rejects_malformed_file() {
        let dir = scratch_dir("broken");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE_NAME), "{ not json").unwrap();

        let result = get_or_init_in(dir.clone()).await;
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        std::fs::remove_dir_all(dir).ok();
    }
}
