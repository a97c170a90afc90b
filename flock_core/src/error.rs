use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no data directory available on this platform; set FLOCK_DATA_DIR")]
    NoDataDir,
    #[error("config file io error")]
    Io(#[from] std::io::Error),
    #[error("config file is not valid json")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("data store unavailable")]
    Database(#[from] sea_orm::DbErr),
}
