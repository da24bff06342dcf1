use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub mongodb: MongoDbConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: "development".to_string(),
        }
    }
}

/// 商品存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    MongoDb,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// 内存存储启动时是否写入初始商品
    pub seed: bool,
    /// 就绪检查等待存储 ping 的秒数
    pub readiness_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            seed: true,
            readiness_timeout_secs: 3,
        }
    }
}

impl StorageConfig {
    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_secs(self.readiness_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MongoDbConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: String,
    pub collection: String,
    pub timeout_secs: u64,
}

impl Default for MongoDbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 27017,
            user: None,
            password: None,
            database: "catalog".to_string(),
            collection: "items".to_string(),
            timeout_secs: 3,
        }
    }
}

impl MongoDbConfig {
    pub fn connection_string(&self) -> String {
        match (&self.user, &self.password) {
            (Some(user), Some(password)) => {
                format!("mongodb://{}:{}@{}:{}", user, password, self.host, self.port)
            }
            _ => format!("mongodb://{}:{}", self.host, self.port),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::from(Path::new(&config_path).join("default")).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let config = builder.build()?;
        let config: Config = config.try_deserialize()?;

        Ok(config)
    }
}
