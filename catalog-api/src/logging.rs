use tracing_subscriber::{
    fmt, prelude::*, registry, EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::AppError;

/// 安装全局 tracing subscriber
///
/// `RUST_LOG` 优先于 `logging.level`；配置的级别同时作用于 `tower_http`，
/// 保证请求日志与业务日志使用同一级别。
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(&config.level))
            .map_err(|e| AppError::Internal(format!("Invalid log level '{}': {}", config.level, e)))?,
    };

    let formatting_layer = match config.format {
        LogFormat::Json => fmt::layer().json().with_current_span(false).boxed(),
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
    };

    registry()
        .with(env_filter)
        .with(formatting_layer)
        .try_init()
        .map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

fn default_directives(level: &str) -> String {
    format!("{level},catalog_api={level},tower_http={level}")
}
