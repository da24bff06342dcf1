use mongodb::{options::ClientOptions, Client, Database};

use crate::config::MongoDbConfig;
use crate::error::AppError;

pub async fn init_mongodb(config: &MongoDbConfig) -> Result<Database, AppError> {
    tracing::info!("Initializing MongoDB client for {}:{}", config.host, config.port);

    let mut options = ClientOptions::parse(config.connection_string()).await?;
    options.app_name = Some("catalog-api".to_string());
    // 连接失败时尽快返回，由就绪检查上报
    options.server_selection_timeout = Some(config.timeout());
    options.connect_timeout = Some(config.timeout());

    let client = Client::with_options(options)?;

    Ok(client.database(&config.database))
}
