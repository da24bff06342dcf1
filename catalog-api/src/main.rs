use std::sync::Arc;

use catalog_api::config::{Config, StorageBackend};
use catalog_api::domain::repositories::{InMemItemsRepository, ItemsRepository, MongoDbItemsRepository};
use catalog_api::error::AppError;
use catalog_api::infrastructure::database::mongodb::init_mongodb;
use catalog_api::logging::init_logging;
use catalog_api::server::{self, create_app};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    init_logging(&config.logging)?;

    tracing::info!("Starting catalog service ({})", config.server.environment);

    // 按配置选择存储后端
    let items: Arc<dyn ItemsRepository> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory item store");
            if config.storage.seed {
                Arc::new(InMemItemsRepository::seeded())
            } else {
                Arc::new(InMemItemsRepository::new())
            }
        }
        StorageBackend::MongoDb => {
            let database = init_mongodb(&config.mongodb).await?;
            Arc::new(MongoDbItemsRepository::new(database, &config.mongodb.collection))
        }
    };

    // 创建并启动服务器
    let app = create_app(server::AppState::new(config.clone(), items));
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", &addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}
