use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::Item;
use crate::error::AppError;

/// 商品存储接口
///
/// 内存与 MongoDB 两种实现共用此接口，由启动配置选择。`update_item` 与
/// `delete_item` 要求记录已存在，调用方需先用 `get_item` 确认；记录缺失时
/// 的行为由具体后端决定。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemsRepository: Send + Sync {
    async fn get_items(&self) -> Result<Vec<Item>, AppError>;

    /// 记录不存在时返回 `Ok(None)`
    async fn get_item(&self, id: Uuid) -> Result<Option<Item>, AppError>;

    async fn create_item(&self, item: Item) -> Result<(), AppError>;

    async fn update_item(&self, item: Item) -> Result<(), AppError>;

    async fn delete_item(&self, id: Uuid) -> Result<(), AppError>;

    /// 就绪检查使用的连通性探测
    async fn ping(&self) -> Result<(), AppError>;

    fn backend_name(&self) -> &'static str;
}
