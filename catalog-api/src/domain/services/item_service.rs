use std::sync::Arc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::models::Item;
use crate::error::AppError;
use crate::server::AppState;

pub struct ItemService {
    state: Arc<AppState>,
}

impl ItemService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn list_items(&self) -> Result<Vec<Item>, AppError> {
        let items = self.state.items.get_items().await?;

        tracing::info!("Retrieved {} items", items.len());

        Ok(items)
    }

    pub async fn get_item(&self, id: Uuid) -> Result<Item, AppError> {
        let item = self.state.items
            .get_item(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with ID {} not found", id)))?;

        Ok(item)
    }

    pub async fn create_item(&self, name: &str, price: Decimal) -> Result<Item, AppError> {
        // 标识由此处生成，不再检查是否与已有记录冲突
        let item = Item::new(name, price);

        self.state.items.create_item(item.clone()).await?;

        tracing::info!("Created item {}", item.id);

        Ok(item)
    }

    pub async fn update_item(&self, id: Uuid, name: &str, price: Decimal) -> Result<(), AppError> {
        // 检查商品是否存在
        let existing_item = self.get_item(id).await?;

        let updated_item = existing_item.with_changes(name, price);

        self.state.items.update_item(updated_item).await?;

        tracing::info!("Updated item {}", id);

        Ok(())
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<(), AppError> {
        // 检查商品是否存在
        let _ = self.get_item(id).await?;

        self.state.items.delete_item(id).await?;

        tracing::info!("Deleted item {}", id);

        Ok(())
    }
}
