use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ItemsRepository;
use crate::domain::models::Item;
use crate::error::AppError;

/// 进程内有序列表实现，按插入顺序保存，查找为线性扫描
#[derive(Debug, Default)]
pub struct InMemItemsRepository {
    items: RwLock<Vec<Item>>,
}

impl InMemItemsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 带三条初始商品的存储
    pub fn seeded() -> Self {
        Self::with_items(vec![
            Item::new("Potion", Decimal::from(9)),
            Item::new("Iron Sword", Decimal::from(20)),
            Item::new("Bronze Shield", Decimal::from(18)),
        ])
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    fn position(items: &[Item], id: Uuid) -> Result<usize, AppError> {
        items
            .iter()
            .position(|existing| existing.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Item with ID {} not found", id)))
    }
}

#[async_trait]
impl ItemsRepository for InMemItemsRepository {
    async fn get_items(&self) -> Result<Vec<Item>, AppError> {
        Ok(self.items.read().await.clone())
    }

    async fn get_item(&self, id: Uuid) -> Result<Option<Item>, AppError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn create_item(&self, item: Item) -> Result<(), AppError> {
        self.items.write().await.push(item);
        Ok(())
    }

    async fn update_item(&self, item: Item) -> Result<(), AppError> {
        let mut items = self.items.write().await;
        let index = Self::position(&items, item.id)?;
        items[index] = item;
        Ok(())
    }

    async fn delete_item(&self, id: Uuid) -> Result<(), AppError> {
        let mut items = self.items.write().await;
        let index = Self::position(&items, id)?;
        items.remove(index);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
