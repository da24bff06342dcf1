use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ItemsRepository;
use crate::domain::models::Item;
use crate::error::AppError;

/// MongoDB 中保存的商品文档
///
/// 标识、价格和创建时间都以规范文本保存，而不是 BSON 的二进制 UUID、
/// Decimal128 或 Date 类型。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    price: String,
    created_date: String,
}

impl From<&Item> for ItemDocument {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            price: item.price.to_string(),
            created_date: item.created_date.to_rfc3339_opts(SecondsFormat::Nanos, true),
        }
    }
}

impl TryFrom<ItemDocument> for Item {
    type Error = AppError;

    fn try_from(document: ItemDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&document.id)
            .map_err(|e| AppError::Internal(format!("Stored item id '{}' is invalid: {}", document.id, e)))?;
        let price = Decimal::from_str(&document.price)
            .map_err(|e| AppError::Internal(format!("Stored price of item {} is invalid: {}", id, e)))?;
        let created_date = DateTime::parse_from_rfc3339(&document.created_date)
            .map_err(|e| AppError::Internal(format!("Stored creation date of item {} is invalid: {}", id, e)))?
            .with_timezone(&Utc);

        Ok(Item {
            id,
            name: document.name,
            price,
            created_date,
        })
    }
}

fn id_filter(id: Uuid) -> mongodb::bson::Document {
    doc! { "_id": id.to_string() }
}

pub struct MongoDbItemsRepository {
    database: Database,
    collection: Collection<ItemDocument>,
}

impl MongoDbItemsRepository {
    pub fn new(database: Database, collection: &str) -> Self {
        let collection = database.collection::<ItemDocument>(collection);
        Self { database, collection }
    }
}

#[async_trait]
impl ItemsRepository for MongoDbItemsRepository {
    async fn get_items(&self) -> Result<Vec<Item>, AppError> {
        let documents: Vec<ItemDocument> = self.collection.find(doc! {}).await?.try_collect().await?;

        documents.into_iter().map(Item::try_from).collect()
    }

    async fn get_item(&self, id: Uuid) -> Result<Option<Item>, AppError> {
        self.collection
            .find_one(id_filter(id))
            .await?
            .map(Item::try_from)
            .transpose()
    }

    async fn create_item(&self, item: Item) -> Result<(), AppError> {
        self.collection.insert_one(ItemDocument::from(&item)).await?;
        Ok(())
    }

    // 未匹配到文档时静默返回
    async fn update_item(&self, item: Item) -> Result<(), AppError> {
        let result = self
            .collection
            .replace_one(id_filter(item.id), ItemDocument::from(&item))
            .await?;
        tracing::debug!("Replaced {} document(s) for item {}", result.modified_count, item.id);
        Ok(())
    }

    async fn delete_item(&self, id: Uuid) -> Result<(), AppError> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        tracing::debug!("Deleted {} document(s) for item {}", result.deleted_count, id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::Client;

    #[test]
    fn document_stores_canonical_text() {
        let item = Item::new("Potion", Decimal::new(950, 2));
        let document = ItemDocument::from(&item);

        assert_eq!(document.id, item.id.hyphenated().to_string());
        assert_eq!(document.price, "9.50");
        assert!(document.created_date.ends_with('Z'));

        let bson = mongodb::bson::to_document(&document).unwrap();
        assert_eq!(bson.get_str("_id").unwrap(), document.id);
        assert_eq!(bson.get_str("createdDate").unwrap(), document.created_date);

        assert_eq!(Item::try_from(document).unwrap(), item);
    }

    #[test]
    fn corrupt_document_is_reported() {
        let document = ItemDocument {
            id: "not-a-uuid".to_string(),
            name: "Potion".to_string(),
            price: "9".to_string(),
            created_date: "2024-01-01T00:00:00Z".to_string(),
        };

        assert!(matches!(Item::try_from(document), Err(AppError::Internal(_))));
    }

    async fn test_repository() -> MongoDbItemsRepository {
        let url = std::env::var("TEST_MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = Client::with_uri_str(&url).await.unwrap();
        let collection = format!("items_{}", Uuid::new_v4().simple());
        MongoDbItemsRepository::new(client.database("catalog_test"), &collection)
    }

    #[tokio::test]
    #[ignore] // 需要 MongoDB
    async fn crud_against_live_server() {
        let repository = test_repository().await;
        repository.ping().await.unwrap();

        let item = Item::new("Potion", Decimal::from(9));
        repository.create_item(item.clone()).await.unwrap();
        assert_eq!(repository.get_item(item.id).await.unwrap(), Some(item.clone()));

        let updated = item.with_changes("Elixir", Decimal::from(12));
        repository.update_item(updated.clone()).await.unwrap();
        assert_eq!(repository.get_item(item.id).await.unwrap(), Some(updated));
        assert_eq!(repository.get_items().await.unwrap().len(), 1);

        repository.delete_item(item.id).await.unwrap();
        assert_eq!(repository.get_item(item.id).await.unwrap(), None);

        repository.collection.drop().await.unwrap();
    }

    #[tokio::test]
    #[ignore] // 需要 MongoDB
    async fn missing_item_mutations_are_noops() {
        let repository = test_repository().await;
        let ghost = Item::new("Ghost", Decimal::ZERO);

        repository.update_item(ghost.clone()).await.unwrap();
        repository.delete_item(ghost.id).await.unwrap();
        assert!(repository.get_items().await.unwrap().is_empty());
    }
}
