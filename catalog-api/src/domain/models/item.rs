use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 商品目录中的一条记录
///
/// `id` 与 `created_date` 在创建后不再改变，修改只能通过 [`Item::with_changes`]
/// 生成新值后整体替换。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub created_date: DateTime<Utc>,
}

impl Item {
    pub fn new(name: &str, price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
            created_date: Utc::now(),
        }
    }

    /// 复制当前记录并覆盖可变字段
    pub fn with_changes(&self, name: &str, price: Decimal) -> Self {
        Self {
            name: name.to_string(),
            price,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_gets_fresh_identity() {
        let first = Item::new("Potion", Decimal::from(9));
        let second = Item::new("Potion", Decimal::from(9));

        assert_ne!(first.id, second.id);
        assert!(!first.id.is_nil());
        assert!(Utc::now() - first.created_date < chrono::Duration::seconds(5));
    }

    #[test]
    fn with_changes_keeps_identity_and_creation_date() {
        let original = Item::new("Potion", Decimal::from(9));
        let updated = original.with_changes("Elixir", Decimal::from(12));

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_date, original.created_date);
        assert_eq!(updated.name, "Elixir");
        assert_eq!(updated.price, Decimal::from(12));
        assert_eq!(original.name, "Potion");
    }
}
