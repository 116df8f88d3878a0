// File: ./src/model/item.rs
// Persisted shapes: Item and the SavedState snapshot
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_LISTS: [&str; 2] = ["Groceries", "Electronics"];
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Food", "Electronics", "Clothing"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    // Identity. Assigned at construction, never reassigned.
    id: String,
    pub name: String,
    // Kept as typed by the user, parsed only when totalling.
    pub price: String,
    pub category: String,
}

impl Item {
    pub fn new(name: &str, price: &str, category: &str) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, price, category)
    }

    /// Rebuilds an item around an id that already exists (imports, fixtures).
    pub fn with_id(id: impl Into<String>, name: &str, price: &str, category: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            price: price.to_string(),
            category: category.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Everything that survives a relaunch. The tax rate is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    pub shopping_lists: Vec<String>,
    pub categories: Vec<String>,
    pub items: Vec<Item>,
}

impl SavedState {
    /// First-run contents used whenever nothing valid was loaded.
    pub fn starter() -> Self {
        Self {
            shopping_lists: DEFAULT_LISTS.iter().map(|s| s.to_string()).collect(),
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            items: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_items_get_distinct_ids() {
        let a = Item::new("Milk", "3.50", "Food");
        let b = Item::new("Milk", "3.50", "Food");
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.id()).is_ok());
    }

    #[test]
    fn editing_fields_keeps_the_id() {
        let mut item = Item::new("", "", "Food");
        let id = item.id().to_string();
        item.name = "Bread".to_string();
        item.price = "2.".to_string();
        item.category = "Clothing".to_string();
        assert_eq!(item.id(), id);
    }

    #[test]
    fn json_uses_camel_case_keys_and_text_prices() {
        let state = SavedState {
            shopping_lists: vec!["Groceries".to_string()],
            categories: vec!["Food".to_string()],
            items: vec![Item::with_id("abc", "Milk", "3.50", "Food")],
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "shoppingLists": ["Groceries"],
                "categories": ["Food"],
                "items": [
                    { "id": "abc", "name": "Milk", "price": "3.50", "category": "Food" }
                ]
            })
        );
    }

    #[test]
    fn numeric_price_is_a_schema_mismatch() {
        let raw = r#"{"shoppingLists":[],"categories":[],"items":[{"id":"x","name":"Milk","price":3.5,"category":"Food"}]}"#;
        assert!(serde_json::from_str::<SavedState>(raw).is_err());
    }

    #[test]
    fn missing_key_is_a_schema_mismatch() {
        let raw = r#"{"shoppingLists":[],"items":[]}"#;
        assert!(serde_json::from_str::<SavedState>(raw).is_err());
    }

    #[test]
    fn starter_has_default_lists_and_categories() {
        let s = SavedState::starter();
        assert_eq!(s.shopping_lists, vec!["Groceries", "Electronics"]);
        assert_eq!(s.categories, vec!["Food", "Electronics", "Clothing"]);
        assert!(s.items.is_empty());
    }
}
