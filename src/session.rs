// File: ./src/session.rs
// In-memory application state: what the screens read and edit between load and save.
use crate::config::Config;
use crate::model::{Item, SavedState, format_total, total_with_tax};
use crate::storage::LocalStorage;
use tracing::info;

pub const NEW_LIST_NAME: &str = "New List";
pub const NEW_CATEGORY_NAME: &str = "New Category";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub shopping_lists: Vec<String>,
    pub categories: Vec<String>,
    pub items: Vec<Item>,
    /// Session-only; resets to the configured default on every launch.
    pub tax_rate: String,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self::from_saved(SavedState::starter(), config)
    }

    fn from_saved(saved: SavedState, config: &Config) -> Self {
        Self {
            shopping_lists: saved.shopping_lists,
            categories: saved.categories,
            items: saved.items,
            tax_rate: config.default_tax_rate.clone(),
        }
    }

    /// Loads the stored snapshot, or starter data when there is none.
    pub fn restore(store: &LocalStorage, config: &Config) -> Self {
        match store.load() {
            Some(saved) => Self::from_saved(saved, config),
            None => {
                info!("starting from default lists and categories");
                Self::new(config)
            }
        }
    }

    pub fn snapshot(&self) -> SavedState {
        SavedState {
            shopping_lists: self.shopping_lists.clone(),
            categories: self.categories.clone(),
            items: self.items.clone(),
        }
    }

    pub fn persist(&self, store: &LocalStorage) {
        store.save(&self.snapshot());
    }

    // --- Lists ---

    pub fn add_list(&mut self) -> usize {
        self.shopping_lists.push(NEW_LIST_NAME.to_string());
        self.shopping_lists.len() - 1
    }

    pub fn rename_list(&mut self, index: usize, name: &str) -> bool {
        match self.shopping_lists.get_mut(index) {
            Some(slot) => {
                *slot = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove_list(&mut self, index: usize) -> bool {
        if index < self.shopping_lists.len() {
            self.shopping_lists.remove(index);
            true
        } else {
            false
        }
    }

    // --- Categories ---

    pub fn add_category(&mut self) -> usize {
        self.categories.push(NEW_CATEGORY_NAME.to_string());
        self.categories.len() - 1
    }

    pub fn rename_category(&mut self, index: usize, name: &str) -> bool {
        match self.categories.get_mut(index) {
            Some(slot) => {
                *slot = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove_category(&mut self, index: usize) -> bool {
        if index < self.categories.len() {
            self.categories.remove(index);
            true
        } else {
            false
        }
    }

    // --- Items ---

    /// Appends a blank item in the first category and returns its id.
    pub fn add_item(&mut self) -> String {
        let category = self.categories.first().map(String::as_str).unwrap_or("");
        let item = Item::new("", "", category);
        let id = item.id().to_string();
        self.items.push(item);
        id
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn item_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    pub fn set_item_name(&mut self, id: &str, name: &str) -> bool {
        self.edit_item(id, |item| item.name = name.to_string())
    }

    pub fn set_item_price(&mut self, id: &str, price: &str) -> bool {
        self.edit_item(id, |item| item.price = price.to_string())
    }

    pub fn set_item_category(&mut self, id: &str, category: &str) -> bool {
        self.edit_item(id, |item| item.category = category.to_string())
    }

    /// Moves the item to the next category. An unknown category restarts at the first.
    pub fn cycle_item_category(&mut self, id: &str) -> bool {
        if self.categories.is_empty() {
            return false;
        }
        let Some(current) = self.item(id).map(|i| i.category.clone()) else {
            return false;
        };
        let next = match self.categories.iter().position(|c| *c == current) {
            Some(pos) => (pos + 1) % self.categories.len(),
            None => 0,
        };
        let category = self.categories[next].clone();
        self.set_item_category(id, &category)
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id() != id);
        self.items.len() != before
    }

    fn edit_item<F>(&mut self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut Item),
    {
        match self.item_mut(id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    // --- Tax & totals ---

    pub fn set_tax_rate(&mut self, rate: &str) {
        self.tax_rate = rate.to_string();
    }

    pub fn total(&self) -> f64 {
        total_with_tax(&self.items, &self.tax_rate)
    }

    pub fn total_label(&self) -> String {
        format!("Total with Tax: ${}", format_total(self.total()))
    }
}
