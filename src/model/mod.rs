// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod item;
pub mod total;

pub use item::{DEFAULT_CATEGORIES, DEFAULT_LISTS, Item, SavedState};
pub use total::{format_total, parse_amount, subtotal, total_with_tax};
