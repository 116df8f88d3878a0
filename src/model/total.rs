// File: ./src/model/total.rs
// Price and tax arithmetic over the text fields the user typed
use crate::model::item::Item;

/// Parses a price or tax rate. Anything that isn't a plain decimal is ignored.
pub fn parse_amount(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn subtotal(items: &[Item]) -> f64 {
    // `sum()` over nothing yields -0.0
    items
        .iter()
        .filter_map(|i| parse_amount(&i.price))
        .fold(0.0, |acc, v| acc + v)
}

pub fn total_with_tax(items: &[Item], tax_rate: &str) -> f64 {
    let subtotal = subtotal(items);
    let rate = parse_amount(tax_rate).unwrap_or(0.0);
    subtotal + subtotal * rate / 100.0
}

pub fn format_total(value: f64) -> String {
    // -0.0 + 0.0 is +0.0
    format!("{:.2}", value + 0.0)
}
