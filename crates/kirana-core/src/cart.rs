//! # Cart Aggregate
//!
//! The in-progress sale: an insertion-ordered collection of lines keyed by
//! product identity.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                              │
//! │                                                                     │
//! │  Cashier Action           Cart Change                               │
//! │  ──────────────           ───────────                               │
//! │  Add to Cart ───────────► merge (+1 qty) or append new line         │
//! │  Change Quantity ───────► set, clamped to at least 1                │
//! │  Remove ────────────────► delete line (no-op if absent)             │
//! │  Checkout succeeds ─────► clear()                                   │
//! │                                                                     │
//! │  Totals are derived on every read; nothing is cached.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id (adding merges, never duplicates)
//! - Quantity is always ≥ 1; a lower update clamps, removal is explicit
//! - Line order is insertion order (display only)
//! - The cart is cleared only after a transaction is durably recorded

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CatalogItem, TaxRate};

/// One catalog item plus its quantity within the cart.
///
/// Price and tax rate are frozen when the line is created, so a catalog
/// edit mid-sale cannot shift a total the customer has already seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product ID (UUID).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Short numeric code, for display.
    pub code: i64,

    /// Unit price in paise at time of adding (frozen).
    pub unit_price_paise: i64,

    /// Tax rate in basis points at time of adding (frozen).
    pub tax_rate_bps: u32,

    /// Quantity in cart (≥ 1).
    pub quantity: i64,

    /// When this line was first added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn from_item(item: &CatalogItem) -> Self {
        CartLine {
            product_id: item.id.clone(),
            name: item.name.clone(),
            code: item.code,
            unit_price_paise: item.unit_price_paise,
            tax_rate_bps: item.tax_rate_bps,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Line subtotal before tax (unit price × quantity).
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.unit_price_paise).multiply_quantity(self.quantity)
    }

    /// Tax amount for this line.
    pub fn tax(&self) -> Money {
        self.subtotal().tax(TaxRate::from_bps(self.tax_rate_bps))
    }

    /// Line total including tax.
    pub fn total(&self) -> Money {
        self.subtotal() + self.tax()
    }
}

/// The cart for the current sale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a catalog item to the cart.
    ///
    /// If a line for the item already exists its quantity goes up by one;
    /// otherwise a new line with quantity 1 is appended. Always succeeds.
    pub fn add(&mut self, item: &CatalogItem) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == item.id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine::from_item(item));
    }

    /// Removes the line for `product_id`.
    ///
    /// Removing an id that is not in the cart is a no-op, not an error.
    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Sets the quantity of an existing line.
    ///
    /// A quantity below 1 is clamped to 1 - the cart never removes a line
    /// implicitly; removal is its own operation. Unknown ids are a no-op.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity.max(1);
        }
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Subtotal before tax; zero for an empty cart.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().fold(Money::zero(), |acc, l| acc + l.subtotal())
    }

    /// Total tax across all lines.
    pub fn tax(&self) -> Money {
        self.lines.iter().fold(Money::zero(), |acc, l| acc + l.tax())
    }

    /// Grand total (subtotal + tax); zero for an empty cart.
    pub fn total(&self) -> Money {
        self.subtotal() + self.tax()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Empties the cart. Called only after a checkout has been durably
    /// recorded, or when the cashier abandons the sale.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price_paise: i64, tax_bps: u32) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            code: 1,
            unit_price_paise: price_paise,
            tax_rate_bps: tax_bps,
        }
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = Cart::new();
        cart.add(&item("a", 999, 0));

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_add_same_item_merges() {
        let mut cart = Cart::new();
        let i = item("a", 999, 0);
        cart.add(&i);
        cart.add(&i);

        // One line with quantity 2, not two lines.
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut cart = Cart::new();
        cart.add(&item("a", 999, 0));

        cart.set_quantity("a", 0);
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.set_quantity("a", -5);
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.set_quantity("a", 7);
        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&item("a", 999, 0));
        cart.set_quantity("zzz", 5);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&item("a", 999, 0));

        cart.remove("zzz");
        assert_eq!(cart.item_count(), 1);

        cart.remove("a");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let cart = Cart::new();
        assert!(cart.subtotal().is_zero());
        assert!(cart.tax().is_zero());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_totals_sum_line_totals() {
        let mut cart = Cart::new();
        // ₹100.00 at 18%, qty 2 → ₹236.00
        let a = item("a", 10000, 1800);
        cart.add(&a);
        cart.add(&a);
        // ₹50.00 at 0%, qty 1 → ₹50.00
        cart.add(&item("b", 5000, 0));

        assert_eq!(cart.subtotal().paise(), 25000);
        assert_eq!(cart.tax().paise(), 3600);
        assert_eq!(cart.total().paise(), 28600);

        let sum: i64 = cart.lines().iter().map(|l| l.total().paise()).sum();
        assert_eq!(cart.total().paise(), sum);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(&item("b", 100, 0));
        cart.add(&item("a", 100, 0));
        cart.add(&item("b", 100, 0));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&item("a", 999, 500));
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }
}
