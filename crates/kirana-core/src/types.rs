//! # Domain Types
//!
//! Core domain types used throughout Kirana POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌────────────────┐   ┌────────────────────┐   │
//! │  │   Product     │   │  CatalogItem   │   │   Transaction      │   │
//! │  │  ───────────  │   │  ────────────  │   │  ────────────────  │   │
//! │  │  id (UUID)    │──►│  id            │   │  id (UUID)         │   │
//! │  │  code (1-999) │   │  name, code    │   │  customer fields   │   │
//! │  │  prices, qty  │   │  price, tax    │   │  totals + items    │   │
//! │  └───────────────┘   └────────────────┘   └────────────────────┘   │
//! │                                                                     │
//! │  ┌───────────────┐   ┌────────────────┐                            │
//! │  │   TaxRate     │   │  PaymentMode   │                            │
//! │  │  bps (u32)    │   │  Upi/Cash/Card │                            │
//! │  │  1800 = 18%   │   └────────────────┘                            │
//! │  └───────────────┘                                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `Product` is the record the admin maintains; a `CatalogItem` is the
//! read-only snapshot the checkout flow consumes; a `Transaction` is the
//! immutable result of a completed checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points (bps).
///
/// 1 basis point = 0.01%; 1800 bps = 18% (a common GST slab).
/// Basis points keep tax math in integers end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (catalog feeds carry percent).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Payment Mode
// =============================================================================

/// How the customer pays.
///
/// Stored and serialized as the uppercase wire strings `UPI`, `CASH`,
/// `CARD`. Only CASH involves tender and change; UPI and CARD settle for
/// the exact total on an external device.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    Upi,
    Cash,
    Card,
}

impl PaymentMode {
    /// Parses the wire/operator spelling (`UPI`, `CASH`, `CARD`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "UPI" => Some(PaymentMode::Upi),
            "CASH" => Some(PaymentMode::Cash),
            "CARD" => Some(PaymentMode::Card),
            _ => None,
        }
    }

    /// The wire spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Upi => "UPI",
            PaymentMode::Cash => "CASH",
            PaymentMode::Card => "CARD",
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product record as the admin screens maintain it.
///
/// Brand, category and unit references live in their own CRUD screens and
/// are not needed by the checkout flow, so they are not modeled here.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the cashier and on the invoice.
    pub name: String,

    /// Short numeric code (1-999) the cashier can key in.
    pub code: i64,

    /// Optional description for the admin detail screen.
    pub description: Option<String>,

    /// Selling price in paise.
    pub selling_price_paise: i64,

    /// Production (cost) price in paise, for margin reporting.
    pub production_price_paise: i64,

    /// Tax rate in basis points (1800 = 18%).
    pub tax_rate_bps: u32,

    /// Stock on hand. Informational; checkout never decrements it.
    pub total_qty: i64,

    /// Low-stock alert threshold.
    pub alert_qty: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the selling price as Money.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_paise(self.selling_price_paise)
    }

    /// Returns the tax rate.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// The read-only snapshot the checkout flow consumes.
    pub fn to_catalog_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id.clone(),
            name: self.name.clone(),
            code: self.code,
            unit_price_paise: self.selling_price_paise,
            tax_rate_bps: self.tax_rate_bps,
        }
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// The slice of a product the POS screen needs: identity, display fields,
/// price and tax. Read-only from the checkout flow's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub code: i64,
    pub unit_price_paise: i64,
    pub tax_rate_bps: u32,
}

impl CatalogItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// The immutable record of a completed sale.
///
/// ## Lifecycle
/// Created exactly once per successful checkout, persisted atomically with
/// all its items, then never updated or deleted. Price or tax changes to
/// the catalog after checkout must not touch historical transactions,
/// which is why every item is a frozen snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub payment_mode: PaymentMode,
    /// Grand total (subtotal + tax) in paise.
    pub total_paise: i64,
    /// What the customer paid. For UPI/CARD this equals the total.
    pub paid_paise: i64,
    /// Change returned to the customer (CASH only, floored at zero).
    pub balance_paise: i64,
    /// Line items in cart order.
    pub items: Vec<TransactionItem>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }

    #[inline]
    pub fn paid(&self) -> Money {
        Money::from_paise(self.paid_paise)
    }

    #[inline]
    pub fn balance(&self) -> Money {
        Money::from_paise(self.balance_paise)
    }
}

/// One line of a transaction, frozen at checkout time.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub id: String,
    pub transaction_id: String,
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Unit price in paise at time of sale (frozen).
    pub unit_price_paise: i64,
    /// Tax rate in basis points at time of sale (frozen).
    pub tax_rate_bps: u32,
    /// Line total including tax.
    pub line_total_paise: i64,
}

impl TransactionItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.line_total_paise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1800);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(18.0).bps(), 1800);
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
    }

    #[test]
    fn test_payment_mode_parse() {
        assert_eq!(PaymentMode::parse("UPI"), Some(PaymentMode::Upi));
        assert_eq!(PaymentMode::parse("cash"), Some(PaymentMode::Cash));
        assert_eq!(PaymentMode::parse("Card"), Some(PaymentMode::Card));
        assert_eq!(PaymentMode::parse("CHEQUE"), None);
    }

    #[test]
    fn test_payment_mode_wire_spelling() {
        let json = serde_json::to_string(&PaymentMode::Upi).unwrap();
        assert_eq!(json, "\"UPI\"");
    }

    #[test]
    fn test_product_to_catalog_item() {
        let now = Utc::now();
        let product = Product {
            id: "p-1".into(),
            name: "Toor Dal 1kg".into(),
            code: 42,
            description: None,
            selling_price_paise: 18500,
            production_price_paise: 15000,
            tax_rate_bps: 500,
            total_qty: 30,
            alert_qty: 5,
            created_at: now,
            updated_at: now,
        };

        let item = product.to_catalog_item();
        assert_eq!(item.id, "p-1");
        assert_eq!(item.unit_price().paise(), 18500);
        assert_eq!(item.tax_rate().bps(), 500);
    }
}
