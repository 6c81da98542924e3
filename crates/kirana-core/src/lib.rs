//! # kirana-core: Pure Business Logic for Kirana POS
//!
//! This crate is the **heart** of Kirana POS. It contains the entire
//! checkout pipeline as pure functions with zero I/O dependencies.
//!
//! ## Checkout Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Kirana POS Checkout Flow                       │
//! │                                                                     │
//! │  Catalog feed ──► catalog::normalize ──► CatalogItem                │
//! │                                              │                      │
//! │                                              ▼                      │
//! │  Cart ◄── add / remove / set_quantity ── cashier                    │
//! │    │                                                                │
//! │    │  subtotal / tax / total (Money × TaxRate)                      │
//! │    ▼                                                                │
//! │  PaymentContext ──► reconcile(total) ──► PaymentPlan                │
//! │    │                                                                │
//! │    ▼                                                                │
//! │  checkout::build_transaction ──► Transaction (immutable snapshot)   │
//! │                                       │                             │
//! │                                       ▼                             │
//! │            kirana-db records it atomically (not this crate)         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer paise arithmetic (no floats!)
//! - [`types`] - Domain types (Product, CatalogItem, Transaction, ...)
//! - [`catalog`] - Raw catalog ingestion with coerce-or-zero normalization
//! - [`cart`] - The cart aggregate (merge, clamp, totals)
//! - [`payment`] - Payment reconciliation state machine
//! - [`checkout`] - Builds the immutable transaction snapshot
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output - no hidden state
//! 2. **No I/O**: database and network access is forbidden here
//! 3. **Integer Money**: all amounts are paise (i64), never floats
//! 4. **Explicit Errors**: typed errors, never strings or panics

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod payment;
pub mod types;
pub mod validation;

// Re-exports for convenience: `use kirana_core::Money` instead of
// `use kirana_core::money::Money`.
pub use cart::{Cart, CartLine};
pub use checkout::build_transaction;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use payment::{PaymentContext, PaymentPlan, PaymentState, TenderPolicy};
pub use types::*;

/// Highest product code the admin screens hand out.
///
/// The catalog assigns short numeric codes (1-999) so the cashier can key
/// them in without a barcode scanner.
pub const MAX_PRODUCT_CODE: i64 = 999;

/// Maximum quantity of a single line in a cart.
///
/// Guards against a mistyped quantity (1000 instead of 10) on a single-till
/// counter. Can become per-store configuration later.
pub const MAX_LINE_QUANTITY: i64 = 9999;
