//! # POS Session
//!
//! The state of one till: the cart being rung up, the payment fields the
//! operator has entered, and the database handle to record against.
//!
//! ## Checkout Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  checkout()                                                         │
//! │      │                                                              │
//! │      ├── build_transaction()  ── validation error ──► state kept    │
//! │      │                                                              │
//! │      ├── db.transactions().record()  ── db error ──► state kept     │
//! │      │                                                              │
//! │      └── Ok ──► cart.clear() + payment.reset() ──► Transaction      │
//! │                                                                     │
//! │  The cart is cleared and the payment fields reset ONLY after the    │
//! │  write confirms. Any failure leaves the sale exactly as entered.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

use kirana_core::{
    build_transaction, Cart, CartLine, CatalogItem, Money, PaymentContext, PaymentMode,
    PaymentState, TenderPolicy, Transaction,
};
use kirana_db::Database;

use crate::error::{PosError, PosResult};

/// One till's in-progress sale plus its database handle.
pub struct PosSession {
    db: Database,
    cart: Cart,
    payment: PaymentContext,
    policy: TenderPolicy,
}

impl PosSession {
    /// Creates a session with the store's default tender policy.
    pub fn new(db: Database) -> Self {
        Self::with_policy(db, TenderPolicy::default())
    }

    /// Creates a session with an explicit tender policy.
    pub fn with_policy(db: Database, policy: TenderPolicy) -> Self {
        PosSession {
            db,
            cart: Cart::new(),
            payment: PaymentContext::new(),
            policy,
        }
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// Searches the catalog by name substring or exact short code.
    pub async fn search_catalog(&self, query: &str, limit: i64) -> PosResult<Vec<CatalogItem>> {
        let products = self.db.products().search(query, limit).await?;
        Ok(products.iter().map(|p| p.to_catalog_item()).collect())
    }

    /// Lists the whole catalog in short-code order.
    pub async fn list_catalog(&self) -> PosResult<Vec<CatalogItem>> {
        let products = self.db.products().list_all().await?;
        Ok(products.iter().map(|p| p.to_catalog_item()).collect())
    }

    /// Looks up one catalog item by short code.
    pub async fn find_by_code(&self, code: i64) -> PosResult<CatalogItem> {
        let product = self
            .db
            .products()
            .get_by_code(code)
            .await?
            .ok_or(PosError::UnknownCode(code))?;
        Ok(product.to_catalog_item())
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Adds a catalog item to the cart (merges onto an existing line).
    pub fn add_to_cart(&mut self, item: &CatalogItem) {
        self.cart.add(item);
    }

    /// Adds by short code: lookup plus add.
    pub async fn add_by_code(&mut self, code: i64) -> PosResult<CatalogItem> {
        let item = self.find_by_code(code).await?;
        self.cart.add(&item);
        Ok(item)
    }

    /// Removes a line. Unknown ids are a no-op.
    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.remove(product_id);
    }

    /// Sets a line's quantity, clamped to at least 1.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        self.cart.set_quantity(product_id, quantity);
    }

    /// The cart lines in ring-up order.
    pub fn cart_lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn cart_is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn cart_subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    pub fn cart_tax(&self) -> Money {
        self.cart.tax()
    }

    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    // -------------------------------------------------------------------------
    // Payment fields
    // -------------------------------------------------------------------------

    pub fn set_payment_mode(&mut self, mode: PaymentMode) {
        self.payment.mode = Some(mode);
    }

    pub fn set_customer_name(&mut self, name: &str) {
        self.payment.customer_name = name.to_string();
    }

    pub fn set_customer_phone(&mut self, phone: &str) {
        self.payment.customer_phone = phone.to_string();
    }

    /// Records the cash handed over, in paise.
    pub fn set_tendered(&mut self, paise: i64) {
        self.payment.tendered_paise = Some(paise);
    }

    /// Where the payment entry sits in the state machine, for display.
    pub fn payment_state(&self) -> PaymentState {
        self.payment.state()
    }

    pub fn payment(&self) -> &PaymentContext {
        &self.payment
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Completes the sale: builds the transaction, records it atomically,
    /// and only then clears the cart and resets the payment fields.
    ///
    /// On any error the session state is exactly as the operator left it.
    pub async fn checkout(&mut self) -> PosResult<Transaction> {
        let txn = build_transaction(&self.cart, &self.payment, &self.policy)?;

        self.db.transactions().record(&txn).await?;

        // only after the write confirms
        self.cart.clear();
        self.payment.reset();

        info!(id = %txn.id, total = %txn.total(), "Checkout complete");
        Ok(txn)
    }

    /// Abandons the sale in progress without recording anything.
    pub fn cancel_sale(&mut self) {
        self.cart.clear();
        self.payment.reset();
    }

    /// The most recently recorded sales, newest first (day-end view).
    /// Headers only; items are not loaded.
    pub async fn recent_transactions(&self, limit: i64) -> PosResult<Vec<Transaction>> {
        Ok(self.db.transactions().list_recent(limit).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
