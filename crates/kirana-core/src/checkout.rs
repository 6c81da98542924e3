//! # Checkout
//!
//! Builds the immutable [`Transaction`] snapshot from a cart and a
//! reconciled payment context.
//!
//! This is the pure half of the recorder: it validates the preconditions,
//! freezes every line with its price, tax rate and line total at this
//! moment, and hands back a value ready for atomic persistence. The I/O
//! half (a single SQL transaction) lives in kirana-db; the session layer
//! clears the cart only after that write confirms.

use chrono::Utc;
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::payment::{PaymentContext, TenderPolicy};
use crate::types::{Transaction, TransactionItem};
use crate::validation::{validate_customer_name, validate_customer_phone};

/// Builds a transaction from the cart and payment context.
///
/// ## Preconditions
/// - The cart has at least one line
/// - The payment context reconciles (mode + customer fields present,
///   valid tender for CASH)
///
/// ## Guarantees
/// - Pure: failure leaves both arguments untouched, so the operator can
///   correct input and retry without re-entering the sale
/// - Items are snapshots in cart order; later catalog edits cannot
///   retroactively change this record
pub fn build_transaction(
    cart: &Cart,
    payment: &PaymentContext,
    policy: &TenderPolicy,
) -> CoreResult<Transaction> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let total = cart.total();
    let plan = payment.reconcile(total, policy)?;

    let customer_name = validate_customer_name(&payment.customer_name)?;
    let customer_phone = validate_customer_phone(&payment.customer_phone)?;

    let transaction_id = Uuid::new_v4().to_string();
    let items = cart
        .lines()
        .iter()
        .map(|line| TransactionItem {
            id: Uuid::new_v4().to_string(),
            transaction_id: transaction_id.clone(),
            product_id: line.product_id.clone(),
            product_name: line.name.clone(),
            quantity: line.quantity,
            unit_price_paise: line.unit_price_paise,
            tax_rate_bps: line.tax_rate_bps,
            line_total_paise: line.total().paise(),
        })
        .collect();

    Ok(Transaction {
        id: transaction_id,
        customer_name,
        customer_phone,
        payment_mode: plan.mode,
        total_paise: total.paise(),
        paid_paise: plan.paid.paise(),
        balance_paise: plan.change.paise(),
        items,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogItem, PaymentMode};

    fn item(id: &str, price_paise: i64, tax_bps: u32) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            code: 7,
            unit_price_paise: price_paise,
            tax_rate_bps: tax_bps,
        }
    }

    fn cash_context(tendered_paise: i64) -> PaymentContext {
        PaymentContext {
            mode: Some(PaymentMode::Cash),
            customer_name: "Ravi".to_string(),
            customer_phone: "9000000000".to_string(),
            tendered_paise: Some(tendered_paise),
        }
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cart = Cart::new();
        let err =
            build_transaction(&cart, &cash_context(10000), &TenderPolicy::default()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }

    /// Reference checkout: [{₹100.00, qty 2, 18%}] paid CASH ₹300
    /// ⇒ total 236.00, paid 300.00, balance 64.00.
    #[test]
    fn test_cash_checkout_reference_example() {
        let mut cart = Cart::new();
        let i = item("p1", 10000, 1800);
        cart.add(&i);
        cart.add(&i);

        let txn =
            build_transaction(&cart, &cash_context(30000), &TenderPolicy::default()).unwrap();

        assert_eq!(txn.total_paise, 23600);
        assert_eq!(txn.paid_paise, 30000);
        assert_eq!(txn.balance_paise, 6400);
        assert_eq!(txn.payment_mode, PaymentMode::Cash);
        assert_eq!(txn.items.len(), 1);
        assert_eq!(txn.items[0].quantity, 2);
        assert_eq!(txn.items[0].line_total_paise, 23600);
    }

    #[test]
    fn test_card_checkout_pays_exact_total() {
        let mut cart = Cart::new();
        let i = item("p1", 10000, 1800);
        cart.add(&i);
        cart.add(&i);

        let ctx = PaymentContext {
            mode: Some(PaymentMode::Card),
            customer_name: "Ravi".to_string(),
            customer_phone: "9000000000".to_string(),
            tendered_paise: None,
        };
        let txn = build_transaction(&cart, &ctx, &TenderPolicy::default()).unwrap();

        assert_eq!(txn.paid_paise, 23600);
        assert_eq!(txn.balance_paise, 0);
    }

    #[test]
    fn test_items_snapshot_cart_order() {
        let mut cart = Cart::new();
        cart.add(&item("b", 5000, 0));
        cart.add(&item("a", 2500, 500));

        let txn =
            build_transaction(&cart, &cash_context(10000), &TenderPolicy::default()).unwrap();

        assert_eq!(txn.items[0].product_id, "b");
        assert_eq!(txn.items[1].product_id, "a");
        assert!(txn.items.iter().all(|i| i.transaction_id == txn.id));
    }

    #[test]
    fn test_failure_leaves_cart_untouched() {
        let mut cart = Cart::new();
        cart.add(&item("a", 5000, 0));

        let incomplete = PaymentContext::new();
        assert!(build_transaction(&cart, &incomplete, &TenderPolicy::default()).is_err());

        // The cart is unchanged and a corrected retry succeeds.
        assert_eq!(cart.item_count(), 1);
        assert!(build_transaction(&cart, &cash_context(5000), &TenderPolicy::default()).is_ok());
    }

    #[test]
    fn test_invalid_phone_blocks_checkout() {
        let mut cart = Cart::new();
        cart.add(&item("a", 5000, 0));

        let mut ctx = cash_context(5000);
        ctx.customer_phone = "call me maybe".to_string();
        let err = build_transaction(&cart, &ctx, &TenderPolicy::default()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_customer_fields_trimmed() {
        let mut cart = Cart::new();
        cart.add(&item("a", 5000, 0));

        let mut ctx = cash_context(5000);
        ctx.customer_name = "  Ravi  ".to_string();
        let txn = build_transaction(&cart, &ctx, &TenderPolicy::default()).unwrap();
        assert_eq!(txn.customer_name, "Ravi");
    }
}
