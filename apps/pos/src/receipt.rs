//! # Receipt Rendering
//!
//! Plain-text invoice for a recorded transaction, sized for a 40-column
//! thermal printer.
//!
//! ```text
//! ========================================
//!             KIRANA STORE
//! ========================================
//! Invoice: 3f2a...            28 Aug 2026
//! Customer: Asha (9876543210)
//! ----------------------------------------
//! Basmati Rice 5kg
//!   2 x ₹100.00  GST 18%          ₹236.00
//! ----------------------------------------
//! TOTAL                           ₹236.00
//! PAID (CASH)                     ₹300.00
//! CHANGE                           ₹64.00
//! ========================================
//! ```

use kirana_core::{PaymentMode, TaxRate, Transaction};

const WIDTH: usize = 40;

/// Renders a transaction as a printable receipt.
pub fn render(txn: &Transaction, store_name: &str) -> String {
    let mut out = String::new();
    let rule = "=".repeat(WIDTH);
    let thin = "-".repeat(WIDTH);

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&center(store_name));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    let short_id: String = txn.id.chars().take(8).collect();
    out.push_str(&two_col(
        &format!("Invoice: {}", short_id),
        &txn.created_at.format("%d %b %Y %H:%M").to_string(),
    ));
    out.push('\n');
    out.push_str(&format!(
        "Customer: {} ({})\n",
        txn.customer_name, txn.customer_phone
    ));
    out.push_str(&thin);
    out.push('\n');

    for item in &txn.items {
        out.push_str(&item.product_name);
        out.push('\n');
        let detail = format!(
            "  {} x {}  GST {}%",
            item.quantity,
            item.unit_price(),
            TaxRate::from_bps(item.tax_rate_bps).percentage(),
        );
        out.push_str(&two_col(&detail, &item.line_total().to_string()));
        out.push('\n');
    }

    out.push_str(&thin);
    out.push('\n');
    out.push_str(&two_col("TOTAL", &txn.total().to_string()));
    out.push('\n');
    out.push_str(&two_col(
        &format!("PAID ({})", txn.payment_mode),
        &txn.paid().to_string(),
    ));
    out.push('\n');
    if txn.payment_mode == PaymentMode::Cash {
        out.push_str(&two_col("CHANGE", &txn.balance().to_string()));
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');

    out
}

fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= WIDTH {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((WIDTH - len) / 2), text)
}

fn two_col(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    if used >= WIDTH {
        return format!("{} {}", left, right);
    }
    format!("{}{}{}", left, " ".repeat(WIDTH - used), right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kirana_core::TransactionItem;

    fn sample() -> Transaction {
        Transaction {
            id: "3f2a9b10-aaaa-bbbb-cccc-000000000000".into(),
            customer_name: "Asha".into(),
            customer_phone: "9876543210".into(),
            payment_mode: PaymentMode::Cash,
            total_paise: 23600,
            paid_paise: 30000,
            balance_paise: 6400,
            items: vec![TransactionItem {
                id: "i1".into(),
                transaction_id: "3f2a9b10".into(),
                product_id: "p1".into(),
                product_name: "Basmati Rice 5kg".into(),
                quantity: 2,
                unit_price_paise: 10000,
                tax_rate_bps: 1800,
                line_total_paise: 23600,
            }],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_cash_receipt_shows_change() {
        let receipt = render(&sample(), "KIRANA STORE");
        assert!(receipt.contains("KIRANA STORE"));
        assert!(receipt.contains("Basmati Rice 5kg"));
        assert!(receipt.contains("₹236.00"));
        assert!(receipt.contains("PAID (CASH)"));
        assert!(receipt.contains("CHANGE"));
        assert!(receipt.contains("₹64.00"));
    }

    #[test]
    fn test_card_receipt_omits_change() {
        let mut txn = sample();
        txn.payment_mode = PaymentMode::Card;
        txn.paid_paise = 23600;
        txn.balance_paise = 0;

        let receipt = render(&txn, "KIRANA STORE");
        assert!(receipt.contains("PAID (CARD)"));
        assert!(!receipt.contains("CHANGE"));
    }

    #[test]
    fn test_two_col_pads_to_width() {
        let line = two_col("TOTAL", "₹236.00");
        assert_eq!(line.chars().count(), WIDTH);
    }
}
