//! # Transaction Repository
//!
//! Database operations for completed sales.
//!
//! ## Recording Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Atomic Transaction Recording                         │
//! │                                                                         │
//! │  record(&txn)                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN ─── INSERT header ─── INSERT item 1 ─── ... ─── COMMIT           │
//! │                    │               │                                    │
//! │                    └── any failure ┴──► ROLLBACK (nothing persisted)    │
//! │                                                                         │
//! │  The caller only clears its cart after record() returns Ok, so a       │
//! │  failed write leaves both the database and the session unchanged.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transactions are append-only. There is no update or delete path.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use kirana_core::types::{PaymentMode, Transaction, TransactionItem};

/// Repository for recorded sale operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Records a completed transaction: header and every item in one SQL
    /// transaction.
    ///
    /// Either the whole sale lands or nothing does. Item rows carry a
    /// `position` column so the invoice replays lines in cart order.
    pub async fn record(&self, txn: &Transaction) -> DbResult<()> {
        debug!(
            id = %txn.id,
            items = txn.items.len(),
            total_paise = txn.total_paise,
            "Recording transaction"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, customer_name, customer_phone, payment_mode,
                total_paise, paid_paise, balance_paise, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&txn.id)
        .bind(&txn.customer_name)
        .bind(&txn.customer_phone)
        .bind(txn.payment_mode)
        .bind(txn.total_paise)
        .bind(txn.paid_paise)
        .bind(txn.balance_paise)
        .bind(txn.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        for (position, item) in txn.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO transaction_items (
                    id, transaction_id, product_id, product_name,
                    quantity, unit_price_paise, tax_rate_bps, line_total_paise,
                    position
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(&item.id)
            .bind(&item.transaction_id)
            .bind(&item.product_id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.unit_price_paise)
            .bind(item.tax_rate_bps)
            .bind(item.line_total_paise)
            .bind(position as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        }

        tx.commit().await?;

        info!(id = %txn.id, total_paise = txn.total_paise, "Transaction recorded");
        Ok(())
    }

    /// Gets a transaction by ID, items in cart order.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let header = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, TransactionItem>(
            r#"
            SELECT id, transaction_id, product_id, product_name,
                   quantity, unit_price_paise, tax_rate_bps, line_total_paise
            FROM transaction_items
            WHERE transaction_id = ?1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(header.into_transaction(items)))
    }

    /// Lists the most recent transaction headers (items not loaded).
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<Transaction>> {
        let headers = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions ORDER BY created_at DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(headers
            .into_iter()
            .map(|row| row.into_transaction(Vec::new()))
            .collect())
    }

    /// Counts all recorded transactions.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Header row; items are loaded separately and attached.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: String,
    customer_name: String,
    customer_phone: String,
    payment_mode: PaymentMode,
    total_paise: i64,
    paid_paise: i64,
    balance_paise: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TransactionRow {
    fn into_transaction(self, items: Vec<TransactionItem>) -> Transaction {
        Transaction {
            id: self.id,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            payment_mode: self.payment_mode,
            total_paise: self.total_paise,
            paid_paise: self.paid_paise,
            balance_paise: self.balance_paise,
            items,
            created_at: self.created_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
