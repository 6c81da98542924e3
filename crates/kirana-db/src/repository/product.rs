//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! The POS screen loads products through [`ProductRepository::list_all`] or
//! [`ProductRepository::search`], converts them to catalog items with
//! `Product::to_catalog_item()`, and never writes back. Catalog writes come
//! only from the admin tooling and the seed binary.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use kirana_core::types::Product;

/// Repository for product catalog operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product.
    ///
    /// Fails with [`crate::DbError::UniqueViolation`] if the short code is
    /// taken.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, code = product.code, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, code, description,
                selling_price_paise, production_price_paise, tax_rate_bps,
                total_qty, alert_qty,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.code)
        .bind(&product.description)
        .bind(product.selling_price_paise)
        .bind(product.production_price_paise)
        .bind(product.tax_rate_bps)
        .bind(product.total_qty)
        .bind(product.alert_qty)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its short key-in code.
    pub async fn get_by_code(&self, code: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE code = ?1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists the whole catalog, ordered by short code.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Searches products by name substring or exact short code.
    ///
    /// A numeric query matches the short code exactly; any query matches
    /// the name case-insensitively as a substring.
    pub async fn search(&self, query: &str, limit: i64) -> DbResult<Vec<Product>> {
        let query = query.trim();
        let code: i64 = query.parse().unwrap_or(-1);
        let pattern = format!("%{}%", query);

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE name LIKE ?1 COLLATE NOCASE OR code = ?2
            ORDER BY code
            LIMIT ?3
            "#,
        )
        .bind(&pattern)
        .bind(code)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
