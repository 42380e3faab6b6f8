//! # Inventory Repository
//!
//! Stock levels and their audit trail.
//!
//! ## Stock Update Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Absolute Set + History Row                           │
//! │                                                                         │
//! │  PUT /inventory/{product_id}  { quantity: 25, reason: "restock" }      │
//! │       │                                                                 │
//! │       ▼  (one transaction)                                             │
//! │  SELECT inventory WHERE product_id = ?     previous = 10               │
//! │  UPDATE inventory SET quantity = 25, last_updated = now                │
//! │  INSERT inventory_history (change +15, previous 10, new 25, reason)    │
//! │                                                                         │
//! │  The admin sets counted stock; the history row keeps the delta.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use emporium_core::{Inventory, InventoryAdjustment, InventoryHistoryEntry, InventoryItem, Page};

const ITEM_SELECT: &str = r#"
    SELECT
        i.id,
        i.product_id,
        i.quantity,
        i.last_updated,
        p.name AS product_name,
        p.sku AS product_sku,
        p.price_cents AS product_price_cents,
        c.name AS category_name
    FROM inventory i
    INNER JOIN products p ON p.id = i.product_id
    INNER JOIN categories c ON c.id = p.category_id
"#;

/// Repository for inventory database operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Lists stock ordered by quantity ascending (emptiest first).
    pub async fn list(&self, category_id: Option<&str>, page: Page) -> DbResult<Vec<InventoryItem>> {
        debug!(category_id = ?category_id, limit = page.limit, "Listing inventory");

        let sql = format!(
            "{ITEM_SELECT}
            WHERE (?1 IS NULL OR p.category_id = ?1)
            ORDER BY i.quantity, p.name
            LIMIT ?2 OFFSET ?3"
        );

        let items = sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(category_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Lists items with `quantity <= threshold`.
    pub async fn low_stock(&self, threshold: i64, category_id: Option<&str>) -> DbResult<Vec<InventoryItem>> {
        debug!(threshold, category_id = ?category_id, "Listing low stock");

        let sql = format!(
            "{ITEM_SELECT}
            WHERE i.quantity <= ?1
              AND (?2 IS NULL OR p.category_id = ?2)
            ORDER BY i.quantity, p.name"
        );

        let items = sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(threshold)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Gets the raw inventory record of a product.
    pub async fn get_by_product(&self, product_id: &str) -> DbResult<Option<Inventory>> {
        let inventory = sqlx::query_as::<_, Inventory>(
            "SELECT id, product_id, quantity, last_updated FROM inventory WHERE product_id = ?1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(inventory)
    }

    /// Gets the joined inventory view of a product.
    pub async fn get_item(&self, product_id: &str) -> DbResult<Option<InventoryItem>> {
        let sql = format!("{ITEM_SELECT} WHERE i.product_id = ?1");

        let item = sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Sets the stock level of a product and records the change.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - the product has no inventory record
    pub async fn set_quantity(
        &self,
        product_id: &str,
        adjustment: &InventoryAdjustment,
    ) -> DbResult<InventoryItem> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Inventory>(
            "SELECT id, product_id, quantity, last_updated FROM inventory WHERE product_id = ?1",
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Inventory", product_id))?;

        let now = Utc::now();
        let change = adjustment.quantity - current.quantity;

        debug!(
            product_id = %product_id,
            previous = current.quantity,
            new = adjustment.quantity,
            "Setting stock level"
        );

        sqlx::query("UPDATE inventory SET quantity = ?2, last_updated = ?3 WHERE id = ?1")
            .bind(&current.id)
            .bind(adjustment.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO inventory_history (
                id, inventory_id, quantity_change, previous_quantity,
                new_quantity, reason, timestamp
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&current.id)
        .bind(change)
        .bind(current.quantity)
        .bind(adjustment.quantity)
        .bind(&adjustment.reason)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_item(product_id)
            .await?
            .ok_or_else(|| DbError::not_found("Inventory", product_id))
    }

    /// History entries of a product, newest first.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - the product has no inventory record
    pub async fn history(&self, product_id: &str) -> DbResult<Vec<InventoryHistoryEntry>> {
        if self.get_by_product(product_id).await?.is_none() {
            return Err(DbError::not_found("Inventory", product_id));
        }

        let entries = sqlx::query_as::<_, InventoryHistoryEntry>(
            r#"
            SELECT
                h.id,
                h.inventory_id,
                h.quantity_change,
                h.previous_quantity,
                h.new_quantity,
                h.reason,
                h.timestamp,
                p.name AS product_name
            FROM inventory_history h
            INNER JOIN inventory i ON i.id = h.inventory_id
            INNER JOIN products p ON p.id = i.product_id
            WHERE i.product_id = ?1
            ORDER BY h.timestamp DESC, h.rowid DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
