//! # Sale Repository
//!
//! Database operations for sales and sale items, plus the revenue engine's
//! `SalesSource`.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. CHECK REFERENCES                                                   │
//! │     └── customer (when given) and every product must exist            │
//! │                                                                         │
//! │  2. INSERT (one transaction)                                           │
//! │     └── sales row: total = Σ unit_price × quantity                     │
//! │     └── sale_items rows: subtotal per line                             │
//! │                                                                         │
//! │  3. FETCH                                                              │
//! │     └── get_detail() → SaleDetail with customer and product names      │
//! │                                                                         │
//! │  Sales are never edited afterwards; revenue reads them as snapshots.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use emporium_core::revenue::{DateRange, SaleSnapshot, SalesSource};
use emporium_core::validation::validate_new_sale;
use emporium_core::{Money, NewSale, Page, Sale, SaleDetail, SaleFilter, SaleItemDetail, ValidationError};

/// Sale header joined with the customer's name.
#[derive(Debug, sqlx::FromRow)]
struct SaleHeaderRow {
    #[sqlx(flatten)]
    sale: Sale,
    customer_name: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct SnapshotRow {
    id: String,
    total_cents: i64,
    sale_date: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct LineQuantityRow {
    sale_id: String,
    quantity: i64,
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Lists sales, newest first.
    ///
    /// ## Filters
    /// - `start_date` / `end_date`: inclusive calendar days
    /// - `product_id` / `category_id`: sales with at least one matching line,
    ///   each sale listed once
    pub async fn list(&self, filter: &SaleFilter, page: Page) -> DbResult<Vec<SaleDetail>> {
        debug!(?filter, limit = page.limit, offset = page.offset, "Listing sales");

        let headers = sqlx::query_as::<_, SaleHeaderRow>(
            r#"
            SELECT
                s.id, s.customer_id, s.total_cents, s.sale_date,
                s.payment_method, s.status,
                c.name AS customer_name
            FROM sales s
            LEFT JOIN customers c ON c.id = s.customer_id
            WHERE (?1 IS NULL OR date(s.sale_date) >= ?1)
              AND (?2 IS NULL OR date(s.sale_date) <= ?2)
              AND (?3 IS NULL OR EXISTS (
                    SELECT 1 FROM sale_items si
                    WHERE si.sale_id = s.id AND si.product_id = ?3))
              AND (?4 IS NULL OR EXISTS (
                    SELECT 1 FROM sale_items si
                    INNER JOIN products p ON p.id = si.product_id
                    WHERE si.sale_id = s.id AND p.category_id = ?4))
            ORDER BY s.sale_date DESC
            LIMIT ?5 OFFSET ?6
            "#,
        )
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(&filter.product_id)
        .bind(&filter.category_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        let mut sales = Vec::with_capacity(headers.len());
        for header in headers {
            let items = self.items(&header.sale.id).await?;
            sales.push(SaleDetail::from_parts(header.sale, header.customer_name, items));
        }

        Ok(sales)
    }

    /// Gets a sale with its customer and line items.
    pub async fn get_detail(&self, id: &str) -> DbResult<Option<SaleDetail>> {
        let header = sqlx::query_as::<_, SaleHeaderRow>(
            r#"
            SELECT
                s.id, s.customer_id, s.total_cents, s.sale_date,
                s.payment_method, s.status,
                c.name AS customer_name
            FROM sales s
            LEFT JOIN customers c ON c.id = s.customer_id
            WHERE s.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match header {
            Some(header) => {
                let items = self.items(&header.sale.id).await?;
                Ok(Some(SaleDetail::from_parts(header.sale, header.customer_name, items)))
            }
            None => Ok(None),
        }
    }

    /// Line items of a sale with product name and SKU.
    pub async fn items(&self, sale_id: &str) -> DbResult<Vec<SaleItemDetail>> {
        let items = sqlx::query_as::<_, SaleItemDetail>(
            r#"
            SELECT
                si.id, si.sale_id, si.product_id, si.quantity,
                si.unit_price_cents, si.subtotal_cents,
                p.name AS product_name,
                p.sku AS product_sku
            FROM sale_items si
            INNER JOIN products p ON p.id = si.product_id
            WHERE si.sale_id = ?1
            ORDER BY p.name
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Records a sale dated now.
    pub async fn create(&self, new: &NewSale) -> DbResult<SaleDetail> {
        self.create_at(new, Utc::now()).await
    }

    /// Records a sale with an explicit date (used for backfilled data).
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - no lines, a non-positive value, or cents overflow
    /// * `Err(DbError::NotFound)` - customer or a product does not exist
    pub async fn create_at(&self, new: &NewSale, sale_date: DateTime<Utc>) -> DbResult<SaleDetail> {
        validate_new_sale(new)?;
        let total: Money = new.total().ok_or_else(|| cents_out_of_range("total"))?;

        if let Some(customer_id) = &new.customer_id {
            self.ensure_exists("customers", "Customer", customer_id).await?;
        }
        for item in &new.items {
            self.ensure_exists("products", "Product", &item.product_id).await?;
        }

        let sale_id = Uuid::new_v4().to_string();

        debug!(id = %sale_id, total = %total, lines = new.items.len(), "Inserting sale");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales (id, customer_id, total_cents, sale_date, payment_method, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&sale_id)
        .bind(&new.customer_id)
        .bind(total.cents())
        .bind(sale_date)
        .bind(&new.payment_method)
        .bind(&new.status)
        .execute(&mut *tx)
        .await?;

        for item in &new.items {
            let subtotal = item.subtotal().ok_or_else(|| cents_out_of_range("subtotal"))?;
            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    id, sale_id, product_id, quantity, unit_price_cents, subtotal_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&sale_id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(subtotal.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_detail(&sale_id)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", &sale_id))
    }

    /// Counts sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Sales dated within `range`, optionally restricted to sales touching a
    /// category, with every line's quantity.
    pub async fn snapshots(&self, range: DateRange, category_id: Option<&str>) -> DbResult<Vec<SaleSnapshot>> {
        debug!(start = %range.start, end = %range.end, category_id = ?category_id, "Loading sales for revenue");

        // sale_date is RFC3339 UTC text, so plain string comparison keeps
        // idx_sales_date usable
        let (from, until) = range.utc_bounds();

        let rows = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT s.id, s.total_cents, s.sale_date
            FROM sales s
            WHERE s.sale_date >= ?1
              AND (?2 IS NULL OR s.sale_date < ?2)
              AND (?3 IS NULL OR EXISTS (
                    SELECT 1 FROM sale_items si
                    INNER JOIN products p ON p.id = si.product_id
                    WHERE si.sale_id = s.id AND p.category_id = ?3))
            "#,
        )
        .bind(from)
        .bind(until)
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        let lines = sqlx::query_as::<_, LineQuantityRow>(
            r#"
            SELECT si.sale_id, si.quantity
            FROM sale_items si
            INNER JOIN sales s ON s.id = si.sale_id
            WHERE s.sale_date >= ?1
              AND (?2 IS NULL OR s.sale_date < ?2)
              AND (?3 IS NULL OR EXISTS (
                    SELECT 1 FROM sale_items ci
                    INNER JOIN products p ON p.id = ci.product_id
                    WHERE ci.sale_id = s.id AND p.category_id = ?3))
            "#,
        )
        .bind(from)
        .bind(until)
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        let mut quantities: HashMap<String, Vec<i64>> = HashMap::new();
        for line in lines {
            quantities.entry(line.sale_id).or_default().push(line.quantity);
        }

        let snapshots: Vec<SaleSnapshot> = rows
            .into_iter()
            .map(|row| SaleSnapshot {
                line_quantities: quantities.remove(&row.id).unwrap_or_default(),
                id: row.id,
                total: Money::from_cents(row.total_cents),
                occurred_at: row.sale_date,
            })
            .collect();

        debug!(count = snapshots.len(), "Loaded sales for revenue");
        Ok(snapshots)
    }

    async fn ensure_exists(&self, table: &'static str, entity: &'static str, id: &str) -> DbResult<()> {
        let sql = format!("SELECT 1 FROM {table} WHERE id = ?1");
        let found: Option<i64> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match found {
            Some(_) => Ok(()),
            None => Err(DbError::not_found(entity, id)),
        }
    }
}

fn cents_out_of_range(field: &str) -> DbError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: 1,
        max: i64::MAX,
    }
    .into()
}

// =============================================================================
// Revenue Source
// =============================================================================

impl SalesSource for SaleRepository {
    type Error = DbError;

    fn fetch_sales(
        &self,
        range: DateRange,
        category_id: Option<&str>,
    ) -> impl Future<Output = Result<Vec<SaleSnapshot>, DbError>> + Send {
        let category_id = category_id.map(str::to_string);
        async move { self.snapshots(range, category_id.as_deref()).await }
    }

    fn category_name(&self, category_id: &str) -> impl Future<Output = Result<Option<String>, DbError>> + Send {
        let category_id = category_id.to_string();
        async move {
            let name: Option<String> = sqlx::query_scalar("SELECT name FROM categories WHERE id = ?1")
                .bind(&category_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(name)
        }
    }
}
