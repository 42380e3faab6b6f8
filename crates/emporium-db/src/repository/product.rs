//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Filtered, paginated listing joined with category and stock
//! - Create (with its inventory row), sparse update, delete
//!
//! ## Product Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  create(NewProduct)                                                    │
//! │     ├── category must exist ───────────► DbError::NotFound(Category)  │
//! │     ├── INSERT products                 (sku UNIQUE → UniqueViolation) │
//! │     └── INSERT inventory (quantity 0)   same transaction               │
//! │                                                                         │
//! │  update(id, ProductPatch)                                              │
//! │     ├── load ─────────────────────────► NotFound(Product)              │
//! │     ├── patch.apply_to(product)         only present fields            │
//! │     └── UPDATE ... updated_at = now     only when something changed    │
//! │                                                                         │
//! │  delete(id)                                                            │
//! │     └── DELETE products                 inventory + history cascade    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use emporium_core::{NewProduct, Page, Product, ProductDetail, ProductPatch};

/// Columns of [`ProductDetail`], shared by every detail query.
const DETAIL_SELECT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.description,
        p.price_cents,
        p.category_id,
        c.name AS category_name,
        p.sku,
        p.image_url,
        p.created_at,
        p.updated_at,
        COALESCE(i.quantity, 0) AS inventory_quantity
    FROM products p
    INNER JOIN categories c ON c.id = p.category_id
    LEFT JOIN inventory i ON i.product_id = p.id
"#;

/// Optional filters for [`ProductRepository::list`].
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<String>,
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let page = repo.list(&ProductFilter::default(), Page::default()).await?;
/// let product = repo.get_detail("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products ordered by name.
    pub async fn list(&self, filter: &ProductFilter, page: Page) -> DbResult<Vec<ProductDetail>> {
        debug!(
            category_id = ?filter.category_id,
            name = ?filter.name,
            limit = page.limit,
            offset = page.offset,
            "Listing products"
        );

        let sql = format!(
            "{DETAIL_SELECT}
            WHERE (?1 IS NULL OR p.category_id = ?1)
              AND (?2 IS NULL OR lower(p.name) LIKE '%' || lower(?2) || '%')
            ORDER BY p.name
            LIMIT ?3 OFFSET ?4"
        );

        let products = sqlx::query_as::<_, ProductDetail>(&sql)
            .bind(&filter.category_id)
            .bind(&filter.name)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a bare product row by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, category_id, sku,
                   image_url, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product with its category name and stock level.
    pub async fn get_detail(&self, id: &str) -> DbResult<Option<ProductDetail>> {
        let sql = format!("{DETAIL_SELECT} WHERE p.id = ?1");

        let product = sqlx::query_as::<_, ProductDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Returns true when a product with this ID exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Creates a product together with an empty inventory record.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - category does not exist
    /// * `Err(DbError::UniqueViolation)` - SKU already exists
    pub async fn create(&self, new: &NewProduct) -> DbResult<ProductDetail> {
        self.ensure_category(&new.category_id).await?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            description: new.description.clone(),
            price_cents: new.price_cents,
            category_id: new.category_id.clone(),
            sku: new.sku.trim().to_string(),
            image_url: new.image_url.clone(),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, sku = %product.sku, "Inserting product");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price_cents, category_id,
                sku, image_url, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.category_id)
        .bind(&product.sku)
        .bind(&product.image_url)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::from(e).with_value(&product.sku))?;

        sqlx::query(
            "INSERT INTO inventory (id, product_id, quantity, last_updated) VALUES (?1, ?2, 0, ?3)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&product.id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_detail(&product.id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", &product.id))
    }

    /// Applies a sparse update.
    ///
    /// `updated_at` only moves when the patch carries at least one field.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - product or new category missing
    /// * `Err(DbError::UniqueViolation)` - new SKU already taken
    pub async fn update(&self, id: &str, patch: &ProductPatch) -> DbResult<ProductDetail> {
        let mut product = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        if let Some(category_id) = &patch.category_id {
            self.ensure_category(category_id).await?;
        }

        if patch.apply_to(&mut product) {
            product.updated_at = Utc::now();
            debug!(id = %id, "Updating product");

            sqlx::query(
                r#"
                UPDATE products SET
                    name = ?2,
                    description = ?3,
                    price_cents = ?4,
                    category_id = ?5,
                    sku = ?6,
                    image_url = ?7,
                    updated_at = ?8
                WHERE id = ?1
                "#,
            )
            .bind(&product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price_cents)
            .bind(&product.category_id)
            .bind(&product.sku)
            .bind(&product.image_url)
            .bind(product.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from(e).with_value(&product.sku))?;
        }

        self.get_detail(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product. Inventory and its history cascade.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn ensure_category(&self, category_id: &str) -> DbResult<()> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM categories WHERE id = ?1")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;

        match found {
            Some(_) => Ok(()),
            None => Err(DbError::not_found("Category", category_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use emporium_core::{Category, NewCategory};

    async fn setup() -> (Database, Category) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db
            .categories()
            .insert(&NewCategory {
                name: "Electronics".to_string(),
                description: None,
            })
            .await
            .unwrap();
        (db, category)
    }

    fn new_product(category_id: &str, name: &str, sku: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: Some("Test product".to_string()),
            price_cents: 1999,
            category_id: category_id.to_string(),
            sku: sku.to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_adds_inventory_row() {
        let (db, category) = setup().await;

        let product = db
            .products()
            .create(&new_product(&category.id, "Wireless Mouse", "ELEC-0001"))
            .await
            .unwrap();

        assert_eq!(product.category_name, "Electronics");
        assert_eq!(product.inventory_quantity, 0);
        assert!(db.inventory().get_by_product(&product.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_category_and_duplicate_sku() {
        let (db, category) = setup().await;
        let repo = db.products();

        let err = repo
            .create(&new_product("missing", "Mouse", "ELEC-0001"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Category"));

        repo.create(&new_product(&category.id, "Mouse", "ELEC-0001"))
            .await
            .unwrap();
        let err = repo
            .create(&new_product(&category.id, "Other Mouse", "ELEC-0001"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "ELEC-0001"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_filters_by_name_case_insensitively() {
        let (db, category) = setup().await;
        let repo = db.products();
        repo.create(&new_product(&category.id, "USB Cable", "ELEC-0002"))
            .await
            .unwrap();
        repo.create(&new_product(&category.id, "Wireless Mouse", "ELEC-0001"))
            .await
            .unwrap();

        let filter = ProductFilter {
            name: Some("mouse".to_string()),
            ..Default::default()
        };
        let found = repo.list(&filter, Page::default()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sku, "ELEC-0001");

        let all = repo.list(&ProductFilter::default(), Page::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["USB Cable", "Wireless Mouse"]);

        let second = repo
            .list(&ProductFilter::default(), Page { limit: 1, offset: 1 })
            .await
            .unwrap();
        assert_eq!(second[0].name, "Wireless Mouse");
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let (db, category) = setup().await;
        let repo = db.products();
        let created = repo
            .create(&new_product(&category.id, "Mouse", "ELEC-0001"))
            .await
            .unwrap();

        let patch: ProductPatch =
            serde_json::from_str(r#"{"price_cents": 2499, "description": null}"#).unwrap();
        let updated = repo.update(&created.id, &patch).await.unwrap();

        assert_eq!(updated.price_cents, 2499);
        assert!(updated.description.is_none());
        assert_eq!(updated.name, "Mouse");
        assert!(updated.updated_at >= created.updated_at);

        let unchanged = repo.update(&created.id, &ProductPatch::default()).await.unwrap();
        assert_eq!(unchanged.updated_at, updated.updated_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_product() {
        let (db, _) = setup().await;
        let repo = db.products();

        let err = repo.update("missing", &ProductPatch::default()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = repo.delete("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_cascades_inventory() {
        let (db, category) = setup().await;
        let created = db
            .products()
            .create(&new_product(&category.id, "Mouse", "ELEC-0001"))
            .await
            .unwrap();

        db.products().delete(&created.id).await.unwrap();

        assert!(db.products().get_detail(&created.id).await.unwrap().is_none());
        assert!(db.inventory().get_by_product(&created.id).await.unwrap().is_none());
    }
}
