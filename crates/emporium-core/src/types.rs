//! # Domain Types
//!
//! Core domain types used throughout Emporium Admin.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│    Product      │◄──│   Inventory     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  product_id     │       │
//! │  │  name (unique)  │   │  sku (business) │   │  quantity       │       │
//! │  └─────────────────┘   │  price_cents    │   └────────┬────────┘       │
//! │                        └────────▲────────┘            │                │
//! │                                 │            ┌────────▼────────┐       │
//! │  ┌─────────────────┐   ┌────────┴────────┐   │InventoryHistory │       │
//! │  │    Customer     │◄──│      Sale       │   │  change / prev  │       │
//! │  │  ─────────────  │   │  total_cents    │   │  new / reason   │       │
//! │  │  email (unique) │   │  sale_date      │   └─────────────────┘       │
//! │  └─────────────────┘   │  items ─► SaleItem (quantity, unit price)     │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID where one exists: `sku` for products, `email` for customers

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{DEFAULT_PAGE_LIMIT, DEFAULT_SALE_STATUS};

// =============================================================================
// Category
// =============================================================================

/// A product category ("Electronics", "Books", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Input for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    pub description: Option<String>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Category this product belongs to.
    pub category_id: String,

    /// Stock Keeping Unit - business identifier, unique.
    pub sku: String,

    pub image_url: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A product joined with its category name and current stock level.
///
/// This is the shape every product endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub category_id: String,
    pub category_name: String,
    pub sku: String,
    pub image_url: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    /// Units on hand, 0 when the product has no inventory row.
    pub inventory_quantity: i64,
}

/// Input for registering a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    pub category_id: String,
    pub sku: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Sparse update for a product.
///
/// Only fields that are `Some` are written; everything else keeps its
/// stored value. Nullable columns use a nested option so a client can clear
/// them: `"description": null` clears, an absent key leaves it alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[ts(type = "string | null")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[ts(type = "string | null")]
    pub image_url: Option<Option<String>>,
}

impl ProductPatch {
    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.category_id.is_none()
            && self.sku.is_none()
            && self.image_url.is_none()
    }

    /// Applies the present fields onto `product`.
    ///
    /// Returns `true` when at least one field was applied.
    pub fn apply_to(&self, product: &mut Product) -> bool {
        let mut changed = false;

        if let Some(name) = &self.name {
            product.name = name.trim().to_string();
            changed = true;
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
            changed = true;
        }
        if let Some(price_cents) = self.price_cents {
            product.price_cents = price_cents;
            changed = true;
        }
        if let Some(category_id) = &self.category_id {
            product.category_id = category_id.clone();
            changed = true;
        }
        if let Some(sku) = &self.sku {
            product.sku = sku.trim().to_string();
            changed = true;
        }
        if let Some(image_url) = &self.image_url {
            product.image_url = image_url.clone();
            changed = true;
        }

        changed
    }
}

/// Distinguishes `"field": null` (Some(None)) from an absent key (None).
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

// =============================================================================
// Inventory
// =============================================================================

/// Stock record for a product (one per product).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Inventory {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub last_updated: DateTime<Utc>,
}

/// Inventory row joined with product and category details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryItem {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub last_updated: DateTime<Utc>,
    pub product_name: String,
    pub product_sku: String,
    pub product_price_cents: i64,
    pub category_name: String,
}

/// Request to set a product's stock level.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryAdjustment {
    /// New absolute quantity (not a delta).
    pub quantity: i64,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Audit trail entry written on every stock change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryHistoryEntry {
    pub id: String,
    pub inventory_id: String,
    /// `new_quantity - previous_quantity`
    pub quantity_change: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub reason: Option<String>,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub product_name: String,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer who can be attached to sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Input for registering a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: String,
    pub customer_id: Option<String>,
    /// Sum of all line subtotals, in cents.
    pub total_cents: i64,
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,
    pub payment_method: Option<String>,
    pub status: String,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A line item of a sale joined with product details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleItemDetail {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// `unit_price_cents * quantity`
    pub subtotal_cents: i64,
    pub product_name: String,
    pub product_sku: String,
}

/// A sale with its customer name and line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleDetail {
    pub id: String,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub payment_method: Option<String>,
    pub status: String,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,
    pub items: Vec<SaleItemDetail>,
}

impl SaleDetail {
    /// Assembles the response shape from a header row and its lines.
    pub fn from_parts(sale: Sale, customer_name: Option<String>, items: Vec<SaleItemDetail>) -> Self {
        SaleDetail {
            id: sale.id,
            customer_id: sale.customer_id,
            customer_name,
            payment_method: sale.payment_method,
            status: sale.status,
            total_cents: sale.total_cents,
            sale_date: sale.sale_date,
            items,
        }
    }
}

/// One line of a sale being created.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSaleItem {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl NewSaleItem {
    /// Line subtotal (unit price × quantity), `None` on overflow.
    #[inline]
    pub fn subtotal(&self) -> Option<Money> {
        Money::from_cents(self.unit_price_cents).checked_multiply_quantity(self.quantity)
    }
}

/// Input for recording a sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSale {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default = "default_sale_status")]
    pub status: String,
    pub items: Vec<NewSaleItem>,
}

impl NewSale {
    /// Sale total: the sum of all line subtotals, `None` on overflow.
    pub fn total(&self) -> Option<Money> {
        self.items
            .iter()
            .try_fold(Money::zero(), |acc, item| acc.checked_add(item.subtotal()?))
    }
}

fn default_sale_status() -> String {
    DEFAULT_SALE_STATUS.to_string()
}

/// Filters for listing sales. Dates are inclusive calendar days.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub product_id: Option<String>,
    pub category_id: Option<String>,
}

// =============================================================================
// Pagination
// =============================================================================

/// Limit/offset window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        let now = Utc::now();
        Product {
            id: "p-1".to_string(),
            name: "Desk Lamp".to_string(),
            description: Some("Warm light".to_string()),
            price_cents: 2999,
            category_id: "c-1".to_string(),
            sku: "LAMP-01".to_string(),
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_sale_total() {
        let sale = NewSale {
            customer_id: None,
            payment_method: Some("Cash".to_string()),
            status: default_sale_status(),
            items: vec![
                NewSaleItem {
                    product_id: "a".to_string(),
                    quantity: 2,
                    unit_price_cents: 1050,
                },
                NewSaleItem {
                    product_id: "b".to_string(),
                    quantity: 1,
                    unit_price_cents: 399,
                },
            ],
        };
        assert_eq!(sale.total(), Some(Money::from_cents(2499)));
    }

    #[test]
    fn test_new_sale_total_overflow() {
        let line = |quantity, unit_price_cents| NewSaleItem {
            product_id: "a".to_string(),
            quantity,
            unit_price_cents,
        };

        let huge_line = line(10_000_000_000, 10_000_000_000);
        assert_eq!(huge_line.subtotal(), None);

        let sale = NewSale {
            customer_id: None,
            payment_method: None,
            status: default_sale_status(),
            items: vec![line(1, i64::MAX), line(1, 1)],
        };
        assert_eq!(sale.total(), None);
    }

    #[test]
    fn test_new_sale_status_defaults_to_completed() {
        let sale: NewSale = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(sale.status, "completed");
        assert!(sale.customer_id.is_none());
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut product = sample_product();
        let patch = ProductPatch {
            price_cents: Some(3499),
            ..Default::default()
        };

        assert!(patch.apply_to(&mut product));
        assert_eq!(product.price_cents, 3499);
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.description.as_deref(), Some("Warm light"));
    }

    #[test]
    fn test_patch_distinguishes_null_from_absent() {
        let clear: ProductPatch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(clear.description, Some(None));

        let untouched: ProductPatch = serde_json::from_str(r#"{"name": "Lamp"}"#).unwrap();
        assert_eq!(untouched.description, None);

        let mut product = sample_product();
        clear.apply_to(&mut product);
        assert!(product.description.is_none());
    }

    #[test]
    fn test_empty_patch() {
        let patch = ProductPatch::default();
        assert!(patch.is_empty());

        let mut product = sample_product();
        let before = product.clone();
        assert!(!patch.apply_to(&mut product));
        assert_eq!(product, before);
    }

    #[test]
    fn test_page_default() {
        let page = Page::default();
        assert_eq!(page.limit, 100);
        assert_eq!(page.offset, 0);
    }
}
