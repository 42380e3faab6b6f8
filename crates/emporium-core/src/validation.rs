//! # Validation Module
//!
//! Input validation utilities for Emporium Admin.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extraction (axum)                                       │
//! │  ├── Type validation (deserialization of JSON / query strings)         │
//! │  └── Malformed dates rejected before a handler runs                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE: Business rule validation                        │
//! │  ├── Lengths, positivity, page bounds                                  │
//! │  └── Sale shape (at least one line item)                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints (price > 0, quantity >= 0)                      │
//! │  ├── UNIQUE constraints (sku, category name)                           │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use emporium_core::validation::{validate_sku, validate_quantity};
//!
//! validate_sku("ELEC-0001").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{NewCategory, NewProduct, NewSale, Page, ProductPatch};
use crate::MAX_PAGE_LIMIT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Product name length bounds (characters).
pub const PRODUCT_NAME_MAX: usize = 255;

/// SKU length bounds (characters).
pub const SKU_MIN: usize = 3;
pub const SKU_MAX: usize = 50;

/// Category name upper bound (characters).
pub const CATEGORY_NAME_MAX: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

fn validate_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<()> {
    let len = value.trim().chars().count();

    if len == 0 {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be between 3 and 50 characters
///
/// ## Example
/// ```rust
/// use emporium_core::validation::validate_sku;
///
/// assert!(validate_sku("ELEC-0001").is_ok());
/// assert!(validate_sku("AB").is_err());
/// assert!(validate_sku("A".repeat(51).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    validate_length("sku", sku, SKU_MIN, SKU_MAX)
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 255 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_length("name", name, 1, PRODUCT_NAME_MAX)
}

/// Validates a category name (1..=100 characters).
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    validate_length("name", name, 1, CATEGORY_NAME_MAX)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates an absolute stock level. Zero is a legal level, negatives are not.
pub fn validate_stock_level(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be strictly positive; the catalog has no free items
///
/// ## Example
/// ```rust
/// use emporium_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_err());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    validate_positive_cents("price", cents)
}

fn validate_positive_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a low-stock threshold (>= 1).
pub fn validate_low_stock_threshold(threshold: i64) -> ValidationResult<()> {
    if threshold < 1 {
        return Err(ValidationError::OutOfRange {
            field: "threshold".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates pagination bounds.
///
/// ## Rules
/// - `limit` in 1..=1000
/// - `offset` >= 0
pub fn validate_page(page: &Page) -> ValidationResult<()> {
    if !(1..=MAX_PAGE_LIMIT).contains(&page.limit) {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: MAX_PAGE_LIMIT,
        });
    }

    if page.offset < 0 {
        return Err(ValidationError::OutOfRange {
            field: "offset".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a category creation payload.
pub fn validate_new_category(category: &NewCategory) -> ValidationResult<()> {
    validate_category_name(&category.name)
}

/// Validates a product creation payload.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_sku(&product.sku)?;
    validate_price_cents(product.price_cents)?;
    Ok(())
}

/// Validates the fields present in a product patch, with the same rules as
/// creation. Absent fields are not checked.
pub fn validate_product_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_product_name(name)?;
    }
    if let Some(sku) = &patch.sku {
        validate_sku(sku)?;
    }
    if let Some(price) = patch.price_cents {
        validate_price_cents(price)?;
    }
    Ok(())
}

/// Validates a sale creation payload.
///
/// ## Rules
/// - At least one line item
/// - Every line: quantity > 0 and unit price > 0
pub fn validate_new_sale(sale: &NewSale) -> ValidationResult<()> {
    if sale.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    for item in &sale.items {
        validate_quantity(item.quantity)?;
        validate_positive_cents("unit_price", item.unit_price_cents)?;
        if item.subtotal().is_none() {
            return Err(cents_out_of_range("subtotal"));
        }
    }

    if sale.total().is_none() {
        return Err(cents_out_of_range("total"));
    }

    Ok(())
}

fn cents_out_of_range(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: 1,
        max: i64::MAX,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewSaleItem;

    fn sale_with(items: Vec<NewSaleItem>) -> NewSale {
        NewSale {
            customer_id: None,
            payment_method: Some("card".to_string()),
            status: "completed".to_string(),
            items,
        }
    }

    fn item(quantity: i64, unit_price_cents: i64) -> NewSaleItem {
        NewSaleItem {
            product_id: "p1".to_string(),
            quantity,
            unit_price_cents,
        }
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("ELEC-0001").is_ok());
        assert!(validate_sku("ABC").is_ok());
        assert!(validate_sku(&"A".repeat(50)).is_ok());

        assert!(matches!(
            validate_sku(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_sku("AB"),
            Err(ValidationError::TooShort { min: 3, .. })
        ));
        assert!(matches!(
            validate_sku(&"A".repeat(51)),
            Err(ValidationError::TooLong { max: 50, .. })
        ));
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Wireless Mouse").is_ok());
        assert!(validate_product_name(&"A".repeat(255)).is_ok());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_category_name() {
        assert!(validate_category_name("Books").is_ok());
        assert!(validate_category_name("").is_err());
        assert!(validate_category_name(&"B".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_numbers() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_stock_level(0).is_ok());
        assert!(validate_stock_level(-1).is_err());
        assert!(validate_price_cents(1).is_ok());
        assert!(validate_price_cents(0).is_err());
        assert!(validate_low_stock_threshold(1).is_ok());
        assert!(validate_low_stock_threshold(0).is_err());
    }

    #[test]
    fn test_validate_page() {
        assert!(validate_page(&Page::default()).is_ok());
        assert!(validate_page(&Page { limit: 1000, offset: 0 }).is_ok());
        assert!(validate_page(&Page { limit: 0, offset: 0 }).is_err());
        assert!(validate_page(&Page { limit: 1001, offset: 0 }).is_err());
        assert!(validate_page(&Page { limit: 10, offset: -1 }).is_err());
    }

    #[test]
    fn test_validate_product_patch_checks_present_fields_only() {
        let mut patch = ProductPatch::default();
        assert!(validate_product_patch(&patch).is_ok());

        patch.price_cents = Some(0);
        assert!(validate_product_patch(&patch).is_err());

        patch.price_cents = Some(500);
        patch.sku = Some("X".to_string());
        assert!(validate_product_patch(&patch).is_err());
    }

    #[test]
    fn test_validate_new_sale() {
        assert!(validate_new_sale(&sale_with(vec![item(2, 999)])).is_ok());
        assert!(matches!(
            validate_new_sale(&sale_with(vec![])),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_new_sale(&sale_with(vec![item(0, 999)])).is_err());
        assert!(validate_new_sale(&sale_with(vec![item(1, 0)])).is_err());
    }

    #[test]
    fn test_validate_new_sale_rejects_cent_overflow() {
        let huge_line = validate_new_sale(&sale_with(vec![item(10_000_000_000, 10_000_000_000)]));
        assert!(matches!(
            huge_line,
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "subtotal"
        ));

        // each line fits on its own, their sum does not
        let huge_total = validate_new_sale(&sale_with(vec![item(1, i64::MAX), item(1, 1)]));
        assert!(matches!(
            huge_total,
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "total"
        ));
    }
}
