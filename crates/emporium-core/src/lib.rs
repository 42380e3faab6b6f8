//! # emporium-core: Pure Business Logic for Emporium Admin
//!
//! This crate is the **heart** of Emporium Admin. It contains the domain
//! types, validation rules and the revenue aggregation engine as pure code
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Emporium Admin Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Admin Dashboard (HTTP client)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    admin-api (axum)                             │   │
//! │  │   products ── inventory ── sales ── revenue                     │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                       │
//! │  ┌──────────────▼───────────────┐  ┌───────────▼───────────────────┐   │
//! │  │  emporium-core (THIS CRATE)  │  │        emporium-db            │   │
//! │  │  • Money                     │◄─│  • Repositories (sqlx)        │   │
//! │  │  • Validation                │  │  • SalesSource impl           │   │
//! │  │  • Revenue engine            │  │  • Migrations                 │   │
//! │  └──────────────────────────────┘  └───────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Inventory, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`revenue`] - Calendar bucketing, aggregation and period comparison
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use emporium_core::revenue::{generate_buckets, Granularity};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
//!
//! let buckets = generate_buckets(Granularity::Monthly, start, end);
//! assert_eq!(buckets.len(), 3); // Jan, Feb, Mar
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod revenue;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Upper bound for a single page.
///
/// ## Business Reason
/// Keeps admin list queries bounded; the dashboard paginates beyond this.
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Stock level at or below which an item is reported as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Status assigned to sales created without an explicit status.
pub const DEFAULT_SALE_STATUS: &str = "completed";
