//! # emporium-db: Database Layer for Emporium Admin
//!
//! SQLite storage for the admin backend, accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Emporium Data Flow                                 │
//! │                                                                         │
//! │  admin-api route (GET /api/revenue/monthly)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   emporium-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ CategoryRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo    │    │ 001_initial_ │  │   │
//! │  │   │ WAL + FKs     │    │ InventoryRepo  │    │   schema.sql │  │   │
//! │  │   │               │    │ SaleRepo ──────┼──► SalesSource   │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ./emporium.db                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use emporium_db::{Database, DbConfig};
//! use emporium_core::revenue::{Granularity, RevenueEngine};
//!
//! let db = Database::new(DbConfig::new("emporium.db")).await?;
//!
//! let sales = db.sales();
//! let months = RevenueEngine::new(&sales)
//!     .revenue_by_period(Granularity::Monthly, None, None, None)
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::category::CategoryRepository;
pub use repository::customer::CustomerRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::product::{ProductFilter, ProductRepository};
pub use repository::sale::SaleRepository;
