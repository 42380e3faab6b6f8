//! # Repository Module
//!
//! One repository per aggregate, each holding a clone of the pool.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Repositories                                    │
//! │                                                                         │
//! │  Route handler                                                         │
//! │       │  state.db.products().list(&filter, page)                       │
//! │       ▼                                                                 │
//! │  CategoryRepository   categories                                       │
//! │  ProductRepository    products (+ inventory row on create)             │
//! │  InventoryRepository  inventory, inventory_history                     │
//! │  CustomerRepository   customers                                        │
//! │  SaleRepository       sales, sale_items, SalesSource                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod category;
pub mod customer;
pub mod inventory;
pub mod product;
pub mod sale;
