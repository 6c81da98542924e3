//! # Repository Module
//!
//! Database repository implementations for Kirana POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  POS session                                                            │
//! │       │                                                                 │
//! │       │  db.products().search("dal", 20)                                │
//! │       │  db.transactions().record(&txn)                                 │
//! │       ▼                                                                 │
//! │  ProductRepository / TransactionRepository                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                         │
//! │  • Callers deal in domain types, never rows                             │
//! │  • Easy to test against an in-memory database                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog CRUD and search
//! - [`transaction::TransactionRepository`] - Atomic transaction recording

pub mod product;
pub mod transaction;
