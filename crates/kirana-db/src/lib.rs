//! # kirana-db: Database Layer for Kirana POS
//!
//! SQLite persistence behind a small repository API.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Kirana POS Data Flow                           │
//! │                                                                     │
//! │  POS session (apps/pos)                                             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────┐     │
//! │  │                  kirana-db (THIS CRATE)                   │     │
//! │  │                                                           │     │
//! │  │   ┌────────────┐   ┌────────────────┐   ┌─────────────┐  │     │
//! │  │   │  Database  │   │  Repositories  │   │ Migrations  │  │     │
//! │  │   │ (pool.rs)  │◄──│ products       │   │ (embedded)  │  │     │
//! │  │   │ SqlitePool │   │ transactions   │   │ 001_init    │  │     │
//! │  │   └────────────┘   └────────────────┘   └─────────────┘  │     │
//! │  └───────────────────────────────────────────────────────────┘     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite file (WAL mode, foreign keys on)                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The one rule that matters for correctness: a checkout is written in a
//! single SQL transaction - header plus every item - so a crash mid-write
//! can never leave a partially-recorded sale.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;
pub use repository::transaction::TransactionRepository;
