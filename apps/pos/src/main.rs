//! # Kirana POS Terminal Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kirana POS Terminal                            │
//! │                                                                         │
//! │  main.rs ────► Sets up logging, database, session                       │
//! │                                                                         │
//! │  repl.rs ────► Operator command loop (add, cart, checkout, ...)         │
//! │                                                                         │
//! │  session.rs ─► Cart + payment state; clears only after a durable write  │
//! │                                                                         │
//! │  receipt.rs ─► Plain-text invoice rendering                             │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  kirana-core (checkout math)   kirana-db (SQLite, WAL mode)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (RUST_LOG controls verbosity)
//! 2. Parse command line (database path, tender policy)
//! 3. Connect to database & run migrations
//! 4. Hand the session to the command loop

use std::env;

use tracing_subscriber::EnvFilter;

use kirana_core::TenderPolicy;
use kirana_db::{Database, DbConfig};

mod error;
mod receipt;
mod repl;
mod session;

use session::PosSession;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kirana.db");
    let mut policy = TenderPolicy::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--strict-tender" => {
                policy = TenderPolicy::strict();
            }
            "--help" | "-h" => {
                println!("Kirana POS Terminal");
                println!();
                println!("Usage: kirana-pos [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kirana.db)");
                println!("  --strict-tender    Reject cash tender below the total");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let session = PosSession::with_policy(db, policy);

    repl::run(session).await?;

    Ok(())
}
