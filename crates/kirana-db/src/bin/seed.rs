//! # Seed Data Generator
//!
//! Populates the database with a realistic kirana-store catalog for
//! development, or imports a catalog feed exported from the old system.
//!
//! ## Usage
//! ```bash
//! # Seed the built-in catalog
//! cargo run -p kirana-db --bin seed
//!
//! # Specify database path
//! cargo run -p kirana-db --bin seed -- --db ./data/kirana.db
//!
//! # Import a JSON catalog feed instead (bare array or {"data": [...]})
//! cargo run -p kirana-db --bin seed -- --import ./catalog.json
//! ```
//!
//! Each built-in product gets:
//! - A short code (1, 2, 3, ...) the cashier can key in
//! - A price in paise and a GST slab (0%, 5%, 12%, 18% or 28%)
//! - A production price around 80% of the selling price
//! - A random-ish stock level with a low-stock threshold

use chrono::Utc;
use std::env;
use uuid::Uuid;

use kirana_core::catalog::parse_feed;
use kirana_core::types::Product;
use kirana_core::validation::validate_product_code;
use kirana_db::{Database, DbConfig};

/// Built-in catalog: (name, price in paise, GST slab in bps).
///
/// Slabs follow the usual grocery split: unbranded staples 0%, branded
/// staples 5%, processed foods 12%, household goods 18%, aerated drinks 28%.
const CATALOG: &[(&str, i64, u32)] = &[
    ("Toor Dal 1kg", 18500, 0),
    ("Moong Dal 500g", 9200, 0),
    ("Chana Dal 1kg", 14000, 0),
    ("Basmati Rice 5kg", 65000, 500),
    ("Sona Masoori Rice 10kg", 78000, 500),
    ("Wheat Atta 10kg", 52000, 500),
    ("Sugar 1kg", 4800, 500),
    ("Salt 1kg", 2800, 500),
    ("Sunflower Oil 1L", 15500, 500),
    ("Mustard Oil 1L", 17800, 500),
    ("Ghee 500ml", 32500, 1200),
    ("Butter 100g", 6000, 1200),
    ("Paneer 200g", 9500, 500),
    ("Milk 500ml", 3200, 0),
    ("Curd 400g", 4500, 0),
    ("Tea 250g", 16000, 500),
    ("Coffee 100g", 19500, 1800),
    ("Biscuits Glucose 10-pack", 10000, 1800),
    ("Namkeen Mixture 400g", 9000, 1200),
    ("Instant Noodles 12-pack", 16800, 1800),
    ("Tomato Ketchup 500g", 12500, 1200),
    ("Pickle Mango 400g", 11000, 1200),
    ("Papad 200g", 6500, 500),
    ("Turmeric Powder 200g", 7200, 500),
    ("Chilli Powder 200g", 8800, 500),
    ("Coriander Powder 200g", 6800, 500),
    ("Garam Masala 100g", 9200, 500),
    ("Cumin Seeds 100g", 8500, 500),
    ("Bathing Soap 4-pack", 14000, 1800),
    ("Detergent Powder 1kg", 13500, 1800),
    ("Dishwash Bar 3-pack", 7500, 1800),
    ("Toothpaste 150g", 9800, 1800),
    ("Shampoo 180ml", 14500, 1800),
    ("Hair Oil 200ml", 11500, 1800),
    ("Incense Sticks 100-pack", 5500, 500),
    ("Matchbox 10-pack", 2000, 1800),
    ("Cola 750ml", 4000, 2800),
    ("Orange Soda 750ml", 3800, 2800),
    ("Packaged Water 1L", 2000, 1800),
    ("Fruit Juice 1L", 11000, 1200),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kirana_dev.db");
    let mut import_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--import" | "-i" => {
                if i + 1 < args.len() {
                    import_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kirana POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: ./kirana_dev.db)");
                println!("  -i, --import <PATH>  Import a JSON catalog feed instead of the built-in catalog");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kirana POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    let inserted = match import_path {
        Some(path) => import_catalog(&db, &path).await?,
        None => seed_builtin(&db).await?,
    };

    println!();
    println!("✓ Seeded {} products", inserted);

    let hits = db.products().search("dal", 10).await?;
    println!("  Search 'dal': {} results", hits.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Inserts the built-in catalog, assigning short codes sequentially.
async fn seed_builtin(db: &Database) -> Result<usize, Box<dyn std::error::Error>> {
    println!("Seeding built-in catalog...");

    let now = Utc::now();
    let mut inserted = 0;

    for (idx, (name, price_paise, tax_rate_bps)) in CATALOG.iter().enumerate() {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            code: (idx + 1) as i64,
            description: None,
            selling_price_paise: *price_paise,
            production_price_paise: price_paise * 80 / 100,
            tax_rate_bps: *tax_rate_bps,
            total_qty: ((idx * 13) % 60 + 10) as i64,
            alert_qty: 5,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }
        inserted += 1;
    }

    Ok(inserted)
}

/// Imports a JSON catalog feed, coercing malformed rows on the way in.
async fn import_catalog(db: &Database, path: &str) -> Result<usize, Box<dyn std::error::Error>> {
    println!("Importing catalog from {}...", path);

    let json = std::fs::read_to_string(path)?;
    let items = parse_feed(&json)?;
    println!("  Parsed {} catalog rows", items.len());

    let now = Utc::now();
    let mut inserted = 0;

    for (idx, item) in items.iter().enumerate() {
        // feeds without usable codes get sequential ones
        let code = if validate_product_code(item.code).is_ok() {
            item.code
        } else {
            (idx + 1) as i64
        };

        let product = Product {
            id: item.id.clone(),
            name: item.name.clone(),
            code,
            description: None,
            selling_price_paise: item.unit_price_paise,
            production_price_paise: 0,
            tax_rate_bps: item.tax_rate_bps,
            total_qty: 0,
            alert_qty: 0,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }
        inserted += 1;
    }

    Ok(inserted)
}
