//! # Demo Data Loader
//!
//! Populates the database with a store's worth of demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./emporium.db
//! cargo run -p emporium-db --bin seed
//!
//! # Specify database path
//! cargo run -p emporium-db --bin seed -- --db ./data/emporium.db
//! ```
//!
//! ## Generated Data
//! - 5 categories (Electronics, Clothing, Home & Kitchen, Books, Toys)
//! - products per category, each with a stock level
//! - 50 customers
//! - 200 completed sales spread over the past year, 1-5 lines each
//!
//! Values derive from the row index, so two runs produce the same shape.

use std::env;

use chrono::{Duration, Utc};
use emporium_core::{
    InventoryAdjustment, NewCategory, NewCustomer, NewProduct, NewSale, NewSaleItem, DEFAULT_SALE_STATUS,
};
use emporium_db::{Database, DbConfig};

/// (name, description, SKU prefix, product noun, product count, min price, max price) in cents
const CATEGORIES: &[(&str, &str, &str, &str, usize, i64, i64)] = &[
    ("Electronics", "Electronic devices and accessories", "ELEC", "Device", 20, 9_999, 199_999),
    ("Clothing", "Apparel and fashion items", "CLTH", "Apparel", 30, 1_999, 19_999),
    ("Home & Kitchen", "Household items and appliances", "HOME", "Home Item", 25, 2_999, 59_999),
    ("Books", "Books and publications", "BOOK", "Book", 40, 999, 4_999),
    ("Toys", "Toys and games for all ages", "TOY", "Toy", 15, 1_499, 9_999),
];

const ADJECTIVES: &[&str] = &[
    "Classic", "Modern", "Compact", "Deluxe", "Essential", "Premium", "Rustic", "Smart", "Vintage", "Bold",
];

const NOUNS: &[&str] = &[
    "Aurora", "Summit", "Harbor", "Meadow", "Nova", "Atlas", "Canyon", "Echo", "Willow", "Pioneer", "Orbit",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Frances", "Ken", "Margaret", "Niklaus",
];

const LAST_NAMES: &[&str] = &["Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov"];

const PAYMENT_METHODS: &[&str] = &["Credit Card", "PayPal", "Bank Transfer", "Cash"];

const CUSTOMER_COUNT: usize = 50;
const SALE_COUNT: usize = 200;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./emporium.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Emporium Demo Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./emporium.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Emporium Demo Data Loader");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.categories().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} categories", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    // Categories, products and stock
    let mut products: Vec<(String, i64)> = Vec::new();
    for (category_idx, (name, description, prefix, noun, count, min_price, max_price)) in
        CATEGORIES.iter().enumerate()
    {
        let category = db
            .categories()
            .insert(&NewCategory {
                name: name.to_string(),
                description: Some(description.to_string()),
            })
            .await?;

        for index in 0..*count {
            let seed = category_idx * 100 + index;
            let price_cents = min_price + ((seed as i64 * 7_919) % (max_price - min_price));

            let product = db
                .products()
                .create(&NewProduct {
                    name: format!(
                        "{} {} {}",
                        ADJECTIVES[seed % ADJECTIVES.len()],
                        NOUNS[(seed / ADJECTIVES.len()) % NOUNS.len()],
                        noun
                    ),
                    description: Some(format!("{} from the {} range.", noun, name)),
                    price_cents,
                    category_id: category.id.clone(),
                    sku: format!("{}-{:05}", prefix, 10_000 + seed),
                    image_url: Some(format!(
                        "https://example.com/images/{}/{}.jpg",
                        prefix.to_lowercase(),
                        index + 1
                    )),
                })
                .await?;

            db.inventory()
                .set_quantity(
                    &product.id,
                    &InventoryAdjustment {
                        quantity: 5 + ((seed * 37) % 196) as i64,
                        reason: Some("Initial stock".to_string()),
                    },
                )
                .await?;

            products.push((product.id, price_cents));
        }

        println!("  {}: {} products", name, count);
    }

    // Customers
    let mut customers = Vec::with_capacity(CUSTOMER_COUNT);
    for index in 0..CUSTOMER_COUNT {
        let first = FIRST_NAMES[index % FIRST_NAMES.len()];
        let last = LAST_NAMES[(index / FIRST_NAMES.len()) % LAST_NAMES.len()];
        let customer = db
            .customers()
            .insert(&NewCustomer {
                name: format!("{} {}", first, last),
                email: format!("{}.{}.{}@example.com", first, last, index).to_lowercase(),
                phone: Some(format!("555-{:04}", 1_000 + index)),
            })
            .await?;
        customers.push(customer.id);
    }
    println!("  Customers: {}", customers.len());

    // Sales over the past year
    let now = Utc::now();
    for index in 0..SALE_COUNT {
        let minutes_ago = ((index as i64 * 2_633) % (365 * 24 * 60)) + 1;
        let sale_date = now - Duration::minutes(minutes_ago);

        let line_count = 1 + index % 5;
        let items = (0..line_count)
            .map(|line| {
                let (product_id, price_cents) = &products[(index * 13 + line * 29) % products.len()];
                NewSaleItem {
                    product_id: product_id.clone(),
                    quantity: 1 + ((index + line) % 3) as i64,
                    unit_price_cents: *price_cents,
                }
            })
            .collect();

        let sale = NewSale {
            customer_id: (index % 5 != 0).then(|| customers[index % customers.len()].clone()),
            payment_method: Some(PAYMENT_METHODS[index % PAYMENT_METHODS.len()].to_string()),
            status: DEFAULT_SALE_STATUS.to_string(),
            items,
        };

        db.sales().create_at(&sale, sale_date).await?;
    }
    println!("  Sales: {}", SALE_COUNT);

    let elapsed = start.elapsed();
    println!();
    println!("✓ Seed complete in {:?}", elapsed);

    Ok(())
}
