//! Gearloft CLI - command-line front end for the storefront engine.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! gearloft products --category Electronics --sort price-low-to-high --page 1
//!
//! # Inspect one product
//! gearloft product 7
//!
//! # Manage the cart
//! gearloft cart add 7 --quantity 2 --variation 72
//! gearloft cart show
//! gearloft cart update 7 3 --variation 72
//! gearloft cart remove 7 --variation 72
//! gearloft cart clear
//!
//! # Check out and view the confirmation
//! gearloft checkout --first-name Asha --last-name Rao ... --payment cod
//! gearloft last-order
//!
//! # Subscribe to the newsletter
//! gearloft subscribe shopper@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_API_URL` - Base URL of the product catalog service
//! - `GEARLOFT_DATA_DIR` - Directory for durable cart/order state

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use gearloft_storefront::config::StorefrontConfig;
use gearloft_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "gearloft")]
#[command(author, version, about = "Gearloft storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product listing with filters, sorting, and pages
    Products {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,

        /// Lower bound of the price window
        #[arg(long)]
        min_price: Option<String>,

        /// Upper bound of the price window
        #[arg(long)]
        max_price: Option<String>,

        /// Minimum whole-star rating (0 = no filter)
        #[arg(long, default_value_t = 0)]
        rating: u8,

        /// Sort order: popularity, price-low-to-high, price-high-to-low, newest
        #[arg(long, default_value = "popularity")]
        sort: String,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one product in detail
    Product {
        /// Product id
        id: i64,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order from the current cart
    Checkout(commands::checkout::CheckoutArgs),
    /// Show the confirmation of the last placed order
    LastOrder,
    /// Subscribe an email address to the newsletter
    Subscribe {
        /// Email address
        email: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and total
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: i64,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Variation id, for products with variations
        #[arg(short, long)]
        variation: Option<i64>,
    },
    /// Set the quantity of a cart line
    Update {
        /// Product id
        product_id: i64,

        /// New quantity (at least 1)
        quantity: u32,

        /// Variation id, for products with variations
        #[arg(short, long)]
        variation: Option<i64>,
    },
    /// Remove a line from the cart
    Remove {
        /// Product id
        product_id: i64,

        /// Variation id, for products with variations
        #[arg(short, long)]
        variation: Option<i64>,
    },
    /// Remove every line from the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter; defaults to info level for our
    // crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gearloft=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Products {
            category,
            min_price,
            max_price,
            rating,
            sort,
            page,
        } => {
            commands::catalog::list(
                &state,
                category.as_deref(),
                min_price.as_deref(),
                max_price.as_deref(),
                rating,
                &sort,
                page,
            )
            .await?;
        }
        Commands::Product { id } => commands::catalog::show(&state, id).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add {
                product_id,
                quantity,
                variation,
            } => commands::cart::add(&state, product_id, quantity, variation).await?,
            CartAction::Update {
                product_id,
                quantity,
                variation,
            } => commands::cart::update(&state, product_id, quantity, variation),
            CartAction::Remove {
                product_id,
                variation,
            } => commands::cart::remove(&state, product_id, variation),
            CartAction::Clear => commands::cart::clear(&state),
        },
        Commands::Checkout(args) => commands::checkout::place(&state, &args)?,
        Commands::LastOrder => commands::checkout::last_order(&state),
        Commands::Subscribe { email } => commands::catalog::subscribe(&state, &email).await?,
    }
    Ok(())
}
