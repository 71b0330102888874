//! Catalog browsing commands: listing, product detail, newsletter.

use gearloft_core::{Email, ProductId, money};
use gearloft_storefront::catalog::query::{
    self, CategoryFilter, Paginator, ProductFilter, SortKey,
};
use gearloft_storefront::catalog::Product;
use gearloft_storefront::error::AppError;
use gearloft_storefront::state::AppState;
use rust_decimal::Decimal;

/// Parse a CLI sort name into a [`SortKey`].
fn parse_sort(name: &str) -> Result<SortKey, String> {
    match name {
        "popularity" => Ok(SortKey::Popularity),
        "price-low-to-high" => Ok(SortKey::PriceLowToHigh),
        "price-high-to-low" => Ok(SortKey::PriceHighToLow),
        "newest" => Ok(SortKey::Newest),
        _ => Err(format!(
            "invalid sort order: {name}. Valid orders: popularity, price-low-to-high, price-high-to-low, newest"
        )),
    }
}

/// Parse a CLI price argument.
fn parse_price(raw: &str) -> Result<Decimal, String> {
    money::parse_amount(raw).ok_or_else(|| format!("invalid price: {raw}"))
}

/// One listing row.
fn listing_line(product: &Product) -> String {
    let range = product.price_range();
    let price = if range.min == range.max {
        format!("Rs. {}", money::format_amount(range.min))
    } else {
        format!(
            "Rs. {} - {}",
            money::format_amount(range.min),
            money::format_amount(range.max)
        )
    };
    format!(
        "[{}] {} | {} | {} | rating {:.1}",
        product.id, product.name, product.category, price, product.rating
    )
}

/// List products with filters, sorting, and pagination.
pub async fn list(
    state: &AppState,
    category: Option<&str>,
    min_price: Option<&str>,
    max_price: Option<&str>,
    rating: u8,
    sort: &str,
    page: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let sort = parse_sort(sort)?;

    let products = match state.catalog().get_all_products().await {
        Ok(products) => products,
        Err(e) => {
            println!("{}", AppError::from(e).user_message());
            return Ok(());
        }
    };

    // The price window defaults to the catalog's global bounds, like the
    // filter sidebar's slider.
    let bounds = query::price_bounds(&products);
    let price_window = match (min_price, max_price, bounds) {
        (None, None, _) => None,
        (min, max, bounds) => {
            let low = min.map(parse_price).transpose()?;
            let high = max.map(parse_price).transpose()?;
            let (bound_low, bound_high) = bounds.unwrap_or((Decimal::ZERO, Decimal::MAX));
            Some((low.unwrap_or(bound_low), high.unwrap_or(bound_high)))
        }
    };

    let filter = ProductFilter {
        category: category.map_or(CategoryFilter::All, |c| {
            CategoryFilter::Named(c.to_string())
        }),
        price_window,
        min_rating: rating,
    };

    let listing = query::apply(&products, &filter, sort);
    let page_items = query::paginate(&listing, page);
    let pager = Paginator::new(listing.len(), page);

    println!("Showing {} products", listing.len());
    let categories = query::categories(&products);
    if !categories.is_empty() {
        println!("Categories: {}", categories.join(", "));
    }
    println!();

    if page_items.is_empty() {
        println!("No products match your filters.");
        return Ok(());
    }

    for product in page_items {
        println!("{}", listing_line(product));
    }

    if pager.total_pages() > 1 {
        let numbers: Vec<String> = pager
            .page_numbers()
            .into_iter()
            .map(|n| {
                if n == page {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .collect();
        println!();
        println!(
            "Page {page} of {} | {}",
            pager.total_pages(),
            numbers.join(" ")
        );
    }

    Ok(())
}

/// Show one product in detail.
pub async fn show(state: &AppState, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let product = match state.catalog().get_product_by_id(ProductId::new(id)).await {
        Ok(product) => product,
        // "Not found" and fetch failures are both display states, not crashes.
        Err(e) => {
            println!("{}", AppError::from(e).user_message());
            return Ok(());
        }
    };

    println!("{} [{}]", product.name, product.id);
    println!("Category: {}", product.category);
    println!("Rating: {:.1} / 5", product.rating);

    if product.has_variations && !product.variations.is_empty() {
        println!("Variations:");
        for variation in &product.variations {
            let stock = if variation.stock == 0 {
                "out of stock".to_string()
            } else {
                format!("{} in stock", variation.stock)
            };
            println!(
                "  [{}] {} | Rs. {} | {}",
                variation.id,
                variation.label,
                money::format_amount(variation.price),
                stock
            );
        }
    } else {
        println!("Price: Rs. {}", money::format_amount(product.base_price));
        println!("Stock: {}", product.base_stock);
    }

    if !product.specs.is_empty() {
        println!("Specs:");
        for (name, value) in &product.specs {
            println!("  {name}: {value}");
        }
    }

    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }

    Ok(())
}

/// Subscribe an email address to the newsletter.
pub async fn subscribe(state: &AppState, email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;

    match state.catalog().subscribe_newsletter(&email).await {
        Ok(()) => println!("Successfully subscribed to newsletter!"),
        Err(e) => {
            tracing::warn!(error = %e, "newsletter subscription failed");
            println!("Failed to subscribe. Please try again.");
        }
    }
    Ok(())
}
