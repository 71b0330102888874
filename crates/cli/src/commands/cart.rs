//! Cart management commands.
//!
//! Rejected mutations (stock limits, unknown variations) are logged by
//! the store as warnings; these commands then show the resulting cart so
//! the outcome is always visible.

use gearloft_core::{ProductId, VariationId, money, stock};
use gearloft_storefront::error::AppError;
use gearloft_storefront::state::AppState;

/// Print the cart contents and total.
pub fn show(state: &AppState) {
    let cart = state.cart();

    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for item in cart.items() {
        let label = item
            .variation
            .as_ref()
            .map_or_else(String::new, |v| format!(" ({})", v.label));
        let remaining = stock::remaining(item.stock_limit(), item.quantity);
        println!(
            "[{}] {}{} | Rs. {} x {} = Rs. {} | {} more available",
            item.id,
            item.name,
            label,
            money::format_amount(item.price),
            item.quantity,
            money::format_amount(item.line_total()),
            remaining,
        );
    }

    println!();
    println!(
        "{} items | Total: Rs. {}",
        cart.item_count(),
        money::format_amount(cart.total())
    );
}

/// Fetch a product and add it to the cart.
pub async fn add(
    state: &AppState,
    product_id: i64,
    quantity: u32,
    variation: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = match state
        .catalog()
        .get_product_by_id(ProductId::new(product_id))
        .await
    {
        Ok(product) => product,
        Err(e) => {
            println!("{}", AppError::from(e).user_message());
            return Ok(());
        }
    };

    state
        .cart()
        .add_to_cart(&product, quantity, variation.map(VariationId::new));
    show(state);
    Ok(())
}

/// Set the quantity of a cart line.
pub fn update(state: &AppState, product_id: i64, quantity: u32, variation: Option<i64>) {
    state.cart().update_quantity(
        ProductId::new(product_id),
        quantity,
        variation.map(VariationId::new),
    );
    show(state);
}

/// Remove a line from the cart.
pub fn remove(state: &AppState, product_id: i64, variation: Option<i64>) {
    state
        .cart()
        .remove_from_cart(ProductId::new(product_id), variation.map(VariationId::new));
    show(state);
}

/// Empty the cart.
pub fn clear(state: &AppState) {
    state.cart().clear();
    println!("Cart cleared");
}
