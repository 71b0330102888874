//! Checkout and order-confirmation commands.

use chrono::Utc;
use clap::Args;
use gearloft_core::{Email, PaymentMethod, ShippingMethod, money};
use gearloft_storefront::checkout::{
    self, CardInput, CheckoutError, CheckoutRequest, CustomerInfo, OrderSnapshot, ShippingAddress,
};
use gearloft_storefront::state::AppState;

/// Checkout form fields as CLI arguments.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    // Contact information
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,

    // Shipping address
    #[arg(long)]
    pub street: String,
    #[arg(long)]
    pub apartment: Option<String>,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub zip: String,

    /// Shipping method: standard or express
    #[arg(long, default_value = "standard")]
    pub shipping: String,

    /// Payment method: credit or cod
    #[arg(long, default_value = "credit")]
    pub payment: String,

    // Card details (required when payment is credit)
    #[arg(long)]
    pub card_number: Option<String>,
    /// Card expiry in MM/YY form
    #[arg(long)]
    pub expiry: Option<String>,
    #[arg(long)]
    pub cvv: Option<String>,
    /// Name on the card
    #[arg(long)]
    pub card_holder: Option<String>,
}

impl CheckoutArgs {
    fn card_input(&self) -> Option<CardInput> {
        // Any card field present means the user filled in the card form.
        if self.card_number.is_none()
            && self.expiry.is_none()
            && self.cvv.is_none()
            && self.card_holder.is_none()
        {
            return None;
        }
        Some(CardInput {
            number: self.card_number.clone().unwrap_or_default(),
            expiry: self.expiry.clone().unwrap_or_default(),
            cvv: self.cvv.clone().unwrap_or_default(),
            holder_name: self.card_holder.clone().unwrap_or_default(),
        })
    }
}

/// Place an order from the current cart.
pub fn place(state: &AppState, args: &CheckoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request = CheckoutRequest {
        email: Email::parse(&args.email)?,
        customer: CustomerInfo {
            first_name: args.first_name.clone(),
            last_name: args.last_name.clone(),
            phone: args.phone.clone(),
        },
        address: ShippingAddress {
            street: args.street.clone(),
            apartment: args.apartment.clone(),
            city: args.city.clone(),
            state: args.state.clone(),
            zip: args.zip.clone(),
        },
        shipping_method: args.shipping.parse::<ShippingMethod>()?,
        payment_method: args.payment.parse::<PaymentMethod>()?,
        card: args.card_input(),
    };

    let today = Utc::now().date_naive();
    let mut cart = state.cart();
    match checkout::place_order(&mut cart, state.storage(), &request, today) {
        Ok(snapshot) => {
            drop(cart);
            println!("Order placed!");
            println!();
            print_snapshot(&snapshot);
        }
        Err(CheckoutError::EmptyCart) => {
            println!("Your cart is empty");
        }
        Err(CheckoutError::InvalidCard(errors)) => {
            println!("Please fix the payment details:");
            for (field, message) in errors.iter() {
                println!("  {field}: {message}");
            }
            if let Some((field, _)) = errors.first() {
                println!();
                println!("First invalid field: {field}");
            }
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Show the confirmation of the last placed order.
pub fn last_order(state: &AppState) {
    match checkout::last_order(state.storage()) {
        Some(snapshot) => {
            println!("Thank you for your order!");
            println!();
            print_snapshot(&snapshot);
        }
        None => println!("No order has been placed yet"),
    }
}

fn print_snapshot(snapshot: &OrderSnapshot) {
    for item in &snapshot.items {
        let label = item
            .variation
            .as_ref()
            .map_or_else(String::new, |v| format!(" ({})", v.label));
        println!(
            "{}{} x {} | Rs. {}",
            item.name,
            label,
            item.quantity,
            money::format_amount(item.line_total())
        );
    }
    println!();
    println!("Subtotal: Rs. {}", money::format_amount(snapshot.subtotal));
    println!("Shipping: Rs. {}", money::format_amount(snapshot.shipping));
    println!("Tax:      Rs. {}", money::format_amount(snapshot.tax));
    if snapshot.payment_method == PaymentMethod::CashOnDelivery {
        println!("COD Fee:  Rs. {}", money::format_amount(snapshot.cod_fee));
    }
    println!("Total:    Rs. {}", money::format_amount(snapshot.total));
    println!();
    println!(
        "Ship to: {} {}, {}{}, {}, {} {}",
        snapshot.customer.first_name,
        snapshot.customer.last_name,
        snapshot.shipping_address.street,
        snapshot
            .shipping_address
            .apartment
            .as_ref()
            .map_or_else(String::new, |a| format!(", {a}")),
        snapshot.shipping_address.city,
        snapshot.shipping_address.state,
        snapshot.shipping_address.zip
    );
    println!(
        "Shipping method: {} | Payment: {}",
        snapshot.shipping_method, snapshot.payment_method
    );
}
