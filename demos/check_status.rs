//! Look up a transaction and the seller account
//!
//! ```text
//! PIX_GATEWAY_BASE_URL=https://gateway.example.com/api \
//! PIX_SECRET_KEY=sk_live_... \
//! RUST_LOG=pix_gateway=debug \
//! cargo run --example check_status -- tx_123
//! ```

use pix_gateway::{to_major_units, PixGatewayClient};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let transaction_id = std::env::args()
        .nth(1)
        .ok_or("usage: check_status <transaction-id>")?;

    let client = PixGatewayClient::from_env()?;

    let seller = client.get_seller().await;
    match seller.data() {
        Some(seller) => println!(
            "Seller: {} ({})",
            seller.name.as_deref().unwrap_or("unnamed"),
            seller.id
        ),
        None => println!("Could not load seller: {:?}", seller.message),
    }

    let status = client.get_transaction_status(&transaction_id).await;
    match status.data() {
        Some(data) => println!(
            "Transaction {}: {} (R$ {:.2})",
            data.id,
            data.payment_status(),
            to_major_units(data.amount)
        ),
        None => println!(
            "Status query failed: {} {}",
            status.message.as_deref().unwrap_or_default(),
            status.error.as_deref().unwrap_or_default()
        ),
    }

    Ok(())
}
