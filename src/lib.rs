//! # pix-gateway - PIX payment gateway client
//!
//! Typed bindings for a PIX payment gateway's REST API: create a sale, poll a
//! transaction's status, fetch the seller account, and decode the webhooks the
//! gateway posts back. All amounts are integers in centavos.
//!
//! ```no_run
//! use pix_gateway::{Customer, Document, GatewayConfig, Item, PixGatewayClient, SaleRequest};
//!
//! # async fn run() -> pix_gateway::Result<()> {
//! let client = PixGatewayClient::new(GatewayConfig::from_env()?)?;
//! let sale = SaleRequest::new(
//!     4990,
//!     vec![Item::new("Assinatura mensal", 4990, 1)],
//!     Customer::new("Maria Silva", "maria@example.com", "11987654321", Document::cpf("12345678909")),
//! );
//!
//! let response = client.create_sale(&sale).await;
//! match response.data() {
//!     Some(data) => println!("pay with: {:?}", data.pix_copy_paste()),
//!     None => eprintln!("sale failed: {:?}", response.message),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
mod headers;
pub mod status;
pub mod types;
pub mod units;
pub mod webhook;

// Re-exports for convenience
pub use client::PixGatewayClient;
pub use config::{CredentialSources, Credentials, GatewayConfig};
pub use error::{PixError, Result};
pub use status::{map_status, PaymentStatus};
pub use types::*;
pub use units::{to_major_units, to_minor_units};
pub use webhook::{WebhookCustomer, WebhookEvent, WebhookPayload};

/// Current version of the pix-gateway library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_sale_amount_from_major_units() {
        let price = to_minor_units(49.90);
        let request = SaleRequest::new(
            price,
            vec![Item::new("Assinatura mensal", price, 1)],
            Customer::new(
                "Maria Silva",
                "maria@example.com",
                "11987654321",
                Document::cpf("12345678909"),
            ),
        );

        assert_eq!(request.amount, 4990);
        assert_eq!(request.amount, request.total_from_items());
        assert_eq!(to_major_units(request.amount), 49.9);
    }
}
