//! Request and response shapes for the gateway API
//!
//! Every amount is an integer count of centavos.

use crate::error::CONNECTION_ERROR_MESSAGE;
use crate::status::{map_status, PaymentStatus};
use crate::{PixError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::result::Result as StdResult;
use tracing::warn;

/// Currency used when none is given
pub const DEFAULT_CURRENCY: &str = "BRL";
/// The only payment method this client creates
pub const PIX_PAYMENT_METHOD: &str = "pix";
/// Days a PIX code stays payable when not configured
pub const DEFAULT_PIX_EXPIRY_DAYS: u32 = 1;

/// Sale creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    /// Total amount in centavos
    pub amount: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Always `"pix"`
    pub payment_method: String,
    /// Line items
    pub items: Vec<Item>,
    /// Paying customer
    pub customer: Customer,
    /// PIX code options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix: Option<PixOptions>,
    /// Delivery address, required by the gateway when any item is tangible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Shipping>,
    /// Free-form metadata echoed back in webhooks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    /// URL the gateway notifies on status changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback_url: Option<String>,
    /// Caller's own reference for the sale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<String>,
}

impl SaleRequest {
    /// Create a BRL PIX sale that expires after one day
    pub fn new(amount: i64, items: Vec<Item>, customer: Customer) -> Self {
        Self {
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            payment_method: PIX_PAYMENT_METHOD.to_string(),
            items,
            customer,
            pix: Some(PixOptions::default()),
            shipping: None,
            metadata: None,
            postback_url: None,
            external_ref: None,
        }
    }

    /// Set the currency code
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set how many days the PIX code stays payable
    pub fn with_pix_expiry_days(mut self, days: u32) -> Self {
        self.pix = Some(PixOptions {
            expires_in_days: days,
        });
        self
    }

    /// Set the delivery address
    pub fn with_shipping(mut self, shipping: Shipping) -> Self {
        self.shipping = Some(shipping);
        self
    }

    /// Set the metadata string
    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    /// Set the postback URL
    pub fn with_postback_url(mut self, url: impl Into<String>) -> Self {
        self.postback_url = Some(url.into());
        self
    }

    /// Set the external reference
    pub fn with_external_ref(mut self, reference: impl Into<String>) -> Self {
        self.external_ref = Some(reference.into());
        self
    }

    /// Sum of `unit_price * quantity` over all items, saturating at the `i64` bounds
    pub fn total_from_items(&self) -> i64 {
        self.items
            .iter()
            .map(Item::subtotal)
            .fold(0, i64::saturating_add)
    }

    /// Whether any item is physical, in which case the gateway expects `shipping`
    pub fn requires_shipping(&self) -> bool {
        self.items.iter().any(|item| item.tangible == Some(true))
    }
}

/// Sale line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub title: String,
    /// Price of one unit in centavos
    pub unit_price: i64,
    /// Must be at least 1; the gateway rejects zero
    pub quantity: u32,
    /// `true` for physical goods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangible: Option<bool>,
}

impl Item {
    /// Create a digital item
    pub fn new(title: impl Into<String>, unit_price: i64, quantity: u32) -> Self {
        Self {
            title: title.into(),
            unit_price,
            quantity,
            tangible: None,
        }
    }

    /// Mark the item as physical or digital
    pub fn tangible(mut self, tangible: bool) -> Self {
        self.tangible = Some(tangible);
        self
    }

    /// `unit_price * quantity`, saturating at the `i64` bounds
    pub fn subtotal(&self) -> i64 {
        self.unit_price.saturating_mul(i64::from(self.quantity))
    }
}

/// Paying customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    /// Digits only
    pub phone: String,
    pub document: Document,
}

impl Customer {
    /// Create a customer; punctuation is stripped from `phone`
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: &str,
        document: Document,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: digits_only(phone),
            document,
        }
    }
}

/// Brazilian taxpayer document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub number: String,
    #[serde(rename = "type")]
    pub kind: DocumentType,
}

impl Document {
    /// Individual taxpayer number; punctuation is stripped
    pub fn cpf(number: &str) -> Self {
        Self {
            number: digits_only(number),
            kind: DocumentType::Cpf,
        }
    }

    /// Company taxpayer number; punctuation is stripped
    pub fn cnpj(number: &str) -> Self {
        Self {
            number: digits_only(number),
            kind: DocumentType::Cnpj,
        }
    }
}

/// Kind of taxpayer document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Cpf,
    Cnpj,
}

/// PIX code options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixOptions {
    pub expires_in_days: u32,
}

impl Default for PixOptions {
    fn default() -> Self {
        Self {
            expires_in_days: DEFAULT_PIX_EXPIRY_DAYS,
        }
    }
}

/// Brazilian delivery address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipping {
    pub street: String,
    pub street_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    /// Two-letter state code, e.g. `SP`
    pub state: String,
    /// CEP, digits only
    pub zip_code: String,
    /// Shipping fee in centavos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<i64>,
}

impl Shipping {
    /// Create an address; `state` is uppercased and `zip_code` reduced to digits
    pub fn new(
        street: impl Into<String>,
        street_number: impl Into<String>,
        neighborhood: impl Into<String>,
        city: impl Into<String>,
        state: &str,
        zip_code: &str,
    ) -> Self {
        Self {
            street: street.into(),
            street_number: street_number.into(),
            complement: None,
            neighborhood: neighborhood.into(),
            city: city.into(),
            state: state.trim().to_ascii_uppercase(),
            zip_code: digits_only(zip_code),
            fee: None,
        }
    }

    /// Set the address complement (apartment, block)
    pub fn with_complement(mut self, complement: impl Into<String>) -> Self {
        self.complement = Some(complement.into());
        self
    }

    /// Set the shipping fee in centavos
    pub fn with_fee(mut self, fee: i64) -> Self {
        self.fee = Some(fee);
        self
    }
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Envelope returned by every gateway operation.
///
/// `data` is only meaningful when `success` is true; use [`ApiResponse::data`],
/// [`ApiResponse::into_data`] or [`ApiResponse::into_result`] rather than reading
/// the field directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_error_field"
    )]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Build a failed response
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error,
        }
    }

    /// Whether the gateway reported success
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The payload, only when the call succeeded
    pub fn data(&self) -> Option<&T> {
        if self.success {
            self.data.as_ref()
        } else {
            None
        }
    }

    /// Consume the response and return the payload, only when the call succeeded
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }

    /// Convert into a `Result`.
    ///
    /// Connection failures become [`PixError::Transport`] carrying the original
    /// error text. Any other failure, and a success without a payload, becomes
    /// [`PixError::Rejected`] with the gateway's message and error.
    pub fn into_result(self) -> Result<T> {
        let Self {
            success,
            data,
            message,
            error,
        } = self;

        match data {
            Some(data) if success => Ok(data),
            _ if !success && message.as_deref() == Some(CONNECTION_ERROR_MESSAGE) => {
                Err(PixError::transport(
                    error.unwrap_or_else(|| CONNECTION_ERROR_MESSAGE.to_string()),
                ))
            }
            _ => Err(PixError::Rejected {
                message: message.unwrap_or_else(|| MISSING_DATA_MESSAGE.to_string()),
                error,
            }),
        }
    }
}

/// Message used when a reply carries neither a payload nor an explanation
const MISSING_DATA_MESSAGE: &str = "gateway returned no data";

impl ApiResponse<Value> {
    /// Decode the raw payload into `T`.
    ///
    /// A payload that does not fit `T` keeps the envelope's `success` flag and
    /// message; the decode error goes in `error` and `data` is dropped. A sale the
    /// gateway accepted is never reported as a connection failure.
    pub(crate) fn decode_data<T>(self) -> ApiResponse<T>
    where
        T: DeserializeOwned,
    {
        let Self {
            success,
            data,
            message,
            error,
        } = self;

        match data.map(serde_json::from_value::<T>).transpose() {
            Ok(data) => ApiResponse {
                success,
                data,
                message,
                error,
            },
            Err(e) => {
                warn!("PIX gateway payload did not match the expected shape: {}", e);
                ApiResponse {
                    success,
                    data: None,
                    message,
                    error: error.or_else(|| Some(format!("unexpected payload shape: {}", e))),
                }
            }
        }
    }
}

/// Gateways send `error` as a string or as a structured value; keep either as text.
pub(crate) fn deserialize_error_field<'de, D>(deserializer: D) -> StdResult<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(error_value_to_string))
}

pub(crate) fn error_value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Tolerant field decoders for gateway payloads.
///
/// Ids may arrive as numbers, amounts as floats or numeric strings, and any field
/// as `null`. None of these fail the decode.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_string(deserializer)?.unwrap_or_default())
    }

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(super::error_value_to_string(Value::deserialize(deserializer)?))
    }

    /// Missing or unreadable amounts read as 0
    pub fn amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_amount(deserializer)?.unwrap_or_default())
    }

    /// Fractional values are rounded to whole centavos
    pub fn opt_amount<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(value_to_amount(&Value::deserialize(deserializer)?))
    }

    pub(super) fn value_to_amount(value: &Value) -> Option<i64> {
        match value {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f.round() as i64)),
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().map(|f| f.round() as i64))
            }
            _ => None,
        }
    }
}

/// PIX payment code issued for a sale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PixCode {
    /// QR code image (URL or base64 data)
    #[serde(deserialize_with = "lenient::opt_string")]
    pub qr_code: Option<String>,
    /// Copy-and-paste payment code
    #[serde(deserialize_with = "lenient::opt_string")]
    pub copy_paste: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub expires_at: Option<String>,
}

/// Payload of a successful sale creation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleData {
    /// Transaction id used for status queries
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    /// Raw gateway status literal, empty when the gateway sent none
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: i64,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "lenient::opt_amount")]
    pub fee: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_amount")]
    pub net_amount: Option<i64>,
    pub pix: Option<PixCode>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub external_ref: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub updated_at: Option<String>,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl SaleData {
    /// Normalized status
    pub fn payment_status(&self) -> PaymentStatus {
        map_status(&self.status)
    }

    /// Copy-and-paste PIX code, if the gateway issued one
    pub fn pix_copy_paste(&self) -> Option<&str> {
        self.pix.as_ref()?.copy_paste.as_deref()
    }
}

/// Payload of a status query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusData {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    /// Raw gateway status literal, empty when the gateway sent none
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: i64,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub paid_at: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl StatusData {
    /// Normalized status
    pub fn payment_status(&self) -> PaymentStatus {
        map_status(&self.status)
    }
}

/// Seller account metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerData {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub document: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Reply to a sale creation
pub type SaleResponse = ApiResponse<SaleData>;
/// Reply to a status query
pub type StatusResponse = ApiResponse<StatusData>;
/// Reply to a seller query
pub type SellerResponse = ApiResponse<SellerData>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_customer() -> Customer {
        Customer::new(
            "Maria Silva",
            "maria@example.com",
            "(11) 98765-4321",
            Document::cpf("123.456.789-09"),
        )
    }

    #[test]
    fn test_sale_request_defaults() {
        let request = SaleRequest::new(5000, vec![Item::new("Ebook", 5000, 1)], sample_customer());

        assert_eq!(request.currency, "BRL");
        assert_eq!(request.payment_method, "pix");
        assert_eq!(request.pix, Some(PixOptions { expires_in_days: 1 }));
        assert!(!request.requires_shipping());
        assert_eq!(request.total_from_items(), 5000);
    }

    #[test]
    fn test_sale_request_serializes_camel_case() {
        let request = SaleRequest::new(
            2500,
            vec![Item::new("Camiseta", 1250, 2).tangible(true)],
            sample_customer(),
        )
        .with_pix_expiry_days(3)
        .with_postback_url("https://shop.example.com/hooks/pix")
        .with_external_ref("order-42");

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["paymentMethod"], "pix");
        assert_eq!(value["pix"]["expiresInDays"], 3);
        assert_eq!(value["items"][0]["unitPrice"], 1250);
        assert_eq!(value["items"][0]["tangible"], true);
        assert_eq!(value["customer"]["document"]["type"], "cpf");
        assert_eq!(value["customer"]["document"]["number"], "12345678909");
        assert_eq!(value["customer"]["phone"], "11987654321");
        assert_eq!(value["postbackUrl"], "https://shop.example.com/hooks/pix");
        assert_eq!(value["externalRef"], "order-42");
        assert!(value.get("shipping").is_none());
        assert!(value.get("metadata").is_none());
        assert!(request.requires_shipping());
    }

    #[test]
    fn test_shipping_normalization() {
        let shipping = Shipping::new(
            "Av. Paulista",
            "1000",
            "Bela Vista",
            "São Paulo",
            " sp ",
            "01310-100",
        )
        .with_complement("Apto 12");

        assert_eq!(shipping.state, "SP");
        assert_eq!(shipping.zip_code, "01310100");

        let value = serde_json::to_value(&shipping).unwrap();
        assert_eq!(value["streetNumber"], "1000");
        assert_eq!(value["zipCode"], "01310100");
        assert_eq!(value["complement"], "Apto 12");
    }

    #[test]
    fn test_cnpj_document() {
        let document = Document::cnpj("12.345.678/0001-95");
        assert_eq!(document.number, "12345678000195");
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!({"number": "12345678000195", "type": "cnpj"})
        );
    }

    #[test]
    fn test_sale_response_keeps_unknown_fields() {
        let response: SaleResponse = serde_json::from_value(json!({
            "success": true,
            "data": {
                "id": "tx_123",
                "status": "PENDING",
                "amount": 5000,
                "pix": {"qrCode": "data:image/png;base64,AAA", "copyPaste": "00020126..."},
                "createdAt": "2024-05-01T12:00:00Z",
                "acquirer": "bank-x"
            }
        }))
        .unwrap();

        let data = response.data().unwrap();
        assert_eq!(data.id, "tx_123");
        assert_eq!(data.payment_status(), PaymentStatus::Pending);
        assert_eq!(data.pix_copy_paste(), Some("00020126..."));
        assert_eq!(data.extra["acquirer"], "bank-x");
    }

    #[test]
    fn test_structured_error_field_is_stringified() {
        let response: StatusResponse = serde_json::from_value(json!({
            "success": false,
            "message": "not found",
            "error": {"code": 404}
        }))
        .unwrap();

        assert_eq!(response.error.as_deref(), Some(r#"{"code":404}"#));
        assert!(response.data().is_none());
    }

    #[test]
    fn test_data_hidden_unless_success() {
        let response = StatusResponse {
            success: false,
            data: Some(StatusData::default()),
            message: None,
            error: None,
        };

        assert!(response.data().is_none());
        assert!(response.into_data().is_none());
    }

    #[test]
    fn test_missing_success_flag_reads_as_failure() {
        let response: SellerResponse =
            serde_json::from_value(json!({"data": {"id": "seller_1"}})).unwrap();
        assert!(!response.is_success());
    }

    #[test]
    fn test_loose_payload_fields_still_decode() {
        let response: SaleResponse = serde_json::from_value(json!({
            "success": true,
            "data": {
                "id": 12345,
                "status": null,
                "amount": 50.0,
                "fee": "1.6",
                "netAmount": null,
                "currency": null,
                "pix": {"qrCode": null, "copyPaste": 20101}
            }
        }))
        .unwrap();

        let data = response.into_data().unwrap();
        assert_eq!(data.id, "12345");
        assert_eq!(data.status, "");
        assert_eq!(data.payment_status(), PaymentStatus::Pending);
        assert_eq!(data.amount, 50);
        assert_eq!(data.fee, Some(2));
        assert_eq!(data.net_amount, None);
        assert_eq!(data.currency, None);
        assert_eq!(data.pix_copy_paste(), Some("20101"));
    }

    #[test]
    fn test_unreadable_amount_reads_as_zero() {
        let status: StatusData =
            serde_json::from_value(json!({"id": "tx_1", "amount": "n/a", "status": "PAID"}))
                .unwrap();
        assert_eq!(status.amount, 0);
        assert_eq!(status.payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn test_mismatched_payload_keeps_envelope() {
        let raw: ApiResponse<Value> = serde_json::from_value(json!({
            "success": true,
            "message": "created",
            "data": "tx_1"
        }))
        .unwrap();

        let response: SaleResponse = raw.decode_data();
        assert!(response.is_success());
        assert_eq!(response.message.as_deref(), Some("created"));
        assert!(response.data.is_none());
        assert!(response
            .error
            .as_deref()
            .unwrap_or_default()
            .starts_with("unexpected payload shape"));
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Receipt {
        code: String,
    }

    #[test]
    fn test_envelope_payload_needs_no_default() {
        let response: ApiResponse<Receipt> =
            serde_json::from_value(json!({"success": true, "data": {"code": "R1"}})).unwrap();
        assert_eq!(
            response.into_data(),
            Some(Receipt {
                code: "R1".to_string()
            })
        );

        let empty: ApiResponse<Receipt> = serde_json::from_value(json!({"success": false})).unwrap();
        assert!(empty.data.is_none());
    }

    #[test]
    fn test_into_result() {
        let ok = SellerResponse {
            success: true,
            data: Some(SellerData {
                id: "seller_1".to_string(),
                ..Default::default()
            }),
            message: None,
            error: None,
        };
        assert_eq!(ok.into_result().unwrap().id, "seller_1");

        let rejected = SellerResponse::failure("boom", Some("E1".to_string()));
        match rejected.into_result() {
            Err(PixError::Rejected { message, error }) => {
                assert_eq!(message, "boom");
                assert_eq!(error.as_deref(), Some("E1"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }

        let offline = SellerResponse::failure(
            CONNECTION_ERROR_MESSAGE,
            Some("HTTP error: connection refused".to_string()),
        );
        match offline.into_result() {
            Err(PixError::Transport { message }) => {
                assert_eq!(message, "HTTP error: connection refused")
            }
            other => panic!("expected Transport, got {:?}", other),
        }

        let empty = SellerResponse {
            success: true,
            data: None,
            message: None,
            error: None,
        };
        let err = empty.into_result().unwrap_err();
        assert!(err.is_remote_rejection());
        assert_eq!(err.to_string(), "Gateway reported failure: gateway returned no data");
    }

    #[test]
    fn test_totals_saturate() {
        let item = Item::new("Servidor", i64::MAX / 2, 3);
        assert_eq!(item.subtotal(), i64::MAX);

        let request = SaleRequest::new(
            0,
            vec![item, Item::new("Suporte", i64::MAX, 1)],
            sample_customer(),
        );
        assert_eq!(request.total_from_items(), i64::MAX);
    }
}
