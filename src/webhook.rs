//! Webhook payloads posted by the gateway
//!
//! Only decoding lives here. Receiving the HTTP request and checking where it
//! came from is up to the caller.

use crate::status::{map_status, PaymentStatus};
use crate::{PixError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of state change being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEvent {
    #[serde(rename = "transaction.created")]
    TransactionCreated,
    #[serde(rename = "transaction.paid")]
    TransactionPaid,
    #[serde(rename = "transaction.cancelled")]
    TransactionCancelled,
    #[serde(rename = "transaction.refunded")]
    TransactionRefunded,
    #[serde(rename = "withdrawal.completed")]
    WithdrawalCompleted,
    #[serde(rename = "withdrawal.failed")]
    WithdrawalFailed,
}

impl WebhookEvent {
    /// Wire literal for this event
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookEvent::TransactionCreated => "transaction.created",
            WebhookEvent::TransactionPaid => "transaction.paid",
            WebhookEvent::TransactionCancelled => "transaction.cancelled",
            WebhookEvent::TransactionRefunded => "transaction.refunded",
            WebhookEvent::WithdrawalCompleted => "withdrawal.completed",
            WebhookEvent::WithdrawalFailed => "withdrawal.failed",
        }
    }

    pub fn is_transaction_event(&self) -> bool {
        matches!(
            self,
            WebhookEvent::TransactionCreated
                | WebhookEvent::TransactionPaid
                | WebhookEvent::TransactionCancelled
                | WebhookEvent::TransactionRefunded
        )
    }

    pub fn is_withdrawal_event(&self) -> bool {
        !self.is_transaction_event()
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer summary attached to transaction events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookCustomer {
    pub name: String,
    pub email: String,
}

/// Body of a webhook notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub event: WebhookEvent,
    /// When the gateway emitted the event, as sent
    pub timestamp: String,
    /// Raw gateway status literal
    pub status: String,
    /// Gross amount in centavos
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<String>,
    /// Metadata given at sale creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<WebhookCustomer>,
}

impl WebhookPayload {
    /// Decode a raw request body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| PixError::invalid_webhook(e.to_string()))
    }

    /// Decode a body already read as text
    pub fn from_json(body: &str) -> Result<Self> {
        Self::from_slice(body.as_bytes())
    }

    pub fn is_transaction_event(&self) -> bool {
        self.event.is_transaction_event()
    }

    pub fn is_withdrawal_event(&self) -> bool {
        self.event.is_withdrawal_event()
    }

    /// Normalized status
    pub fn payment_status(&self) -> PaymentStatus {
        map_status(&self.status)
    }

    /// Event time, `None` if the gateway did not send RFC 3339
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Transaction or withdrawal id, whichever the event carries
    pub fn subject_id(&self) -> Option<&str> {
        if self.is_transaction_event() {
            self.transaction_id.as_deref()
        } else {
            self.withdrawal_id.as_deref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_paid_event() {
        let body = json!({
            "event": "transaction.paid",
            "timestamp": "2024-05-01T12:30:00-03:00",
            "status": "PAID",
            "amount": 5000,
            "transactionId": "tx_123",
            "fee": 99,
            "netAmount": 4901,
            "paymentMethod": "pix",
            "metadata": {"orderId": "42"},
            "customer": {"name": "Maria Silva", "email": "maria@example.com"}
        })
        .to_string();

        let payload = WebhookPayload::from_json(&body).unwrap();
        assert_eq!(payload.event, WebhookEvent::TransactionPaid);
        assert_eq!(payload.payment_status(), PaymentStatus::Paid);
        assert_eq!(payload.subject_id(), Some("tx_123"));
        assert_eq!(payload.net_amount, Some(4901));
        assert_eq!(payload.customer.as_ref().unwrap().email, "maria@example.com");
        assert_eq!(
            payload.occurred_at(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 15, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_withdrawal_event() {
        let body = br#"{
            "event": "withdrawal.failed",
            "timestamp": "not a date",
            "status": "FAILED",
            "amount": 10000,
            "withdrawalId": "wd_9"
        }"#;

        let payload = WebhookPayload::from_slice(body).unwrap();
        assert!(payload.is_withdrawal_event());
        assert_eq!(payload.subject_id(), Some("wd_9"));
        assert!(payload.occurred_at().is_none());
        assert!(payload.customer.is_none());
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let body = r#"{"event":"transaction.expired","timestamp":"","status":"","amount":0}"#;
        let err = WebhookPayload::from_json(body).unwrap_err();
        assert!(matches!(err, PixError::InvalidWebhook { .. }));
    }

    #[test]
    fn test_event_literals() {
        for event in [
            WebhookEvent::TransactionCreated,
            WebhookEvent::TransactionPaid,
            WebhookEvent::TransactionCancelled,
            WebhookEvent::TransactionRefunded,
            WebhookEvent::WithdrawalCompleted,
            WebhookEvent::WithdrawalFailed,
        ] {
            let encoded = serde_json::to_string(&event).unwrap();
            assert_eq!(encoded, format!("\"{}\"", event));
        }
    }
}
