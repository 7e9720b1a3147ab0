//! Gateway client for sale creation, status polling and seller lookup

use crate::config::GatewayConfig;
use crate::headers::build_headers;
use crate::types::{
    error_value_to_string, ApiResponse, SaleRequest, SaleResponse, SellerResponse, StatusResponse,
};
use crate::{PixError, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Path for sale creation, relative to the base URL
pub const CREATE_SALE_PATH: &str = "/sales/create-sale";
/// Path for seller metadata, relative to the base URL
pub const SELLER_PATH: &str = "/sales/seller";

/// Characters escaped in a transaction id placed in the URL path
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Path for a transaction's status
pub fn status_path(transaction_id: &str) -> String {
    format!(
        "/sales/{}/status",
        utf8_percent_encode(transaction_id, PATH_SEGMENT)
    )
}

#[derive(Debug, Clone, Copy)]
struct Operation {
    method: &'static str,
    name: &'static str,
    default_message: &'static str,
}

const CREATE_SALE: Operation = Operation {
    method: "POST",
    name: "create sale",
    default_message: "error creating sale",
};

const GET_STATUS: Operation = Operation {
    method: "GET",
    name: "get transaction status",
    default_message: "error querying status",
};

const GET_SELLER: Operation = Operation {
    method: "GET",
    name: "get seller",
    default_message: "error fetching seller",
};

/// Client for the PIX gateway REST API.
///
/// The three operations always return an [`ApiResponse`]; failures of any kind
/// come back as `success: false` with a message, never as an `Err` or a panic.
/// Each call makes exactly one HTTP request, with no retries.
#[derive(Clone)]
pub struct PixGatewayClient {
    /// Base URL without a trailing slash
    base_url: String,
    /// HTTP client
    client: Client,
    /// Authentication headers sent on every call
    headers: HeaderMap,
}

impl std::fmt::Debug for PixGatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixGatewayClient")
            .field("base_url", &self.base_url)
            .field("headers", &"<redacted>")
            .finish()
    }
}

impl PixGatewayClient {
    /// Create a new gateway client.
    ///
    /// Fails on an invalid base URL or on credentials that cannot be sent as
    /// header values. Missing credentials are not an error.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| PixError::config(format!("Failed to create HTTP client: {}", e)))?;

        if config.credentials.is_empty() {
            warn!("No PIX gateway API key configured, requests will be sent without credentials");
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            headers: build_headers(&config.credentials)?,
        })
    }

    /// Create a client configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(GatewayConfig::from_env()?)
    }

    /// Get the base URL of the gateway
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a PIX sale
    pub async fn create_sale(&self, request: &SaleRequest) -> SaleResponse {
        let builder = self.client.post(self.endpoint(CREATE_SALE_PATH)).json(request);
        self.execute(builder, CREATE_SALE, CREATE_SALE_PATH, None).await
    }

    /// Create a PIX sale, giving up when `cancel` fires
    pub async fn create_sale_with_cancel(
        &self,
        request: &SaleRequest,
        cancel: &CancellationToken,
    ) -> SaleResponse {
        let builder = self.client.post(self.endpoint(CREATE_SALE_PATH)).json(request);
        self.execute(builder, CREATE_SALE, CREATE_SALE_PATH, Some(cancel)).await
    }

    /// Get the current status of a transaction
    pub async fn get_transaction_status(&self, transaction_id: &str) -> StatusResponse {
        let path = status_path(transaction_id);
        let builder = self.client.get(self.endpoint(&path));
        self.execute(builder, GET_STATUS, &path, None).await
    }

    /// Get the current status of a transaction, giving up when `cancel` fires
    pub async fn get_transaction_status_with_cancel(
        &self,
        transaction_id: &str,
        cancel: &CancellationToken,
    ) -> StatusResponse {
        let path = status_path(transaction_id);
        let builder = self.client.get(self.endpoint(&path));
        self.execute(builder, GET_STATUS, &path, Some(cancel)).await
    }

    /// Get the seller account tied to the configured keys
    pub async fn get_seller(&self) -> SellerResponse {
        let builder = self.client.get(self.endpoint(SELLER_PATH));
        self.execute(builder, GET_SELLER, SELLER_PATH, None).await
    }

    /// Get the seller account, giving up when `cancel` fires
    pub async fn get_seller_with_cancel(&self, cancel: &CancellationToken) -> SellerResponse {
        let builder = self.client.get(self.endpoint(SELLER_PATH));
        self.execute(builder, GET_SELLER, SELLER_PATH, Some(cancel)).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T>(
        &self,
        request: RequestBuilder,
        operation: Operation,
        path: &str,
        cancel: Option<&CancellationToken>,
    ) -> ApiResponse<T>
    where
        T: DeserializeOwned,
    {
        debug!(
            "Sending {} {} to PIX gateway ({})",
            operation.method, path, operation.name
        );

        let outcome = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(PixError::Cancelled),
                result = self.dispatch(request) => result,
            },
            None => self.dispatch(request).await,
        };

        match outcome {
            Ok(response) => response,
            Err(error) => {
                if error.is_remote_rejection() {
                    warn!("PIX gateway rejected {}: {}", operation.name, error);
                } else {
                    warn!("Failed to reach PIX gateway for {}: {}", operation.name, error);
                }
                let (message, error) = error.into_failure_parts(operation.default_message);
                ApiResponse::failure(message, error)
            }
        }
    }

    /// Send one request and decode the reply.
    ///
    /// A body that is not JSON is a transport failure even when the status is
    /// not a success. A 2xx JSON body always yields its envelope; a payload that
    /// does not fit `T` is dropped rather than failing the call.
    async fn dispatch<T>(&self, request: RequestBuilder) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let response = request.headers(self.headers.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let rejection: Value = serde_json::from_slice(&body)?;
            return Err(PixError::RemoteRejection {
                status: status.as_u16(),
                message: rejection
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                error: rejection.get("error").cloned().and_then(error_value_to_string),
            });
        }

        let envelope: ApiResponse<Value> = serde_json::from_slice(&body)?;
        Ok(envelope.decode_data())
    }
}
