//! Paynow API client
//!
//! This module implements the Paynow v3 REST API.
//! See <https://docs.paynow.pl/> for the complete API reference.
//!
//! # Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/v3/payments` | Create a payment |
//! | GET | `/v3/payments/{paymentId}` | Get payment status |
//! | GET | `/v3/payments/paymentmethods` | List available payment methods |
//! | POST | `/v3/payments/{paymentId}/refunds` | Refund a payment |
//! | GET | `/v3/refunds/{refundId}/status` | Get refund status |
//!
//! **Payment States:** `NEW`, `PENDING`, `CONFIRMED`, `REJECTED`, `ERROR`,
//! `EXPIRED`, `ABANDONED`
//!
//! # Authentication
//!
//! Every request carries the merchant key in the `Api-Key` header. Mutating
//! requests are additionally signed (`Signature` header) and carry a fresh
//! `Idempotency-Key`. See [`crate::signature`] for the signing scheme.
//!
//! # Environments
//!
//! | Environment | Base URL |
//! |-------------|----------|
//! | Production | `https://api.paynow.pl/v3` |
//! | Sandbox | `https://api.sandbox.paynow.pl/v3` |

pub mod error;
pub mod types;
pub mod webhook;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

use error::{Error, GatewayError};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use types::*;
use url::Url;
use uuid::Uuid;

use crate::config::PaynowConfig;
use crate::signature::SignatureEngine;

/// Header carrying the merchant API key
pub const API_KEY_HEADER: &str = "Api-Key";
/// Header carrying the HMAC signature
pub const SIGNATURE_HEADER: &str = "Signature";
/// Header carrying the per-request idempotency key
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Paynow API client
#[derive(Clone)]
pub struct Paynow {
    api_key: String,
    base_url: Url,
    client: Client,
    signer: SignatureEngine,
}

impl Paynow {
    /// Create a new Paynow API client
    pub fn new(config: PaynowConfig) -> Result<Self, Error> {
        let base_url = Url::parse(config.resolved_api_url())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "API URL cannot be used as a base: {}",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.api_key,
            base_url,
            client,
            signer: SignatureEngine::new(&config.signature_key),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Signature engine keyed with this client's signature key
    pub fn signature_engine(&self) -> &SignatureEngine {
        &self.signer
    }

    /// Build an endpoint URL from path segments below the base URL
    ///
    /// Segments are percent-encoded, so identifiers cannot escape their slot.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make an unsigned GET request
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make a signed GET request with query parameters
    async fn get_signed<T: DeserializeOwned>(
        &self,
        mut url: Url,
        parameters: &HashMap<String, String>,
    ) -> Result<T, Error> {
        if !parameters.is_empty() {
            let ordered: BTreeMap<&String, &String> = parameters.iter().collect();
            url.query_pairs_mut().extend_pairs(ordered);
        }

        let headers = HashMap::from([(API_KEY_HEADER.to_string(), self.api_key.clone())]);
        let signature = self.signer.compute_api_signature(&headers, parameters, "");

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(SIGNATURE_HEADER, signature)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make a signed POST request with a fresh idempotency key
    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        let body = serde_json::to_string(body)?;
        let idempotency_key = Uuid::new_v4().to_string();

        let headers = HashMap::from([
            (API_KEY_HEADER.to_string(), self.api_key.clone()),
            (IDEMPOTENCY_KEY_HEADER.to_string(), idempotency_key.clone()),
        ]);
        let signature = self
            .signer
            .compute_api_signature(&headers, &HashMap::new(), &body);

        debug!("POST {} (idempotency key {})", url, idempotency_key);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .header(SIGNATURE_HEADER, signature)
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key)
            .body(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, Error> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str(&text)?)
        } else {
            warn!("Paynow API error: {} - {}", status, text);
            Err(GatewayError::from_response(status.as_u16(), &text).into())
        }
    }

    // ==================== Payment Endpoints ====================

    /// Create a payment
    ///
    /// Every call generates a new idempotency key, so retrying a failed call
    /// through this method creates a distinct request on Paynow's side.
    pub async fn create_payment(&self, request: PaymentRequest) -> Result<PaymentResponse, Error> {
        let url = self.endpoint(&["payments"])?;
        self.post(url, &request).await
    }

    /// Get the status of a payment
    pub async fn get_payment_status(
        &self,
        payment_id: &str,
    ) -> Result<PaymentStatusResponse, Error> {
        let url = self.endpoint(&["payments", payment_id])?;
        self.get(url).await
    }

    /// List payment methods available for an amount and currency
    pub async fn get_payment_methods(
        &self,
        amount: Option<u64>,
        currency: Option<Currency>,
    ) -> Result<Vec<PaymentMethodGroup>, Error> {
        let url = self.endpoint(&["payments", "paymentmethods"])?;

        let mut parameters = HashMap::new();
        if let Some(amount) = amount {
            parameters.insert("amount".to_string(), amount.to_string());
        }
        if let Some(currency) = currency {
            parameters.insert("currency".to_string(), currency.to_string());
        }

        self.get_signed(url, &parameters).await
    }

    // ==================== Refund Endpoints ====================

    /// Refund a confirmed payment, fully or in part
    pub async fn create_refund(
        &self,
        payment_id: &str,
        request: RefundRequest,
    ) -> Result<RefundResponse, Error> {
        let url = self.endpoint(&["payments", payment_id, "refunds"])?;
        self.post(url, &request).await
    }

    /// Get the status of a refund
    pub async fn get_refund_status(&self, refund_id: &str) -> Result<RefundStatusResponse, Error> {
        let url = self.endpoint(&["refunds", refund_id, "status"])?;
        self.get(url).await
    }
}

impl fmt::Debug for Paynow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paynow")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("signer", &self.signer)
            .finish()
    }
}
