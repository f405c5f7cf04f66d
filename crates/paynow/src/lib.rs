//! Client for the Paynow payment gateway
//!
//! Creates signed payment requests against the Paynow v3 REST API, queries
//! payment and refund status, and validates inbound payment notifications.
//!
//! # Usage
//!
//! ```rust,no_run
//! use paynow::{Buyer, Paynow, PaynowConfig, PaymentRequest};
//!
//! # async fn example() -> Result<(), paynow::Error> {
//! let paynow = Paynow::new(PaynowConfig::new("api-key", "signature-key"))?;
//!
//! let payment = paynow
//!     .create_payment(PaymentRequest::new(
//!         1000,
//!         "order-123",
//!         "Order #123",
//!         Buyer::new("jan.kowalski@example.com"),
//!     ))
//!     .await?;
//!
//! println!("redirect buyer to {:?}", payment.redirect_url);
//! # Ok(())
//! # }
//! ```
//!
//! Notifications are verified before they are parsed:
//!
//! ```rust,no_run
//! # fn handle(paynow: &paynow::Paynow, signature: &str, body: &str) -> Result<(), paynow::Error> {
//! if paynow.verify_notification(signature, body) {
//!     let notification = paynow.parse_notification(body)?;
//!     println!("{} is now {}", notification.external_id, notification.status);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

pub mod api;
pub mod config;
pub mod signature;

pub use api::error::{Error, GatewayError, ValidationError};
pub use api::types::{
    Buyer, Currency, OrderItem, PaymentMethod, PaymentMethodGroup, PaymentNotification,
    PaymentRequest, PaymentResponse, PaymentStatus, PaymentStatusResponse, Phone, RefundReason,
    RefundRequest, RefundResponse, RefundStatus, RefundStatusResponse,
};
pub use api::Paynow;
pub use config::{Environment, PaynowConfig};
pub use signature::SignatureEngine;
