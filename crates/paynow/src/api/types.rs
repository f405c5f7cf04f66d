//! Paynow API type definitions
//!
//! Request and response types for the Paynow v3 API. All types use
//! `camelCase` serialization to match the API's JSON format, and optional
//! request fields are omitted from the body when unset.
//!
//! ## Amount Handling
//!
//! Amounts are integers in the smallest unit of the currency (grosze for
//! `PLN`, cents for `EUR`). The client never converts or rounds them.
//!
//! ## Payment States
//!
//! [`PaymentStatus`]: `NEW`, `PENDING`, `CONFIRMED`, `REJECTED`, `ERROR`,
//! `EXPIRED`, `ABANDONED`. Statuses are reported exactly as received.
//!
//! ## Refund States
//!
//! [`RefundStatus`]: `NEW`, `PENDING`, `SUCCESSFUL`, `FAILED`, `CANCELLED`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported currencies in the Paynow API
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Polish Zloty
    PLN,
    /// Euro
    EUR,
    /// US Dollar
    USD,
    /// British Pound
    GBP,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::PLN => write!(f, "PLN"),
            Currency::EUR => write!(f, "EUR"),
            Currency::USD => write!(f, "USD"),
            Currency::GBP => write!(f, "GBP"),
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PLN" => Ok(Currency::PLN),
            "EUR" => Ok(Currency::EUR),
            "USD" => Ok(Currency::USD),
            "GBP" => Ok(Currency::GBP),
            _ => Err(format!("Unknown currency: {}", s)),
        }
    }
}

/// Payment status as reported by Paynow
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    /// Payment created, buyer not redirected yet
    New,
    /// Awaiting buyer action or bank confirmation
    Pending,
    /// Funds confirmed
    Confirmed,
    /// Rejected by the bank or buyer
    Rejected,
    /// Processing error
    Error,
    /// Validity time elapsed
    Expired,
    /// Buyer left the payment flow
    Abandoned,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::New => "NEW",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Confirmed => "CONFIRMED",
            PaymentStatus::Rejected => "REJECTED",
            PaymentStatus::Error => "ERROR",
            PaymentStatus::Expired => "EXPIRED",
            PaymentStatus::Abandoned => "ABANDONED",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(PaymentStatus::New),
            "PENDING" => Ok(PaymentStatus::Pending),
            "CONFIRMED" => Ok(PaymentStatus::Confirmed),
            "REJECTED" => Ok(PaymentStatus::Rejected),
            "ERROR" => Ok(PaymentStatus::Error),
            "EXPIRED" => Ok(PaymentStatus::Expired),
            "ABANDONED" => Ok(PaymentStatus::Abandoned),
            _ => Err(format!("Unknown payment status: {}", s)),
        }
    }
}

/// Buyer phone number
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Phone {
    /// Country calling code (e.g. "+48")
    pub prefix: String,
    /// Subscriber number
    pub number: String,
}

/// Buyer details
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    /// Buyer email address
    pub email: String,
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    /// Locale for the payment page (e.g. "pl-PL")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Buyer {
    /// Buyer identified only by email
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }
}

/// Line item of an order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product name
    pub name: String,
    /// Producer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    /// Product category
    pub category: String,
    /// Number of units
    pub quantity: u32,
    /// Unit price in minor currency units
    pub price: u64,
}

/// Create payment request
///
/// See <https://docs.paynow.pl/>
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Amount in minor currency units
    pub amount: u64,
    /// Merchant's own order identifier
    pub external_id: String,
    /// Payment description shown to the buyer
    pub description: String,
    /// Buyer details
    pub buyer: Buyer,
    /// URL the buyer returns to after payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continue_url: Option<String>,
    /// Currency (Paynow defaults to PLN)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Seconds the payment stays valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_time: Option<u32>,
    /// Order line items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_items: Option<Vec<OrderItem>>,
    /// Preselected payment method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<u64>,
    /// BLIK code for white-label payments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<String>,
}

impl PaymentRequest {
    /// Request with the required fields only
    pub fn new(
        amount: u64,
        external_id: impl Into<String>,
        description: impl Into<String>,
        buyer: Buyer,
    ) -> Self {
        Self {
            amount,
            external_id: external_id.into(),
            description: description.into(),
            buyer,
            continue_url: None,
            currency: None,
            validity_time: None,
            order_items: None,
            payment_method_id: None,
            authorization_code: None,
        }
    }
}

/// Create payment response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Paynow payment identifier
    pub payment_id: String,
    /// Where to send the buyer (absent for white-label flows)
    #[serde(default)]
    pub redirect_url: Option<String>,
    /// Initial status
    pub status: PaymentStatus,
}

/// Payment status response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    /// Paynow payment identifier
    pub payment_id: String,
    /// Current status
    pub status: PaymentStatus,
}

/// Payment status change notification sent by Paynow
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNotification {
    /// Paynow payment identifier
    pub payment_id: String,
    /// Merchant's order identifier
    pub external_id: String,
    /// New status
    pub status: PaymentStatus,
    /// Time of the change (ISO 8601, as sent)
    pub modified_at: String,
}

/// Refund reason
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundReason {
    /// Return merchandise authorization
    Rma,
    /// Refund within 14 days
    #[serde(rename = "REFUND_BEFORE_14")]
    RefundBefore14,
    /// Refund after 14 days
    #[serde(rename = "REFUND_AFTER_14")]
    RefundAfter14,
    /// Any other reason
    Other,
}

/// Refund request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RefundRequest {
    /// Amount to refund in minor currency units
    pub amount: u64,
    /// Reason for the refund
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RefundReason>,
}

/// Refund status
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RefundStatus {
    /// Refund registered
    New,
    /// Refund in progress
    Pending,
    /// Funds returned
    Successful,
    /// Refund failed
    Failed,
    /// Refund cancelled
    Cancelled,
}

impl fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RefundStatus::New => "NEW",
            RefundStatus::Pending => "PENDING",
            RefundStatus::Successful => "SUCCESSFUL",
            RefundStatus::Failed => "FAILED",
            RefundStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RefundStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(RefundStatus::New),
            "PENDING" => Ok(RefundStatus::Pending),
            "SUCCESSFUL" => Ok(RefundStatus::Successful),
            "FAILED" => Ok(RefundStatus::Failed),
            "CANCELLED" => Ok(RefundStatus::Cancelled),
            _ => Err(format!("Unknown refund status: {}", s)),
        }
    }
}

/// Refund creation response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    /// Paynow refund identifier
    pub refund_id: String,
    /// Initial refund status
    pub status: RefundStatus,
}

/// Refund status response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundStatusResponse {
    /// Paynow refund identifier
    pub refund_id: String,
    /// Current refund status
    pub status: RefundStatus,
    /// Failure reason, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

/// Payment method offered to the buyer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// Method identifier, usable as `paymentMethodId`
    pub id: u64,
    /// Display name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Logo URL
    #[serde(default)]
    pub image: Option<String>,
    /// Availability (`ENABLED` / `DISABLED`)
    pub status: String,
    /// Authorization flow (`REDIRECT`, `CODE`)
    #[serde(default)]
    pub authorization_type: Option<String>,
}

/// Payment methods grouped by type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodGroup {
    /// Group type (`PBL`, `CARD`, `BLIK`, `GOOGLE_PAY`, ...)
    #[serde(rename = "type")]
    pub method_type: String,
    /// Methods in the group
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
}
