//! Paynow notification handling
//!
//! Paynow sends an HTTP POST to the merchant's notification URL whenever a
//! payment changes status. This crate does not run that endpoint; the
//! integrator hands over the `Signature` header value and the raw body.
//!
//! # Signature Verification
//!
//! 1. Read the `Signature` header (Base64-encoded)
//! 2. Compute HMAC-SHA256 of the raw request body using the signature key
//! 3. Compare the encoded digests in constant time
//!
//! Always verify before parsing. [`Paynow::parse_notification`] does not check
//! the signature on its own.
//!
//! # Notification Payload
//!
//! ```json
//! {
//!   "paymentId": "NOLV-8F9-08K-WGD",
//!   "externalId": "9fea23c7-cd5c-4884-9842-6f8592be65df",
//!   "status": "CONFIRMED",
//!   "modifiedAt": "2018-12-12T13:24:52"
//! }
//! ```
//!
//! Paynow retries delivery until it gets a 2xx response, so the same
//! notification may arrive more than once.

use tracing::{debug, warn};

use super::error::Error;
use super::types::PaymentNotification;
use super::Paynow;

/// Header Paynow puts the notification signature in
pub const NOTIFICATION_SIGNATURE_HEADER: &str = "Signature";

/// Notification functionality for Paynow
impl Paynow {
    /// Verify a notification signature against its raw body
    ///
    /// Returns `false` on mismatch; nothing in the body should be trusted then.
    pub fn verify_notification(&self, signature: &str, raw_body: &str) -> bool {
        let verified = self
            .signature_engine()
            .verify_webhook_signature(signature, raw_body);

        if verified {
            debug!("Paynow notification signature verified");
        } else {
            warn!("Paynow notification signature verification failed");
        }

        verified
    }

    /// Parse a notification body
    ///
    /// Call [`verify_notification`](Self::verify_notification) first.
    pub fn parse_notification(&self, raw_body: &str) -> Result<PaymentNotification, Error> {
        let notification: PaymentNotification = serde_json::from_str(raw_body).map_err(|e| {
            warn!("Failed to parse Paynow notification: {}", e);
            Error::MalformedNotification(e.to_string())
        })?;

        debug!(
            "Received notification: {} - {}",
            notification.payment_id, notification.status
        );

        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PaymentStatus;
    use crate::config::PaynowConfig;

    fn client(signature_key: &str) -> Paynow {
        Paynow::new(PaynowConfig::new("api-key", signature_key)).unwrap()
    }

    fn notification() -> PaymentNotification {
        PaymentNotification {
            payment_id: "NOLV-8F9-08K-WGD".to_string(),
            external_id: "order-123".to_string(),
            status: PaymentStatus::Confirmed,
            modified_at: "2018-12-12T13:24:52".to_string(),
        }
    }

    #[test]
    fn test_verify_notification() {
        let paynow = client("test-key");
        let body = r#"{"paymentId":"TEST-123","status":"CONFIRMED"}"#;
        let signature = paynow.signature_engine().compute_webhook_signature(body);

        assert!(paynow.verify_notification(&signature, body));
        assert!(!paynow.verify_notification("wrong-signature", body));
    }

    #[test]
    fn test_verify_notification_rejects_other_key() {
        let body = serde_json::to_string(&notification()).unwrap();
        let signature = client("merchant-a")
            .signature_engine()
            .compute_webhook_signature(&body);

        assert!(!client("merchant-b").verify_notification(&signature, &body));
    }

    #[test]
    fn test_verify_notification_rejects_tampered_body() {
        let paynow = client("test-key");
        let body = serde_json::to_string(&notification()).unwrap();
        let signature = paynow.signature_engine().compute_webhook_signature(&body);
        let tampered = body.replace("CONFIRMED", "REJECTED");

        assert!(!paynow.verify_notification(&signature, &tampered));
    }

    #[test]
    fn test_parse_notification_round_trip() {
        let paynow = client("test-key");
        let expected = notification();
        let body = serde_json::to_string(&expected).unwrap();

        assert_eq!(paynow.parse_notification(&body).unwrap(), expected);
    }

    #[test]
    fn test_parse_notification_every_status() {
        let paynow = client("test-key");
        let statuses = [
            "NEW",
            "PENDING",
            "CONFIRMED",
            "REJECTED",
            "ERROR",
            "EXPIRED",
            "ABANDONED",
        ];
        for status in statuses {
            let body = format!(
                r#"{{"paymentId":"P1","externalId":"E1","status":"{}","modifiedAt":"2024-01-15T12:00:00"}}"#,
                status
            );
            let parsed = paynow.parse_notification(&body).unwrap();
            assert_eq!(parsed.status.to_string(), status);
        }
    }

    #[test]
    fn test_parse_notification_not_json() {
        let err = client("test-key").parse_notification("not json").unwrap_err();
        assert!(matches!(err, Error::MalformedNotification(_)));
    }

    #[test]
    fn test_parse_notification_missing_field() {
        let err = client("test-key")
            .parse_notification(r#"{"paymentId":"TEST-123","status":"CONFIRMED"}"#)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedNotification(_)));
        assert!(err.to_string().contains("externalId"));
    }

    #[test]
    fn test_parse_notification_unknown_status() {
        let err = client("test-key")
            .parse_notification(
                r#"{"paymentId":"P1","externalId":"E1","status":"SETTLED","modifiedAt":"2024-01-15T12:00:00"}"#,
            )
            .unwrap_err();
        assert!(matches!(err, Error::MalformedNotification(_)));
    }

    #[test]
    fn test_verify_then_parse() {
        let paynow = client("test-key");
        let body = serde_json::to_string(&notification()).unwrap();
        let signature = paynow.signature_engine().compute_webhook_signature(&body);

        assert!(paynow.verify_notification(&signature, &body));
        let parsed = paynow.parse_notification(&body).unwrap();
        assert_eq!(parsed.payment_id, "NOLV-8F9-08K-WGD");
        assert_eq!(parsed.status, PaymentStatus::Confirmed);
    }
}
