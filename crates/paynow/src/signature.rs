//! Paynow request and notification signing
//!
//! Paynow authenticates both directions of traffic with HMAC-SHA256 keyed by
//! the merchant's signature key. The key itself never leaves this module.
//!
//! # Outbound requests
//!
//! API calls are signed over a canonical JSON document:
//!
//! ```json
//! {"headers":{"Api-Key":"...","Idempotency-Key":"..."},"parameters":{},"body":"{...}"}
//! ```
//!
//! Header and parameter names are sorted by byte order and the top-level keys
//! always appear as `headers`, `parameters`, `body`. Paynow recomputes the same
//! digest server-side, so the serialization must match byte for byte.
//!
//! # Notifications
//!
//! Webhook notifications are signed over the raw request body with no extra
//! structure. The digest arrives Base64-encoded in the `Signature` header.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ring::hmac;
use serde::Serialize;
use subtle::ConstantTimeEq;

/// Document hashed for outbound API signatures
#[derive(Serialize)]
struct CanonicalPayload<'a> {
    headers: BTreeMap<&'a str, &'a str>,
    parameters: BTreeMap<&'a str, &'a str>,
    body: &'a str,
}

impl<'a> CanonicalPayload<'a> {
    fn new(
        headers: &'a HashMap<String, String>,
        parameters: &'a HashMap<String, String>,
        body: &'a str,
    ) -> Self {
        Self {
            headers: sorted(headers),
            parameters: sorted(parameters),
            body,
        }
    }

    fn to_json(&self) -> String {
        // Only string maps and a string field; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn sorted(map: &HashMap<String, String>) -> BTreeMap<&str, &str> {
    map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

/// Computes and verifies Paynow HMAC-SHA256 signatures
#[derive(Clone)]
pub struct SignatureEngine {
    key: hmac::Key,
}

impl SignatureEngine {
    /// Create an engine keyed by the merchant signature key
    pub fn new(signature_key: &str) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, signature_key.as_bytes()),
        }
    }

    /// Signature for an outbound API request
    ///
    /// `headers` are the signed request headers (`Api-Key`, and
    /// `Idempotency-Key` for mutating calls), `parameters` the query string
    /// parameters and `body` the exact serialized body sent on the wire
    /// (empty for GET requests).
    pub fn compute_api_signature(
        &self,
        headers: &HashMap<String, String>,
        parameters: &HashMap<String, String>,
        body: &str,
    ) -> String {
        let payload = CanonicalPayload::new(headers, parameters, body).to_json();
        self.sign(payload.as_bytes())
    }

    /// Signature Paynow attaches to a notification with this raw body
    pub fn compute_webhook_signature(&self, raw_body: &str) -> String {
        self.sign(raw_body.as_bytes())
    }

    /// Check a received notification signature against the raw body
    ///
    /// Comparison runs in constant time over the encoded digests.
    pub fn verify_webhook_signature(&self, received_signature: &str, raw_body: &str) -> bool {
        let expected = self.compute_webhook_signature(raw_body);
        expected
            .as_bytes()
            .ct_eq(received_signature.as_bytes())
            .into()
    }

    fn sign(&self, message: &[u8]) -> String {
        let tag = hmac::sign(&self.key, message);
        STANDARD.encode(tag.as_ref())
    }
}

impl fmt::Debug for SignatureEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureEngine")
            .field("key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_canonical_payload_layout() {
        let headers = map(&[("Idempotency-Key", "abc"), ("Api-Key", "key")]);
        let parameters = map(&[("currency", "PLN"), ("amount", "100")]);
        let payload = CanonicalPayload::new(&headers, &parameters, "{\"a\":1}").to_json();

        assert_eq!(
            payload,
            r#"{"headers":{"Api-Key":"key","Idempotency-Key":"abc"},"parameters":{"amount":"100","currency":"PLN"},"body":"{\"a\":1}"}"#
        );
    }

    #[test]
    fn test_canonical_payload_empty_maps() {
        let empty = HashMap::new();
        let payload = CanonicalPayload::new(&empty, &empty, "").to_json();
        assert_eq!(payload, r#"{"headers":{},"parameters":{},"body":""}"#);
    }

    #[test]
    fn test_sorting_is_case_sensitive_byte_order() {
        let headers = map(&[("b", "1"), ("B", "2"), ("a", "3")]);
        let payload = CanonicalPayload::new(&headers, &HashMap::new(), "").to_json();
        assert!(payload.starts_with(r#"{"headers":{"B":"2","a":"3","b":"1"}"#));
    }

    #[test]
    fn test_non_ascii_is_hashed_as_utf8() {
        let body = r#"{"buyer":{"firstName":"Łukasz"}}"#;
        let payload = CanonicalPayload::new(&HashMap::new(), &HashMap::new(), body).to_json();
        assert!(payload.contains("Łukasz"));
    }

    #[test]
    fn test_api_signature_matches_manual_hmac() {
        let engine = SignatureEngine::new("secret");
        let headers = map(&[("Api-Key", "key")]);
        let signature = engine.compute_api_signature(&headers, &HashMap::new(), "");

        let key = hmac::Key::new(hmac::HMAC_SHA256, b"secret");
        let tag = hmac::sign(
            &key,
            br#"{"headers":{"Api-Key":"key"},"parameters":{},"body":""}"#,
        );
        assert_eq!(signature, STANDARD.encode(tag.as_ref()));
    }

    #[test]
    fn test_api_signature_order_independent() {
        let engine = SignatureEngine::new("secret");
        let body = r#"{"amount":1000}"#;

        let forward = map(&[("Api-Key", "k"), ("Idempotency-Key", "i"), ("X", "y")]);
        let backward = map(&[("X", "y"), ("Idempotency-Key", "i"), ("Api-Key", "k")]);
        let params_a = map(&[("amount", "1"), ("currency", "PLN")]);
        let params_b = map(&[("currency", "PLN"), ("amount", "1")]);

        assert_eq!(
            engine.compute_api_signature(&forward, &params_a, body),
            engine.compute_api_signature(&backward, &params_b, body)
        );
    }

    #[test]
    fn test_api_signature_changes_with_inputs() {
        let engine = SignatureEngine::new("secret");
        let headers = map(&[("Api-Key", "k")]);
        let empty = HashMap::new();

        let base = engine.compute_api_signature(&headers, &empty, "body");
        assert_ne!(base, engine.compute_api_signature(&headers, &empty, "bodY"));
        assert_ne!(
            base,
            engine.compute_api_signature(&map(&[("Api-Key", "K")]), &empty, "body")
        );
        assert_ne!(
            base,
            engine.compute_api_signature(&headers, &map(&[("a", "b")]), "body")
        );
    }

    #[test]
    fn test_empty_maps_are_deterministic() {
        let engine = SignatureEngine::new("secret");
        let empty = HashMap::new();
        let first = engine.compute_api_signature(&empty, &empty, "");
        let second = engine.compute_api_signature(&empty, &empty, "");
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_webhook_signature_depends_on_key() {
        let body = r#"{"paymentId":"P1","status":"NEW"}"#;
        let a = SignatureEngine::new("key-one").compute_webhook_signature(body);
        let b = SignatureEngine::new("key-two").compute_webhook_signature(body);
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_webhook_signature() {
        let engine = SignatureEngine::new("test-key");
        let body = r#"{"paymentId":"TEST-123","status":"CONFIRMED"}"#;

        let key = hmac::Key::new(hmac::HMAC_SHA256, b"test-key");
        let expected = STANDARD.encode(hmac::sign(&key, body.as_bytes()).as_ref());

        assert!(engine.verify_webhook_signature(&expected, body));
        assert!(!engine.verify_webhook_signature("wrong-signature", body));
    }

    #[test]
    fn test_verify_round_trip_and_near_misses() {
        let engine = SignatureEngine::new("test-key");
        for body in ["", "{}", "zażółć gęślą jaźń", r#"{"status":"PENDING"}"#] {
            let signature = engine.compute_webhook_signature(body);
            assert!(engine.verify_webhook_signature(&signature, body));

            // Truncated, extended and case-altered signatures must fail
            assert!(!engine.verify_webhook_signature(&signature[..signature.len() - 1], body));
            assert!(!engine.verify_webhook_signature(&format!("{signature}="), body));
            assert!(!engine.verify_webhook_signature(&signature.to_lowercase(), body));
            assert!(!engine.verify_webhook_signature("", body));
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let engine = SignatureEngine::new("super-secret");
        assert!(!format!("{:?}", engine).contains("super-secret"));
    }
}
