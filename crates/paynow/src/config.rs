//! Configuration types for the Paynow client

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Production API endpoint
pub const PRODUCTION_API_URL: &str = "https://api.paynow.pl/v3";
/// Sandbox API endpoint
pub const SANDBOX_API_URL: &str = "https://api.sandbox.paynow.pl/v3";
/// Default timeout for outbound calls in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Paynow environment
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Sandbox environment for integration testing
    #[default]
    #[serde(alias = "SANDBOX", alias = "Sandbox")]
    Sandbox,
    /// Production environment
    #[serde(alias = "PRODUCTION", alias = "Production")]
    Production,
}

impl Environment {
    /// Base URL of the v3 API for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_API_URL,
            Environment::Sandbox => SANDBOX_API_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

/// Paynow client configuration
///
/// Credentials are fixed for the lifetime of a [`Paynow`](crate::Paynow)
/// client built from this value.
#[derive(Clone, Serialize, Deserialize)]
pub struct PaynowConfig {
    /// Merchant API key, sent with every request
    pub api_key: String,
    /// Merchant signature key, used only to derive HMAC digests
    pub signature_key: String,
    /// Target environment
    /// Default is sandbox
    #[serde(default)]
    pub environment: Environment,
    /// Override for the API base URL (proxies, test servers)
    #[serde(default)]
    pub api_url: Option<String>,
    /// Timeout for outbound calls in seconds
    /// Default is 30 seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl PaynowConfig {
    /// Sandbox configuration with default timeout
    pub fn new(api_key: impl Into<String>, signature_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            signature_key: signature_key.into(),
            environment: Environment::default(),
            api_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the target environment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Point the client at a different base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Base URL the client will talk to
    pub fn resolved_api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }
}

impl fmt::Debug for PaynowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaynowConfig")
            .field("api_key", &"<redacted>")
            .field("signature_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
