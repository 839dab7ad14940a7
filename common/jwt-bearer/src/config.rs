/// Audience used when the caller does not name one.
pub const DEFAULT_AUDIENCE: &str = "https://login.salesforce.com";

/// Seconds added to the current time to form the `exp` claim.
pub const DEFAULT_EXPIRY_SKEW_SECONDS: u32 = 300;

/// How the `exp` claim is written into the claims JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryFormat {
    /// `"exp":"1000000300"`, the established output of this tool.
    #[default]
    String,
    /// `"exp":1000000300`, the RFC 7519 NumericDate form.
    Numeric,
}

/// Parameters for a single JWT-bearer assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionConfig {
    /// Connected-app client identifier, written as `iss`.
    pub client_id: String,
    /// User the token is requested for, written as `sub`.
    pub user: String,
    /// Authorization server URL, written as `aud`.
    pub audience: String,
    /// Lifetime of the assertion in seconds.
    pub expiry_skew_seconds: u32,
    pub expiry_format: ExpiryFormat,
}

impl AssertionConfig {
    /// Construct config with the default audience and a 300 second expiry.
    pub fn new(client_id: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            user: user.into(),
            audience: DEFAULT_AUDIENCE.to_string(),
            expiry_skew_seconds: DEFAULT_EXPIRY_SKEW_SECONDS,
            expiry_format: ExpiryFormat::default(),
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Adjust how far in the future `exp` lands.
    pub fn with_expiry_skew(mut self, seconds: u32) -> Self {
        self.expiry_skew_seconds = seconds;
        self
    }

    pub fn with_expiry_format(mut self, format: ExpiryFormat) -> Self {
        self.expiry_format = format;
        self
    }
}
