use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::claims::ClaimsSet;
use crate::clock::{Clock, SystemClock};
use crate::config::{AssertionConfig, DEFAULT_AUDIENCE};
use crate::header::Header;
use crate::token::UnsignedToken;

/// Base64 (standard alphabet, padded) over the UTF-8 bytes of `text`.
pub fn encode_segment(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Assemble `base64(header).base64(claims)` with `exp` five minutes from now.
pub fn build_unsigned_token(client_id: &str, user: &str, audience: &str) -> String {
    let config = AssertionConfig::new(client_id, user).with_audience(audience);
    TokenAssembler::new(config).assemble().into_string()
}

/// Same as [`build_unsigned_token`] against the default Salesforce login audience.
pub fn build_unsigned_token_for(client_id: &str, user: &str) -> String {
    build_unsigned_token(client_id, user, DEFAULT_AUDIENCE)
}

/// Builds unsigned JWT-bearer assertions from a fixed config and a clock.
#[derive(Debug, Clone)]
pub struct TokenAssembler<C = SystemClock> {
    config: AssertionConfig,
    clock: C,
}

impl TokenAssembler<SystemClock> {
    pub fn new(config: AssertionConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TokenAssembler<C> {
    pub fn with_clock(config: AssertionConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &AssertionConfig {
        &self.config
    }

    /// Claims as they would be issued at `now`.
    pub fn claims_at(&self, now: DateTime<Utc>) -> ClaimsSet {
        let expires_at = now.timestamp() + i64::from(self.config.expiry_skew_seconds);
        ClaimsSet::new(
            self.config.client_id.as_str(),
            self.config.user.as_str(),
            self.config.audience.as_str(),
            expires_at,
        )
    }

    pub fn assemble(&self) -> UnsignedToken {
        // The clock is read once; exp derives from this single sample.
        let now = self.clock.now();
        let claims = self.claims_at(now);

        let encoded_header = encode_segment(&Header::rs256().to_json());
        let encoded_claims = encode_segment(&claims.to_json(self.config.expiry_format));

        debug!(
            exp = claims.expires_at,
            audience = %claims.audience,
            format = ?self.config.expiry_format,
            "assembled unsigned JWT-bearer assertion"
        );

        UnsignedToken::from_segments(&encoded_header, &encoded_claims)
    }
}
