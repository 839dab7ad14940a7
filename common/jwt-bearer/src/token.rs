use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};

use crate::claims::ClaimsSet;
use crate::error::{AssertionError, AssertionResult};
use crate::header::Header;

/// `base64(header) + "." + base64(claims)`, ready to be signed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnsignedToken {
    value: String,
    separator: usize,
}

impl UnsignedToken {
    pub(crate) fn from_segments(header: &str, claims: &str) -> Self {
        Self {
            value: format!("{header}.{claims}"),
            separator: header.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// The encoded header and claims segments.
    pub fn segments(&self) -> (&str, &str) {
        (
            &self.value[..self.separator],
            &self.value[self.separator + 1..],
        )
    }

    pub fn decode(&self) -> AssertionResult<DecodedAssertion> {
        Self::parse(&self.value)
    }

    /// Decode an unsigned assertion back into its header and claims.
    pub fn parse(token: &str) -> AssertionResult<DecodedAssertion> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header_segment, claims_segment] = segments.as_slice() else {
            return Err(AssertionError::SegmentCount(segments.len()));
        };

        let header_json = decode_segment("header", header_segment)?;
        let claims_json = decode_segment("claims", claims_segment)?;

        let header: Header = serde_json::from_str(&header_json)?;
        let claims = ClaimsSet::from_json(&claims_json)?;
        let expires_at = claims.expiry_datetime()?;

        Ok(DecodedAssertion {
            header_json,
            claims_json,
            header,
            claims,
            expires_at,
        })
    }
}

impl fmt::Display for UnsignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for UnsignedToken {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl From<UnsignedToken> for String {
    fn from(value: UnsignedToken) -> Self {
        value.value
    }
}

/// Decoded view of an unsigned assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAssertion {
    /// Header text exactly as encoded.
    pub header_json: String,
    /// Claims text exactly as encoded.
    pub claims_json: String,
    pub header: Header,
    pub claims: ClaimsSet,
    pub expires_at: DateTime<Utc>,
}

fn decode_segment(segment: &'static str, encoded: &str) -> AssertionResult<String> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|err| AssertionError::Base64 {
            segment,
            reason: err.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|err| AssertionError::Base64 {
        segment,
        reason: err.to_string(),
    })
}
