use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::config::ExpiryFormat;
use crate::error::{AssertionError, AssertionResult};

/// Claims carried by a JWT-bearer assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimsSet {
    pub issuer: String,
    pub subject: String,
    pub audience: String,
    /// Expiry in seconds since the Unix epoch.
    pub expires_at: i64,
}

impl ClaimsSet {
    pub fn new(
        issuer: impl Into<String>,
        subject: impl Into<String>,
        audience: impl Into<String>,
        expires_at: i64,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            subject: subject.into(),
            audience: audience.into(),
            expires_at,
        }
    }

    /// Claims text in `iss, sub, aud, exp` order, no whitespace.
    ///
    /// Identifiers are inserted verbatim, so input containing `"` or `\`
    /// yields text that is not valid JSON.
    pub fn to_json(&self, format: ExpiryFormat) -> String {
        let exp = match format {
            ExpiryFormat::String => format!(r#""{}""#, self.expires_at),
            ExpiryFormat::Numeric => self.expires_at.to_string(),
        };
        format!(
            r#"{{"iss":"{}","sub":"{}","aud":"{}","exp":{}}}"#,
            self.issuer, self.subject, self.audience, exp
        )
    }

    /// Parse claims JSON, accepting `exp` either quoted or numeric.
    pub fn from_json(text: &str) -> AssertionResult<Self> {
        let repr: ClaimsRepr = serde_json::from_str(text)?;
        Self::try_from(repr)
    }

    pub fn expiry_datetime(&self) -> AssertionResult<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0)
            .single()
            .ok_or_else(|| AssertionError::InvalidClaim("exp", self.expires_at.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ClaimsRepr {
    iss: String,
    sub: String,
    aud: String,
    exp: ExpiryRepr,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpiryRepr {
    Text(String),
    Number(i64),
}

impl TryFrom<ClaimsRepr> for ClaimsSet {
    type Error = AssertionError;

    fn try_from(value: ClaimsRepr) -> AssertionResult<Self> {
        let expires_at = match value.exp {
            ExpiryRepr::Number(seconds) => seconds,
            ExpiryRepr::Text(text) => text
                .parse::<i64>()
                .map_err(|_| AssertionError::InvalidClaim("exp", text.clone()))?,
        };

        Ok(Self {
            issuer: value.iss,
            subject: value.sub,
            audience: value.aud,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClaimsSet {
        ClaimsSet::new("abc", "user1", "https://login.salesforce.com", 1_000_000_300)
    }

    #[test]
    fn string_expiry_is_quoted() {
        assert_eq!(
            sample().to_json(ExpiryFormat::String),
            r#"{"iss":"abc","sub":"user1","aud":"https://login.salesforce.com","exp":"1000000300"}"#
        );
    }

    #[test]
    fn numeric_expiry_is_bare() {
        assert_eq!(
            sample().to_json(ExpiryFormat::Numeric),
            r#"{"iss":"abc","sub":"user1","aud":"https://login.salesforce.com","exp":1000000300}"#
        );
    }

    #[test]
    fn empty_identifiers_stay_empty_strings() {
        let claims = ClaimsSet::new("", "", "https://login.salesforce.com", 300);
        assert_eq!(
            claims.to_json(ExpiryFormat::String),
            r#"{"iss":"","sub":"","aud":"https://login.salesforce.com","exp":"300"}"#
        );
    }

    #[test]
    fn identifiers_are_inserted_verbatim() {
        let claims = ClaimsSet::new(r#"a"b\c"#, "u", "https://login.salesforce.com", 1_000_000_300);
        assert_eq!(
            claims.to_json(ExpiryFormat::String),
            r#"{"iss":"a"b\c","sub":"u","aud":"https://login.salesforce.com","exp":"1000000300"}"#
        );
    }

    #[test]
    fn from_json_rejects_verbatim_quote() {
        let claims = ClaimsSet::new(r#"a"b"#, "u", "aud", 300);
        let err = ClaimsSet::from_json(&claims.to_json(ExpiryFormat::String))
            .expect_err("unescaped quote is not JSON");
        assert!(matches!(err, AssertionError::InvalidJson(_)));
    }

    #[test]
    fn from_json_accepts_both_expiry_forms() {
        let quoted = ClaimsSet::from_json(&sample().to_json(ExpiryFormat::String)).unwrap();
        let numeric = ClaimsSet::from_json(&sample().to_json(ExpiryFormat::Numeric)).unwrap();
        assert_eq!(quoted, sample());
        assert_eq!(numeric, sample());
    }

    #[test]
    fn from_json_rejects_non_integer_expiry() {
        let err = ClaimsSet::from_json(r#"{"iss":"a","sub":"b","aud":"c","exp":"soon"}"#)
            .expect_err("exp must be an integer");
        match err {
            AssertionError::InvalidClaim(name, value) => {
                assert_eq!(name, "exp");
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_json_rejects_missing_fields() {
        let err = ClaimsSet::from_json(r#"{"iss":"a","sub":"b"}"#).expect_err("aud missing");
        assert!(matches!(err, AssertionError::InvalidJson(_)));
    }

    #[test]
    fn expiry_datetime_matches_timestamp() {
        let expires = sample().expiry_datetime().unwrap();
        assert_eq!(expires.timestamp(), 1_000_000_300);
    }
}
