use thiserror::Error;

pub type AssertionResult<T> = Result<T, AssertionError>;

#[derive(Debug, Error)]
pub enum AssertionError {
    #[error("expected 2 dot-separated segments, found {0}")]
    SegmentCount(usize),
    #[error("failed to base64-decode {segment} segment: {reason}")]
    Base64 {
        segment: &'static str,
        reason: String,
    },
    #[error("malformed assertion payload: {0}")]
    InvalidJson(String),
    #[error("invalid claim '{0}' with value '{1}'")]
    InvalidClaim(&'static str, String),
}

impl From<serde_json::Error> for AssertionError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value.to_string())
    }
}
