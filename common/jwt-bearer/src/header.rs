use serde::{Deserialize, Serialize};

pub const RS256: &str = "RS256";

/// JOSE header of the assertion. Only `alg` is ever written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
}

impl Header {
    pub fn rs256() -> Self {
        Self {
            alg: RS256.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("header serializes to JSON")
    }
}
