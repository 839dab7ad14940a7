pub mod assembler;
pub mod claims;
pub mod clock;
pub mod config;
pub mod error;
pub mod header;
pub mod token;

pub use assembler::{build_unsigned_token, build_unsigned_token_for, encode_segment, TokenAssembler};
pub use claims::ClaimsSet;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AssertionConfig, ExpiryFormat, DEFAULT_AUDIENCE, DEFAULT_EXPIRY_SKEW_SECONDS};
pub use error::{AssertionError, AssertionResult};
pub use header::{Header, RS256};
pub use token::{DecodedAssertion, UnsignedToken};
