use std::io::Write;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use common_jwt_bearer::{
    AssertionConfig, ExpiryFormat, FixedClock, TokenAssembler, UnsignedToken, DEFAULT_AUDIENCE,
    DEFAULT_EXPIRY_SKEW_SECONDS,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Assemble the unsigned header.claims portion of an OAuth JWT-bearer assertion",
    long_about = None
)]
pub struct Options {
    /// Connected-app client id, written as `iss`
    #[arg(long, env = "JWT_BEARER_CLIENT_ID", default_value = "")]
    pub client_id: String,

    /// Username the token is requested for, written as `sub`
    #[arg(long, env = "JWT_BEARER_USER", default_value = "")]
    pub user: String,

    /// Authorization server, written as `aud`
    #[arg(long, env = "JWT_BEARER_AUDIENCE", default_value = DEFAULT_AUDIENCE)]
    pub audience: String,

    /// Seconds between now and `exp`
    #[arg(
        long,
        env = "JWT_BEARER_EXPIRY_SKEW_SECONDS",
        value_name = "SECONDS",
        default_value_t = DEFAULT_EXPIRY_SKEW_SECONDS
    )]
    pub expiry_skew: u32,

    /// How `exp` is written into the claims
    #[arg(
        long,
        env = "JWT_BEARER_EXPIRY_FORMAT",
        value_enum,
        default_value_t = ExpiryArg::String
    )]
    pub expiry_format: ExpiryArg,

    /// Use this Unix time instead of the system clock
    #[arg(long, env = "JWT_BEARER_FIXED_TIME", value_name = "UNIX_SECONDS")]
    pub at: Option<i64>,

    /// Also print the decoded header and claims to stderr
    #[arg(long)]
    pub decode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExpiryArg {
    String,
    Numeric,
}

impl From<ExpiryArg> for ExpiryFormat {
    fn from(value: ExpiryArg) -> Self {
        match value {
            ExpiryArg::String => ExpiryFormat::String,
            ExpiryArg::Numeric => ExpiryFormat::Numeric,
        }
    }
}

impl Options {
    pub fn assertion_config(&self) -> AssertionConfig {
        AssertionConfig::new(self.client_id.as_str(), self.user.as_str())
            .with_audience(self.audience.as_str())
            .with_expiry_skew(self.expiry_skew)
            .with_expiry_format(self.expiry_format.into())
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Assemble one assertion and write it to `out` as a single line.
pub fn run<W, D>(options: &Options, out: &mut W, diag: &mut D) -> Result<UnsignedToken>
where
    W: Write,
    D: Write,
{
    let config = options.assertion_config();
    let token = match options.at {
        Some(seconds) => {
            let clock = FixedClock::from_timestamp(seconds)
                .ok_or_else(|| anyhow!("--at {seconds} is outside the supported time range"))?;
            TokenAssembler::with_clock(config, clock).assemble()
        }
        None => TokenAssembler::new(config).assemble(),
    };

    // Decode first so a failing report leaves stdout untouched.
    let decoded = if options.decode {
        let decoded = token
            .decode()
            .context("Failed to decode the assembled assertion")?;
        Some(decoded)
    } else {
        None
    };

    writeln!(out, "{token}").context("Failed to write assertion")?;
    out.flush().context("Failed to flush assertion output")?;

    if let Some(decoded) = decoded {
        writeln!(diag, "header:  {}", decoded.header_json)
            .context("Failed to write decoded header")?;
        writeln!(diag, "claims:  {}", decoded.claims_json)
            .context("Failed to write decoded claims")?;
        writeln!(diag, "expires: {}", decoded.expires_at.to_rfc3339())
            .context("Failed to write decoded expiry")?;
    }

    info!(
        fixed_time = options.at.is_some(),
        "wrote unsigned assertion"
    );
    Ok(token)
}
