//! Configuration management

use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Overall budget for handling one inbound request
    pub request_timeout_secs: u64,
    /// JWT verification configuration
    pub jwt: JwtConfig,
    /// Outbound call configuration
    pub outbound: OutboundConfig,
    /// Peer service locations
    pub peers: PeerConfig,
    /// Court-specific settings
    pub court: CourtConfig,
    /// Logging and metrics
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 secret shared with the identity service
    pub secret: String,
    /// Clock skew tolerated on `exp`
    pub leeway_secs: u64,
}

#[derive(Debug, Clone)]
pub struct OutboundConfig {
    /// Share of the inbound request's time that outbound calls may use
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl OutboundConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 4000,
            connect_timeout_ms: 2000,
        }
    }
}

/// Base URLs of peer services. Each service only needs the peers it calls.
#[derive(Debug, Clone, Default)]
pub struct PeerConfig {
    pub court_url: Option<String>,
    pub mup_url: Option<String>,
    pub police_url: Option<String>,
    pub identity_url: Option<String>,
}

impl PeerConfig {
    pub fn court(&self) -> Result<&str> {
        require_peer(&self.court_url, "COURT_SERVICE_URL")
    }

    pub fn mup(&self) -> Result<&str> {
        require_peer(&self.mup_url, "MUP_SERVICE_URL")
    }

    pub fn police(&self) -> Result<&str> {
        require_peer(&self.police_url, "POLICE_SERVICE_URL")
    }

    pub fn identity(&self) -> Result<&str> {
        require_peer(&self.identity_url, "IDENTITY_SERVICE_URL")
    }
}

fn require_peer<'a>(value: &'a Option<String>, var: &str) -> Result<&'a str> {
    value
        .as_deref()
        .with_context(|| format!("{} is required for this service", var))
}

/// Longest accepted delay between a crime report and its hearing
pub const MAX_HEARING_DELAY_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct CourtConfig {
    /// Court named on hearings scheduled from crime reports
    pub name: String,
    /// Delay between a crime report and its hearing
    pub hearing_delay_hours: i64,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            name: "Misdemeanor Court".to_string(),
            hearing_delay_hours: 72,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "json" or "pretty"
    pub log_format: String,
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config = Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid REQUEST_TIMEOUT_SECS")?,
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").context("JWT_SECRET is required")?,
                leeway_secs: env::var("JWT_LEEWAY_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .context("Invalid JWT_LEEWAY_SECS")?,
            },
            outbound: OutboundConfig {
                timeout_ms: env::var("OUTBOUND_TIMEOUT_MS")
                    .unwrap_or_else(|_| "4000".to_string())
                    .parse()
                    .context("Invalid OUTBOUND_TIMEOUT_MS")?,
                connect_timeout_ms: env::var("OUTBOUND_CONNECT_TIMEOUT_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .context("Invalid OUTBOUND_CONNECT_TIMEOUT_MS")?,
            },
            peers: PeerConfig {
                court_url: peer_url_from_env("COURT_SERVICE_URL")?,
                mup_url: peer_url_from_env("MUP_SERVICE_URL")?,
                police_url: peer_url_from_env("POLICE_SERVICE_URL")?,
                identity_url: peer_url_from_env("IDENTITY_SERVICE_URL")?,
            },
            court: CourtConfig {
                name: env::var("COURT_NAME").unwrap_or_else(|_| "Misdemeanor Court".to_string()),
                hearing_delay_hours: env::var("COURT_HEARING_DELAY_HOURS")
                    .unwrap_or_else(|_| "72".to_string())
                    .parse()
                    .context("Invalid COURT_HEARING_DELAY_HOURS")?,
            },
            telemetry: TelemetryConfig {
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
                metrics_enabled: env::var("METRICS_ENABLED")
                    .map(|s| s.to_lowercase() != "false")
                    .unwrap_or(true),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values no request could be served with
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }
        if !(1..=MAX_HEARING_DELAY_HOURS).contains(&self.court.hearing_delay_hours) {
            bail!(
                "COURT_HEARING_DELAY_HOURS must be between 1 and {}, got {}",
                MAX_HEARING_DELAY_HOURS,
                self.court.hearing_delay_hours
            );
        }
        Ok(())
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Budget shared by the outbound calls of one inbound request. Never
    /// more than nine tenths of the request timeout, so a slow peer is
    /// reported as such before the inbound timer fires.
    pub fn call_budget(&self) -> Duration {
        let inbound = self.request_timeout();
        self.outbound.timeout().min(inbound - inbound / 10)
    }
}

fn peer_url_from_env(var: &str) -> Result<Option<String>> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => normalize_peer_url(var, &value).map(Some),
        _ => Ok(None),
    }
}

/// Validate a peer base URL and drop any trailing slash.
fn normalize_peer_url(var: &str, value: &str) -> Result<String> {
    let parsed = url::Url::parse(value.trim()).with_context(|| format!("Invalid {}", var))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("{} must be an http(s) URL, got '{}'", var, value);
    }
    Ok(value.trim().trim_end_matches('/').to_string())
}
