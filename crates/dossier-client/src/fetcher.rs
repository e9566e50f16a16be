use std::net::IpAddr;
use std::time::Duration;

use dossier_core::error::AppError;
use dossier_core::traits::Fetcher;
use reqwest::Client;
use url::Url;

const DEFAULT_USER_AGENT: &str = "Dossier/0.1 (profile snapshot)";

/// HTTP fetcher using reqwest.
///
/// Downloads profile pages with a configurable User-Agent. No timeout is
/// applied unless one is set with [`with_timeout`](Self::with_timeout).
/// Any reachable host is fetched by default. Call
/// [`block_private_urls`](Self::block_private_urls) to reject URLs that
/// resolve to private or reserved IP ranges (SSRF protection).
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout: Option<Duration>,
    ssrf_protection: bool,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::build(DEFAULT_USER_AGENT, None)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        Self::build(DEFAULT_USER_AGENT, Some(timeout))
    }

    pub fn build(user_agent: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout,
            ssrf_protection: false,
        })
    }

    /// Enable SSRF protection: only http/https URLs whose host resolves to
    /// public IPs are fetched.
    pub fn block_private_urls(mut self) -> Self {
        self.ssrf_protection = true;
        self
    }

    /// Configured timeout in whole seconds, rounded up.
    fn timeout_secs(&self) -> u64 {
        self.timeout
            .map(|t| t.as_millis().div_ceil(1000) as u64)
            .unwrap_or_default()
    }

    fn transport_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::Timeout(self.timeout_secs())
        } else if error.is_connect() {
            AppError::NetworkError(format!("Connection failed: {error}"))
        } else {
            AppError::HttpError(error.to_string())
        }
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        if self.ssrf_protection
            && let Err(e) = validate_url(url).await
        {
            tracing::debug!(url, error = %e, "URL rejected");
            return Err(e);
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "Non-success status");
            return Err(AppError::HttpError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        response.text().await.map_err(|e| match self.transport_error(e) {
            AppError::HttpError(msg) => {
                AppError::HttpError(format!("Failed to read response body: {msg}"))
            }
            other => other,
        })
    }
}

// ---------------------------------------------------------------------------
// SSRF protection
// ---------------------------------------------------------------------------

/// Validate a URL to prevent server-side request forgery (SSRF).
///
/// 1. Only allow `http` and `https` schemes.
/// 2. Resolve the hostname via DNS.
/// 3. Reject if any resolved IP is private/reserved.
async fn validate_url(url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::HttpError(format!("Invalid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::HttpError(format!(
                "URL scheme '{scheme}' is not allowed (only http/https)"
            )));
        }
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| AppError::HttpError("URL has no host".to_string()))?;

    // IP literal: check it directly
    let literal = host.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = literal.parse::<IpAddr>() {
        if is_private_ip(ip) {
            return Err(AppError::HttpError(format!(
                "SSRF blocked: {host} resolves to private/reserved IP"
            )));
        }
        return Ok(());
    }

    let port = parsed.port_or_known_default().unwrap_or(80);
    let addr = format!("{host}:{port}");
    let addrs: Vec<_> = tokio::net::lookup_host(&addr)
        .await
        .map_err(|e| AppError::NetworkError(format!("DNS resolution failed for {host}: {e}")))?
        .collect();

    if addrs.is_empty() {
        return Err(AppError::NetworkError(format!(
            "DNS resolution returned no addresses for {host}"
        )));
    }

    for socket_addr in &addrs {
        if is_private_ip(socket_addr.ip()) {
            return Err(AppError::HttpError(format!(
                "SSRF blocked: {host} resolves to private/reserved IP {}",
                socket_addr.ip()
            )));
        }
    }

    Ok(())
}

/// Check if an IP address is in a private/reserved/link-local range.
fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local() // 169.254.0.0/16
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation()
                || v4.octets()[0] == 100 && (v4.octets()[1] & 0xC0) == 64 // 100.64.0.0/10 (CGN)
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || v6.is_unspecified()
                || (v6.segments()[0] & 0xFFC0) == 0xFE80 // fe80::/10
                || (v6.segments()[0] & 0xFE00) == 0xFC00 // fc00::/7
                || match v6.to_ipv4_mapped() {
                    Some(v4) => is_private_ip(IpAddr::V4(v4)),
                    None => false,
                }
        }
    }
}
