//! Networking defaults for the Yahoo Finance provider.

/// Yahoo Finance query host serving chart and quoteSummary endpoints.
pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
/// Page that hands out the session cookie a crumb is bound to.
pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";
/// Yahoo rejects requests without a browser-like user agent.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
/// Whole-request timeout applied by the HTTP client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Referer sent with every Yahoo request.
pub const REFERER: &str = "https://finance.yahoo.com/";
