//! Yahoo Finance provider over the public JSON endpoints.
//!
//! Yahoo's unofficial API needs two things before it answers:
//! 1. a session cookie, handed out by `fc.yahoo.com` (kept in the client's cookie jar);
//! 2. a crumb token from `/v1/test/getcrumb`, passed as a query parameter.
//!
//! The crumb is fetched lazily and cached. An HTTP 401 drops it so the next
//! request starts a fresh session; the failing request itself is not retried.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use log::{debug, warn};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header;
use serde::Deserialize;
use serde_json::{Map, Value};
use stock_common::{Result, StockError};

use super::{MarketDataProvider, PriceRow, RawQuote, RecommendationRow};
use crate::net::{
    DEFAULT_BASE_URL, DEFAULT_COOKIE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, REFERER,
};

/// quoteSummary modules merged into the info mapping; earlier modules win on key clashes.
const QUOTE_MODULES: [&str; 4] = ["financialData", "summaryDetail", "defaultKeyStatistics", "price"];
const RECOMMENDATIONS_MODULE: &str = "upgradeDowngradeHistory";

/// Yahoo column name -> recommendations table column.
const RECOMMENDATION_COLUMNS: [(&str, &str); 4] = [
    ("firm", "Firm"),
    ("toGrade", "To Grade"),
    ("fromGrade", "From Grade"),
    ("action", "Action"),
];

/// Connection settings for [`YahooProvider`].
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Query host serving chart and quoteSummary endpoints.
    pub base_url: String,
    /// Page visited once to obtain the session cookie.
    pub cookie_url: String,
    /// Whole-request timeout for every HTTP call.
    pub timeout: Duration,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie_url: DEFAULT_COOKIE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Blocking Yahoo Finance client implementing [`MarketDataProvider`].
///
/// The HTTP client is built on the first fetch, so constructing the provider
/// never fails and a broken client setup surfaces as a per-request error.
pub struct YahooProvider {
    client: Mutex<Option<Client>>,
    base_url: String,
    cookie_url: String,
    timeout: Duration,
    user_agent: String,
    crumb: Mutex<Option<String>>,
}

impl YahooProvider {
    /// Store the settings; no client is built and no network traffic happens yet.
    pub fn new(config: YahooConfig) -> Self {
        Self {
            client: Mutex::new(None),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cookie_url: config.cookie_url,
            timeout: config.timeout,
            user_agent: config.user_agent,
            crumb: Mutex::new(None),
        }
    }

    // `Client` is a handle around shared state, so handing out clones is cheap.
    fn client(&self) -> Result<Client> {
        let mut cached = self.client.lock()?;
        if let Some(client) = cached.as_ref() {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .user_agent(self.user_agent.as_str())
            .cookie_store(true)
            .timeout(self.timeout)
            .build()?;
        *cached = Some(client.clone());
        Ok(client)
    }

    fn crumb(&self) -> Result<String> {
        let mut cached = self.crumb.lock()?;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }
        let crumb = self.request_crumb()?;
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    fn request_crumb(&self) -> Result<String> {
        debug!("Requesting Yahoo session cookie from {}", self.cookie_url);
        let client = self.client()?;
        // Only the Set-Cookie header matters; the page itself is usually a 404.
        client
            .get(&self.cookie_url)
            .header(header::REFERER, REFERER)
            .send()?;

        let response = client
            .get(format!("{}/v1/test/getcrumb", self.base_url))
            .header(header::REFERER, REFERER)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        let crumb = body.trim();
        if !status.is_success() || !is_plausible_crumb(crumb) {
            return Err(StockError::Provider(format!(
                "Failed to obtain Yahoo crumb (HTTP status {})",
                status.as_u16()
            )));
        }
        Ok(crumb.to_string())
    }

    fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let client = self.client()?;
        let crumb = self.crumb()?;
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = client
            .get(&url)
            .header(header::REFERER, REFERER)
            .query(query)
            .query(&[("crumb", crumb.as_str())])
            .send()?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Yahoo rejected the session crumb; it will be refreshed on the next request");
            *self.crumb.lock()? = None;
        }

        let text = response.text()?;
        let body = serde_json::from_str::<Value>(&text).ok();
        if let Some(err) = body.as_ref().and_then(api_error) {
            return Err(err);
        }
        if !status.is_success() {
            return Err(StockError::Provider(format!("HTTP status {}", status.as_u16())));
        }
        body.ok_or_else(|| StockError::Provider(format!("Malformed response from {}", path)))
    }

    fn quote_summary(&self, ticker: &str, modules: &str) -> Result<Option<Map<String, Value>>> {
        let path = format!("/v10/finance/quoteSummary/{}", urlencoding::encode(ticker));
        let body = self.get_json(&path, &[("modules", modules)])?;
        Ok(first_result(&body, "quoteSummary").cloned())
    }
}

impl MarketDataProvider for YahooProvider {
    fn fetch_quote(&self, ticker: &str) -> Result<RawQuote> {
        let modules = QUOTE_MODULES.join(",");
        let result = self
            .quote_summary(ticker, &modules)?
            .ok_or_else(|| StockError::Provider(format!("No quote data found for {}", ticker)))?;
        Ok(flatten_modules(&result))
    }

    fn fetch_history(&self, ticker: &str, period: &str) -> Result<Vec<PriceRow>> {
        let path = format!("/v8/finance/chart/{}", urlencoding::encode(ticker));
        let body = self.get_json(
            &path,
            &[("range", period), ("interval", "1d"), ("includePrePost", "false")],
        )?;
        let chart: ChartEnvelope = serde_json::from_value(body)?;
        match chart.chart.result.and_then(|r| r.into_iter().next()) {
            Some(result) => price_rows(result),
            None => Ok(Vec::new()),
        }
    }

    fn fetch_recommendations(&self, ticker: &str) -> Result<Option<Vec<RecommendationRow>>> {
        let Some(result) = self.quote_summary(ticker, RECOMMENDATIONS_MODULE)? else {
            return Ok(None);
        };
        let history = result
            .get(RECOMMENDATIONS_MODULE)
            .and_then(|module| module.get("history"))
            .and_then(Value::as_array)
            .filter(|history| !history.is_empty());
        match history {
            Some(history) => history.iter().map(recommendation_row).collect::<Result<Vec<_>>>().map(Some),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i32,
}

#[derive(Debug, Default, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

fn is_plausible_crumb(crumb: &str) -> bool {
    !crumb.is_empty() && crumb.len() < 100 && !crumb.contains(' ') && !crumb.contains('<')
}

/// `{"<section>": {"error": {"description": ...}}}` -> provider error.
fn api_error(body: &Value) -> Option<StockError> {
    body.as_object()?.values().find_map(|section| {
        let description = section.get("error")?.get("description")?.as_str()?;
        Some(StockError::Provider(description.to_string()))
    })
}

fn first_result<'a>(body: &'a Value, section: &str) -> Option<&'a Map<String, Value>> {
    body.get(section)?.get("result")?.get(0)?.as_object()
}

fn flatten_modules(result: &Map<String, Value>) -> RawQuote {
    let mut info = RawQuote::new();
    for module in QUOTE_MODULES {
        let Some(fields) = result.get(module).and_then(Value::as_object) else {
            continue;
        };
        for (key, value) in fields {
            if let Some(value) = unwrap_raw(value) {
                info.entry(key.clone()).or_insert(value);
            }
        }
    }
    info
}

/// Yahoo wraps numbers as `{"raw": 1.5, "fmt": "1.50"}`; empty objects mean "no value".
fn unwrap_raw(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Object(map) => Some(map.get("raw").cloned().unwrap_or_else(|| value.clone())),
        other => Some(other.clone()),
    }
}

fn price_rows(result: ChartResult) -> Result<Vec<PriceRow>> {
    let offset = FixedOffset::east_opt(result.meta.gmtoffset).ok_or_else(|| {
        StockError::Provider(format!("Invalid exchange offset {}", result.meta.gmtoffset))
    })?;
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut rows = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        // Rows without prices are holidays or partial sessions.
        let (Some(open), Some(high), Some(low), Some(close)) = (
            cell(&quote.open, i),
            cell(&quote.high, i),
            cell(&quote.low, i),
            cell(&quote.close, i),
        ) else {
            continue;
        };
        rows.push(PriceRow {
            timestamp: timestamp_at(ts, offset)?,
            open,
            high,
            low,
            close,
            volume: cell(&quote.volume, i).unwrap_or(0),
        });
    }
    Ok(rows)
}

fn cell<T: Copy>(column: &[Option<T>], i: usize) -> Option<T> {
    column.get(i).copied().flatten()
}

fn timestamp_at(epoch_secs: i64, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| StockError::Provider(format!("Invalid timestamp {}", epoch_secs)))
}

fn recommendation_row(entry: &Value) -> Result<RecommendationRow> {
    let epoch = entry
        .get("epochGradeDate")
        .and_then(unwrap_raw)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| StockError::Provider("Recommendation without a grade date".to_string()))?;

    let mut fields = Map::new();
    for (yahoo_key, column) in RECOMMENDATION_COLUMNS {
        if let Some(value) = entry.get(yahoo_key).and_then(unwrap_raw) {
            fields.insert(column.to_string(), value);
        }
    }
    Ok(RecommendationRow {
        timestamp: timestamp_at(epoch, Utc.fix())?,
        fields,
    })
}
