//! Record shapers: pure transforms from raw provider records to output records.
//!
//! Each shaper looks fields up one by one with an explicit default, so the
//! output always has exactly the declared fields whatever the provider sent.

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Number, Value};
use stock_common::records::{HistoricalBar, QuoteSnapshot, RecommendationEntry};

use crate::provider::{PriceRow, RawQuote, RecommendationRow};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build a quote snapshot; absent numbers become 0 and an absent name becomes "".
pub fn shape_quote(symbol: &str, raw: &RawQuote) -> QuoteSnapshot {
    QuoteSnapshot {
        symbol: symbol.to_string(),
        name: raw
            .get("shortName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        price: number_or_zero(raw, "currentPrice"),
        previous_close: number_or_zero(raw, "previousClose"),
        open: number_or_zero(raw, "open"),
        day_high: number_or_zero(raw, "dayHigh"),
        day_low: number_or_zero(raw, "dayLow"),
        volume: number_or_zero(raw, "volume"),
        market_cap: number_or_zero(raw, "marketCap"),
        pe_ratio: number_or_zero(raw, "trailingPE"),
        dividend_yield: number_or_zero(raw, "dividendYield"),
    }
}

/// One bar per row, in provider order.
pub fn shape_history(rows: &[PriceRow]) -> Vec<HistoricalBar> {
    rows.iter()
        .map(|row| HistoricalBar {
            date: format_date(&row.timestamp),
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        })
        .collect()
}

/// One entry per row; an absent or empty table is an empty list.
pub fn shape_recommendations(rows: Option<&[RecommendationRow]>) -> Vec<RecommendationEntry> {
    let Some(rows) = rows else {
        return Vec::new();
    };
    rows.iter()
        .map(|row| RecommendationEntry {
            date: format_date(&row.timestamp),
            firm: text_or_empty(&row.fields, "Firm"),
            to_grade: text_or_empty(&row.fields, "To Grade"),
            from_grade: text_or_empty(&row.fields, "From Grade"),
            action: text_or_empty(&row.fields, "Action"),
        })
        .collect()
}

fn format_date(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format(DATE_FORMAT).to_string()
}

fn number_or_zero(raw: &Map<String, Value>, key: &str) -> Number {
    match raw.get(key) {
        Some(Value::Number(n)) => n.clone(),
        _ => Number::from(0),
    }
}

// Non-string cells keep their JSON text; null counts as missing.
fn text_or_empty(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(offset_secs: i32, y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_secs)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
    }

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn quote_defaults_missing_fields() {
        let raw = map(json!({"shortName": "Apple Inc.", "currentPrice": 150}));
        let snapshot = shape_quote("AAPL", &raw);
        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            json!({
                "symbol": "AAPL", "name": "Apple Inc.", "price": 150,
                "previous_close": 0, "open": 0, "day_high": 0, "day_low": 0,
                "volume": 0, "market_cap": 0, "pe_ratio": 0, "dividend_yield": 0
            })
        );
    }

    #[test]
    fn quote_keeps_provider_precision() {
        let raw = map(json!({
            "currentPrice": 187.44, "previousClose": 185.01, "open": 186.0,
            "dayHigh": 188.5, "dayLow": 184.75, "volume": 53_421_900u64,
            "marketCap": 2_900_000_000_000u64, "trailingPE": 29.137, "dividendYield": 0.0051
        }));
        let snapshot = shape_quote("AAPL", &raw);
        assert_eq!(snapshot.price.as_f64(), Some(187.44));
        assert_eq!(snapshot.volume.as_u64(), Some(53_421_900));
        assert_eq!(snapshot.market_cap.as_u64(), Some(2_900_000_000_000));
        assert_eq!(snapshot.pe_ratio.as_f64(), Some(29.137));
        assert_eq!(snapshot.name, "");
    }

    #[test]
    fn quote_ignores_non_numeric_values() {
        let raw = map(json!({"currentPrice": "Infinity", "trailingPE": null, "shortName": 7}));
        let snapshot = shape_quote("X", &raw);
        assert_eq!(snapshot.price, Number::from(0));
        assert_eq!(snapshot.pe_ratio, Number::from(0));
        assert_eq!(snapshot.name, "");
    }

    #[test]
    fn history_formats_exchange_local_date() {
        // 2024-03-04 23:30 in New York is already the 5th in UTC.
        let rows = vec![PriceRow {
            timestamp: at(-5 * 3600, 2024, 3, 4, 23),
            open: 1.5,
            high: 2.0,
            low: 1.0,
            close: 1.75,
            volume: 1200,
        }];
        let bars = shape_history(&rows);
        assert_eq!(
            bars,
            vec![HistoricalBar {
                date: "2024-03-04".into(),
                open: 1.5,
                high: 2.0,
                low: 1.0,
                close: 1.75,
                volume: 1200,
            }]
        );
    }

    #[test]
    fn history_preserves_order_and_handles_empty() {
        assert!(shape_history(&[]).is_empty());

        let row = |d| PriceRow {
            timestamp: at(0, 2024, 1, d, 14),
            open: d as f64,
            high: d as f64,
            low: d as f64,
            close: d as f64,
            volume: d as u64,
        };
        let dates: Vec<String> = shape_history(&[row(3), row(2), row(9)])
            .into_iter()
            .map(|b| b.date)
            .collect();
        assert_eq!(dates, ["2024-01-03", "2024-01-02", "2024-01-09"]);
    }

    #[test]
    fn recommendations_absent_or_empty_is_empty_list() {
        assert!(shape_recommendations(None).is_empty());
        assert!(shape_recommendations(Some(&[])).is_empty());
    }

    #[test]
    fn recommendations_default_missing_columns() {
        let rows = vec![
            RecommendationRow {
                timestamp: at(0, 2023, 11, 2, 8),
                fields: map(json!({"Firm": "Morgan Stanley", "To Grade": "Overweight",
                                   "From Grade": "Equal-Weight", "Action": "up"})),
            },
            RecommendationRow {
                timestamp: at(0, 2023, 10, 30, 8),
                fields: map(json!({"Firm": "Barclays", "From Grade": null, "Action": 3})),
            },
        ];
        let entries = shape_recommendations(Some(&rows));
        assert_eq!(entries[0].to_grade, "Overweight");
        assert_eq!(entries[0].from_grade, "Equal-Weight");
        assert_eq!(
            entries[1],
            RecommendationEntry {
                date: "2023-10-30".into(),
                firm: "Barclays".into(),
                to_grade: String::new(),
                from_grade: String::new(),
                action: "3".into(),
            }
        );
    }
}
