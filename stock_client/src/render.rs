//! Human-readable lines for call results.
use serde_json::Value;
use stock_common::protocol::Manifest;
use stock_common::records::{HistoricalBar, QuoteSnapshot, RecommendationEntry};
use stock_common::Result;

use crate::args::Call;

/// Format a successful `result` payload for `call`, one line per record.
pub fn render(call: &Call, result: Value) -> Result<Vec<String>> {
    let lines = match call {
        Call::Manifest => {
            let manifest: Manifest = serde_json::from_value(result)?;
            manifest
                .functions
                .iter()
                .map(|f| format!("{:<22}{}", f.name, f.description))
                .collect()
        }
        Call::Info { .. } => vec![quote_line(&serde_json::from_value(result)?)],
        Call::History { .. } => {
            let bars: Vec<HistoricalBar> = serde_json::from_value(result)?;
            bars.iter().map(bar_line).collect()
        }
        Call::Recommendations { .. } => {
            let entries: Vec<RecommendationEntry> = serde_json::from_value(result)?;
            entries.iter().map(recommendation_line).collect()
        }
    };
    Ok(lines)
}

fn quote_line(quote: &QuoteSnapshot) -> String {
    format!(
        "QUOTE: {} ({}) Price={} Open={} High={} Low={} PrevClose={} Volume={} MarketCap={} PE={} DivYield={}",
        quote.symbol,
        quote.name,
        quote.price,
        quote.open,
        quote.day_high,
        quote.day_low,
        quote.previous_close,
        quote.volume,
        quote.market_cap,
        quote.pe_ratio,
        quote.dividend_yield
    )
}

fn bar_line(bar: &HistoricalBar) -> String {
    format!(
        "{} O={:.2} H={:.2} L={:.2} C={:.2} V={}",
        bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
    )
}

fn recommendation_line(entry: &RecommendationEntry) -> String {
    let grade = if entry.from_grade.is_empty() {
        entry.to_grade.clone()
    } else {
        format!("{} -> {}", entry.from_grade, entry.to_grade)
    };
    format!("{} {} [{}] {}", entry.date, entry.firm, entry.action, grade)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_quote_with_provider_numbers() {
        let call = Call::Info { ticker: "AAPL".into() };
        let result = json!({
            "symbol": "AAPL", "name": "Apple Inc.", "price": 150,
            "previous_close": 149.5, "open": 0, "day_high": 0, "day_low": 0,
            "volume": 0, "market_cap": 0, "pe_ratio": 0, "dividend_yield": 0
        });
        let lines = render(&call, result).unwrap();
        assert!(lines[0].starts_with("QUOTE: AAPL (Apple Inc.) Price=150 "));
        assert!(lines[0].contains("PrevClose=149.5"));
    }

    #[test]
    fn renders_bars_and_empty_lists() {
        let call = Call::History { ticker: "MSFT".into(), period: Default::default() };
        let result = json!([{"date": "2024-01-02", "open": 1.0, "high": 2.0, "low": 0.5,
                             "close": 1.5, "volume": 10}]);
        assert_eq!(
            render(&call, result).unwrap(),
            ["2024-01-02 O=1.00 H=2.00 L=0.50 C=1.50 V=10"]
        );
        assert!(render(&call, json!([])).unwrap().is_empty());
    }

    #[test]
    fn renders_grade_changes() {
        let call = Call::Recommendations { ticker: "TSLA".into() };
        let result = json!([
            {"date": "2024-05-03", "firm": "UBS", "to_grade": "Buy", "from_grade": "Neutral", "action": "up"},
            {"date": "2024-04-25", "firm": "Mizuho", "to_grade": "Neutral", "from_grade": "", "action": "init"}
        ]);
        assert_eq!(
            render(&call, result).unwrap(),
            ["2024-05-03 UBS [up] Neutral -> Buy", "2024-04-25 Mizuho [init] Neutral"]
        );
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let call = Call::Info { ticker: "AAPL".into() };
        assert!(render(&call, json!([])).is_err());
    }
}
