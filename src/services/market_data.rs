use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::services::price_adapter::ADJ_CLOSE;
use crate::services::price_frame::{FrameTime, PriceFrame};

pub const DEFAULT_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("provider error {code}: {description}")]
    Api { code: String, description: String },
    #[error("parse error: {0}")]
    Parse(String),
}

/// 下载日线行情。`end` 不包含在内（与 start/end 区间下载的惯例一致）。
pub async fn fetch_chart(
    client: &Client,
    base_url: &str,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Value, MarketDataError> {
    let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
    let period2 = end.and_time(NaiveTime::MIN).and_utc().timestamp();
    let url = format!("{}/{}", base_url.trim_end_matches('/'), ticker);
    tracing::debug!("Fetching chart for {} from {} ({} - {})", ticker, url, start, end);

    let resp = client
        .get(&url)
        .query(&[
            ("period1", period1.to_string()),
            ("period2", period2.to_string()),
            ("interval", "1d".to_string()),
            ("events", "history".to_string()),
        ])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        // 404 时响应体里通常带有 chart.error，优先返回提供方的错误信息
        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(err) = provider_error(&json) {
                return Err(err);
            }
        }
        return Err(MarketDataError::Status { status, body });
    }

    let json: Value = resp.json().await?;
    Ok(json)
}

pub async fn fetch_price_frame(
    client: &Client,
    base_url: &str,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
    auto_adjust: bool,
) -> Result<PriceFrame, MarketDataError> {
    let json = fetch_chart(client, base_url, ticker, start, end).await?;
    let frame = chart_to_frame(&json, auto_adjust)?;
    tracing::info!("Fetched {} bars for {}", frame.len(), ticker);
    Ok(frame)
}

/// 把 chart 响应整理成单只股票的扁平表格。
///
/// 日线时间统一取交易所时区的零点，这样同一天重复下载得到的时间点相同。
/// `auto_adjust` 时按 adjclose / close 的比例调整 OHLC，不再输出 "Adj Close" 列。
pub fn chart_to_frame(json: &Value, auto_adjust: bool) -> Result<PriceFrame, MarketDataError> {
    if let Some(err) = provider_error(json) {
        return Err(err);
    }

    let chart = json
        .get("chart")
        .ok_or_else(|| MarketDataError::Parse("missing 'chart'".to_string()))?;

    let Some(result) = chart.get("result").and_then(|r| r.get(0)) else {
        return Ok(PriceFrame::empty());
    };
    let Some(timestamps) = result.get("timestamp").and_then(Value::as_array) else {
        return Ok(PriceFrame::empty());
    };

    let rows = timestamps.len();
    let zone = ExchangeZone::from_meta(result.get("meta"));

    let mut index = Vec::with_capacity(rows);
    for ts in timestamps {
        let secs = ts
            .as_i64()
            .ok_or_else(|| MarketDataError::Parse(format!("invalid timestamp {}", ts)))?;
        let utc = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| MarketDataError::Parse(format!("timestamp out of range {}", secs)))?;
        index.push(FrameTime::Aware(zone.start_of_day(utc)));
    }

    let quote = result
        .pointer("/indicators/quote/0")
        .ok_or_else(|| MarketDataError::Parse("missing 'indicators.quote'".to_string()))?;

    let mut open = series(quote.get("open"), rows);
    let mut high = series(quote.get("high"), rows);
    let mut low = series(quote.get("low"), rows);
    let mut close = series(quote.get("close"), rows);
    let volume = series(quote.get("volume"), rows);
    let adj_close = result
        .pointer("/indicators/adjclose/0/adjclose")
        .map(|v| series(Some(v), rows));

    let mut frame = PriceFrame::new("Date", index);
    if auto_adjust {
        if let Some(adj) = &adj_close {
            for row in 0..rows.min(adj.len()).min(close.len()) {
                let ratio = match (adj[row], close[row]) {
                    (Some(a), Some(c)) if c != 0.0 => a / c,
                    _ => continue,
                };
                for col in [&mut open, &mut high, &mut low, &mut close] {
                    if let Some(v) = col.get_mut(row).and_then(Option::as_mut) {
                        *v *= ratio;
                    }
                }
            }
        }
        frame = frame
            .with_field("Open", open)
            .with_field("High", high)
            .with_field("Low", low)
            .with_field("Close", close);
    } else {
        frame = frame
            .with_field("Open", open)
            .with_field("High", high)
            .with_field("Low", low)
            .with_field("Close", close);
        if let Some(adj) = adj_close {
            frame = frame.with_field(ADJ_CLOSE, adj);
        }
    }

    Ok(frame.with_field("Volume", volume))
}

fn provider_error(json: &Value) -> Option<MarketDataError> {
    let err = json.get("chart")?.get("error")?.as_object()?;
    let code = err
        .get("code")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let description = err
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("no description")
        .to_string();
    Some(MarketDataError::Api { code, description })
}

fn series(v: Option<&Value>, rows: usize) -> Vec<Option<f64>> {
    match v.and_then(Value::as_array) {
        Some(arr) => arr.iter().map(Value::as_f64).collect(),
        None => vec![None; rows],
    }
}

enum ExchangeZone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl ExchangeZone {
    fn from_meta(meta: Option<&Value>) -> Self {
        let named = meta
            .and_then(|m| m.get("exchangeTimezoneName"))
            .and_then(Value::as_str)
            .and_then(|name| name.parse::<Tz>().ok());
        if let Some(tz) = named {
            return ExchangeZone::Named(tz);
        }

        let offset = meta
            .and_then(|m| m.get("gmtoffset"))
            .and_then(Value::as_i64)
            .and_then(|secs| i32::try_from(secs).ok())
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        ExchangeZone::Fixed(offset)
    }

    fn start_of_day(&self, ts: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            ExchangeZone::Named(tz) => start_of_day_in(ts, tz),
            ExchangeZone::Fixed(offset) => start_of_day_in(ts, offset),
        }
    }
}

fn start_of_day_in<Z: TimeZone>(ts: DateTime<Utc>, zone: &Z) -> DateTime<FixedOffset> {
    let local = ts.with_timezone(zone);
    let midnight = local.date_naive().and_time(NaiveTime::MIN);
    let start = zone.from_local_datetime(&midnight).earliest().unwrap_or(local);
    let offset = start.offset().fix();
    start.with_timezone(&offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::price_frame::ColumnKey;
    use serde_json::json;

    fn sample_chart() -> Value {
        // 2025-01-02 / 2025-01-03 美股开盘时间 14:30 UTC
        json!({
            "chart": {
                "result": [{
                    "meta": {
                        "symbol": "AAPL",
                        "exchangeTimezoneName": "America/New_York",
                        "gmtoffset": -18000
                    },
                    "timestamp": [1735828200, 1735914600],
                    "indicators": {
                        "quote": [{
                            "open": [100.0, 102.0],
                            "high": [110.0, 112.0],
                            "low": [90.0, null],
                            "close": [105.0, 110.0],
                            "volume": [1000, 2000]
                        }],
                        "adjclose": [{ "adjclose": [52.5, 110.0] }]
                    }
                }],
                "error": null
            }
        })
    }

    fn field<'a>(frame: &'a PriceFrame, name: &str) -> &'a [Option<f64>] {
        &frame
            .columns
            .iter()
            .find(|c| c.key == ColumnKey::Field(name.to_string()))
            .unwrap()
            .values
    }

    #[test]
    fn raw_chart_keeps_adj_close_column() {
        let frame = chart_to_frame(&sample_chart(), false).unwrap();

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.index_name, "Date");
        assert_eq!(field(&frame, "Close"), &[Some(105.0), Some(110.0)]);
        assert_eq!(field(&frame, "Low"), &[Some(90.0), None]);
        assert_eq!(field(&frame, "Volume"), &[Some(1000.0), Some(2000.0)]);
        assert_eq!(field(&frame, ADJ_CLOSE), &[Some(52.5), Some(110.0)]);
    }

    #[test]
    fn daily_bars_snap_to_exchange_midnight() {
        let frame = chart_to_frame(&sample_chart(), false).unwrap();
        let FrameTime::Aware(first) = frame.index[0] else {
            panic!("expected aware timestamp");
        };
        assert_eq!(first.to_rfc3339(), "2025-01-02T00:00:00-05:00");
    }

    #[test]
    fn auto_adjust_scales_prices() {
        let frame = chart_to_frame(&sample_chart(), true).unwrap();

        assert!(frame.column_for("AAPL", ADJ_CLOSE).is_none());
        assert_eq!(field(&frame, "Open")[0], Some(50.0));
        assert_eq!(field(&frame, "Close")[0], Some(52.5));
        assert_eq!(field(&frame, "Close")[1], Some(110.0));
        assert_eq!(field(&frame, "Low")[1], None);
    }

    #[test]
    fn provider_error_is_surfaced() {
        let body = json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        });

        match chart_to_frame(&body, true) {
            Err(MarketDataError::Api { code, .. }) => assert_eq!(code, "Not Found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn result_without_timestamps_is_empty() {
        let body = json!({
            "chart": {
                "result": [{ "meta": { "symbol": "AAPL" }, "indicators": { "quote": [{}] } }],
                "error": null
            }
        });

        assert!(chart_to_frame(&body, true).unwrap().is_empty());
    }

    #[test]
    fn missing_chart_is_a_parse_error() {
        let err = chart_to_frame(&json!({"unexpected": true}), true).unwrap_err();
        assert!(matches!(err, MarketDataError::Parse(_)));
    }
}
