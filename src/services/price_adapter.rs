use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::services::price_frame::{FrameTime, PriceFrame};

/// 允许作为时间索引的列名
pub const DATE_COLUMNS: [&str; 2] = ["Date", "Datetime"];
pub const ADJ_CLOSE: &str = "Adj Close";

#[derive(Debug, Error, PartialEq)]
pub enum AdapterError {
    #[error("frame must have a 'Date' or 'Datetime' index, got '{0}'")]
    MissingDateColumn(String),
    #[error("frame is missing required column '{0}'")]
    MissingColumn(String),
    #[error("column '{column}' has {actual} values but the index has {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),
}

/// 转换参数
#[derive(Debug, Clone)]
pub struct AdapterOptions {
    pub ticker: String,
    pub name: Option<String>,
    pub market: Option<String>,
    pub currency: String,
    /// 为 true 时收盘价已复权，adjusted_close 直接取 close
    pub auto_adjust: bool,
    /// IANA 时区名，例如 "UTC"、"America/New_York"
    pub timezone: String,
}

impl AdapterOptions {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            name: None,
            market: None,
            currency: "USD".to_string(),
            auto_adjust: true,
            timezone: "UTC".to_string(),
        }
    }
}

/// 标准化后的一行行情
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub ticker: String,
    pub name: Option<String>,
    pub market: Option<String>,
    pub currency: String,
    pub time: DateTime<Tz>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<i64>,
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub adjusted_close: Option<f64>,
}

impl PriceRecord {
    pub fn utc_time(&self) -> DateTime<Utc> {
        self.time.with_timezone(&Utc)
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, AdapterError> {
    name.parse::<Tz>()
        .map_err(|_| AdapterError::UnknownTimezone(name.to_string()))
}

/// 把行情表格转换为按时间排列的记录，每个输入行对应一条输出。
///
/// - 空表直接返回空列表
/// - 分组列（多只股票）按 ticker 取子列，缺失的列视为空值
/// - 无时区的时间按 UTC 解释，再转换到目标时区
/// - previous_close 取上一行的 close，并据此计算 change / change_percent
pub fn frame_to_price_records(
    frame: &PriceFrame,
    opts: &AdapterOptions,
) -> Result<Vec<PriceRecord>, AdapterError> {
    if frame.is_empty() {
        return Ok(Vec::new());
    }

    if !DATE_COLUMNS.contains(&frame.index_name.as_str()) {
        return Err(AdapterError::MissingDateColumn(frame.index_name.clone()));
    }

    let tz = parse_timezone(&opts.timezone)?;

    let open = lookup(frame, &opts.ticker, "Open", true)?;
    let high = lookup(frame, &opts.ticker, "High", true)?;
    let low = lookup(frame, &opts.ticker, "Low", true)?;
    let close = lookup(frame, &opts.ticker, "Close", true)?;
    let volume = lookup(frame, &opts.ticker, "Volume", true)?;
    let adj_close = lookup(frame, &opts.ticker, ADJ_CLOSE, false)?;

    let mut records = Vec::with_capacity(frame.len());
    let mut last_close: Option<f64> = None;

    for (i, ts) in frame.index.iter().enumerate() {
        let close_value = cell(close, i);
        let previous_close = last_close;

        let change = match (close_value, previous_close) {
            (Some(c), Some(p)) => finite(c - p),
            _ => None,
        };
        let change_percent = match (change, previous_close) {
            (Some(ch), Some(p)) if p != 0.0 => finite(ch / p * 100.0),
            _ => None,
        };
        let adjusted_close = if opts.auto_adjust {
            close_value
        } else {
            cell(adj_close, i)
        };

        records.push(PriceRecord {
            ticker: opts.ticker.clone(),
            name: opts.name.clone(),
            market: opts.market.clone(),
            currency: opts.currency.clone(),
            time: localize(ts, &tz),
            open: cell(open, i),
            high: cell(high, i),
            low: cell(low, i),
            close: close_value,
            volume: cell(volume, i).map(|v| v as i64),
            previous_close,
            change,
            change_percent,
            adjusted_close,
        });

        last_close = close_value;
    }

    Ok(records)
}

fn lookup<'a>(
    frame: &'a PriceFrame,
    ticker: &str,
    field: &str,
    required: bool,
) -> Result<Option<&'a [Option<f64>]>, AdapterError> {
    match frame.column_for(ticker, field) {
        Some(col) if col.values.len() != frame.len() => Err(AdapterError::RaggedColumn {
            column: field.to_string(),
            expected: frame.len(),
            actual: col.values.len(),
        }),
        Some(col) => Ok(Some(col.values.as_slice())),
        // 分组表里找不到该 ticker 的列时不报错
        None if required && !frame.is_grouped() => Err(AdapterError::MissingColumn(field.to_string())),
        None => Ok(None),
    }
}

fn cell(values: Option<&[Option<f64>]>, row: usize) -> Option<f64> {
    values.and_then(|v| v[row]).and_then(finite)
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

fn localize(ts: &FrameTime, tz: &Tz) -> DateTime<Tz> {
    match ts {
        FrameTime::Naive(naive) => Utc.from_utc_datetime(naive).with_timezone(tz),
        FrameTime::Aware(aware) => aware.with_timezone(tz),
    }
}
