use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// 行情表格的时间索引，可能带时区也可能不带
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameTime {
    Naive(NaiveDateTime),
    Aware(DateTime<FixedOffset>),
}

/// 列名：单只股票时是扁平列，多只股票一起下载时是两级列
/// (可能是 `(ticker, field)` 也可能是 `(field, ticker)`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKey {
    Field(String),
    Grouped(String, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameColumn {
    pub key: ColumnKey,
    pub values: Vec<Option<f64>>,
}

/// 行情提供方返回的表格数据
#[derive(Debug, Clone, PartialEq)]
pub struct PriceFrame {
    pub index_name: String,
    pub index: Vec<FrameTime>,
    pub columns: Vec<FrameColumn>,
}

impl PriceFrame {
    pub fn new(index_name: impl Into<String>, index: Vec<FrameTime>) -> Self {
        Self {
            index_name: index_name.into(),
            index,
            columns: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new("Date", Vec::new())
    }

    pub fn with_column(mut self, key: ColumnKey, values: Vec<Option<f64>>) -> Self {
        self.columns.push(FrameColumn { key, values });
        self
    }

    pub fn with_field(self, field: &str, values: Vec<Option<f64>>) -> Self {
        self.with_column(ColumnKey::Field(field.to_string()), values)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn is_grouped(&self) -> bool {
        self.columns
            .iter()
            .any(|c| matches!(c.key, ColumnKey::Grouped(_, _)))
    }

    /// 查找某个字段的列；分组列两种嵌套方式都能匹配
    pub fn column_for(&self, ticker: &str, field: &str) -> Option<&FrameColumn> {
        self.columns.iter().find(|c| match &c.key {
            ColumnKey::Field(name) => name == field,
            ColumnKey::Grouped(outer, inner) => {
                (outer == ticker && inner == field) || (outer == field && inner == ticker)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_lookup_matches_both_nestings() {
        let frame = PriceFrame::empty()
            .with_column(ColumnKey::Grouped("AAA".into(), "Close".into()), vec![])
            .with_column(ColumnKey::Grouped("Open".into(), "BBB".into()), vec![]);

        assert!(frame.is_grouped());
        assert!(frame.column_for("AAA", "Close").is_some());
        assert!(frame.column_for("BBB", "Open").is_some());
        assert!(frame.column_for("AAA", "Open").is_none());
        assert!(frame.column_for("CCC", "Close").is_none());
    }

    #[test]
    fn flat_lookup_ignores_ticker() {
        let frame = PriceFrame::empty().with_field("Close", vec![]);
        assert!(!frame.is_grouped());
        assert!(frame.column_for("ANY", "Close").is_some());
    }
}
