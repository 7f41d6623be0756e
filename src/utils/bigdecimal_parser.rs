use bigdecimal::BigDecimal;
use std::str::FromStr;

/// 将 f64 转为 BigDecimal，NaN / 无穷大返回 None
///
/// 走字符串中转，得到的是 f64 最短的十进制表示（105.5 而不是 105.4999...）
pub fn f64_to_decimal(v: f64) -> Option<BigDecimal> {
    if !v.is_finite() {
        return None;
    }
    BigDecimal::from_str(&v.to_string()).ok()
}

pub fn opt_f64_to_decimal(v: Option<f64>) -> Option<BigDecimal> {
    v.and_then(f64_to_decimal)
}
