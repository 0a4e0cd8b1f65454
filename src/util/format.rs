/// Deterministic number and time rendering
///
/// `format_amount` (market figures) and `format_currency`/`format_quantity`
/// (wallet holdings) use different precision tables. Keep them apart.

use chrono::{DateTime, Utc};

pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_DECIMALS: usize = 2;
pub const PRICE_DECIMALS: usize = 8;

const TINY_THRESHOLD: f64 = 0.00001;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `value` with `decimals` fraction digits and comma-grouped integer part
fn grouped(value: f64, decimals: usize) -> String {
    let digits = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + integer.len() / 3 + 1);
    if value.is_sign_negative() {
        out.push('-');
    }
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Market figure: "N/A", "0", 8 dp below 0.00001, 6 dp below 1, otherwise
/// grouped with `decimals` dp
pub fn format_amount(value: Option<f64>, decimals: usize) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };

    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude < TINY_THRESHOLD {
        format!("{:.8}", value)
    } else if magnitude < 1.0 {
        format!("{:.6}", value)
    } else {
        grouped(value, decimals)
    }
}

/// Percent change prefixed with a direction marker
pub fn format_percent(value: Option<f64>) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };

    let marker = if value > 0.0 {
        "🟢"
    } else if value < 0.0 {
        "🔴"
    } else {
        "⚪"
    };
    format!("{} {}%", marker, format_amount(Some(value), DEFAULT_DECIMALS))
}

/// Wallet valuation in USD: 2 dp from 1 upwards, 6 dp below
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("${}", format_quantity(value))
}

/// Wallet balance: 2 dp from 1 upwards, 6 dp below
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let decimals = if value >= 1.0 { 2 } else { 6 };
    grouped(value, decimals)
}

/// `%Y-%m-%d %H:%M:%S` in UTC
pub fn format_timestamp(unix_seconds: i64) -> String {
    match DateTime::<Utc>::from_timestamp(unix_seconds, 0) {
        Some(time) => time.format(TIMESTAMP_FORMAT).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
