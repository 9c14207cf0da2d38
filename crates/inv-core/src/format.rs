//! ja-JP display formatting
//!
//! Numbers round half away from zero and group thousands with `,`, currency
//! is whole yen with the full-width sign, and dates use 年/月/日.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// Default cut-off for [`truncate_text`]
pub const DEFAULT_TRUNCATE_LENGTH: usize = 50;

/// `1234.5, 1` → `"1,234.5"`
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let factor = 10f64.powi(decimals as i32);
    let rounded = (value.abs() * factor).round() / factor;
    let digits = format!("{rounded:.decimals$}");
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 && rounded != 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole yen: `-1234.4` → `"-￥1,234"`
pub fn format_currency(amount: f64) -> String {
    let number = format_number(amount, 0);
    match number.strip_prefix('-') {
        Some(abs) => format!("-￥{abs}"),
        None => format!("￥{number}"),
    }
}

/// `12.345, 1` → `"12.3%"`
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{}%", format_number(value, decimals))
}

/// `1200, "g"` → `"1,200 g"`
pub fn format_quantity(quantity: f64, unit: &str) -> String {
    format!("{} {}", format_number(quantity, 0), unit)
}

/// `2024年12月01日`
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%Y年%m月%d日").to_string()
}

/// `2024年12月01日 09:30`
pub fn format_date_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%Y年%m月%d日 %H:%M").to_string()
}

/// `12/01`
pub fn format_short_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%m/%d").to_string()
}

/// Cut `text` to `max_chars` characters, appending `...` when shortened
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// `ORD-20241201-0042`; the sequence wraps at 10 000
pub fn order_number<Tz: TimeZone>(date: &DateTime<Tz>, sequence: u32) -> String
where
    Tz::Offset: Display,
{
    format!("ORD-{}-{:04}", date.format("%Y%m%d"), sequence % 10_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1234.0, 0), "1,234");
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(2.5, 0), "3");
        assert_eq!(format_number(-1500.0, 0), "-1,500");
        assert_eq!(format_number(-0.2, 0), "0");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(4000.0), "￥4,000");
        assert_eq!(format_currency(-15000.0), "-￥15,000");
        assert_eq!(format_currency(0.0), "￥0");
    }

    #[test]
    fn test_percent_and_quantity() {
        assert_eq!(format_percent(12.345, 1), "12.3%");
        assert_eq!(format_percent(70.0, 1), "70.0%");
        assert_eq!(format_quantity(1200.0, "g"), "1,200 g");
    }

    #[test]
    fn test_dates() {
        let date = Utc.with_ymd_and_hms(2024, 12, 1, 9, 5, 0).unwrap();
        assert_eq!(format_date(&date), "2024年12月01日");
        assert_eq!(format_date_time(&date), "2024年12月01日 09:05");
        assert_eq!(format_short_date(&date), "12/01");
        assert_eq!(order_number(&date, 42), "ORD-20241201-0042");
    }

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("和牛サーロイン", 2), "和牛...");
        assert_eq!(truncate_text("short", DEFAULT_TRUNCATE_LENGTH), "short");
        assert_eq!(truncate_text("abc", 3), "abc");
    }
}
