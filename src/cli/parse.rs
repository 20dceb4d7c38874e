//! Value parsers for clap arguments

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

use daybook_core::exchange::ExchangeFormat;
use daybook_core::search::LengthBucket;

/// `YYYY-MM-DD`, `today` or `yesterday`
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    let today = Local::now().date_naive();
    match s.to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        _ => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| format!("expected YYYY-MM-DD, today or yesterday ({})", e)),
    }
}

/// `YYYY-MM-DD HH:MM[:SS]`
pub fn parse_timestamp(s: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .map_err(|e| format!("expected \"YYYY-MM-DD HH:MM[:SS]\" ({})", e))
}

/// One-based entry number as shown by `list`, returned zero-based
pub fn parse_index(s: &str) -> std::result::Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("entry numbers start at 1".to_string()),
        Ok(n) => Ok(n - 1),
        Err(e) => Err(e.to_string()),
    }
}

pub fn parse_length(s: &str) -> std::result::Result<LengthBucket, String> {
    s.parse::<LengthBucket>().map_err(|e| e.to_string())
}

pub fn parse_exchange_format(s: &str) -> std::result::Result<ExchangeFormat, String> {
    s.parse::<ExchangeFormat>().map_err(|e| e.to_string())
}
