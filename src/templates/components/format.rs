// src/templates/components/format.rs

use crate::domain::NOT_AVAILABLE;
use chrono::{Local, TimeZone};

/// `$1,450` style price, `N/A` when absent.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("${}", group_thousands(p)),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn group_thousands(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut out = String::new();
    if value < 0.0 && cents > 0 {
        out.push('-');
    }
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    match frac {
        0 => {}
        f if f % 10 == 0 => out.push_str(&format!(".{}", f / 10)),
        f => out.push_str(&format!(".{f:02}")),
    }
    out
}

/// Local date and time of an epoch-seconds timestamp; `N/A` when absent
/// or not positive.
pub fn format_timestamp(timestamp: Option<i64>) -> String {
    format_timestamp_in(timestamp, &Local)
}

pub fn format_timestamp_in<Tz>(timestamp: Option<i64>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match timestamp.filter(|t| *t > 0) {
        Some(t) => match tz.timestamp_opt(t, 0).single() {
            Some(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
            None => "Invalid Date".to_string(),
        },
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Text of the results counter.
pub fn results_count_text(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} apartment{plural} found.")
}
