//! Common utility functions used across modules.
//!
//! Shared formatting helpers:
//! - [`format_count`] - Format counts with K/M suffix (1.5K, 2.3M)
//! - [`format_count_with_separator`] - Format counts with thousands separator (1,234,567)
//! - [`format_timestamp`] - Format a UTC timestamp in a fixed display offset
//! - [`truncate`] - Truncate strings with ellipsis

use chrono::{DateTime, FixedOffset, Utc};

/// Format a count with K/M suffix for compact display.
///
/// # Examples
/// ```
/// use oustdom::utils::format_count;
/// assert_eq!(format_count(500), "500");
/// assert_eq!(format_count(1500), "1.5K");
/// assert_eq!(format_count(1_500_000), "1.5M");
/// ```
pub fn format_count(count: usize) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Format a number with thousands separators (commas).
///
/// # Examples
/// ```
/// use oustdom::utils::format_count_with_separator;
/// assert_eq!(format_count_with_separator(1000), "1,000");
/// assert_eq!(format_count_with_separator(1234567), "1,234,567");
/// ```
pub fn format_count_with_separator(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a UTC timestamp for display in a fixed UTC offset.
///
/// The offset comes from configuration, not from the host timezone, so
/// output is reproducible anywhere. An out-of-range offset falls back to
/// UTC.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use oustdom::utils::format_timestamp;
/// let dt = Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap();
/// assert_eq!(format_timestamp(dt, 7), "2025-06-01 17:30:00 +07:00");
/// ```
pub fn format_timestamp(dt: DateTime<Utc>, utc_offset_hours: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_hours.saturating_mul(3600))
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
    dt.with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S %:z")
        .to_string()
}

/// Truncate a string to a maximum length, adding "..." if truncated.
///
/// # Examples
/// ```
/// use oustdom::utils::truncate;
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("this is long", 10), "this is...");
/// ```
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
