//! Pure formatting and query helpers for the history screen

use chrono::{DateTime, Utc};

use crate::domain::history::HistoryRecord;

/// Calendar-date key a record is filed under, derived from the ISO-8601
/// rendering of the instant (`yyyy-mm-dd`).
pub fn date_key_of(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// `"HHh MMmin"` duration label; floors at zero, truncates to whole minutes.
pub fn duration_label(ms: i64) -> String {
    let total_minutes = (ms / 60_000).max(0);
    format!("{:02}h {:02}min", total_minutes / 60, total_minutes % 60)
}

/// `"HH:MM"` wall-clock label.
pub fn clock_label(instant: DateTime<Utc>) -> String {
    instant.format("%H:%M").to_string()
}

/// `"dd/mm HH:MM"` label used on occupied-spot details.
pub fn date_time_label(instant: DateTime<Utc>) -> String {
    instant.format("%d/%m %H:%M").to_string()
}

/// `"dd/mm/yyyy"` rendering of a date key; placeholder when malformed.
pub fn display_date(date_key: &str) -> String {
    let mut parts = date_key.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) if !y.is_empty() && !m.is_empty() && !d.is_empty() => {
            format!("{}/{}/{}", d, m, y)
        }
        _ => "--/--/----".to_string(),
    }
}

/// Order records the way the history list shows them.
pub fn sort_by_start_time(records: &mut [HistoryRecord]) {
    records.sort_by_key(|r| r.start_time);
}

// ── Tests ──────────────────────────────────────────────────────
