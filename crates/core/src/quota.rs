//! Storage-quota math and byte formatting.
//!
//! Pure functions over already-fetched quota rows; the mutating side
//! lives in the repository layer.

/// Percentage of the quota in use, rounded to two decimals.
///
/// A zero or negative total yields `0.0` rather than a division error.
pub fn usage_percentage(used: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let pct = used as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Remaining space, clamped at zero when usage exceeds the quota.
pub fn remaining(used: i64, total: i64) -> i64 {
    (total - used).max(0)
}

const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count with log-base-1024 unit selection.
///
/// `0 -> "0 B"`, `1536 -> "1.50 KB"`, `1073741824 -> "1.00 GB"`.
pub fn format_bytes(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 B".to_string();
    }
    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    if exp == 0 {
        return format!("{bytes} B");
    }
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    format!("{value:.2} {}", UNITS[exp])
}
