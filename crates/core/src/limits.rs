//! Per-feature usage-limit checks.

/// Whether a feature is still accessible given its usage counter.
///
/// A `max_count` of `-1` means unlimited.
pub fn has_access(used_count: i32, max_count: i32) -> bool {
    max_count == -1 || used_count < max_count
}
