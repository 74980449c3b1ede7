//! Human-readable order numbers for ledger rows.

use chrono::Utc;
use rand::Rng;

use crate::types::DbId;

/// Generate an order number: prefix, UTC timestamp, user id, 4-digit
/// random suffix. Example: `RC20250830142501420007341`.
///
/// Uniqueness is ultimately enforced by the UNIQUE constraint on the
/// `order_no` column; the random suffix only makes collisions within the
/// same second unlikely.
pub fn order_no(prefix: &str, user_id: DbId) -> String {
    let ts = Utc::now().format("%Y%m%d%H%M%S");
    let suffix: u16 = rand::rng().random_range(0..10_000);
    format!("{prefix}{ts}{user_id}{suffix:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_no_has_prefix_and_user_id() {
        let no = order_no("RC", 42);
        assert!(no.starts_with("RC"));
        assert!(no.contains("42"));
        // prefix(2) + timestamp(14) + user id(2) + suffix(4)
        assert_eq!(no.len(), 22);
    }

    #[test]
    fn order_no_suffix_is_four_digits() {
        for _ in 0..50 {
            let no = order_no("AP", 1);
            assert_eq!(no.len(), "AP".len() + 14 + 1 + 4);
        }
    }
}
