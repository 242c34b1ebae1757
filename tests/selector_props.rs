//! Property tests for the current-limit Threshold Selector

use proptest::prelude::*;

use slotguard::current_limit::{select, CURRENT_LIMITS, MAX_CURRENT_LIMIT, MIN_CURRENT_LIMIT};

proptest! {
    /// If a <= b then select(a) <= select(b).
    #[test]
    fn selection_is_monotone(a in -1.0f32..4.0, b in -1.0f32..4.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(select(low).amps <= select(high).amps);
    }

    /// Above the minimum entry the chosen limit never exceeds the request.
    #[test]
    fn selection_never_exceeds_request(amps in MIN_CURRENT_LIMIT..4.0f32) {
        prop_assert!(select(amps).amps <= amps);
    }

    /// Every selection is one of the nine table entries, within the table's
    /// bounds, for any request.
    #[test]
    fn selection_stays_in_table(amps in -10.0f32..10.0) {
        let chosen = select(amps);
        prop_assert!(chosen.amps >= MIN_CURRENT_LIMIT);
        prop_assert!(chosen.amps <= MAX_CURRENT_LIMIT);
        prop_assert!(CURRENT_LIMITS.iter().any(|entry| entry.amps == chosen.amps));
    }
}
