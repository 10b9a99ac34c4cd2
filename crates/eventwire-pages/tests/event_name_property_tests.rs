//! Property-based tests for event name normalization

use eventwire_pages::{AjaxEventBehavior, EventDelegatingBehavior, normalize_event};
use proptest::prelude::*;
use rstest::*;

// ============================================================================
// Property-Based Tests: normalize_event
// ============================================================================

proptest! {
	/// Test: "on" prefix is stripped
	///
	/// Category: Property
	/// Verifies that any casing of an "on"-prefixed name normalizes to the
	/// lower-cased remainder.
	#[rstest]
	fn prop_on_prefix_is_stripped(raw in "[oO][nN][a-zA-Z]{1,12}") {
		prop_assert_eq!(normalize_event(&raw).unwrap(), raw[2..].to_lowercase());
	}

	/// Test: names without the prefix are only lower-cased
	///
	/// Category: Property
	/// Verifies that names not starting with "on" keep all their letters.
	#[rstest]
	fn prop_unprefixed_names_are_lowercased(event in "[a-zA-Z]{1,12}") {
		prop_assume!(!event.to_lowercase().starts_with("on"));

		prop_assert_eq!(normalize_event(&event).unwrap(), event.to_lowercase());
	}

	/// Test: normalization is idempotent for unprefixed results
	///
	/// Category: Property
	/// Verifies that event and delegating behaviors agree on the normalized
	/// name and that the delegating behavior handles the event's name.
	#[rstest]
	fn prop_behaviors_agree_on_name(event in "[a-zA-Z]{1,12}") {
		let direct = AjaxEventBehavior::new(&event, |_| {});
		let delegating = EventDelegatingBehavior::new(&event);

		match (direct, delegating) {
			(Ok(direct), Ok(delegating)) => {
				prop_assert_eq!(direct.event(), delegating.event());
				prop_assert!(delegating.handles(direct.event()));
			}
			(Err(_), Err(_)) => {
				prop_assert!(event.eq_ignore_ascii_case("on"));
			}
			_ => prop_assert!(false, "behaviors disagree on '{}'", event),
		}
	}
}

// ============================================================================
// Edge Cases
// ============================================================================

/// Tests that only a single "on" prefix is removed.
#[rstest]
#[case("ononline", "online")]
#[case("OnOnce", "once")]
#[case("online", "line")]
fn test_single_prefix_removed(#[case] raw: &str, #[case] expected: &str) {
	assert_eq!(normalize_event(raw).unwrap(), expected);
}
