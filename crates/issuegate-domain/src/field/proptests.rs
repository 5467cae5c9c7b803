//! Property tests for the field-kind conversion and clamping rules.

use proptest::prelude::*;

use super::{duration, number, string};

proptest! {
    /// `to_number(to_string(n))` equals `clamp(n)` for every integer.
    #[test]
    fn duration_round_trip_number(n in any::<i64>()) {
        let clamped = duration::clamp(n);
        prop_assert_eq!(duration::to_number(&duration::to_string(clamped)), Some(clamped));
    }

    /// `to_string(to_number(s))` is the identity on well-formed strings.
    #[test]
    fn duration_round_trip_string(hours in 0u32..=999_999, minutes in 0u32..=59) {
        let text = format!("{hours}:{minutes:02}");
        let parsed = duration::to_number(&text).expect("well-formed duration");
        prop_assert_eq!(duration::to_string(parsed), text);
    }

    /// Setting the same default twice produces identical stored state.
    #[test]
    fn number_default_idempotent(min in -100i64..=0, max in 1i64..=100, value in any::<i64>()) {
        let mut params = number::NumberParameters::default();
        params.set_minimum(min);
        params.set_maximum(max);
        params.set_default_value(value);
        let first = params;
        params.set_default_value(value);
        prop_assert_eq!(params, first);
        let stored = params.default_value().expect("default was set");
        prop_assert!(stored >= min && stored <= max);
    }

    /// Stored string defaults never exceed the configured maximum length.
    #[test]
    fn string_default_respects_max_length(len in 1usize..=250, value in ".{0,300}") {
        let mut params = string::StringParameters::default();
        params.set_max_length(len);
        params.set_default_value(value);
        let stored = params.default_value().expect("default was set");
        prop_assert!(stored.chars().count() <= len);
    }
}
