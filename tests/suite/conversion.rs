//! Conversion behaviour across the crate boundary.

use gatekeeper_types::{
    BitSequence, ProgressionSequence, check_answer, describe, format_grouped_default, from_binary,
    from_binary_str, minimum_bit_width, to_binary,
};
use proptest::prelude::*;

#[test]
fn every_learning_target_has_a_tight_answer() {
    let expected = [
        (0, "0"),
        (1, "1"),
        (2, "10"),
        (4, "100"),
        (10, "1010"),
        (100, "1100100"),
        (128, "10000000"),
        (256, "100000000"),
        (-1, "1"),
        (-10, "10110"),
        (-128, "10000000"),
    ];
    let sequence = ProgressionSequence::learning();
    assert_eq!(sequence.values().len(), expected.len());

    for (&value, (target, bits)) in sequence.values().iter().zip(expected) {
        assert_eq!(value, target);
        let conversion = describe(target);
        assert_eq!(conversion.bits.to_string(), bits, "target {target}");
        assert!(check_answer(&conversion.bits, target));
    }
}

#[test]
fn same_pattern_reads_differently_by_signedness() {
    assert_eq!(from_binary_str("10000000", false), Ok(128));
    assert_eq!(from_binary_str("10000000", true), Ok(-128));
    assert!(check_answer(&"10000000".parse().unwrap(), 128));
    assert!(check_answer(&"10000000".parse().unwrap(), -128));
}

#[test]
fn grouping_is_display_only() {
    let bits = to_binary(100, 8).unwrap();
    assert_eq!(format_grouped_default(&bits.to_string()), "0110 0100");
    assert_eq!(from_binary(&bits, false), Ok(100));
}

proptest! {
    #[test]
    fn describe_round_trips(n in any::<i64>()) {
        let conversion = describe(n);
        prop_assert_eq!(conversion.bit_width, minimum_bit_width(n));
        prop_assert_eq!(from_binary(&conversion.bits, n < 0), Ok(n));
    }

    #[test]
    fn parsed_patterns_print_back(s in "[01]{1,64}") {
        let bits: BitSequence = s.parse().unwrap();
        prop_assert_eq!(bits.to_string(), s);
    }
}
