//! Property-based tests for nebula-intercept.

use nebula_intercept::prelude::*;
use proptest::prelude::*;
use serde_json::{Value, json};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-1000_i64..1000).prop_map(Value::from),
        (-1000.0_f64..1000.0).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

fn echo(params: &[&str]) -> Function {
    Function::new(
        "echo",
        Signature::from_names(params.iter().copied()).expect("valid names"),
        |args: &[Value]| Ok::<_, BoxError>(Value::Array(args.to_vec())),
    )
}

// ============================================================================
// TYPE VALIDATOR: kind membership with subkinds
// ============================================================================

proptest! {
    #[test]
    fn ints_pass_int_and_number(n in any::<i64>()) {
        let arg = json!(n);
        prop_assert!(TypeValidator::new([Kind::Int]).check(&arg));
        prop_assert!(TypeValidator::new([Kind::Number]).check(&arg));
        prop_assert!(!TypeValidator::new([Kind::Str]).check(&arg));
        prop_assert!(!TypeValidator::new([Kind::Float]).check(&arg));
    }

    #[test]
    fn strings_fail_numeric_kinds(s in ".{0,12}") {
        let arg = json!(s);
        prop_assert!(TypeValidator::new([Kind::Str]).check(&arg));
        prop_assert!(!TypeValidator::new([Kind::Int, Kind::Float]).check(&arg));
    }

    #[test]
    fn bools_need_opt_in_for_numeric_kinds(b in any::<bool>()) {
        let arg = json!(b);
        prop_assert!(!TypeValidator::new([Kind::Int]).check(&arg));
        prop_assert!(
            TypeValidator::new([Kind::Int])
                .with_bool_subclasses(true)
                .check(&arg)
        );
        prop_assert!(TypeValidator::new([Kind::Bool]).check(&arg));
    }
}

// ============================================================================
// VALUE VALIDATOR: membership, optionally type-strict
// ============================================================================

proptest! {
    #[test]
    fn members_are_accepted(values in prop::collection::vec(-100_i64..100, 1..8), pick in any::<prop::sample::Index>()) {
        let member = values[pick.index(values.len())];
        let validator = ValueValidator::new(values.clone());
        prop_assert!(validator.check(&json!(member)));
    }

    #[test]
    fn equal_but_differently_typed_needs_loose_matching(n in -100_000_i64..100_000) {
        let as_float = json!(n as f64);
        prop_assert!(!ValueValidator::new([n]).check(&as_float));
        prop_assert!(ValueValidator::new([n]).with_match_types(false).check(&as_float));
    }
}

// ============================================================================
// RANGE VALIDATOR: check(n) == (n in range)
// ============================================================================

proptest! {
    #[test]
    fn range_matches_membership(start in -50_i64..50, len in 0_i64..50, n in -120_i64..120) {
        let stop = start + len;
        let validator = RangeValidator::new(start..stop);
        prop_assert_eq!(validator.check(&json!(n)), (start..stop).contains(&n));
    }

    #[test]
    fn stepped_range_matches_membership(start in -20_i64..20, stop in -20_i64..20, step in prop_oneof![-5_i64..0, 1_i64..5], n in -30_i64..30) {
        let interval = IntRange::new(start, stop).with_step(step).expect("non-zero step");
        let expected = if step > 0 {
            (start..stop).step_by(step.unsigned_abs() as usize).any(|x| x == n)
        } else {
            (stop + 1..=start).rev().step_by(step.unsigned_abs() as usize).any(|x| x == n)
        };
        prop_assert_eq!(RangeValidator::new(interval).check(&json!(n)), expected);
    }
}

// ============================================================================
// COMPOSITION: OR semantics, flattening
// ============================================================================

proptest! {
    #[test]
    fn composed_is_logical_or(arg in scalar()) {
        let a = TypeValidator::new([Kind::Int]);
        let b = ValueValidator::new(["a", "b"]);
        let composed = a.clone().or(b.clone());
        prop_assert_eq!(composed.check(&arg), a.check(&arg) || b.check(&arg));
    }

    #[test]
    fn nesting_does_not_change_behavior(arg in scalar()) {
        let flat = ComposedValidator::new([
            TypeValidator::new([Kind::Str]).shared(),
            RangeValidator::new(0_i64..10).shared(),
        ]);
        let nested = ComposedValidator::new([
            ComposedValidator::from(TypeValidator::new([Kind::Str])).shared(),
            RangeValidator::new(0_i64..10).shared(),
        ]);
        prop_assert_eq!(flat.len(), nested.len());
        prop_assert_eq!(flat.check(&arg), nested.check(&arg));
    }

    #[test]
    fn union_is_associative(arg in scalar()) {
        let left = TypeValidator::new([Kind::Bool])
            .or(EmptyValidator)
            .or(ValueValidator::new([1_i64]));
        let right = TypeValidator::new([Kind::Bool])
            .or(EmptyValidator.or(ValueValidator::new([1_i64])));
        prop_assert_eq!(left.len(), right.len());
        prop_assert_eq!(left.check(&arg), right.check(&arg));
    }
}

// ============================================================================
// WRAPPING: identity parsing is transparent
// ============================================================================

proptest! {
    #[test]
    fn identity_parse_is_transparent(a in scalar(), b in scalar()) {
        let plain = echo(&["a", "b"]);
        let wrapped = parse().skip().skip().apply(plain.clone()).expect("decorates");
        prop_assert_eq!(
            wrapped.call([a.clone(), b.clone()]).ok(),
            plain.call([a, b]).ok()
        );
    }

    #[test]
    fn stacked_validation_equals_combined_constraints(n in -20_i64..20) {
        let stacked = validate().arg(Kind::Int).apply(echo(&["n"])).expect("decorates");
        let stacked = validate().arg(0_i64..10).apply(stacked).expect("decorates");

        let accepted = stacked.call([json!(n)]).is_ok();
        prop_assert_eq!(accepted, (0..10).contains(&n));
    }
}
