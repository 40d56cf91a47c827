use proptest::prelude::*;
use sift::{always, field, not, CompareOp, Fields, Value};

/// Generate a random scalar `Value`.
fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("must be finite", |f| f.is_finite())
            .prop_map(Value::Float),
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{1,8}".prop_map(Value::String),
    ]
}

/// Numbers only, mixing integers and floats so widening is exercised.
fn arb_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1000_i64..1000).prop_map(Value::Int),
        (-1000.0_f64..1000.0).prop_map(Value::Float),
        (-1000_i64..1000).prop_map(|n| Value::Float(n as f64)),
    ]
}

const ORDERING_OPS: [CompareOp; 4] = [
    CompareOp::Gt,
    CompareOp::Gte,
    CompareOp::Lt,
    CompareOp::Lte,
];

proptest! {
    /// Comparing any two values under any operator never panics.
    #[test]
    fn compare_never_panics(a in arb_value(), b in arb_value()) {
        for op in [CompareOp::Eq, CompareOp::Gt, CompareOp::Gte, CompareOp::Lt, CompareOp::Lte] {
            let _ = a.compare(op, &b);
        }
    }

    /// Equality is reflexive for finite values.
    #[test]
    fn eq_reflexive(a in arb_value()) {
        prop_assert!(a.compare(CompareOp::Eq, &a));
    }

    /// Equality is symmetric.
    #[test]
    fn eq_symmetric(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(a.compare(CompareOp::Eq, &b), b.compare(CompareOp::Eq, &a));
    }

    /// An integer equals the float of the same magnitude.
    #[test]
    fn int_float_widening(n in -1_000_000_i64..1_000_000) {
        prop_assert!(Value::Int(n).compare(CompareOp::Eq, &Value::Float(n as f64)));
        prop_assert!(Value::Float(n as f64).compare(CompareOp::Lte, &Value::Int(n)));
    }

    /// For numbers, `>=` is exactly `>` or `==`, and `<=` is exactly `<` or `==`.
    #[test]
    fn inclusive_ops_decompose(a in arb_number(), b in arb_number()) {
        let eq = a.compare(CompareOp::Eq, &b);
        prop_assert_eq!(a.compare(CompareOp::Gte, &b), a.compare(CompareOp::Gt, &b) || eq);
        prop_assert_eq!(a.compare(CompareOp::Lte, &b), a.compare(CompareOp::Lt, &b) || eq);
    }

    /// Swapping operands swaps `>` and `<`.
    #[test]
    fn ordering_is_antisymmetric(a in arb_number(), b in arb_number()) {
        prop_assert_eq!(a.compare(CompareOp::Gt, &b), b.compare(CompareOp::Lt, &a));
        prop_assert_eq!(a.compare(CompareOp::Gte, &b), b.compare(CompareOp::Lte, &a));
    }

    /// Exactly one of `<`, `==`, `>` holds between two numbers.
    #[test]
    fn numbers_are_totally_ordered(a in arb_number(), b in arb_number()) {
        let held = [CompareOp::Lt, CompareOp::Eq, CompareOp::Gt]
            .into_iter()
            .filter(|op| a.compare(*op, &b))
            .count();
        prop_assert_eq!(held, 1);
    }

    /// Values of different kinds are never ordered against each other.
    #[test]
    fn mixed_kinds_are_unordered(n in arb_number(), s in "[a-z]{1,8}", b in any::<bool>()) {
        let s = Value::String(s);
        let b = Value::Bool(b);
        for op in ORDERING_OPS {
            prop_assert!(!n.compare(op, &s));
            prop_assert!(!s.compare(op, &n));
            prop_assert!(!b.compare(op, &b));
        }
        prop_assert!(!n.compare(CompareOp::Eq, &s));
    }

    /// NaN fails every operator, on either side.
    #[test]
    fn nan_never_compares(other in arb_number()) {
        let nan = Value::Float(f64::NAN);
        for op in [CompareOp::Eq, CompareOp::Gt, CompareOp::Gte, CompareOp::Lt, CompareOp::Lte] {
            prop_assert!(!nan.compare(op, &other));
            prop_assert!(!other.compare(op, &nan));
        }
    }

    /// Membership is the disjunction of equality over the list.
    #[test]
    fn membership_is_any_eq(
        target in arb_value(),
        list in prop::collection::vec(arb_value(), 0..6),
    ) {
        let expected = list.iter().any(|item| target.compare(CompareOp::Eq, item));
        let rec = Fields::new().set("x", target);
        let m = field("x").is_in(list);
        prop_assert_eq!(m.matches_record(&rec), Ok(expected));
    }

    /// Strict equality implies loose equality.
    #[test]
    fn strict_implies_loose(a in arb_value(), b in arb_value()) {
        let rec = Fields::new().set("x", a);
        let strict = field("x").strict_eq(b.clone()).matches_record(&rec);
        let loose = field("x").eq(b).matches_record(&rec);
        if strict == Ok(true) {
            prop_assert_eq!(loose, Ok(true));
        }
    }

    /// A leaf and its single negation always disagree on a resolvable field.
    #[test]
    fn negation_flips_leaf(a in arb_value(), b in arb_value()) {
        let rec = Fields::new().set("x", a);
        let plain = field("x").eq(b.clone()).matches_record(&rec);
        let negated = not([field("x").eq(b)]).matches_record(&rec);
        prop_assert_eq!(plain.map(|r| !r), negated);
    }

    /// Double negation is the identity.
    #[test]
    fn double_negation(a in arb_value(), b in arb_value()) {
        let rec = Fields::new().set("x", a);
        let plain = field("x").gt(b.clone()).matches_record(&rec);
        let twice = not([not([field("x").gt(b)])]).matches_record(&rec);
        prop_assert_eq!(plain, twice);
    }

    /// An unresolved field is an error no matter the literal.
    #[test]
    fn unknown_field_errors(b in arb_value()) {
        let rec = Fields::new().set("x", 1);
        prop_assert!(field("y").eq(b).matches_record(&rec).is_err());
    }

    /// The true matcher accepts any buffer, even one that does not decode.
    #[test]
    fn true_matches_any_buffer(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(always().matches_encoded(&bytes), Ok(true));
    }
}
