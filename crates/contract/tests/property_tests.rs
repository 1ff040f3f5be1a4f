//! Property-based tests for nebula-contract.

use nebula_contract::prelude::*;
use proptest::prelude::*;

fn any_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::None),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e9f64..1.0e9).prop_map(Value::Float),
        "[a-z]{0,8}".prop_map(Value::Str),
    ];
    leaf.prop_recursive(2, 8, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(inner, 0..4).prop_map(Value::Tuple),
        ]
    })
}

fn any_shortcut() -> impl Strategy<Value = Shortcut> {
    prop::sample::select(Shortcut::ALL.to_vec())
}

fn echo() -> Function {
    Function::parse("echo(a, **rest)", |args| Ok(args.get(0, "a")?.clone()))
        .expect("signature parses")
}

// ============================================================================
// NEGATION: exactly one of S and ~S rejects a value
// ============================================================================

proptest! {
    #[test]
    fn negation_is_mutually_exclusive(shortcut in any_shortcut(), value in any_value()) {
        let plain = shortcut.check("x", &value).is_ok();
        let negated = shortcut.negate().check("x", &value).is_ok();
        prop_assert_ne!(plain, negated);
    }

    #[test]
    fn even_and_odd_partition_integers(n in any::<i64>()) {
        let value = Value::Int(n);
        let even = Shortcut::Even.check("x", &value).is_ok();
        let odd = Shortcut::Odd.check("x", &value).is_ok();
        prop_assert_ne!(even, odd);
    }
}

// ============================================================================
// TRANSPARENCY: unruled arguments behave as if unwrapped
// ============================================================================

proptest! {
    #[test]
    fn unruled_keywords_are_transparent(a in any_value(), extra in any_value()) {
        let wrapped = validate_inputs([("a", Rule::Absent)]).apply(echo()).unwrap();
        let call = Args::new().with(a).with_keyword("extra", extra);

        let expected = echo().call(&call).unwrap();
        prop_assert_eq!(wrapped.call(&call).unwrap(), expected);
    }

    #[test]
    fn raw_result_is_returned(items in prop::collection::vec(any::<i64>(), 0..5)) {
        let tuple = Value::tuple(items.iter().copied());
        let wrapped = validate_outputs(Some(-1), [ValueType::Tuple]).apply(echo()).unwrap();
        prop_assert_eq!(wrapped.call(&Args::new().with(tuple.clone())).unwrap(), tuple);
    }
}

// ============================================================================
// TYPE RULES: mismatches name the argument and both types
// ============================================================================

proptest! {
    #[test]
    fn type_mismatch_names_both_types(value in any_value()) {
        let wrapped = validate_inputs([("a", ValueType::Int)]).apply(echo()).unwrap();
        let result = wrapped.call(&Args::new().with(value.clone()));

        if ValueType::Int.is_instance(&value) {
            prop_assert!(result.is_ok());
        } else {
            let message = result.unwrap_err().to_string();
            prop_assert_eq!(
                message,
                format!(
                    "Incorrect type for variable 'a': expected int but got {} instead",
                    value.type_name()
                )
            );
        }
    }

    #[test]
    fn exact_count_matches_tuple_length(len in 0usize..6, expected in 0i64..6) {
        let tuple = Value::tuple(vec![0; len]);
        let wrapped = validate_outputs(Some(expected), Vec::<Rule>::new()).apply(echo()).unwrap();
        let ok = wrapped.call(&Args::new().with(tuple)).is_ok();
        prop_assert_eq!(ok, i64::try_from(len).unwrap() == expected);
    }
}
