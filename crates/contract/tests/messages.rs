//! Rendered error messages, pinned with inline snapshots.

use insta::assert_snapshot;
use nebula_contract::prelude::*;

fn wrapped() -> ValidatedFunction {
    let function = Function::parse("scale(a, b)", |args| {
        Ok(Value::tuple([args.get(0, "a")?.clone(), args.get(1, "b")?.clone()]))
    })
    .expect("signature parses");

    validate_inputs([
        ("a", Rule::from(ValueType::Int)),
        ("b", Rule::predicate(|v: &Value| v != &Value::from("bad"))),
    ])
    .apply(function)
    .and_then(|f| validate_outputs(Some(2), [Rule::Absent, Rule::from("~number")]).apply(f))
    .expect("contract applies")
}

fn fail(args: &Args) -> String {
    wrapped().call(args).expect_err("call should fail").to_string()
}

#[test]
fn type_mismatch() {
    assert_snapshot!(
        fail(&args![(1, 2), "x"]),
        @"Incorrect type for variable 'a': expected int but got tuple instead"
    );
}

#[test]
fn invalid_value() {
    assert_snapshot!(fail(&args![1, "bad"]), @"Invalid value for variable 'b': bad");
}

#[test]
fn duplicate_argument() {
    assert_snapshot!(
        fail(&args![1; a = 2]),
        @"scale() got multiple values for argument 'a'"
    );
}

#[test]
fn negation_passed_on_output() {
    assert_snapshot!(
        fail(&args![1, 2.5]),
        @"Validation for 'number' passed when it shouldn't have"
    );
}

#[test]
fn nested_strings_are_quoted() {
    let rule = Rule::predicate(|_: &Value| false);
    let err = rule
        .check("items", &Value::list([Value::from("x"), Value::tuple([1])]))
        .unwrap_err();
    assert_snapshot!(err.to_string(), @"Invalid value for variable 'items': ['x', (1,)]");
}

#[test]
fn arity() {
    let f = validate_outputs(Some(3), Vec::<Rule>::new())
        .apply(Function::parse("one()", |_| Ok(1)).expect("signature parses"))
        .expect("contract applies");
    assert_snapshot!(
        f.call(&args![]).unwrap_err().to_string(),
        @"Expected 3 items returned but got 1"
    );
}
