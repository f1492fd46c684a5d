//! End-to-end tests: decorators applied to functions, called through the
//! prelude the way a consumer would.

use nebula_intercept::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn function(name: &str, params: &[&str], body: fn(&[Value]) -> Value) -> Function {
    Function::new(
        name,
        Signature::from_names(params.iter().copied()).expect("valid names"),
        move |args: &[Value]| Ok::<_, BoxError>(body(args)),
    )
}

fn to_int() -> Transform {
    Transform::new(|value: Value| -> Result<Value, BoxError> {
        let text = value.as_str().ok_or("expected a string")?;
        Ok(json!(text.trim().parse::<i64>()?))
    })
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn validate_int_and_str() -> anyhow::Result<()> {
    let f = validate()
        .arg(Kind::Int)
        .arg(Kind::Str)
        .apply(function("f", &["a", "b"], |args| args[0].clone()))?;

    assert_eq!(f.call([json!(1), json!("x")])?, json!(1));

    let err = f.call([json!(1), json!(2)]).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.index(), Some(1));
    assert_eq!(err.message(), Some("Type str expected but got int"));
    Ok(())
}

#[test]
fn parse_then_identity() -> anyhow::Result<()> {
    let f = parse()
        .arg(to_int())
        .skip()
        .apply(function("f", &["a", "b"], |args| {
            json!([args[0], args[1]])
        }))?;

    assert_eq!(f.call([json!("5"), json!("y")])?, json!([5, "y"]));

    let err = f.call([json!("five"), json!("y")]).unwrap_err();
    assert!(err.is_parsing());
    assert_eq!(err.index(), Some(0));
    Ok(())
}

#[test]
fn none_result_with_output_processors() -> anyhow::Result<()> {
    let mut f = Wrapper::new(function("nothing", &["a"], |_| Value::Null));
    f.append(ParseOutput::new(Vec::<Option<Transform>>::new()));
    f.append(ParseOutput::new(Vec::<Option<Transform>>::new()));

    assert_eq!(f.call([json!(1)])?, Value::Null);
    Ok(())
}

#[test]
fn two_results_without_output_processors() -> anyhow::Result<()> {
    let f = validate()
        .arg(EmptyValidator)
        .apply(function("swap", &["a", "b"], |args| json!([args[1], args[0]])))?;
    assert_eq!(f.call([json!(1), json!(2)])?, json!([2, 1]));
    Ok(())
}

// ============================================================================
// SPECS ACCEPTED BY validate()
// ============================================================================

#[rstest]
#[case::kind(ValidatorSpec::from(Kind::Number), json!(2.5), true)]
#[case::kind_rejects(ValidatorSpec::from(Kind::Number), json!("2.5"), false)]
#[case::literal(ValidatorSpec::from("on"), json!("on"), true)]
#[case::literal_rejects(ValidatorSpec::from("on"), json!("off"), false)]
#[case::set(ValidatorSpec::one_of([1, 2, 3]), json!(2), true)]
#[case::set_rejects(ValidatorSpec::one_of([1, 2, 3]), json!(4), false)]
#[case::range(ValidatorSpec::from(1_i64..4), json!(3), true)]
#[case::range_rejects(ValidatorSpec::from(1_i64..4), json!(4), false)]
#[case::mapping(ValidatorSpec::from(json!({"low": 1, "high": 2})), json!("low"), true)]
#[case::mapping_rejects(ValidatorSpec::from(json!({"low": 1, "high": 2})), json!(1), false)]
#[case::predicate(ValidatorSpec::predicate(|v| v.as_i64().is_some_and(|n| n % 2 == 0)), json!(4), true)]
#[case::predicate_rejects(ValidatorSpec::predicate(|v| v.as_i64().is_some_and(|n| n % 2 == 0)), json!(5), false)]
#[case::any(ValidatorSpec::Any, json!({"anything": true}), true)]
fn validate_spec_kinds(#[case] spec: ValidatorSpec, #[case] arg: Value, #[case] accepted: bool) {
    let f = validate()
        .arg(spec)
        .apply(function("f", &["x"], |args| args[0].clone()))
        .expect("decorates");
    assert_eq!(f.call([arg]).is_ok(), accepted);
}

#[test]
fn composed_spec() -> anyhow::Result<()> {
    let id = TypeValidator::new([Kind::Int]).or(TypeValidator::new([Kind::Str]));
    let f = validate()
        .kwarg("id", id)
        .apply(function("lookup", &["id"], |args| args[0].clone()))?;

    assert_eq!(f.call([json!(7)])?, json!(7));
    assert_eq!(f.call(CallArgs::new().kwarg("id", "seven"))?, json!("seven"));

    let err = f.call([json!(7.5)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "argument 0 failed validation: Type int expected but got float; \
         Type str expected but got float"
    );
    Ok(())
}

#[test]
fn user_validator_message() -> anyhow::Result<()> {
    let positive = UserValidator::named("positive", |v| v.as_f64().is_some_and(|n| n > 0.0));
    let f = validate()
        .arg(positive)
        .apply(function("f", &["n"], |args| args[0].clone()))?;

    let err = f.call([json!(-3)]).unwrap_err();
    assert_eq!(
        err.message(),
        Some("Expression positive(-3) evaluated to False")
    );
    Ok(())
}

// ============================================================================
// CHAIN ORDERING
// ============================================================================

#[test]
fn validation_sees_parsed_arguments() -> anyhow::Result<()> {
    let f = parse()
        .arg(to_int())
        .apply(function("f", &["n"], |args| args[0].clone()))?;
    let f = validate().arg(0_i64..10).apply(f)?;

    assert_eq!(f.processors().len(), 2);
    assert_eq!(f.call([json!(" 7 ")])?, json!(7));
    assert!(f.call([json!("70")]).unwrap_err().is_validation());
    Ok(())
}

#[test]
fn output_processors_run_in_reverse() -> anyhow::Result<()> {
    let mut f = Wrapper::new(function("f", &["n"], |args| args[0].clone()));
    f.append(ParseOutput::new([Some(Transform::map(|v| {
        json!(format!("{}+outer", v.as_str().unwrap_or_default()))
    }))]));
    f.append(ParseOutput::new([Some(Transform::map(|v| {
        json!(format!("{}+inner", v.as_str().unwrap_or_default()))
    }))]));

    assert_eq!(f.call([json!("x")])?, json!("x+inner+outer"));
    Ok(())
}

// ============================================================================
// METHODS AND MANIFESTS
// ============================================================================

#[test]
fn bound_method_prepends_receiver() -> anyhow::Result<()> {
    let method = validate()
        .arg(ValidatorSpec::Any)
        .arg(Kind::Int)
        .apply(function("scale", &["self", "factor"], |args| {
            json!(args[0]["size"].as_i64().unwrap_or(0) * args[1].as_i64().unwrap_or(0))
        }))?;

    let instance = json!({"size": 4});
    let bound = method.get(Some(instance));
    assert!(bound.is_bound());
    assert_eq!(bound.call(CallArgs::new().arg(3))?, json!(12));
    assert!(bound.call(CallArgs::new().arg("3")).unwrap_err().is_validation());

    let unbound = method.get(None);
    assert_eq!(
        unbound.call(CallArgs::new().arg(json!({"size": 2})).arg(5))?,
        json!(10)
    );
    Ok(())
}

#[test]
fn signature_from_manifest() -> anyhow::Result<()> {
    let signature: Signature = serde_json::from_value(json!({
        "parameters": [{"name": "host"}, {"name": "port", "default": 8080}]
    }))?;
    let connect = Function::new("connect", signature, |args: &[Value]| {
        Ok::<_, BoxError>(json!(format!(
            "{}:{}",
            args[0].as_str().unwrap_or_default(),
            args[1]
        )))
    });
    let connect = validate()
        .kwarg("port", 1_i64..65536)
        .apply(connect)?;

    assert_eq!(connect.call([json!("localhost")])?, json!("localhost:8080"));
    assert_eq!(
        connect.call(CallArgs::new().arg("db").kwarg("port", 5432))?,
        json!("db:5432")
    );
    assert!(connect.call(CallArgs::new().arg("db").kwarg("port", 0)).is_err());
    assert_eq!(connect.to_string(), "<function connect(host, port=8080)>");
    Ok(())
}

#[test]
fn body_failure_is_reported() {
    let f = Wrapper::new(Function::new(
        "fails",
        Signature::default(),
        |_: &[Value]| Err::<Value, _>("disk full"),
    ));
    let err = f.call(CallArgs::new()).unwrap_err();
    assert!(matches!(err, InterceptError::Call(_)));
    assert_eq!(err.to_string(), "wrapped function failed: disk full");
}
