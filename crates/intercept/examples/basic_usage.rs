//! Decorating a function with parsing and validation.
//!
//! Run with: `cargo run -p nebula-intercept --example basic_usage`

use nebula_intercept::prelude::*;
use serde_json::{Value, json};

fn main() -> Result<(), InterceptError> {
    let signature = Signature::new([
        Parameter::required("name"),
        Parameter::required("age"),
        Parameter::optional("role", "member"),
    ])?;

    let register = Function::new("register", signature, |args: &[Value]| {
        Ok::<_, BoxError>(json!([
            format!("{} ({})", args[0].as_str().unwrap_or_default(), args[1]),
            args[2]
        ]))
    });

    // Ages arrive as text; parse them, then check the parsed values.
    let register = parse()
        .skip()
        .arg(Transform::new(|value: Value| -> Result<Value, BoxError> {
            let text = value.as_str().ok_or("age must be text")?;
            Ok(json!(text.parse::<i64>()?))
        }))
        .apply(register)?;

    let register = validate()
        .arg(Kind::Str)
        .arg(0_i64..150)
        .kwarg("role", ValidatorSpec::one_of(["member", "admin"]))
        .apply(register)?;

    println!("{register} with {} processors", register.processors().len());

    let calls = [
        CallArgs::new().arg("ada").arg("36"),
        CallArgs::new().arg("grace").arg("85").kwarg("role", "admin"),
        CallArgs::new().arg("bob").arg("two hundred"),
        CallArgs::new().arg("eve").arg("200"),
        CallArgs::new().arg("mallory").arg("30").kwarg("role", "root"),
    ];

    for args in calls {
        match register.call(args) {
            Ok(result) => println!("  ok:  {result}"),
            Err(error) => println!("  err: {error}"),
        }
    }

    Ok(())
}
