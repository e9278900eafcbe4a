/// Number members: `toFixed(digits?)` and `toString()`.
use super::{int_arg, Member};
use crate::value::{repr, RuntimeError, Value};

pub fn member(name: &str) -> Option<Member> {
    match name {
        "toFixed" | "toString" => Some(Member::Method),
        _ => None,
    }
}

pub fn call(n: &Value, name: &str, args: &[Value]) -> Option<Result<Value, RuntimeError>> {
    let result = match name {
        "toString" => Ok(Value::Str(repr(n))),
        "toFixed" => to_fixed(n, args),
        _ => return None,
    };
    Some(result)
}

fn to_fixed(n: &Value, args: &[Value]) -> Result<Value, RuntimeError> {
    let digits = int_arg("toFixed", args, 0)?.unwrap_or(0);
    if !(0..=100).contains(&digits) {
        return Err(RuntimeError::Error(format!(
            "toFixed: digits must be between 0 and 100, got {}",
            digits
        )));
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    Ok(Value::Str(format!("{:.*}", digits as usize, f)))
}
