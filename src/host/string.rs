/// String members.
///
/// Property:
///   length                  → Int       — char count (code points)
///
/// Methods:
///   toUpperCase()           → String
///   toLowerCase()           → String
///   trim()                  → String
///   charAt(i)               → String    — "" when out of range
///   indexOf(sub)            → Int       — char offset, -1 when absent
///   includes(sub)           → Bool
///   startsWith(pre)         → Bool
///   endsWith(suf)           → Bool
///   slice(from, to?)        → String    — negative bounds count from the end
///   split(sep)              → List<String>
///   concat(...parts)        → String
///   repeat(n)               → String    — error past MAX_STRING_LEN bytes
///   toString()              → String
use super::{arg, clamp_index, int_arg, str_arg, Member};
use crate::value::{repr, RuntimeError, Value};

/// Upper bound on the byte length of a string built by `repeat`.
const MAX_STRING_LEN: usize = 1 << 28;

const METHODS: &[&str] = &[
    "toUpperCase",
    "toLowerCase",
    "trim",
    "charAt",
    "indexOf",
    "includes",
    "startsWith",
    "endsWith",
    "slice",
    "split",
    "concat",
    "repeat",
    "toString",
];

pub fn member(s: &str, name: &str) -> Option<Member> {
    match name {
        "length" => Some(Member::Property(Value::Int(s.chars().count() as i64))),
        _ if METHODS.contains(&name) => Some(Member::Method),
        _ => None,
    }
}

/// Returns `Some(result)` when `name` is a string method, `None` otherwise.
pub fn call(s: &str, name: &str, args: &[Value]) -> Option<Result<Value, RuntimeError>> {
    let result = match name {
        "toUpperCase" => Ok(Value::str(s.to_uppercase())),
        "toLowerCase" => Ok(Value::str(s.to_lowercase())),
        "trim" => Ok(Value::str(s.trim())),
        "toString" => Ok(Value::str(s)),
        "charAt" => char_at(s, args),
        "indexOf" => index_of(s, args),
        "includes" => str_arg("includes", args, 0).map(|sub| Value::Bool(s.contains(&sub))),
        "startsWith" => str_arg("startsWith", args, 0).map(|p| Value::Bool(s.starts_with(&p))),
        "endsWith" => str_arg("endsWith", args, 0).map(|p| Value::Bool(s.ends_with(&p))),
        "slice" => slice(s, args),
        "split" => split(s, args),
        "concat" => Ok(concat(s, args)),
        "repeat" => repeat(s, args),
        _ => return None,
    };
    Some(result)
}

// ─── Implementations ────────────────────────────────────────────────────────

fn char_at(s: &str, args: &[Value]) -> Result<Value, RuntimeError> {
    let idx = int_arg("charAt", args, 0)?.unwrap_or(0);
    if idx < 0 {
        return Ok(Value::str(""));
    }
    let ch = s.chars().nth(idx as usize).map(String::from).unwrap_or_default();
    Ok(Value::Str(ch))
}

fn index_of(s: &str, args: &[Value]) -> Result<Value, RuntimeError> {
    let needle = str_arg("indexOf", args, 0)?;
    let found = s
        .find(&needle)
        .map(|byte_idx| s[..byte_idx].chars().count() as i64)
        .unwrap_or(-1);
    Ok(Value::Int(found))
}

fn slice(s: &str, args: &[Value]) -> Result<Value, RuntimeError> {
    let chars: Vec<char> = s.chars().collect();
    let from = clamp_index(int_arg("slice", args, 0)?.unwrap_or(0), chars.len());
    let to = match int_arg("slice", args, 1)? {
        Some(to) => clamp_index(to, chars.len()),
        None => chars.len(),
    };
    if from >= to {
        return Ok(Value::str(""));
    }
    Ok(Value::Str(chars[from..to].iter().collect()))
}

fn split(s: &str, args: &[Value]) -> Result<Value, RuntimeError> {
    let parts: Vec<Value> = match arg(args, 0) {
        Value::Undefined => vec![Value::str(s)],
        Value::Str(sep) if sep.is_empty() => s.chars().map(|c| Value::Str(c.to_string())).collect(),
        Value::Str(sep) => s.split(sep.as_str()).map(Value::str).collect(),
        other => {
            return Err(RuntimeError::Error(format!(
                "split: separator must be a string, got {}",
                other.type_name()
            )))
        }
    };
    Ok(Value::list(parts))
}

fn concat(s: &str, args: &[Value]) -> Value {
    let mut out = s.to_string();
    for a in args {
        out.push_str(&repr(a));
    }
    Value::Str(out)
}

fn repeat(s: &str, args: &[Value]) -> Result<Value, RuntimeError> {
    let count = int_arg("repeat", args, 0)?.unwrap_or(0);
    if count < 0 {
        return Err(RuntimeError::Error(format!(
            "repeat: count must be non-negative, got {}",
            count
        )));
    }
    let count = usize::try_from(count)
        .ok()
        .filter(|&n| s.len().checked_mul(n).is_some_and(|len| len <= MAX_STRING_LEN));
    match count {
        Some(n) => Ok(Value::Str(s.repeat(n))),
        None => Err(RuntimeError::Error(format!(
            "repeat: result would exceed {} bytes",
            MAX_STRING_LEN
        ))),
    }
}
