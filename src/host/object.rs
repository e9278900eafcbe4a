/// Object members are its fields. A field holding a function is a method and
/// is called with the object itself as the first argument.
use super::Member;
use crate::value::{RuntimeError, Value};

pub fn member(obj: &Value, name: &str) -> Option<Member> {
    match obj.field(name)? {
        Value::Function(_) => Some(Member::Method),
        other => Some(Member::Property(other)),
    }
}

pub fn call(obj: &Value, name: &str, args: &[Value]) -> Option<Result<Value, RuntimeError>> {
    let Some(Value::Function(f)) = obj.field(name) else {
        return None;
    };
    let mut call_args = Vec::with_capacity(args.len() + 1);
    call_args.push(obj.clone());
    call_args.extend(args.iter().cloned());
    Some(f.call(&call_args))
}
