/// Runtime value type shared by the evaluator, the host and the invoker.
///
/// Lists and objects are reference values: cloning a `Value` shares the
/// underlying storage, so a mutation made through one handle (for example a
/// `pop` performed by a K call) is visible through every other handle.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

// ---------------------------------------------------------------------------
// RuntimeError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("Runtime error: {0}")]
    Error(String),
    /// Identifier that is neither a lambda parameter nor an outer binding.
    #[error("Runtime error: '{0}' is not defined")]
    Unresolved(String),
}

// ---------------------------------------------------------------------------
// Function
// ---------------------------------------------------------------------------

type NativeFn = dyn Fn(&[Value]) -> Result<Value, RuntimeError>;

/// A callable value. Arguments arrive positionally; for a function used as a
/// K/T spec the first argument is the receiver.
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    body: Rc<NativeFn>,
}

impl Function {
    pub fn new(
        name: impl Into<Rc<str>>,
        body: impl Fn(&[Value]) -> Result<Value, RuntimeError> + 'static,
    ) -> Self {
        Function {
            name: name.into(),
            body: Rc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, RuntimeError> {
        (self.body)(args)
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name)
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

pub type ListRef = Rc<RefCell<Vec<Value>>>;
pub type ObjectRef = Rc<RefCell<Vec<(String, Value)>>>;

#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(ListRef),
    /// Ordered field bag; a field holding a `Function` is a method.
    Object(ObjectRef),
    Function(Function),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Value {
        Value::Str(s.into())
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Value {
        let fields = fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Object(Rc::new(RefCell::new(fields)))
    }

    pub fn function(
        name: impl Into<Rc<str>>,
        body: impl Fn(&[Value]) -> Result<Value, RuntimeError> + 'static,
    ) -> Value {
        Value::Function(Function::new(name, body))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) | Value::Object(_) | Value::Function(_) => true,
        }
    }

    /// Identity check: reference values must share storage, scalars compare by value.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => self == other,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Look up an object field by name.
    pub fn field(&self, name: &str) -> Option<Value> {
        let Value::Object(fields) = self else {
            return None;
        };
        fields
            .borrow()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}

/// Structural equality; functions compare by identity. A list or object that
/// contains itself compares equal to any structure it is still being compared
/// against further up, so cycles terminate.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        structural_eq(self, other, &mut Vec::new())
    }
}

fn structural_eq(a: &Value, b: &Value, seen: &mut Vec<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::List(x), Value::List(y)) => {
            let key = (ref_id(x), ref_id(y));
            if Rc::ptr_eq(x, y) || seen.contains(&key) {
                return true;
            }
            seen.push(key);
            let (x, y) = (x.borrow(), y.borrow());
            let equal = x.len() == y.len()
                && x.iter().zip(y.iter()).all(|(l, r)| structural_eq(l, r, seen));
            seen.pop();
            equal
        }
        (Value::Object(x), Value::Object(y)) => {
            let key = (ref_id(x), ref_id(y));
            if Rc::ptr_eq(x, y) || seen.contains(&key) {
                return true;
            }
            seen.push(key);
            let (x, y) = (x.borrow(), y.borrow());
            let equal = x.len() == y.len()
                && x
                    .iter()
                    .zip(y.iter())
                    .all(|((lk, lv), (rk, rv))| lk == rk && structural_eq(lv, rv, seen));
            seen.pop();
            equal
        }
        (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
        _ => false,
    }
}

fn ref_id<T>(rc: &Rc<T>) -> usize {
    Rc::as_ptr(rc) as *const () as usize
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Human-readable representation; strings are shown bare. A list or object
/// reached again while it is being printed shows as `[...]` or `{...}`.
pub fn repr(val: &Value) -> String {
    let mut out = String::new();
    write_repr(val, false, &mut Vec::new(), &mut out);
    out
}

/// Like `repr` but strings get quoted; used inside lists and objects.
pub fn repr_inner(val: &Value) -> String {
    let mut out = String::new();
    write_repr(val, true, &mut Vec::new(), &mut out);
    out
}

fn write_repr(val: &Value, quoted: bool, seen: &mut Vec<usize>, out: &mut String) {
    match val {
        Value::Undefined => out.push_str("undefined"),
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(&b.to_string()),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&format_float(*f)),
        Value::Str(s) if quoted => {
            out.push('\'');
            out.push_str(&s.replace('\'', "\\'"));
            out.push('\'');
        }
        Value::Str(s) => out.push_str(s),
        Value::List(items) => {
            let id = ref_id(items);
            if seen.contains(&id) {
                out.push_str("[...]");
                return;
            }
            seen.push(id);
            out.push('[');
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(item, true, seen, out);
            }
            out.push(']');
            seen.pop();
        }
        Value::Object(fields) => {
            let id = ref_id(fields);
            if seen.contains(&id) {
                out.push_str("{...}");
                return;
            }
            seen.push(id);
            out.push('{');
            for (i, (k, v)) in fields.borrow().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(k);
                out.push_str(": ");
                write_repr(v, true, seen, out);
            }
            out.push('}');
            seen.pop();
        }
        Value::Function(f) => {
            out.push_str("<fn ");
            out.push_str(f.name());
            out.push('>');
        }
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Lists and objects print through `repr`, which is safe on cycles.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(x) => write!(f, "Float({:?})", x),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::List(_) => write!(f, "List({})", repr(self)),
            Value::Object(_) => write!(f, "Object({})", repr(self)),
            Value::Function(func) => write!(f, "{:?}", func),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&repr(self))
    }
}
